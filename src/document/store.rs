// store.rs - Loading and persisting documents

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

use super::{Document, ParseError, RenderError};

/// Errors raised by a [`DocumentStore`]
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("cannot read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("cannot write '{path}': {source}")]
    Render {
        path: PathBuf,
        #[source]
        source: RenderError,
    },
}

/// Where a document comes from and goes back to
pub trait DocumentStore {
    /// Location shown in diagnostics
    fn location(&self) -> &Path;

    fn load(&self) -> Result<Document, StoreError>;

    fn persist(&self, document: &Document) -> Result<(), StoreError>;
}

/// INI file on the local filesystem.
///
/// `persist` writes a temporary file next to the target and renames it over
/// the original, so readers see either the old or the new content.
#[derive(Debug, Clone)]
pub struct IniFileStore {
    path: PathBuf,
}

impl IniFileStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    fn write_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Write {
            path: self.path.clone(),
            source,
        }
    }
}

impl DocumentStore for IniFileStore {
    fn location(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Document, StoreError> {
        let text = fs::read_to_string(&self.path).map_err(|source| StoreError::Read {
            path: self.path.clone(),
            source,
        })?;

        Document::parse(&text).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    fn persist(&self, document: &Document) -> Result<(), StoreError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let text = document.render().map_err(|source| StoreError::Render {
            path: self.path.clone(),
            source,
        })?;

        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| self.write_error(e))?;
        tmp.write_all(text.as_bytes())
            .map_err(|e| self.write_error(e))?;
        tmp.flush().map_err(|e| self.write_error(e))?;

        // Keep the mode of the file being replaced
        if let Ok(metadata) = fs::metadata(&self.path) {
            fs::set_permissions(tmp.path(), metadata.permissions())
                .map_err(|e| self.write_error(e))?;
        }

        tmp.persist(&self.path).map_err(|e| self.write_error(e.error))?;
        Ok(())
    }
}

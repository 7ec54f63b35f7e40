// error.rs - Error taxonomy for an edit run

use thiserror::Error;

use crate::document::StoreError;

/// Every way an edit run can fail. Nothing is persisted when one is returned.
#[derive(Debug, Error)]
pub enum EditError {
    /// `--add` did not split into exactly one key and one value
    #[error("Invalid parameter value... {0}")]
    InvalidAddSpec(String),

    /// The key or value has no INI spelling that reads back unchanged
    #[error("cannot store '{0}': no INI quoting keeps this key or value intact")]
    UnwritableOption(String),

    /// No `--section` given and the document declares no sections
    #[error("no section to edit: the file has no sections and --section was not given")]
    NoResolvableSection,

    #[error("section [{0}] not found")]
    SectionNotFound(String),

    #[error("option '{key}' not found in section [{section}]")]
    MissingKeyOnRemove { section: String, key: String },

    #[error("--filename is required")]
    MissingFilename,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("{0}")]
    Config(String),

    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

impl EditError {
    /// Process exit status for this error. A malformed `--add` keeps its
    /// historical `-1`; everything else exits with `1`.
    pub fn exit_code(&self) -> i32 {
        match self {
            EditError::InvalidAddSpec(_) => -1,
            _ => 1,
        }
    }
}

// lib.rs - configsetup library root

//! # configsetup - command-line editor for INI configuration files
//!
//! Loads an INI file, removes and/or adds one option in a section, attaches
//! comment lines to that option and rewrites the file in place.
//!
//! ## Features
//!
//! - **Comment preserving**: file, section and option comments survive a rewrite
//! - **Section defaulting**: the first declared section is edited when none is named
//! - **Atomic rewrite**: the target is replaced through a temporary file
//! - **Fail before write**: a bad `--add` or a missing key never touches the file
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use configsetup::prelude::*;
//!
//! let options = EditOptions {
//!     filename: "settings.ini".to_string(),
//!     add: "bar=2".to_string(),
//!     comment: "added by hand".to_string(),
//!     ..EditOptions::default()
//! };
//!
//! let store = IniFileStore::new(&options.filename);
//! let (_document, report) = run_edit(&store, &options)?;
//! assert!(report.persisted);
//! # Ok::<(), EditError>(())
//! ```

pub mod cli;
pub mod core;
pub mod document;
pub mod output;

// Convenience prelude for common imports
pub mod prelude {
    pub use crate::cli::{validate_args, Args, Config};
    pub use crate::core::{apply_edits, resolve_section, run_edit, run_edit_with};
    pub use crate::core::{AddSpec, EditError, EditOptions, EditPlan, EditReport};
    pub use crate::document::{Document, DocumentStore, IniFileStore, Section};
}

// Re-export main types at the root level for convenience
pub use crate::cli::Args;
pub use crate::core::{EditError, EditOptions, EditReport};
pub use crate::document::{Document, Section};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library information
pub fn get_info() -> String {
    format!("configsetup v{} - INI configuration editor", VERSION)
}

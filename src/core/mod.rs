// mod.rs - Core edit logic module

pub mod edit;
pub mod error;

// Re-export main types for convenience
pub use edit::{
    apply_edits, parse_comments, resolve_section, run_edit, run_edit_with, AddSpec, AddedOption,
    EditOptions, EditPlan, EditReport, RemovedOption,
};
pub use error::EditError;

// validation.rs - Turn parsed arguments into edit options

use crate::cli::args::Args;
use crate::core::{EditError, EditOptions};

/// Validate command line arguments and build the options record.
///
/// Only the presence of `--filename` is checked here; the add spec is
/// validated by the edit step itself.
pub fn validate_args(args: &Args) -> Result<EditOptions, EditError> {
    let filename = match args.filename.as_deref() {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => return Err(EditError::MissingFilename),
    };

    let section = if args.section.is_empty() {
        None
    } else {
        Some(args.section.clone())
    };

    Ok(EditOptions {
        filename,
        section,
        add: args.add.clone(),
        remove: args.remove.clone(),
        comment: args.comment.clone(),
        verbose: args.verbose,
        print: args.print,
        dry_run: args.dry_run,
    })
}

// merge.rs - Merge configuration file with CLI arguments

use crate::cli::{Args, Config};
use crate::core::EditError;

impl Args {
    /// Merge with configuration from file
    /// CLI arguments take precedence over config file values
    pub fn merge_with_config(mut self, config: Config) -> Self {
        if self.filename.is_none() {
            self.filename = config.filename;
        }

        // Empty string is the "not given" default for --section
        if self.section.is_empty() {
            if let Some(section) = config.section {
                self.section = section;
            }
        }

        // Flags (CLI flags take precedence, config only sets if not explicitly set)
        if !self.verbose && config.verbose.unwrap_or(false) {
            self.verbose = true;
        }
        if !self.dry_run && config.dry_run.unwrap_or(false) {
            self.dry_run = true;
        }

        self
    }

    /// Load configuration and merge with CLI args
    pub fn with_config_file(self, config_path: &str) -> Result<Self, EditError> {
        let config = Config::from_file(config_path)?;
        Ok(self.merge_with_config(config))
    }
}

// config.rs - Configuration file support

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::core::EditError;

/// Defaults loaded from a TOML file with `--config`.
/// Command line arguments always win over these values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// INI file to edit
    pub filename: Option<String>,
    /// Section to edit when `--section` is not given
    pub section: Option<String>,
    pub verbose: Option<bool>,
    pub dry_run: Option<bool>,
}

impl Config {
    /// Create a new empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, EditError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            EditError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_toml(&content).map_err(|e| {
            EditError::Config(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Generate a sample configuration file with comments
    pub fn generate_sample() -> String {
        format!(
            r#"# configsetup.toml - Configuration file for configsetup
# Generated: {}
# Command line arguments will override these settings

# INI file to edit (same as --filename)
filename = "/path/to/settings.ini"

# Section to edit when --section is not given.
# Omit to use the first section of the file.
# section = "general"

# Show the resolved options and every change (same as --verbose)
verbose = false

# Print the result instead of rewriting the file (same as --dry-run)
dry_run = false
"#,
            chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_sample_is_valid_toml() {
        let config = Config::from_toml(&Config::generate_sample()).unwrap();

        assert_eq!(config.filename.as_deref(), Some("/path/to/settings.ini"));
        assert_eq!(config.section, None);
        assert_eq!(config.verbose, Some(false));
        assert_eq!(config.dry_run, Some(false));
    }

    #[test]
    fn test_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("configsetup.toml");
        fs::write(&path, "filename = \"app.ini\"\nsection = \"extra\"\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.filename.as_deref(), Some("app.ini"));
        assert_eq!(config.section.as_deref(), Some("extra"));
        assert_eq!(config.verbose, None);
    }

    #[test]
    fn test_from_file_errors() {
        let dir = tempdir().unwrap();
        let missing = Config::from_file(dir.path().join("missing.toml")).unwrap_err();
        assert!(missing.to_string().contains("Failed to read config file"));

        let path = dir.path().join("bad.toml");
        fs::write(&path, "filename = [").unwrap();
        let bad = Config::from_file(&path).unwrap_err();
        assert!(bad.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let config = Config::from_toml("filename = \"a.ini\"\ncolor = \"blue\"\n").unwrap();
        assert_eq!(config, Config {
            filename: Some("a.ini".to_string()),
            ..Config::new()
        });
    }
}

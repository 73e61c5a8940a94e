//! @ai:module:intent Configuration for loading and checking kata content
//! @ai:module:layer infrastructure
//! @ai:module:public_api StoreConfig, ContentConfig, CheckConfig
//! @ai:module:depends_on blank, error
//! @ai:module:stateless true

use crate::blank::{BlankMarker, DEFAULT_BLANK_MARKER};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// @ai:intent Top-level configuration, usually read from katas.toml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub content: ContentConfig,
    #[serde(default)]
    pub check: CheckConfig,
}

/// @ai:intent How content documents are found and scanned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentConfig {
    #[serde(default = "default_blank_marker")]
    pub blank_marker: String,
    /// File extension picked up when loading a directory.
    #[serde(default = "default_extension")]
    pub extension: String,
}

/// @ai:intent Which optional checks run and how strict they are
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckConfig {
    /// A kata without blank markers is an error rather than a warning.
    #[serde(default = "default_true")]
    pub require_blanks: bool,
    #[serde(default = "default_true")]
    pub warn_no_blanks: bool,
    #[serde(default = "default_true")]
    pub warn_empty_preparagraph: bool,
    /// Treat warnings as load failures.
    #[serde(default)]
    pub deny_warnings: bool,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            blank_marker: default_blank_marker(),
            extension: default_extension(),
        }
    }
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            require_blanks: true,
            warn_no_blanks: true,
            warn_empty_preparagraph: true,
            deny_warnings: false,
        }
    }
}

fn default_blank_marker() -> String {
    DEFAULT_BLANK_MARKER.to_string()
}

fn default_extension() -> String {
    "json".to_string()
}

fn default_true() -> bool {
    true
}

impl StoreConfig {
    /// @ai:intent Load configuration from a TOML file
    /// @ai:pre path exists and is readable
    /// @ai:effects fs:read
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| crate::Error::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// @ai:intent Save configuration to a TOML file
    /// @ai:effects fs:write
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// @ai:intent Build the blank marker scanner this configuration describes
    /// @ai:effects pure
    pub fn blank_marker(&self) -> Result<BlankMarker> {
        BlankMarker::new(&self.content.blank_marker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: StoreConfig = toml::from_str("").unwrap();
        assert_eq!(config, StoreConfig::default());
        assert_eq!(config.content.blank_marker, "__");
        assert!(config.check.require_blanks);
        assert!(config.check.warn_no_blanks);
        assert!(!config.check.deny_warnings);
    }

    #[test]
    fn test_partial_toml() {
        let config: StoreConfig = toml::from_str(
            r#"
[content]
blank_marker = "???"

[check]
require_blanks = false
deny_warnings = true
"#,
        )
        .unwrap();

        assert_eq!(config.content.blank_marker, "???");
        assert_eq!(config.content.extension, "json");
        assert!(config.check.deny_warnings);
        assert!(!config.check.require_blanks);
        assert!(config.check.warn_empty_preparagraph);
    }

    #[test]
    fn test_save_and_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("katas.toml");

        let mut config = StoreConfig::default();
        config.check.warn_no_blanks = false;
        config.save(&path).unwrap();

        assert_eq!(StoreConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_invalid_blank_marker() {
        let mut config = StoreConfig::default();
        config.content.blank_marker = String::new();
        assert!(config.blank_marker().is_err());
    }
}

//! Configuration loader

use crate::config::ShellConfig;
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Configuration loader for various formats
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<ShellConfig> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read config file: {}", e)))?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        match ext {
            "json" => Self::from_json(&content),
            "toml" | "" => Self::from_toml(&content),
            _ => Err(Error::Config(format!("Unknown config format: {}", ext))),
        }
    }

    /// Load the explicit path if given, otherwise the default location.
    ///
    /// A missing default file yields the built-in defaults; a missing
    /// explicit file is an error.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<ShellConfig> {
        if let Some(path) = explicit {
            tracing::debug!("Loading config from {:?}", path);
            return Self::load(path);
        }

        match Self::default_path() {
            Some(path) if path.exists() => {
                tracing::debug!("Loading config from {:?}", path);
                Self::load(path)
            }
            _ => {
                tracing::debug!("No config file found, using defaults");
                Ok(ShellConfig::default())
            }
        }
    }

    /// Default config location (`<config dir>/promptdock/config.toml`)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("promptdock").join("config.toml"))
    }

    /// Parse JSON configuration
    pub fn from_json(content: &str) -> Result<ShellConfig> {
        serde_json::from_str(content)
            .map_err(|e| Error::Config(format!("Invalid JSON: {}", e)))
    }

    /// Parse TOML configuration
    pub fn from_toml(content: &str) -> Result<ShellConfig> {
        toml::from_str(content)
            .map_err(|e| Error::Config(format!("Invalid TOML: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PasteTarget;

    #[test]
    fn test_json_loading() {
        let json = r#"{"plugin_dir": "extras"}"#;
        let config = ConfigLoader::from_json(json).unwrap();
        assert_eq!(config.plugin_dir, PathBuf::from("extras"));
        assert_eq!(config.prompts.paste_target, PasteTarget::Clipboard);
    }

    #[test]
    fn test_toml_loading() {
        let toml = r#"
            [prompts]
            history_file = "/tmp/history.json"
            paste_target = "window"

            [logging]
            level = "debug"
        "#;
        let config = ConfigLoader::from_toml(toml).unwrap();
        assert_eq!(config.prompts.history_file, PathBuf::from("/tmp/history.json"));
        assert_eq!(config.prompts.paste_target, PasteTarget::Window);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.reader.settings_file, PathBuf::from("file_reader_settings.json"));
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(ConfigLoader::from_toml("").unwrap(), ShellConfig::default());
    }

    #[test]
    fn test_load_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "plugin_dir: x").unwrap();
        assert!(matches!(ConfigLoader::load(&path), Err(Error::Config(_))));

        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"logging": {"level": "warn"}}"#).unwrap();
        assert_eq!(ConfigLoader::load(&path).unwrap().logging.level, "warn");
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(ConfigLoader::load_or_default(Some(&missing)).is_err());
    }
}

//! Exclusion settings persistence
//!
//! The file adds to the built-in defaults on load and is rewritten with the
//! full current sets on save.

use crate::exclusion::ExclusionSet;
use promptdock_core::error::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// On-disk shape of the settings file
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
struct SettingsData {
    #[serde(default)]
    excluded_files: Vec<String>,
    #[serde(default)]
    excluded_extensions: Vec<String>,
}

/// Settings file for the file reader
#[derive(Debug, Clone)]
pub struct ExclusionSettings {
    path: PathBuf,
}

impl ExclusionSettings {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Union the persisted entries into `set`. A missing file adds nothing.
    pub fn load_into(&self, set: &mut ExclusionSet) -> Result<()> {
        if !self.path.exists() {
            tracing::debug!("No exclusion settings at {:?}", self.path);
            return Ok(());
        }

        let content = std::fs::read_to_string(&self.path)?;
        let data: SettingsData = serde_json::from_str(&content)?;

        for name in data.excluded_files {
            set.add_name(name);
        }
        for ext in &data.excluded_extensions {
            set.add_extension(ext);
        }

        tracing::debug!("📜 Loaded exclusion settings from {:?}", self.path);
        Ok(())
    }

    /// Defaults plus whatever the settings file adds. Errors are logged and
    /// the defaults are kept.
    pub fn load_with_defaults(&self) -> ExclusionSet {
        let mut set = ExclusionSet::with_defaults();
        if let Err(e) = self.load_into(&mut set) {
            tracing::error!("Error loading exclusion settings {:?}: {}", self.path, e);
        }
        set
    }

    /// Write the full current sets
    pub fn save(&self, set: &ExclusionSet) -> Result<()> {
        let data = SettingsData {
            excluded_files: set.names().map(str::to_string).collect(),
            excluded_extensions: set.extensions().map(str::to_string).collect(),
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(&data)?;
        std::fs::write(&self.path, json)?;

        tracing::debug!("💾 Saved exclusion settings to {:?}", self.path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_added_pattern_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let settings = ExclusionSettings::new(dir.path().join("settings.json"));

        let mut set = settings.load_with_defaults();
        set.add_name("*.snap");
        set.add_extension(".CSV");
        settings.save(&set).unwrap();

        let reloaded = ExclusionSettings::new(settings.path()).load_with_defaults();
        assert!(reloaded.should_skip_file("ui.snap"));
        assert!(reloaded.should_skip_file("data.csv"));
        assert!(reloaded.should_skip_directory(".git"));
        assert_eq!(reloaded, set);
    }

    #[test]
    fn test_file_extends_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"excluded_files": ["vendor"]}"#).unwrap();

        let set = ExclusionSettings::new(&path).load_with_defaults();
        assert!(set.should_skip_directory("vendor"));
        assert!(set.should_skip_directory("node_modules"));
        assert!(set.should_skip_file("x.log"));
    }

    #[test]
    fn test_malformed_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{not json").unwrap();

        let settings = ExclusionSettings::new(&path);
        assert!(settings.load_into(&mut ExclusionSet::new()).is_err());
        assert_eq!(settings.load_with_defaults(), ExclusionSet::with_defaults());
    }

    #[test]
    fn test_save_writes_full_lists() {
        let dir = tempfile::tempdir().unwrap();
        let settings = ExclusionSettings::new(dir.path().join("nested").join("s.json"));

        let mut set = ExclusionSet::new();
        set.add_name("dist");
        set.add_extension("bin");
        settings.save(&set).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(settings.path()).unwrap()).unwrap();
        assert_eq!(raw["excluded_files"], serde_json::json!(["dist"]));
        assert_eq!(raw["excluded_extensions"], serde_json::json!([".bin"]));
    }
}

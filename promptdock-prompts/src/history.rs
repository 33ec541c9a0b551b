//! Prompt history persistence

use crate::group::PromptGroup;
use promptdock_core::error::Result;
use std::path::{Path, PathBuf};

/// JSON file holding every group, rewritten whole on each save
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read all groups. A missing file is an empty history.
    pub fn load(&self) -> Result<Vec<PromptGroup>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        let groups = serde_json::from_str(&content)?;
        Ok(groups)
    }

    /// Write all groups
    pub fn save(&self, groups: &[PromptGroup]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(groups)?;
        std::fs::write(&self.path, json)?;
        tracing::debug!("💾 Saved {} group(s) to {:?}", groups.len(), self.path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = HistoryStore::new(dir.path().join("history.json"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_writes_expected_shape() {
        let dir = tempfile::tempdir().unwrap();
        let store = HistoryStore::new(dir.path().join("history.json"));

        let mut group = PromptGroup::with_timestamp("2024-05-01 12:30:00");
        group.prompts.push("summarize 日本語".to_string());
        store.save(&[group]).unwrap();

        let raw = std::fs::read_to_string(store.path()).unwrap();
        // non-ASCII is written as-is
        assert!(raw.contains("日本語"));
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(
            value,
            serde_json::json!([{
                "prompts": ["summarize 日本語"],
                "files": [],
                "file_metadata": {},
                "timestamp": "2024-05-01 12:30:00"
            }])
        );
    }

    #[test]
    fn test_corrupt_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        std::fs::write(&path, "[{").unwrap();
        assert!(HistoryStore::new(&path).load().is_err());
    }
}

//! Prompt groups

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use promptdock_core::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Local-time, second-precision group timestamp
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Snapshot of a referenced file taken when it was added
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileSnapshot {
    /// Base64 of the file bytes
    pub content: String,
    /// Base file name
    pub name: String,
}

impl FileSnapshot {
    /// Read and encode the file at `path`
    pub fn capture(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self {
            content: STANDARD.encode(bytes),
            name,
        })
    }

    /// Decode the stored bytes
    pub fn decode(&self) -> Result<Vec<u8>> {
        STANDARD
            .decode(&self.content)
            .map_err(|e| Error::Internal(format!("Corrupt file snapshot for {}: {}", self.name, e)))
    }
}

/// A timestamped bundle of prompts and file references
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PromptGroup {
    pub prompts: Vec<String>,
    pub files: Vec<String>,
    #[serde(default)]
    pub file_metadata: BTreeMap<String, FileSnapshot>,
    pub timestamp: String,
}

impl PromptGroup {
    /// An empty group stamped with the current local time
    pub fn new() -> Self {
        Self::with_timestamp(chrono::Local::now().format(TIMESTAMP_FORMAT).to_string())
    }

    pub fn with_timestamp(timestamp: impl Into<String>) -> Self {
        Self {
            prompts: Vec::new(),
            files: Vec::new(),
            file_metadata: BTreeMap::new(),
            timestamp: timestamp.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty() && self.files.is_empty()
    }

    /// Record a file reference and snapshot its bytes.
    ///
    /// The path is kept even when the snapshot fails; the error is returned
    /// for the caller to report.
    pub fn add_file(&mut self, path: &str) -> Result<()> {
        self.files.push(path.to_string());
        let snapshot = FileSnapshot::capture(Path::new(path))?;
        self.file_metadata.insert(path.to_string(), snapshot);
        Ok(())
    }
}

impl Default for PromptGroup {
    fn default() -> Self {
        Self::new()
    }
}

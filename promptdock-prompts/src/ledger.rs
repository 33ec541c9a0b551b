//! The prompt ledger
//!
//! Owns every group and the current (most recently created) one. Each
//! mutation re-persists the whole history when a store is attached.

use crate::group::{FileSnapshot, PromptGroup};
use crate::history::HistoryStore;
use promptdock_core::error::{Error, Result};
use url::Url;

/// What `confirm_prompt` did with its input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmOutcome {
    /// Text appended to the current group's prompts
    Recorded(String),
    /// Input consisted of `file://` URLs and was added as file references
    FilesAdded(Vec<String>),
    /// Empty input or no current group
    Ignored,
}

#[derive(Debug, Default)]
pub struct Ledger {
    groups: Vec<PromptGroup>,
    current: Option<usize>,
    store: Option<HistoryStore>,
}

impl Ledger {
    /// A ledger that is never persisted
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Load the history behind `store`. Load errors are logged and the
    /// ledger starts empty. No group is current until `new_group`.
    pub fn open(store: HistoryStore) -> Self {
        let groups = match store.load() {
            Ok(groups) => {
                tracing::info!("📜 Loaded {} prompt group(s) from {:?}", groups.len(), store.path());
                groups
            }
            Err(e) => {
                tracing::error!("Error loading history {:?}: {}", store.path(), e);
                Vec::new()
            }
        };

        Self {
            groups,
            current: None,
            store: Some(store),
        }
    }

    pub fn groups(&self) -> &[PromptGroup] {
        &self.groups
    }

    pub fn current_group(&self) -> Option<&PromptGroup> {
        self.current.and_then(|i| self.groups.get(i))
    }

    /// Append a fresh group and make it current
    pub fn new_group(&mut self) -> &PromptGroup {
        self.groups.push(PromptGroup::new());
        let index = self.groups.len() - 1;
        self.current = Some(index);
        tracing::debug!("Started prompt group {}", index + 1);
        self.persist();
        &self.groups[index]
    }

    /// Record `text` in the current group.
    ///
    /// Input made only of `file://` URLs (one per line) is treated as file
    /// references instead; the outcome says which happened.
    pub fn confirm_prompt(&mut self, text: &str) -> ConfirmOutcome {
        let text = text.trim();
        if text.is_empty() || self.current.is_none() {
            return ConfirmOutcome::Ignored;
        }

        if let Some(paths) = parse_file_urls(text) {
            self.add_files(&paths);
            return ConfirmOutcome::FilesAdded(paths);
        }

        let Some(group) = self.current_mut() else {
            return ConfirmOutcome::Ignored;
        };
        group.prompts.push(text.to_string());
        self.persist();
        ConfirmOutcome::Recorded(text.to_string())
    }

    /// Add file references with content snapshots to the current group.
    ///
    /// Returns how many paths were recorded. A path whose snapshot fails is
    /// still recorded.
    pub fn add_files<S: AsRef<str>>(&mut self, paths: &[S]) -> usize {
        let Some(group) = self.current_mut() else {
            return 0;
        };
        if paths.is_empty() {
            return 0;
        }

        for path in paths {
            let path = path.as_ref();
            if let Err(e) = group.add_file(path) {
                tracing::error!("Error saving file metadata for {}: {}", path, e);
            }
        }
        self.persist();
        paths.len()
    }

    /// Snapshot of `path` from the first group that references it
    pub fn file_metadata(&self, path: &str) -> Option<&FileSnapshot> {
        self.groups
            .iter()
            .find(|g| g.files.iter().any(|f| f == path))
            .and_then(|g| g.file_metadata.get(path))
    }

    /// Original bytes of a referenced file, from its snapshot
    pub fn restore_file(&self, path: &str) -> Result<Vec<u8>> {
        self.file_metadata(path)
            .ok_or_else(|| Error::Internal(format!("No snapshot recorded for {}", path)))?
            .decode()
    }

    /// Prompt by 1-based group and prompt ordinals
    pub fn prompt_at(&self, group: usize, prompt: usize) -> Result<&str> {
        group
            .checked_sub(1)
            .and_then(|g| self.groups.get(g))
            .and_then(|g| prompt.checked_sub(1).and_then(|p| g.prompts.get(p)))
            .map(String::as_str)
            .ok_or_else(|| Error::Internal(format!("No prompt {}.{}", group, prompt)))
    }

    /// Flat transcript, most recent group first
    pub fn render(&self) -> String {
        let mut lines: Vec<String> = Vec::new();

        for (index, group) in self.groups.iter().enumerate().rev() {
            lines.push(format!("=== Group {} ({}) ===", index + 1, group.timestamp));
            if !group.files.is_empty() {
                lines.push("Files:".to_string());
                lines.extend(group.files.iter().map(|f| format!("- {}", f)));
            }
            if !group.prompts.is_empty() {
                lines.push("Prompts:".to_string());
                lines.extend(group.prompts.iter().cloned());
            }
            lines.push("\n".to_string());
        }

        lines.join("\n")
    }

    /// Write the history now
    pub fn save(&self) -> Result<()> {
        match &self.store {
            Some(store) => store.save(&self.groups),
            None => Ok(()),
        }
    }

    fn persist(&self) {
        if let Err(e) = self.save() {
            tracing::error!("Error saving history: {}", e);
        }
    }

    fn current_mut(&mut self) -> Option<&mut PromptGroup> {
        self.current.and_then(|i| self.groups.get_mut(i))
    }
}

/// Local paths if every non-empty line of `text` is a `file://` URL
pub fn parse_file_urls(text: &str) -> Option<Vec<String>> {
    let mut paths = Vec::new();
    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if !line.starts_with("file://") {
            return None;
        }
        let path = Url::parse(line).ok()?.to_file_path().ok()?;
        paths.push(path.to_string_lossy().into_owned());
    }
    if paths.is_empty() {
        None
    } else {
        Some(paths)
    }
}

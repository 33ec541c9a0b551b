//! Exclusion rules for folder scans

use std::collections::BTreeSet;
use std::path::Path;

const DEFAULT_NAMES: &[&str] = &[
    ".git",
    ".svn",
    ".hg",
    ".idea",
    ".vscode",
    "__pycache__",
    "node_modules",
    "target",
    ".DS_Store",
    "*.min.js",
];

const DEFAULT_EXTENSIONS: &[&str] = &[
    ".log", ".pyc", ".pyo", ".exe", ".dll", ".so", ".dylib", ".o", ".class", ".png", ".jpg",
    ".jpeg", ".gif", ".ico", ".zip", ".tar", ".gz",
];

/// Names, wildcard patterns and extensions left out of a scan.
///
/// Extensions are stored lowercase with a leading dot. A name starting with
/// `*` is a suffix pattern.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    names: BTreeSet<String>,
    extensions: BTreeSet<String>,
}

impl ExclusionSet {
    /// An empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in defaults
    pub fn with_defaults() -> Self {
        let mut set = Self::new();
        for name in DEFAULT_NAMES {
            set.add_name(*name);
        }
        for ext in DEFAULT_EXTENSIONS {
            set.add_extension(ext);
        }
        set
    }

    /// Add a literal name or `*suffix` pattern. Returns false if present.
    pub fn add_name(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        self.names.insert(name.to_string())
    }

    /// Add an extension, normalized to lowercase with a leading dot.
    /// Returns false if present.
    pub fn add_extension(&mut self, ext: &str) -> bool {
        match normalize_extension(ext) {
            Some(ext) => self.extensions.insert(ext),
            None => false,
        }
    }

    /// Remove an entry from whichever set holds it
    pub fn remove(&mut self, entry: &str) -> bool {
        let entry = entry.trim();
        let removed_name = self.names.remove(entry);
        let removed_ext = normalize_extension(entry)
            .map(|ext| self.extensions.remove(&ext))
            .unwrap_or(false);
        removed_name || removed_ext
    }

    /// Merge another set into this one
    pub fn extend(&mut self, other: &ExclusionSet) {
        self.names.extend(other.names.iter().cloned());
        self.extensions.extend(other.extensions.iter().cloned());
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn extensions(&self) -> impl Iterator<Item = &str> {
        self.extensions.iter().map(String::as_str)
    }

    /// True iff `name` is a literal entry
    pub fn should_skip_directory(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// True if `name` is a literal entry, has an excluded extension, or ends
    /// with a wildcard pattern's suffix (compared case-insensitively)
    pub fn should_skip_file(&self, name: &str) -> bool {
        if self.names.contains(name) {
            return true;
        }

        if let Some(ext) = extension_of(name) {
            if self.extensions.contains(&ext) {
                return true;
            }
        }

        let lowered = name.to_lowercase();
        self.names
            .iter()
            .filter_map(|pattern| pattern.strip_prefix('*'))
            .any(|suffix| lowered.ends_with(&suffix.to_lowercase()))
    }
}

/// Lowercase `.ext` of a file name, like `os.path.splitext` (a leading dot
/// alone does not start an extension)
fn extension_of(name: &str) -> Option<String> {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_lowercase()))
}

fn normalize_extension(ext: &str) -> Option<String> {
    let ext = ext.trim().trim_start_matches('*').trim_start_matches('.');
    if ext.is_empty() {
        return None;
    }
    Some(format!(".{}", ext.to_lowercase()))
}

//! Folder walk and log rendering

use crate::exclusion::ExclusionSet;
use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Width of the dashed line closing each file block
pub const SEPARATOR_WIDTH: usize = 80;

/// Text of a file, or why it could not be read
pub type FileContent = std::result::Result<String, String>;

/// One item of the flat walk log
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkEntry {
    Directory(PathBuf),
    File {
        name: String,
        path: PathBuf,
        content: FileContent,
    },
}

/// Walks a folder, honouring an exclusion set
pub struct ContentWalker<'a> {
    exclusions: &'a ExclusionSet,
}

impl<'a> ContentWalker<'a> {
    pub fn new(exclusions: &'a ExclusionSet) -> Self {
        Self { exclusions }
    }

    /// Walk `root` top-down.
    ///
    /// Each directory is followed by its files, then its subdirectories;
    /// siblings are ordered by name. Excluded directories are pruned before
    /// descending. Symlinked directories are not followed and produce no
    /// entry. Unreadable entries are logged and skipped.
    pub fn walk(&self, root: &Path) -> Vec<WalkEntry> {
        let mut entries = Vec::new();

        let walker = WalkDir::new(root)
            .sort_by(files_first)
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !self.is_excluded(e));

        for entry in walker {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };

            if entry.file_type().is_dir() {
                entries.push(WalkEntry::Directory(entry.path().to_path_buf()));
            } else if is_directory(&entry) {
                tracing::debug!("Not following directory link {:?}", entry.path());
            } else {
                let content = std::fs::read_to_string(entry.path()).map_err(|e| e.to_string());
                if let Err(e) = &content {
                    tracing::debug!("Could not read {:?}: {}", entry.path(), e);
                }
                entries.push(WalkEntry::File {
                    name: entry.file_name().to_string_lossy().into_owned(),
                    path: entry.path().to_path_buf(),
                    content,
                });
            }
        }

        tracing::debug!("Walked {:?}: {} entries", root, entries.len());
        entries
    }

    /// Walk and render in one go
    pub fn read_folder(&self, root: &Path) -> String {
        render_log(&self.walk(root))
    }

    fn is_excluded(&self, entry: &DirEntry) -> bool {
        let name = entry.file_name().to_string_lossy();
        if is_directory(entry) {
            self.exclusions.should_skip_directory(&name)
        } else {
            self.exclusions.should_skip_file(&name)
        }
    }
}

/// Directory, or a link to one
fn is_directory(entry: &DirEntry) -> bool {
    entry.file_type().is_dir() || (entry.path_is_symlink() && entry.path().is_dir())
}

fn files_first(a: &DirEntry, b: &DirEntry) -> Ordering {
    is_directory(a)
        .cmp(&is_directory(b))
        .then_with(|| a.file_name().cmp(b.file_name()))
}

/// Render a walk as the flat text log
pub fn render_log(entries: &[WalkEntry]) -> String {
    let separator = "-".repeat(SEPARATOR_WIDTH);
    let mut lines: Vec<String> = Vec::new();

    for entry in entries {
        match entry {
            WalkEntry::Directory(path) => lines.push(format!("Directory: {}", path.display())),
            WalkEntry::File { name, content, .. } => {
                lines.push(format!("\nFile: {}", name));
                match content {
                    Ok(text) => {
                        lines.push("Content:".to_string());
                        lines.push(text.clone());
                        lines.push(separator.clone());
                    }
                    Err(e) => lines.push(format!("Error reading file: {}", e)),
                }
            }
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn sample_tree() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir(root.join(".git")).unwrap();
        fs::write(root.join(".git").join("config"), "[core]").unwrap();
        fs::write(root.join("notes.txt"), "remember the milk").unwrap();
        fs::write(root.join("build.log"), "noise").unwrap();
        dir
    }

    fn file_names(entries: &[WalkEntry]) -> Vec<String> {
        entries
            .iter()
            .filter_map(|e| match e {
                WalkEntry::File { name, .. } => Some(name.clone()),
                WalkEntry::Directory(_) => None,
            })
            .collect()
    }

    #[test]
    fn test_defaults_scenario() {
        let dir = sample_tree();
        let exclusions = ExclusionSet::with_defaults();
        let entries = ContentWalker::new(&exclusions).walk(dir.path());

        assert_eq!(file_names(&entries), vec!["notes.txt"]);
        assert!(!entries.iter().any(|e| match e {
            WalkEntry::Directory(p) => p.ends_with(".git"),
            WalkEntry::File { path, .. } => path.components().any(|c| c.as_os_str() == ".git"),
        }));

        let log = render_log(&entries);
        assert!(log.starts_with(&format!("Directory: {}", dir.path().display())));
        assert!(log.contains("\nFile: notes.txt\nContent:\nremember the milk\n"));
        assert!(log.ends_with(&"-".repeat(SEPARATOR_WIDTH)));
        assert!(!log.contains("build.log"));
    }

    #[test]
    fn test_files_precede_subdirectories() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir(root.join("a")).unwrap();
        fs::write(root.join("a").join("inner.txt"), "in").unwrap();
        fs::write(root.join("z.txt"), "z").unwrap();

        let exclusions = ExclusionSet::new();
        let entries = ContentWalker::new(&exclusions).walk(root);

        assert_eq!(
            entries,
            vec![
                WalkEntry::Directory(root.to_path_buf()),
                WalkEntry::File {
                    name: "z.txt".to_string(),
                    path: root.join("z.txt"),
                    content: Ok("z".to_string()),
                },
                WalkEntry::Directory(root.join("a")),
                WalkEntry::File {
                    name: "inner.txt".to_string(),
                    path: root.join("a").join("inner.txt"),
                    content: Ok("in".to_string()),
                },
            ]
        );
    }

    #[test]
    fn test_binary_file_records_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("blob.dat"), b"\xff\xfe\x00\x80").unwrap();
        fs::write(dir.path().join("ok.txt"), "fine").unwrap();

        let exclusions = ExclusionSet::new();
        let log = ContentWalker::new(&exclusions).read_folder(dir.path());

        assert!(log.contains("\nFile: blob.dat\nError reading file: "));
        assert!(log.contains("\nFile: ok.txt\nContent:\nfine\n"));
    }

    #[test]
    fn test_excluded_directory_by_literal_name_is_never_entered() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("src").join("cache");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("keep.txt"), "hidden").unwrap();

        let mut exclusions = ExclusionSet::new();
        exclusions.add_name("cache");
        let entries = ContentWalker::new(&exclusions).walk(dir.path());

        assert!(file_names(&entries).is_empty());
        assert_eq!(entries.len(), 2);
    }

    #[cfg(unix)]
    #[test]
    fn test_directory_link_is_not_read_as_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("real");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("inner.txt"), "once").unwrap();
        std::os::unix::fs::symlink(&target, dir.path().join("alias")).unwrap();

        let exclusions = ExclusionSet::new();
        let entries = ContentWalker::new(&exclusions).walk(dir.path());

        assert_eq!(file_names(&entries), vec!["inner.txt"]);
        assert!(!entries
            .iter()
            .any(|e| matches!(e, WalkEntry::Directory(p) if p.ends_with("alias"))));
        assert!(!render_log(&entries).contains("Error reading file"));
    }
}

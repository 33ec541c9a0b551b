//! Plugin manifests
//!
//! A manifest is a `<name>.toml` file in the plugin directory. The file stem
//! selects the registered plugin; the body is optional.

use promptdock_core::error::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const MANIFEST_EXTENSION: &str = "toml";

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct PluginManifest {
    /// Registered plugin name, taken from the file stem
    #[serde(skip)]
    pub name: String,

    #[serde(skip)]
    pub path: PathBuf,

    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl PluginManifest {
    /// Read and parse a manifest file
    pub fn load(path: &Path) -> Result<Self> {
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| Error::Plugin(format!("Invalid manifest file name: {:?}", path)))?
            .to_string();

        let content = std::fs::read_to_string(path)?;
        let mut manifest: PluginManifest = toml::from_str(&content)
            .map_err(|e| Error::Plugin(format!("Invalid manifest {:?}: {}", path, e)))?;
        manifest.name = name;
        manifest.path = path.to_path_buf();
        Ok(manifest)
    }

    /// Manifest files in `dir`, sorted by file name
    pub fn discover(dir: &Path) -> Result<Vec<PathBuf>> {
        let mut paths = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_file()
                && path.extension().and_then(|e| e.to_str()) == Some(MANIFEST_EXTENSION)
            {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(paths)
    }
}

//! Configuration type definitions
//!
//! These types represent the runtime configuration for the shell and the
//! built-in plugins. Every field has a default so an empty file is valid.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Root configuration for promptdock
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShellConfig {
    /// Directory scanned for plugin manifests
    #[serde(default = "default_plugin_dir")]
    pub plugin_dir: PathBuf,

    /// File reader plugin configuration
    #[serde(default)]
    pub reader: ReaderConfig,

    /// Prompt manager plugin configuration
    #[serde(default)]
    pub prompts: PromptsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            plugin_dir: default_plugin_dir(),
            reader: ReaderConfig::default(),
            prompts: PromptsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

fn default_plugin_dir() -> PathBuf {
    PathBuf::from("plugins")
}

/// File reader configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReaderConfig {
    /// Where the user's exclusion additions are persisted
    #[serde(default = "default_settings_file")]
    pub settings_file: PathBuf,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            settings_file: default_settings_file(),
        }
    }
}

fn default_settings_file() -> PathBuf {
    PathBuf::from("file_reader_settings.json")
}

/// Prompt manager configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PromptsConfig {
    /// Where prompt groups are persisted
    #[serde(default = "default_history_file")]
    pub history_file: PathBuf,

    /// Where a confirmed prompt is additionally delivered
    #[serde(default)]
    pub paste_target: PasteTarget,
}

impl Default for PromptsConfig {
    fn default() -> Self {
        Self {
            history_file: default_history_file(),
            paste_target: PasteTarget::default(),
        }
    }
}

fn default_history_file() -> PathBuf {
    PathBuf::from("prompt_history.json")
}

/// Destination for pasted prompt text
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PasteTarget {
    /// The prompt manager's own input draft
    Input,
    /// The system clipboard
    #[default]
    Clipboard,
    /// A previously selected foreign window
    Window,
}

impl fmt::Display for PasteTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PasteTarget::Input => "input",
            PasteTarget::Clipboard => "clipboard",
            PasteTarget::Window => "window",
        };
        f.write_str(name)
    }
}

impl FromStr for PasteTarget {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "input" => Ok(PasteTarget::Input),
            "clipboard" => Ok(PasteTarget::Clipboard),
            "window" => Ok(PasteTarget::Window),
            other => Err(crate::Error::Config(format!("Unknown paste target: {}", other))),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

//! Paste side channels: system clipboard and foreign windows
//!
//! Window delivery is best effort. The report says whether every step ran,
//! not whether the target application accepted the input.

use promptdock_core::config::PasteTarget;
use promptdock_core::error::{Error, Result};
use std::fmt;
use std::process::Command;

/// Something that can hold clipboard text
pub trait ClipboardSink: Send + Sync {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// System clipboard via `arboard`.
///
/// The handle is opened on first use and kept: on X11 the copied text is
/// only served while it is alive, and a window paste reads it after
/// `set_text` returns.
#[derive(Default)]
pub struct ArboardClipboard {
    clipboard: Option<arboard::Clipboard>,
}

impl ArboardClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClipboardSink for ArboardClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        let mut clipboard = match self.clipboard.take() {
            Some(clipboard) => clipboard,
            None => arboard::Clipboard::new().map_err(|e| Error::Clipboard(e.to_string()))?,
        };
        let result = clipboard.set_text(text);
        self.clipboard = Some(clipboard);
        result.map_err(|e| Error::Clipboard(e.to_string()))
    }
}

/// A top-level window found by enumeration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowInfo {
    /// Platform window handle
    pub id: String,
    pub title: String,
}

impl fmt::Display for WindowInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.title, self.id)
    }
}

/// OS window enumeration and keystroke synthesis
pub trait WindowAutomation: Send + Sync {
    /// Visible top-level windows with a title
    fn list_windows(&self) -> Result<Vec<WindowInfo>>;

    /// Bring `window` to the foreground
    fn activate(&self, window: &WindowInfo) -> Result<()>;

    /// Send key chords (e.g. `ctrl+v`) to the focused window, in order
    fn send_keys(&self, keys: &[&str]) -> Result<()>;
}

/// Window automation through the `xdotool` command (X11)
#[derive(Debug, Clone)]
pub struct XdotoolAutomation {
    program: String,
}

impl XdotoolAutomation {
    pub fn new() -> Self {
        Self {
            program: "xdotool".to_string(),
        }
    }

    fn run(&self, args: &[&str]) -> Result<String> {
        if !cfg!(target_os = "linux") {
            return Err(Error::Automation(
                "Window automation is only supported on Linux (X11)".to_string(),
            ));
        }

        tracing::debug!("Running {} {}", self.program, args.join(" "));
        let output = Command::new(&self.program)
            .args(args)
            .output()
            .map_err(|e| Error::Automation(format!("Failed to execute {}: {}", self.program, e)))?;

        if !output.status.success() {
            return Err(Error::Automation(format!(
                "{} {} failed ({}): {}",
                self.program,
                args.first().copied().unwrap_or_default(),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Default for XdotoolAutomation {
    fn default() -> Self {
        Self::new()
    }
}

impl WindowAutomation for XdotoolAutomation {
    fn list_windows(&self) -> Result<Vec<WindowInfo>> {
        let ids = self.run(&["search", "--onlyvisible", "--name", "."])?;
        let mut windows = Vec::new();
        for id in ids.lines().map(str::trim).filter(|l| !l.is_empty()) {
            match self.run(&["getwindowname", id]) {
                Ok(title) if !title.trim().is_empty() => windows.push(WindowInfo {
                    id: id.to_string(),
                    title: title.trim().to_string(),
                }),
                Ok(_) => {}
                Err(e) => tracing::debug!("Skipping window {}: {}", id, e),
            }
        }
        Ok(windows)
    }

    fn activate(&self, window: &WindowInfo) -> Result<()> {
        self.run(&["windowactivate", "--sync", window.id.as_str()]).map(|_| ())
    }

    fn send_keys(&self, keys: &[&str]) -> Result<()> {
        let mut args = vec!["key", "--clearmodifiers"];
        args.extend_from_slice(keys);
        self.run(&args).map(|_| ())
    }
}

/// Result of a paste attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasteReport {
    pub target: PasteTarget,
    pub delivered: bool,
    pub detail: String,
}

impl PasteReport {
    pub fn delivered(target: PasteTarget, detail: impl Into<String>) -> Self {
        Self {
            target,
            delivered: true,
            detail: detail.into(),
        }
    }

    pub fn failed(target: PasteTarget, detail: impl Into<String>) -> Self {
        Self {
            target,
            delivered: false,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for PasteReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.delivered { "sent" } else { "not sent" };
        write!(f, "Paste to {} {}: {}", self.target, status, self.detail)
    }
}

/// Delivers text to the clipboard or a captured window
pub struct Paster {
    clipboard: Box<dyn ClipboardSink>,
    automation: Box<dyn WindowAutomation>,
    window: Option<WindowInfo>,
}

impl Paster {
    pub fn new(clipboard: Box<dyn ClipboardSink>, automation: Box<dyn WindowAutomation>) -> Self {
        Self {
            clipboard,
            automation,
            window: None,
        }
    }

    pub fn window(&self) -> Option<&WindowInfo> {
        self.window.as_ref()
    }

    pub fn list_windows(&self) -> Result<Vec<WindowInfo>> {
        self.automation.list_windows()
    }

    /// Remember the window that `PasteTarget::Window` delivers to
    pub fn select_window(&mut self, window: WindowInfo) {
        tracing::info!("🎯 Paste window set to {}", window);
        self.window = Some(window);
    }

    pub fn copy_to_clipboard(&mut self, text: &str) -> Result<()> {
        self.clipboard.set_text(text)
    }

    /// Deliver `text` to the clipboard or the captured window.
    ///
    /// The input target is the caller's own draft, so it is reported as
    /// delivered without side effects.
    pub fn deliver(&mut self, target: PasteTarget, text: &str) -> PasteReport {
        match target {
            PasteTarget::Input => PasteReport::delivered(target, "kept in prompt input"),
            PasteTarget::Clipboard => match self.clipboard.set_text(text) {
                Ok(()) => PasteReport::delivered(target, "copied to clipboard"),
                Err(e) => {
                    tracing::warn!("Clipboard paste failed: {}", e);
                    PasteReport::failed(target, e.to_string())
                }
            },
            PasteTarget::Window => {
                let Some(window) = self.window.clone() else {
                    return PasteReport::failed(target, "no target window selected");
                };
                match self.paste_into(&window, text) {
                    Ok(()) => PasteReport::delivered(target, format!("keystrokes sent to {}", window)),
                    Err(e) => {
                        tracing::warn!("Window paste to {} failed: {}", window, e);
                        PasteReport::failed(target, e.to_string())
                    }
                }
            }
        }
    }

    fn paste_into(&mut self, window: &WindowInfo, text: &str) -> Result<()> {
        self.clipboard.set_text(text)?;
        self.automation.activate(window)?;
        self.automation.send_keys(&["ctrl+v"])?;
        self.automation.send_keys(&["Return"])
    }
}

/// Text inserted into the prompt input to reference a file
pub fn documents_block(path: &str) -> String {
    format!(
        "<documents>\n<document>\n<source>{}</source>\n</document>\n</documents>",
        path
    )
}

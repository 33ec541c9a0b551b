//! Prompt Manager plugin

use crate::history::HistoryStore;
use crate::ledger::{ConfirmOutcome, Ledger};
use crate::paste::{
    documents_block, ArboardClipboard, ClipboardSink, PasteReport, Paster, WindowAutomation,
    WindowInfo, XdotoolAutomation,
};
use parking_lot::RwLock;
use promptdock_core::config::{PasteTarget, PromptsConfig};
use promptdock_core::error::{Error, Result};
use promptdock_plugin::{HostContext, MenuItem, Panel, Plugin, PluginInfo};
use std::path::PathBuf;
use std::sync::Arc;
use url::Url;

pub const PLUGIN_NAME: &str = "Prompt Manager";

struct PromptState {
    ledger: Ledger,
    history_file: PathBuf,
    paster: Paster,
    target: PasteTarget,
    /// Contents of the prompt input box
    draft: String,
    /// Result of the last `List Windows`, addressed by `Select Window`
    windows: Vec<WindowInfo>,
    /// One-line feedback from the last action
    status: String,
    panel: Option<Panel>,
}

impl PromptState {
    fn refresh(&self) {
        let Some(panel) = &self.panel else {
            return;
        };

        let target = match (self.target, self.paster.window()) {
            (PasteTarget::Window, Some(window)) => format!("window {}", window),
            (target, _) => target.to_string(),
        };

        let mut text = format!("Input: {}\nPaste target: {}\n", self.draft, target);
        if !self.status.is_empty() {
            text.push_str(&self.status);
            text.push('\n');
        }
        text.push('\n');
        text.push_str(&self.ledger.render());
        panel.set_text(text);
    }

    fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
        tracing::debug!("{}", self.status);
        self.refresh();
    }

    /// Confirm `args`, or the draft when no text is given. Only a confirmed
    /// draft is cleared.
    fn confirm(&mut self, args: &str) {
        let from_draft = args.trim().is_empty();
        let text = if from_draft {
            self.draft.clone()
        } else {
            args.to_string()
        };

        let outcome = self.ledger.confirm_prompt(&text);
        if from_draft && outcome != ConfirmOutcome::Ignored {
            self.draft.clear();
        }

        let status = match outcome {
            ConfirmOutcome::Recorded(prompt) => {
                match self.target {
                    PasteTarget::Input => "Prompt recorded".to_string(),
                    target => self.paster.deliver(target, &prompt).to_string(),
                }
            }
            ConfirmOutcome::FilesAdded(paths) => {
                format!("Recorded {} file reference(s) from file:// input", paths.len())
            }
            ConfirmOutcome::Ignored => "Nothing to confirm".to_string(),
        };
        self.set_status(status);
    }

    fn new_group(&mut self) {
        let ordinal = self.ledger.groups().len() + 1;
        self.ledger.new_group();
        self.set_status(format!("Started group {}", ordinal));
    }

    fn add_files(&mut self, args: &str) -> Result<()> {
        let paths = split_args(args);
        if paths.is_empty() {
            return Err(Error::Plugin("Add File needs at least one path".to_string()));
        }
        let added = self.ledger.add_files(&paths);
        self.set_status(format!("Added {} file(s)", added));
        Ok(())
    }

    fn paste_prompt(&mut self, args: &str) -> Result<()> {
        let (group, prompt) = parse_prompt_address(args)?;
        let text = self.ledger.prompt_at(group, prompt)?.to_string();

        let report = match self.target {
            PasteTarget::Input => {
                self.draft = text;
                PasteReport::delivered(PasteTarget::Input, "copied into prompt input")
            }
            target => self.paster.deliver(target, &text),
        };
        self.set_status(report.to_string());
        Ok(())
    }

    fn paste_file(&mut self, args: &str) -> Result<()> {
        let path = single_path(args, "Paste File")?;
        if self.ledger.file_metadata(&path).is_none() {
            return Err(Error::Plugin(format!("{} is not in the history", path)));
        }
        if !self.draft.is_empty() && !self.draft.ends_with('\n') {
            self.draft.push('\n');
        }
        self.draft.push_str(&documents_block(&path));
        self.set_status(format!("Inserted {} into prompt input", path));
        Ok(())
    }

    fn restore_file(&mut self, args: &str) -> Result<()> {
        let mut parts = split_args(args).into_iter();
        let (Some(path), Some(dest), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(Error::Plugin("Restore File needs <path> <destination>".to_string()));
        };

        let bytes = self.ledger.restore_file(&path)?;
        std::fs::write(&dest, &bytes)?;
        self.set_status(format!("Restored {} ({} bytes) to {}", path, bytes.len(), dest));
        Ok(())
    }

    fn copy_file(&mut self, args: &str) -> Result<()> {
        let path = single_path(args, "Copy File")?;
        let absolute = std::fs::canonicalize(&path)
            .map_err(|e| Error::Plugin(format!("Cannot copy {}: {}", path, e)))?;
        let url = Url::from_file_path(&absolute)
            .map_err(|_| Error::Plugin(format!("Cannot build a file URL for {:?}", absolute)))?;

        self.paster.copy_to_clipboard(url.as_str())?;
        self.set_status(format!("Copied {} to clipboard", url));
        Ok(())
    }

    fn list_windows(&mut self) -> Result<()> {
        self.windows = self.paster.list_windows()?;
        let listing: Vec<String> = self
            .windows
            .iter()
            .enumerate()
            .map(|(i, w)| format!("{}. {}", i + 1, w))
            .collect();
        self.set_status(format!("Windows:\n{}", listing.join("\n")));
        Ok(())
    }

    fn select_window(&mut self, args: &str) -> Result<()> {
        let index: usize = args
            .trim()
            .parse()
            .map_err(|_| Error::Plugin(format!("Not a window number: '{}'", args.trim())))?;
        let window = index
            .checked_sub(1)
            .and_then(|i| self.windows.get(i))
            .cloned()
            .ok_or_else(|| Error::Plugin(format!("No window {} (run List Windows first)", index)))?;

        self.paster.select_window(window.clone());
        self.set_status(format!("Paste window: {}", window));
        Ok(())
    }

    fn set_target(&mut self, args: &str) -> Result<()> {
        self.target = args.parse()?;
        self.set_status(format!("Paste target set to {}", self.target));
        Ok(())
    }
}

/// Records prompt groups and pastes prompts to a chosen target
pub struct PromptManagerPlugin {
    state: Arc<RwLock<PromptState>>,
}

impl PromptManagerPlugin {
    /// Plugin using the system clipboard and `xdotool`
    pub fn new(config: &PromptsConfig) -> Self {
        Self::with_backends(
            config,
            Box::new(ArboardClipboard::new()),
            Box::new(XdotoolAutomation::new()),
        )
    }

    pub fn with_backends(
        config: &PromptsConfig,
        clipboard: Box<dyn ClipboardSink>,
        automation: Box<dyn WindowAutomation>,
    ) -> Self {
        Self {
            state: Arc::new(RwLock::new(PromptState {
                ledger: Ledger::in_memory(),
                history_file: config.history_file.clone(),
                paster: Paster::new(clipboard, automation),
                target: config.paste_target,
                draft: String::new(),
                windows: Vec::new(),
                status: String::new(),
                panel: None,
            })),
        }
    }

    /// Rendered history
    pub fn history(&self) -> String {
        self.state.read().ledger.render()
    }

    /// Current prompt input
    pub fn draft(&self) -> String {
        self.state.read().draft.clone()
    }

    /// Run `f` against the ledger
    pub fn with_ledger<R>(&self, f: impl FnOnce(&Ledger) -> R) -> R {
        f(&self.state.read().ledger)
    }
}

impl Plugin for PromptManagerPlugin {
    fn info(&self) -> PluginInfo {
        PluginInfo::new(PLUGIN_NAME, "Manage prompt groups and history")
    }

    fn initialize(&mut self, host: &mut dyn HostContext) -> Result<()> {
        let panel = host.attach_panel(PLUGIN_NAME);
        let mut state = self.state.write();
        let store = HistoryStore::new(&state.history_file);
        state.ledger = Ledger::open(store);
        state.panel = Some(panel);
        state.refresh();
        Ok(())
    }

    /// Each session records into a group of its own
    fn start(&mut self) -> Result<()> {
        let mut state = self.state.write();
        state.ledger.new_group();
        state.refresh();
        Ok(())
    }

    fn menu_items(&self) -> Vec<MenuItem> {
        vec![
            self.action("Show/Hide Prompt Manager", |state, _| {
                if let Some(panel) = &state.panel {
                    panel.toggle();
                }
                Ok(())
            }),
            self.action("Confirm", |state, args| {
                state.confirm(args);
                Ok(())
            }),
            self.action("New Group", |state, _| {
                state.new_group();
                Ok(())
            }),
            self.action("Add File", PromptState::add_files),
            self.action("Edit Draft", |state, args| {
                state.draft = args.to_string();
                state.refresh();
                Ok(())
            }),
            self.action("Paste Prompt", PromptState::paste_prompt),
            self.action("Paste File", PromptState::paste_file),
            self.action("Restore File", PromptState::restore_file),
            self.action("Copy File", PromptState::copy_file),
            self.action("List Windows", |state, _| state.list_windows()),
            self.action("Select Window", PromptState::select_window),
            self.action("Paste Target", PromptState::set_target),
        ]
    }
}

impl PromptManagerPlugin {
    fn action<F>(&self, name: &str, f: F) -> MenuItem
    where
        F: Fn(&mut PromptState, &str) -> Result<()> + Send + Sync + 'static,
    {
        let state = self.state.clone();
        MenuItem::new(name, move |args| f(&mut *state.write(), args))
    }
}

/// `<group>.<prompt>`, both 1-based
fn parse_prompt_address(args: &str) -> Result<(usize, usize)> {
    let args = args.trim();
    args.split_once('.')
        .and_then(|(g, p)| Some((g.trim().parse().ok()?, p.trim().parse().ok()?)))
        .ok_or_else(|| Error::Plugin(format!("Expected <group>.<prompt>, got '{}'", args)))
}

fn single_path(args: &str, action: &str) -> Result<String> {
    let mut parts = split_args(args).into_iter();
    match (parts.next(), parts.next()) {
        (Some(path), None) => Ok(path),
        _ => Err(Error::Plugin(format!("{} needs exactly one path", action))),
    }
}

/// Split on whitespace, keeping single- or double-quoted runs together
fn split_args(input: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut in_arg = false;

    for c in input.chars() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), c) => current.push(c),
            (None, '"' | '\'') => {
                quote = Some(c);
                in_arg = true;
            }
            (None, c) if c.is_whitespace() => {
                if in_arg {
                    args.push(std::mem::take(&mut current));
                    in_arg = false;
                }
            }
            (None, c) => {
                current.push(c);
                in_arg = true;
            }
        }
    }
    if in_arg {
        args.push(current);
    }
    args
}

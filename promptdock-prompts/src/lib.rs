//! Promptdock Prompt Manager
//!
//! Records prompts and file references into timestamped groups, persists
//! them as JSON on every change, and pastes prompts into the input draft,
//! the clipboard, or a selected foreign window.

mod group;
mod history;
mod ledger;
mod paste;
mod plugin;

pub use group::{FileSnapshot, PromptGroup, TIMESTAMP_FORMAT};
pub use history::HistoryStore;
pub use ledger::{parse_file_urls, ConfirmOutcome, Ledger};
pub use paste::{
    documents_block, ArboardClipboard, ClipboardSink, PasteReport, Paster, WindowAutomation,
    WindowInfo, XdotoolAutomation,
};
pub use plugin::PromptManagerPlugin;

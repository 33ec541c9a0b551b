//! Promptdock File Reader
//!
//! Dumps the text of a folder tree into a flat log, skipping entries matched
//! by an exclusion set:
//! - literal directory and file names
//! - `*suffix` wildcard patterns
//! - case-insensitive file extensions
//!
//! User additions to the exclusion set persist in a JSON settings file.

mod exclusion;
mod plugin;
mod settings;
mod walker;

pub use exclusion::ExclusionSet;
pub use plugin::FileReaderPlugin;
pub use settings::ExclusionSettings;
pub use walker::{render_log, ContentWalker, FileContent, WalkEntry, SEPARATOR_WIDTH};

//! Promptdock Plugin System
//!
//! Plugins register a factory under a name, the loader instantiates the ones
//! named by manifests in the plugin directory, and each plugin receives a
//! narrow [`HostContext`] to attach panels and menu actions.

mod loader;
mod manifest;
mod panel;
mod registry;
mod traits;

pub use loader::{LoadedPlugin, PluginLoader};
pub use manifest::PluginManifest;
pub use panel::Panel;
pub use registry::{PluginFactory, PluginRegistry};
pub use traits::{HostContext, MenuCallback, MenuItem, Plugin, PluginInfo};

//! Plugin traits

use crate::panel::Panel;
use promptdock_core::Result;
use std::fmt;
use std::sync::Arc;

/// Plugin information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginInfo {
    /// Display name, used as the plugin's submenu title
    pub name: String,
    /// Plugin description
    pub description: String,
}

impl PluginInfo {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Callback run when a menu action is triggered.
///
/// Receives the raw argument text typed after the action.
pub type MenuCallback = Arc<dyn Fn(&str) -> Result<()> + Send + Sync>;

/// A named, clickable menu action
#[derive(Clone)]
pub struct MenuItem {
    pub name: String,
    pub callback: MenuCallback,
}

impl MenuItem {
    pub fn new<F>(name: impl Into<String>, callback: F) -> Self
    where
        F: Fn(&str) -> Result<()> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            callback: Arc::new(callback),
        }
    }

    /// Run the action
    pub fn trigger(&self, args: &str) -> Result<()> {
        (self.callback)(args)
    }
}

impl fmt::Debug for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuItem").field("name", &self.name).finish()
    }
}

/// What the host exposes to plugins
pub trait HostContext {
    /// Attach a new panel to the host layout and hand back a shared handle
    fn attach_panel(&mut self, title: &str) -> Panel;

    /// Add an action to the plugin's submenu
    fn register_menu_action(&mut self, plugin: &str, item: MenuItem);

    /// Remove a panel again, e.g. one attached by a plugin that then failed
    /// to initialize
    fn detach_panel(&mut self, panel: &Panel);
}

/// Main plugin trait
pub trait Plugin: Send + Sync {
    /// Get plugin information
    fn info(&self) -> PluginInfo;

    /// Initialize the plugin against the host
    fn initialize(&mut self, host: &mut dyn HostContext) -> Result<()>;

    /// Menu actions this plugin contributes
    fn menu_items(&self) -> Vec<MenuItem>;

    /// An interactive session is starting. Not called for one-shot commands
    /// that only inspect the loaded plugins.
    fn start(&mut self) -> Result<()> {
        Ok(())
    }
}

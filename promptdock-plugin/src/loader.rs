//! Plugin loader

use crate::manifest::PluginManifest;
use crate::panel::Panel;
use crate::registry::PluginRegistry;
use crate::traits::{HostContext, MenuItem, Plugin, PluginInfo};
use promptdock_core::error::{Error, Result};
use std::path::Path;

/// A plugin that made it through loading
pub struct LoadedPlugin {
    /// Registered name (manifest stem)
    pub name: String,
    pub plugin: Box<dyn Plugin>,
}

impl LoadedPlugin {
    pub fn info(&self) -> PluginInfo {
        self.plugin.info()
    }

    /// Begin an interactive session; failures are logged, not fatal
    pub fn start(&mut self) {
        if let Err(e) = self.plugin.start() {
            tracing::error!("Failed to start plugin {}: {}", self.name, e);
        }
    }
}

/// Forwards to the real host and remembers the panels a plugin attached
struct Tracking<'h> {
    host: &'h mut dyn HostContext,
    panels: Vec<Panel>,
}

impl HostContext for Tracking<'_> {
    fn attach_panel(&mut self, title: &str) -> Panel {
        let panel = self.host.attach_panel(title);
        self.panels.push(panel.clone());
        panel
    }

    fn register_menu_action(&mut self, plugin: &str, item: MenuItem) {
        self.host.register_menu_action(plugin, item);
    }

    fn detach_panel(&mut self, panel: &Panel) {
        self.panels.retain(|p| !p.same(panel));
        self.host.detach_panel(panel);
    }
}

/// Plugin loader
pub struct PluginLoader<'a> {
    registry: &'a PluginRegistry,
}

impl<'a> PluginLoader<'a> {
    pub fn new(registry: &'a PluginRegistry) -> Self {
        Self { registry }
    }

    /// Load plugins named by the manifests in `dir`.
    ///
    /// The directory is created if missing. With no manifests present every
    /// registered plugin is loaded. A plugin that fails is logged and left
    /// out; loading never aborts.
    pub fn load_from_dir(&self, dir: &Path, host: &mut dyn HostContext) -> Vec<LoadedPlugin> {
        if !dir.exists() {
            tracing::info!("📁 Creating plugin directory {:?}", dir);
            if let Err(e) = std::fs::create_dir_all(dir) {
                tracing::warn!("Failed to create plugin directory {:?}: {}", dir, e);
            }
        }

        let manifests = match PluginManifest::discover(dir) {
            Ok(paths) => paths,
            Err(e) => {
                tracing::warn!("Failed to scan plugin directory {:?}: {}", dir, e);
                Vec::new()
            }
        };

        if manifests.is_empty() {
            tracing::debug!("No plugin manifests in {:?}, loading all registered plugins", dir);
            return self.load_all(host);
        }

        let mut loaded = Vec::new();
        for path in manifests {
            let manifest = match PluginManifest::load(&path) {
                Ok(m) => m,
                Err(e) => {
                    tracing::error!("Failed to load plugin {:?}: {}", path, e);
                    continue;
                }
            };

            if !manifest.enabled {
                tracing::info!("Plugin {} is disabled by {:?}", manifest.name, path);
                continue;
            }

            match self.load_one(&manifest.name, host) {
                Ok(plugin) => loaded.push(plugin),
                Err(e) => tracing::error!("Failed to load plugin {:?}: {}", path, e),
            }
        }
        loaded
    }

    /// Load every registered plugin in registration order
    pub fn load_all(&self, host: &mut dyn HostContext) -> Vec<LoadedPlugin> {
        let mut loaded = Vec::new();
        for name in self.registry.names() {
            match self.load_one(name, host) {
                Ok(plugin) => loaded.push(plugin),
                Err(e) => tracing::error!("Failed to load plugin {}: {}", name, e),
            }
        }
        loaded
    }

    /// Instantiate, initialize and wire up the menu of a single plugin
    pub fn load_one(&self, name: &str, host: &mut dyn HostContext) -> Result<LoadedPlugin> {
        let mut plugin = self
            .registry
            .create(name)
            .ok_or_else(|| Error::Plugin(format!("No plugin registered as '{}'", name)))?;

        let (result, attached) = {
            let mut tracking = Tracking {
                host: &mut *host,
                panels: Vec::new(),
            };
            let result = plugin.initialize(&mut tracking);
            (result, tracking.panels)
        };
        if let Err(e) = result {
            for panel in &attached {
                host.detach_panel(panel);
            }
            return Err(e);
        }

        let info = plugin.info();
        let items = plugin.menu_items();
        tracing::info!("🔌 Loaded plugin {} ({} menu item(s))", info.name, items.len());
        for item in items {
            host.register_menu_action(&info.name, item);
        }

        Ok(LoadedPlugin {
            name: name.to_string(),
            plugin,
        })
    }
}

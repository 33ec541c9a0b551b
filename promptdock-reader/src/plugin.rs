//! File Reader plugin

use crate::exclusion::ExclusionSet;
use crate::settings::ExclusionSettings;
use crate::walker::ContentWalker;
use parking_lot::RwLock;
use promptdock_core::config::ReaderConfig;
use promptdock_core::error::{Error, Result};
use promptdock_plugin::{HostContext, MenuItem, Panel, Plugin, PluginInfo};
use std::path::Path;
use std::sync::Arc;

pub const PLUGIN_NAME: &str = "File Reader";

/// State shared between the plugin and its menu callbacks
struct ReaderState {
    exclusions: ExclusionSet,
    settings: ExclusionSettings,
    panel: Option<Panel>,
}

impl ReaderState {
    fn panel(&self) -> Result<&Panel> {
        self.panel
            .as_ref()
            .ok_or_else(|| Error::Plugin(format!("{} is not initialized", PLUGIN_NAME)))
    }

    fn read_folder(&self, folder: &str) -> Result<()> {
        let folder = folder.trim();
        if folder.is_empty() {
            return Err(Error::Plugin("Select Folder needs a folder path".to_string()));
        }

        let path = Path::new(folder);
        if !path.is_dir() {
            return Err(Error::Plugin(format!("Not a folder: {}", folder)));
        }

        tracing::info!("📁 Reading folder {:?}", path);
        let log = ContentWalker::new(&self.exclusions).read_folder(path);
        self.panel()?.set_text(log);
        Ok(())
    }

    fn show_exclusions(&self) -> Result<()> {
        let names: Vec<_> = self.exclusions.names().collect();
        let extensions: Vec<_> = self.exclusions.extensions().collect();
        self.panel()?.set_text(format!(
            "Excluded files and folders:\n{}\n\nExcluded extensions:\n{}",
            names.join("\n"),
            extensions.join("\n")
        ));
        Ok(())
    }

    /// Apply an edit and persist the full sets
    fn edit<F>(&mut self, edit: F) -> Result<()>
    where
        F: FnOnce(&mut ExclusionSet) -> bool,
    {
        if edit(&mut self.exclusions) {
            self.settings.save(&self.exclusions)?;
        }
        self.show_exclusions()
    }
}

/// Shows the text content of a folder tree
pub struct FileReaderPlugin {
    state: Arc<RwLock<ReaderState>>,
}

impl FileReaderPlugin {
    pub fn new(config: &ReaderConfig) -> Self {
        let settings = ExclusionSettings::new(&config.settings_file);
        let exclusions = settings.load_with_defaults();
        Self {
            state: Arc::new(RwLock::new(ReaderState {
                exclusions,
                settings,
                panel: None,
            })),
        }
    }

    /// Current exclusion set
    pub fn exclusions(&self) -> ExclusionSet {
        self.state.read().exclusions.clone()
    }
}

impl Plugin for FileReaderPlugin {
    fn info(&self) -> PluginInfo {
        PluginInfo::new(PLUGIN_NAME, "Read and display folder contents")
    }

    fn initialize(&mut self, host: &mut dyn HostContext) -> Result<()> {
        let panel = host.attach_panel(PLUGIN_NAME);
        self.state.write().panel = Some(panel);
        Ok(())
    }

    fn menu_items(&self) -> Vec<MenuItem> {
        let toggle = self.state.clone();
        let select = self.state.clone();
        let show = self.state.clone();
        let exclude_name = self.state.clone();
        let exclude_ext = self.state.clone();
        let remove = self.state.clone();

        vec![
            MenuItem::new("Show/Hide File Reader", move |_| {
                toggle.read().panel()?.toggle();
                Ok(())
            }),
            MenuItem::new("Select Folder", move |args| select.read().read_folder(args)),
            MenuItem::new("Show Exclusions", move |_| show.read().show_exclusions()),
            MenuItem::new("Exclude Name", move |args| {
                let name = args.trim().to_string();
                exclude_name.write().edit(|set| set.add_name(name))
            }),
            MenuItem::new("Exclude Extension", move |args| {
                exclude_ext.write().edit(|set| set.add_extension(args))
            }),
            MenuItem::new("Remove Exclusion", move |args| {
                remove.write().edit(|set| set.remove(args))
            }),
        ]
    }
}

//! Built-in plugin registrations

use promptdock_core::config::ShellConfig;
use promptdock_plugin::PluginRegistry;
use promptdock_prompts::PromptManagerPlugin;
use promptdock_reader::FileReaderPlugin;

/// Registry with the plugins shipped in this binary, keyed by manifest name
pub fn builtin_registry(config: &ShellConfig) -> PluginRegistry {
    let mut registry = PluginRegistry::new();

    let reader = config.reader.clone();
    registry.register("file_reader", move || Box::new(FileReaderPlugin::new(&reader)));

    let prompts = config.prompts.clone();
    registry.register("prompt_manager", move || Box::new(PromptManagerPlugin::new(&prompts)));

    registry
}

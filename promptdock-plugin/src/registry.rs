//! Plugin registry

use crate::traits::Plugin;
use std::collections::HashMap;

/// Builds a fresh, uninitialized plugin instance
pub type PluginFactory = Box<dyn Fn() -> Box<dyn Plugin> + Send + Sync>;

/// Explicit name-to-factory registrations
pub struct PluginRegistry {
    factories: HashMap<String, PluginFactory>,
    /// Registration order, used when loading everything
    order: Vec<String>,
}

impl PluginRegistry {
    /// Create a new plugin registry
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Register a plugin factory. A second registration under the same name
    /// replaces the first.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn() -> Box<dyn Plugin> + Send + Sync + 'static,
    {
        let name = name.into();
        tracing::debug!("Registering plugin factory: {}", name);
        if self.factories.insert(name.clone(), Box::new(factory)).is_none() {
            self.order.push(name);
        }
    }

    /// Instantiate a plugin by name
    pub fn create(&self, name: &str) -> Option<Box<dyn Plugin>> {
        self.factories.get(name).map(|factory| factory())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered names in registration order
    pub fn names(&self) -> &[String] {
        &self.order
    }
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::new()
    }
}

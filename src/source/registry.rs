//! Process-wide module registry

use crate::domain::Module;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

static GLOBAL: Lazy<ModuleRegistry> = Lazy::new(ModuleRegistry::new);

/// Loaded modules keyed by dotted name.
///
/// Imports consult the registry before the search path, and successful
/// imports are registered, so a name resolves to the same module for the rest
/// of the process. The path-based override is registered under
/// `superset_config` for the same reason.
#[derive(Debug, Default)]
pub struct ModuleRegistry {
    modules: Mutex<HashMap<String, Arc<Module>>>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry shared by the whole process.
    pub fn global() -> &'static ModuleRegistry {
        &GLOBAL
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Arc<Module>>> {
        self.modules.lock().unwrap_or_else(|poison| poison.into_inner())
    }

    /// Register `module` under its own name, replacing any previous entry.
    pub fn register(&self, module: Module) -> Arc<Module> {
        let module = Arc::new(module);
        self.lock().insert(module.name().to_string(), Arc::clone(&module));
        module
    }

    pub fn get(&self, name: &str) -> Option<Arc<Module>> {
        self.lock().get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lock().contains_key(name)
    }
}

//! Dotted module names → documents on the search path

use super::parse::load_module;
use super::registry::ModuleRegistry;
use crate::domain::Module;
use crate::error::{ConfigError, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Extensions tried, in order, for each search directory.
pub const MODULE_EXTENSIONS: &[&str] = &["toml", "yaml", "yml"];

/// Resolves dotted module names against an ordered list of directories.
///
/// `a.b.c` resolves to the first existing `<dir>/a/b/c.<ext>`.
#[derive(Debug, Clone, Default)]
pub struct Importer {
    search_path: Vec<PathBuf>,
}

impl Importer {
    pub fn new(search_path: Vec<PathBuf>) -> Self {
        Self { search_path }
    }

    pub fn search_path(&self) -> &[PathBuf] {
        &self.search_path
    }

    /// Locate the file backing `name`, without loading it.
    pub fn find_module(&self, name: &str) -> Option<PathBuf> {
        let relative = module_relative_path(name)?;
        for dir in &self.search_path {
            for ext in MODULE_EXTENSIONS {
                let candidate = dir.join(&relative).with_extension(ext);
                if candidate.is_file() {
                    return Some(candidate);
                }
            }
        }
        None
    }

    /// True when `name` is registered or present on the search path.
    pub fn is_importable(&self, name: &str, registry: &ModuleRegistry) -> bool {
        registry.contains(name) || self.find_module(name).is_some()
    }

    /// Import `name`: the registered module if any, else load it from the
    /// search path and register it.
    pub fn import(&self, name: &str, registry: &ModuleRegistry) -> Result<Arc<Module>> {
        if let Some(module) = registry.get(name) {
            tracing::debug!("Module {} already registered", name);
            return Ok(module);
        }

        let path = self.find_module(name).ok_or_else(|| ConfigError::ModuleNotFound(name.to_string()))?;
        let module = load_module(name, &path)?;
        Ok(registry.register(module))
    }

    /// Load the file at `path` as a module called `name`. Nothing is registered.
    pub fn load_from_path(&self, name: &str, path: &Path) -> Result<Module> {
        load_module(name, path)
    }
}

/// `a.b.c` → `a/b/c`; `None` when any segment is empty or not identifier-like.
fn module_relative_path(name: &str) -> Option<PathBuf> {
    let mut relative = PathBuf::new();
    for segment in name.split('.') {
        let valid = segment.chars().next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
            && segment.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !valid {
            return None;
        }
        relative.push(segment);
    }
    Some(relative)
}

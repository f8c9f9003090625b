//! Configuration sources handed from loaders to the assembler

use super::namespace::ClassNamespace;
use super::value::Mapping;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A loaded configuration document addressed by a dotted module name.
#[derive(Debug, Clone, PartialEq)]
pub struct Module {
    name: String,
    file: Option<PathBuf>,
    namespace: Mapping,
}

impl Module {
    /// A module compiled into the binary or built in code; it has no file.
    pub fn builtin(name: impl Into<String>, namespace: Mapping) -> Self {
        Self { name: name.into(), file: None, namespace }
    }

    pub fn from_file(name: impl Into<String>, file: PathBuf, namespace: Mapping) -> Self {
        Self { name: name.into(), file: Some(file), namespace }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    /// The full namespace, private names included.
    pub fn namespace(&self) -> &Mapping {
        &self.namespace
    }
}

/// Anything a loader can hand to the key extractor.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    Module(Arc<Module>),
    Class(ClassNamespace),
    Mapping(Mapping),
}

impl ConfigSource {
    pub fn empty() -> Self {
        ConfigSource::Mapping(Mapping::new())
    }

    /// Human-readable origin, used in diagnostics.
    pub fn describe(&self) -> String {
        match self {
            ConfigSource::Module(m) => match m.file() {
                Some(file) => format!("module '{}' ({})", m.name(), file.display()),
                None => format!("module '{}' (built-in)", m.name()),
            },
            ConfigSource::Class(c) => format!("class '{}'", c.name()),
            ConfigSource::Mapping(m) if m.is_empty() => "empty mapping".to_string(),
            ConfigSource::Mapping(m) => format!("mapping with {} entries", m.len()),
        }
    }
}

impl From<Module> for ConfigSource {
    fn from(value: Module) -> Self {
        ConfigSource::Module(Arc::new(value))
    }
}

impl From<Mapping> for ConfigSource {
    fn from(value: Mapping) -> Self {
        ConfigSource::Mapping(value)
    }
}

impl From<ClassNamespace> for ConfigSource {
    fn from(value: ClassNamespace) -> Self {
        ConfigSource::Class(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_reports_origin() {
        let builtin = ConfigSource::from(Module::builtin("superset.config", Mapping::new()));
        assert_eq!(builtin.describe(), "module 'superset.config' (built-in)");

        let file = ConfigSource::from(Module::from_file(
            "superset_config",
            PathBuf::from("/etc/superset/superset_config.toml"),
            Mapping::new(),
        ));
        assert_eq!(
            file.describe(),
            "module 'superset_config' (/etc/superset/superset_config.toml)"
        );

        assert_eq!(ConfigSource::empty().describe(), "empty mapping");
    }
}

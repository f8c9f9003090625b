//! Error types for configuration loading.

use crate::domain::Kind;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while resolving, reading, or reducing configuration sources.
///
/// Every variant is fatal at boot. Merge-time conflicts never surface here:
/// unmatched kind pairs fall back to take-right, and deep-merge rejections
/// are recovered inside the mapping strategy.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No registered module and no file on the search path for a dotted name.
    #[error("No module named '{0}'")]
    ModuleNotFound(String),

    #[error("Failed reading config file: {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid TOML syntax: {}", path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid YAML syntax: {}", path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Unsupported config extension '.{ext}' for file {}", path.display())]
    UnsupportedFormat { ext: String, path: PathBuf },

    #[error("Invalid value for '{key}' in {}: {reason}", path.display())]
    InvalidValue {
        path: PathBuf,
        key: String,
        reason: String,
    },

    /// `SUPERSET_CONFIG_PATH` named a file that could not be loaded.
    #[error("Failed to import config for {env_var}={}", path.display())]
    OverridePathUnloadable {
        env_var: String,
        path: PathBuf,
        #[source]
        source: Box<ConfigError>,
    },

    /// The override module was importable but failed while loading.
    #[error("Found but failed to import local {module}")]
    OverrideModuleUnloadable {
        module: String,
        #[source]
        source: Box<ConfigError>,
    },

    /// Key extraction was asked to reduce a value without an attribute namespace.
    #[error("{kind} value has no attribute namespace")]
    NotANamespace { kind: Kind },
}

/// Result type alias for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

//! Configuration source resolution
//!
//! Locates the default and override configuration modules. A module is a
//! TOML or YAML document addressed by a dotted name, either registered in
//! the process-wide [`ModuleRegistry`] or found on the search path.

pub mod context;
pub mod default;
pub mod env;
pub mod importer;
pub mod overrides;
pub mod parse;
pub mod registry;

pub use context::{SourceContext, SEARCH_PATH_ENV_VAR};
pub use default::{load_default_source, CONFIG_MODULE_ENV_VAR, DEFAULT_CONFIG_MODULE};
pub use env::Env;
pub use importer::Importer;
pub use overrides::{load_override_source, CONFIG_PATH_ENV_VAR, OVERRIDE_MODULE_NAME};
pub use registry::ModuleRegistry;

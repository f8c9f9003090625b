//! superset-config: layered application configuration
//!
//! Assembles one effective configuration from the defaults shipped with the
//! application and an optional deployer override, merging each key with a
//! strategy chosen by the kinds of the two values (class-like namespace,
//! mapping, or scalar).

pub mod assemble;
pub mod domain;
pub mod error;
pub mod extract;
pub mod merge;
pub mod source;

pub use assemble::{assemble, load_config, merge_sources, EffectiveConfig};
pub use domain::{ClassNamespace, ConfigSource, ConfigValue, Kind, Mapping, Module, Scalar};
pub use error::{ConfigError, Result};
pub use merge::{MergeStrategy, MergeStrategyTable};
pub use source::{Env, ModuleRegistry, SourceContext};

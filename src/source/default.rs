//! Default source loader: where do the built-in defaults live?

use super::context::SourceContext;
use crate::domain::ConfigSource;
use crate::error::Result;

/// Environment variable naming the dotted default module.
pub const CONFIG_MODULE_ENV_VAR: &str = "SUPERSET_CONFIG";

/// Dotted default module used when `SUPERSET_CONFIG` is unset.
pub const DEFAULT_CONFIG_MODULE: &str = "superset.config";

/// Import the default configuration module.
///
/// Failure is fatal and returned unchanged: a server without resolvable
/// defaults has no safe behavior.
pub fn load_default_source(ctx: &SourceContext<'_>) -> Result<ConfigSource> {
    let name = ctx.get_env().get(CONFIG_MODULE_ENV_VAR).unwrap_or(DEFAULT_CONFIG_MODULE);
    tracing::debug!("Importing default configuration module {}", name);
    let module = ctx.importer().import(name, ctx.registry())?;
    Ok(ConfigSource::Module(module))
}

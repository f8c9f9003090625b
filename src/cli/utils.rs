//! Shared CLI utilities.

use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};
use superset_config::source::parse::parse_toml_namespace;
use superset_config::source::{ModuleRegistry, SourceContext, DEFAULT_CONFIG_MODULE};
use superset_config::Module;

/// Defaults compiled into the binary, registered as `superset.config`.
const BUILTIN_DEFAULTS: &str = include_str!("../../defaults/config.toml");

/// Source resolution options shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Extra module search directory, searched after the current directory (repeatable)
    #[arg(long = "search-path", value_name = "DIR")]
    pub search_path: Vec<PathBuf>,

    /// Ignore an importable superset_config module, as under a test harness
    #[arg(long)]
    pub test_mode: bool,
}

/// Build the process source context, with built-in defaults registered.
pub fn source_context(args: &SourceArgs) -> Result<SourceContext<'static>> {
    register_builtin_defaults(ModuleRegistry::global())?;

    let ctx = SourceContext::from_process();
    let mut search_path = ctx.importer().search_path().to_vec();
    search_path.extend(args.search_path.iter().cloned());
    Ok(ctx.search_path(search_path).test_mode(args.test_mode))
}

fn register_builtin_defaults(registry: &ModuleRegistry) -> Result<()> {
    if registry.contains(DEFAULT_CONFIG_MODULE) {
        return Ok(());
    }
    let namespace = parse_toml_namespace(BUILTIN_DEFAULTS, Path::new("defaults/config.toml"))
        .context("Built-in defaults are invalid")?;
    registry.register(Module::builtin(DEFAULT_CONFIG_MODULE, namespace));
    Ok(())
}

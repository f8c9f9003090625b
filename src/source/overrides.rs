//! Override source loader: where does the deployer's override live?

use super::context::SourceContext;
use crate::domain::{ConfigSource, Module};
use crate::error::{ConfigError, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Environment variable holding the path of the override file.
pub const CONFIG_PATH_ENV_VAR: &str = "SUPERSET_CONFIG_PATH";

/// Conventional module name of the deployer's override.
pub const OVERRIDE_MODULE_NAME: &str = "superset_config";

/// Resolve the deployer's override. First match wins:
///
/// 1. `SUPERSET_CONFIG_PATH` names a file, loaded and registered as `superset_config`.
/// 2. An importable `superset_config` module, unless in test mode.
/// 3. An empty mapping: no override is not an error.
pub fn load_override_source(ctx: &SourceContext<'_>) -> Result<ConfigSource> {
    if let Some(raw) = ctx.get_env().get(CONFIG_PATH_ENV_VAR) {
        let module = load_from_env_path(ctx, Path::new(raw))?;
        return Ok(ConfigSource::Module(module));
    }

    if !ctx.is_test_mode() && ctx.importer().is_importable(OVERRIDE_MODULE_NAME, ctx.registry()) {
        let module = ctx.importer().import(OVERRIDE_MODULE_NAME, ctx.registry()).map_err(|e| {
            tracing::error!("Found but failed to import local {}: {}", OVERRIDE_MODULE_NAME, e);
            ConfigError::OverrideModuleUnloadable {
                module: OVERRIDE_MODULE_NAME.to_string(),
                source: Box::new(e),
            }
        })?;
        log_loaded(&module);
        return Ok(ConfigSource::Module(module));
    }

    tracing::debug!("No local configuration override found");
    Ok(ConfigSource::empty())
}

fn load_from_env_path(ctx: &SourceContext<'_>, path: &Path) -> Result<Arc<Module>> {
    let module = ctx.importer().load_from_path(OVERRIDE_MODULE_NAME, path).map_err(|e| {
        tracing::error!(
            env_var = CONFIG_PATH_ENV_VAR,
            path = %path.display(),
            "Failed to import config for {}={}: {}",
            CONFIG_PATH_ENV_VAR,
            path.display(),
            e
        );
        ConfigError::OverridePathUnloadable {
            env_var: CONFIG_PATH_ENV_VAR.to_string(),
            path: path.to_path_buf(),
            source: Box::new(e),
        }
    })?;

    let module = ctx.registry().register(module);
    log_loaded(&module);
    Ok(module)
}

fn log_loaded(module: &Module) {
    let file = module.file().map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from("<built-in>"));
    tracing::info!("Loaded your LOCAL configuration at [{}]", file.display());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Mapping;
    use crate::source::{Env, ModuleRegistry};
    use std::fs;
    use tempfile::TempDir;

    fn module_dir(mode: &str) -> TempDir {
        let tmp = TempDir::new().expect("tmp");
        fs::write(tmp.path().join("superset_config.toml"), format!("MODE = '{}'\n", mode))
            .expect("write");
        tmp
    }

    fn mode_of(source: &ConfigSource) -> Option<String> {
        match source {
            ConfigSource::Module(m) => m.namespace().get("MODE").and_then(|v| v.as_str()).map(String::from),
            _ => None,
        }
    }

    #[test]
    fn path_takes_precedence_over_module() {
        let search = module_dir("from-module");
        let other = TempDir::new().expect("tmp");
        let path = other.path().join("x.toml");
        fs::write(&path, "MODE = 'from-path'\n").expect("write");

        let registry = ModuleRegistry::new();
        let ctx = SourceContext::new(&registry)
            .env(Env::from_pairs([(CONFIG_PATH_ENV_VAR, path.display().to_string())]))
            .search_path(vec![search.path().to_path_buf()]);

        let source = load_override_source(&ctx).expect("override");
        assert_eq!(mode_of(&source).as_deref(), Some("from-path"));

        let registered = registry.get(OVERRIDE_MODULE_NAME).expect("registered");
        assert_eq!(registered.namespace()["MODE"].as_str(), Some("from-path"));
        assert!(registered.file().expect("file").is_absolute());
    }

    #[test]
    fn path_is_honored_in_test_mode() {
        let other = TempDir::new().expect("tmp");
        let path = other.path().join("x.yaml");
        fs::write(&path, "MODE: from-path\n").expect("write");

        let registry = ModuleRegistry::new();
        let ctx = SourceContext::new(&registry)
            .env(Env::from_pairs([(CONFIG_PATH_ENV_VAR, path.display().to_string())]))
            .test_mode(true);

        let source = load_override_source(&ctx).expect("override");
        assert_eq!(mode_of(&source).as_deref(), Some("from-path"));
    }

    #[test]
    fn unloadable_path_is_fatal() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("missing.toml");
        let registry = ModuleRegistry::new();
        let ctx = SourceContext::new(&registry)
            .env(Env::from_pairs([(CONFIG_PATH_ENV_VAR, path.display().to_string())]));

        let err = load_override_source(&ctx).unwrap_err();
        match err {
            ConfigError::OverridePathUnloadable { env_var, path: p, source } => {
                assert_eq!(env_var, CONFIG_PATH_ENV_VAR);
                assert_eq!(p, path);
                assert!(matches!(*source, ConfigError::Io { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(!registry.contains(OVERRIDE_MODULE_NAME));
    }

    #[test]
    fn module_on_search_path_is_used() {
        let search = module_dir("from-module");
        let registry = ModuleRegistry::new();
        let ctx = SourceContext::new(&registry).search_path(vec![search.path().to_path_buf()]);

        let source = load_override_source(&ctx).expect("override");
        assert_eq!(mode_of(&source).as_deref(), Some("from-module"));
    }

    #[test]
    fn test_mode_suppresses_module_lookup() {
        let search = module_dir("from-module");
        let registry = ModuleRegistry::new();
        let ctx = SourceContext::new(&registry)
            .search_path(vec![search.path().to_path_buf()])
            .test_mode(true);

        let source = load_override_source(&ctx).expect("override");
        assert_eq!(source, ConfigSource::empty());
    }

    #[test]
    fn broken_module_is_fatal() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(tmp.path().join("superset_config.toml"), "MODE = \n").expect("write");
        let registry = ModuleRegistry::new();
        let ctx = SourceContext::new(&registry).search_path(vec![tmp.path().to_path_buf()]);

        let err = load_override_source(&ctx).unwrap_err();
        assert!(matches!(err, ConfigError::OverrideModuleUnloadable { .. }));
        assert_eq!(err.to_string(), "Found but failed to import local superset_config");
    }

    #[test]
    fn registered_module_counts_as_importable() {
        let registry = ModuleRegistry::new();
        let mut ns = Mapping::new();
        ns.insert("MODE".to_string(), "registered".into());
        registry.register(Module::builtin(OVERRIDE_MODULE_NAME, ns));
        let ctx = SourceContext::new(&registry);

        let source = load_override_source(&ctx).expect("override");
        assert_eq!(mode_of(&source).as_deref(), Some("registered"));
    }

    #[test]
    fn nothing_configured_yields_empty_mapping() {
        let registry = ModuleRegistry::new();
        let source = load_override_source(&SourceContext::new(&registry)).expect("override");
        assert_eq!(source, ConfigSource::empty());
    }
}

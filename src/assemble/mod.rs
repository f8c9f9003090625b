//! Assembly of the effective configuration
//!
//! Loads the default and override sources, reduces both to their
//! uppercase-public keys, and merges them key by key through the strategy
//! table. Runs once at startup; any error aborts assembly.

pub mod effective;

pub use effective::EffectiveConfig;

use crate::domain::ConfigSource;
use crate::error::Result;
use crate::extract::extract;
use crate::merge::MergeStrategyTable;
use crate::source::{load_default_source, load_override_source, SourceContext};

/// The resolved inputs of one assembly, kept for diagnostics.
#[derive(Debug, Clone)]
pub struct Assembly {
    pub default: ConfigSource,
    pub overrides: ConfigSource,
    pub config: EffectiveConfig,
}

/// Load both sources from `ctx` and merge them with `table`.
pub fn assemble(ctx: &SourceContext<'_>, table: &MergeStrategyTable) -> Result<EffectiveConfig> {
    Ok(assemble_with_sources(ctx, table)?.config)
}

/// Like [`assemble`], also returning the sources that were resolved.
pub fn assemble_with_sources(
    ctx: &SourceContext<'_>,
    table: &MergeStrategyTable,
) -> Result<Assembly> {
    let default = load_default_source(ctx)?;
    let overrides = load_override_source(ctx)?;
    let config = merge_sources(&default, &overrides, table)?;
    Ok(Assembly { default, overrides, config })
}

/// Assemble from the process environment with the default strategy table.
pub fn load_config() -> Result<EffectiveConfig> {
    assemble(&SourceContext::from_process(), &MergeStrategyTable::default())
}

/// Merge two already-loaded sources.
///
/// The result starts as the left keys in their order; right-only keys are
/// appended in right order and shared keys are merged in place.
pub fn merge_sources(
    default: &ConfigSource,
    overrides: &ConfigSource,
    table: &MergeStrategyTable,
) -> Result<EffectiveConfig> {
    let left = extract(default)?;
    let right = extract(overrides)?;

    let mut result = left.clone();
    for (key, right_value) in right {
        let merged = match left.get(&key) {
            Some(left_value) => table.merge(&key, left_value, &right_value)?,
            None => right_value,
        };
        result.insert(key, merged);
    }
    Ok(EffectiveConfig::new(result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ClassNamespace, ConfigValue, Kind, Mapping, Module};
    use crate::merge::MergeStrategy;
    use crate::source::{Env, ModuleRegistry, CONFIG_PATH_ENV_VAR, DEFAULT_CONFIG_MODULE};
    use similar_asserts::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn map(pairs: Vec<(&str, ConfigValue)>) -> Mapping {
        pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
    }

    fn source(pairs: Vec<(&str, ConfigValue)>) -> ConfigSource {
        ConfigSource::from(Module::builtin("test", map(pairs)))
    }

    fn merge(default: ConfigSource, overrides: ConfigSource) -> EffectiveConfig {
        merge_sources(&default, &overrides, &MergeStrategyTable::default()).expect("merge")
    }

    #[test]
    fn feature_flags_deep_merge() {
        let cfg = merge(
            source(vec![("FEATURE_FLAGS", map(vec![("A", true.into()), ("B", false.into())]).into())]),
            source(vec![("FEATURE_FLAGS", map(vec![("B", true.into()), ("C", true.into())]).into())]),
        );
        let flags = cfg.get("FEATURE_FLAGS").and_then(|v| v.as_mapping()).expect("mapping");
        assert_eq!(flags.keys().map(String::as_str).collect::<Vec<_>>(), vec!["A", "B", "C"]);
        assert!(flags.values().all(|v| v.as_bool() == Some(true)));
    }

    #[test]
    fn class_namespace_is_replaced() {
        let cfg = merge(
            source(vec![(
                "CACHE_CONFIG",
                ClassNamespace::new(
                    "CacheConfig",
                    map(vec![("BACKEND", "memory".into()), ("TIMEOUT", 60i64.into())]),
                )
                .into(),
            )]),
            source(vec![(
                "CACHE_CONFIG",
                ClassNamespace::new(
                    "CacheConfig",
                    map(vec![("BACKEND", "redis".into()), ("URL", "redis://x".into())]),
                )
                .into(),
            )]),
        );
        let cache = cfg.get("CACHE_CONFIG").and_then(|v| v.as_class()).expect("class");
        assert_eq!(cache.name(), "CACHE_CONFIG");
        assert_eq!(
            cache.attrs(),
            &map(vec![("BACKEND", "redis".into()), ("URL", "redis://x".into())])
        );
        assert!(cache.get("TIMEOUT").is_none());
    }

    #[test]
    fn class_on_either_side_yields_class() {
        let mapping: ConfigValue = map(vec![("A", 1i64.into())]).into();
        let class: ConfigValue = ClassNamespace::new("Group", map(vec![("B", 2i64.into())])).into();

        let cfg = merge(source(vec![("GROUP", mapping.clone())]), source(vec![("GROUP", class.clone())]));
        let out = cfg.get("GROUP").and_then(|v| v.as_class()).expect("class");
        assert_eq!((out.name(), out.attrs().len()), ("GROUP", 1));

        let cfg = merge(source(vec![("GROUP", class)]), source(vec![("GROUP", mapping)]));
        let out = cfg.get("GROUP").and_then(|v| v.as_class()).expect("class");
        assert_eq!(out.get("A").and_then(|v| v.as_i64()), Some(1));
        assert!(out.get("B").is_none());
    }

    #[test]
    fn scalars_right_wins() {
        let cfg = merge(
            source(vec![("SECRET_KEY", "dev".into()), ("ROW_LIMIT", 100i64.into())]),
            source(vec![("SECRET_KEY", "prod-abc".into()), ("ROW_LIMIT", ConfigValue::none())]),
        );
        assert_eq!(cfg.get("SECRET_KEY").and_then(|v| v.as_str()), Some("prod-abc"));
        assert!(cfg.get("ROW_LIMIT").map(ConfigValue::is_none).unwrap_or(false));
    }

    #[test]
    fn mapping_replaced_by_scalar_takes_right() {
        let cfg = merge(
            source(vec![("FLAGS", map(vec![("A", true.into())]).into())]),
            source(vec![("FLAGS", "off".into())]),
        );
        assert_eq!(cfg.get("FLAGS").map(|v| v.kind()), Some(Kind::Scalar));
    }

    #[test]
    fn private_names_are_dropped() {
        let cfg = merge(
            source(vec![
                ("PUBLIC", 1i64.into()),
                ("_hidden", 2i64.into()),
                ("lowercase", 3i64.into()),
                ("__dunder", 4i64.into()),
            ]),
            ConfigSource::empty(),
        );
        assert_eq!(cfg.keys().collect::<Vec<_>>(), vec!["PUBLIC"]);
    }

    #[test]
    fn key_union_and_order() {
        let cfg = merge(
            source(vec![("A", 1i64.into()), ("B", 2i64.into()), ("C", 3i64.into())]),
            source(vec![("D", 4i64.into()), ("B", 20i64.into()), ("E", 5i64.into())]),
        );
        assert_eq!(cfg.keys().collect::<Vec<_>>(), vec!["A", "B", "C", "D", "E"]);
        assert_eq!(cfg.get("B").and_then(|v| v.as_i64()), Some(20));
        assert_eq!(cfg.get("D").and_then(|v| v.as_i64()), Some(4));
    }

    #[test]
    fn one_sided_values_are_verbatim() {
        let class: ConfigValue = ClassNamespace::new("Named", map(vec![("X", 1i64.into())])).into();
        let cfg = merge(source(vec![]), source(vec![("ONLY_RIGHT", class.clone())]));
        assert_eq!(cfg.get("ONLY_RIGHT"), Some(&class));
    }

    #[test]
    fn empty_override_is_identity() {
        let default = source(vec![
            ("A", 1i64.into()),
            ("FLAGS", map(vec![("X", true.into()), ("lower", false.into())]).into()),
            ("private", 0i64.into()),
        ]);
        let cfg = merge(default.clone(), ConfigSource::empty());
        assert_eq!(cfg.as_mapping(), &extract(&default).expect("extract"));
    }

    #[test]
    fn repeated_merges_are_identical() {
        let default = source(vec![("B", 1i64.into()), ("A", map(vec![("Z", 1i64.into())]).into())]);
        let overrides = source(vec![("C", 1i64.into()), ("A", map(vec![("Y", 2i64.into())]).into())]);
        let first = merge(default.clone(), overrides.clone());
        let second = merge(default, overrides);
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).expect("json"),
            serde_json::to_string(&second).expect("json")
        );
    }

    #[test]
    fn strategy_errors_propagate() {
        fn reject(_: &ConfigValue, _: &ConfigValue, _: &str) -> Result<ConfigValue> {
            Err(crate::error::ConfigError::NotANamespace { kind: Kind::Scalar })
        }
        let table = MergeStrategyTable::default()
            .with(Kind::Scalar, Kind::Scalar, MergeStrategy::Custom { name: "reject", apply: reject });
        let err = merge_sources(
            &source(vec![("A", 1i64.into())]),
            &source(vec![("A", 2i64.into())]),
            &table,
        )
        .unwrap_err();
        assert!(matches!(err, crate::error::ConfigError::NotANamespace { .. }));
    }

    #[test]
    fn assemble_loads_both_sources() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("x.toml");
        fs::write(&path, "MODE = 'from-path'\n[FEATURE_FLAGS]\nB = true\n").expect("write");

        let registry = ModuleRegistry::new();
        registry.register(Module::builtin(
            DEFAULT_CONFIG_MODULE,
            map(vec![
                ("MODE", "default".into()),
                ("FEATURE_FLAGS", map(vec![("A", true.into()), ("B", false.into())]).into()),
            ]),
        ));
        let ctx = SourceContext::new(&registry)
            .env(Env::from_pairs([(CONFIG_PATH_ENV_VAR, path.display().to_string())]));

        let assembly = assemble_with_sources(&ctx, &MergeStrategyTable::default()).expect("assemble");
        assert!(matches!(assembly.overrides, ConfigSource::Module(_)));
        let cfg = assembly.config;
        assert_eq!(cfg.get("MODE").and_then(|v| v.as_str()), Some("from-path"));
        assert_eq!(cfg.get_path("FEATURE_FLAGS.A").and_then(|v| v.as_bool()), Some(true));
        assert_eq!(cfg.get_path("FEATURE_FLAGS.B").and_then(|v| v.as_bool()), Some(true));
    }

    #[test]
    fn assemble_fails_without_defaults() {
        let registry = ModuleRegistry::new();
        let err = assemble(&SourceContext::new(&registry), &MergeStrategyTable::default()).unwrap_err();
        assert!(matches!(err, crate::error::ConfigError::ModuleNotFound(_)));
    }
}

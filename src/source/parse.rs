//! Module document parsing (TOML and YAML)

use crate::domain::{ClassNamespace, ConfigValue, Mapping, Module, Scalar};
use crate::error::{ConfigError, Result};
use std::fs;
use std::path::Path;

/// Reserved key marking a table as a class-like namespace.
pub const CLASS_MARKER: &str = "__class__";

/// YAML tag marking a mapping as a class-like namespace.
pub const CLASS_TAG: &str = "class";

/// Read and parse the module document at `path`, naming it `name`.
///
/// The format is chosen by extension: `.toml`, `.yaml` or `.yml`.
pub fn load_module(name: &str, path: &Path) -> Result<Module> {
    let content = fs::read_to_string(path)
        .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("").to_ascii_lowercase();
    let namespace = match ext.as_str() {
        "toml" => parse_toml_namespace(&content, path)?,
        "yaml" | "yml" => parse_yaml_namespace(&content, path)?,
        other => {
            return Err(ConfigError::UnsupportedFormat {
                ext: other.to_string(),
                path: path.to_path_buf(),
            })
        }
    };

    let file = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    tracing::debug!("Parsed module {} from {} ({} names)", name, file.display(), namespace.len());
    Ok(Module::from_file(name, file, namespace))
}

/// Parse a TOML document into a module namespace.
pub fn parse_toml_namespace(content: &str, path: &Path) -> Result<Mapping> {
    let raw: toml::Table = toml::from_str(content)
        .map_err(|source| ConfigError::Toml { path: path.to_path_buf(), source })?;

    raw.into_iter()
        .map(|(key, value)| {
            let converted = from_toml(&key, value, path)?;
            Ok((key, converted))
        })
        .collect()
}

/// Parse a YAML document into a module namespace. An empty document is an empty namespace.
pub fn parse_yaml_namespace(content: &str, path: &Path) -> Result<Mapping> {
    let raw: serde_yaml::Value = serde_yaml::from_str(content)
        .map_err(|source| ConfigError::Yaml { path: path.to_path_buf(), source })?;

    match raw {
        serde_yaml::Value::Null => Ok(Mapping::new()),
        serde_yaml::Value::Mapping(entries) => yaml_entries(entries, path),
        _ => Err(invalid(path, "<document>", "top level must be a mapping")),
    }
}

fn from_toml(key: &str, value: toml::Value, path: &Path) -> Result<ConfigValue> {
    Ok(match value {
        toml::Value::String(s) => s.into(),
        toml::Value::Integer(i) => i.into(),
        toml::Value::Float(f) => f.into(),
        toml::Value::Boolean(b) => b.into(),
        toml::Value::Datetime(dt) => dt.to_string().into(),
        toml::Value::Array(items) => items
            .into_iter()
            .map(|item| from_toml(key, item, path))
            .collect::<Result<Vec<_>>>()?
            .into(),
        toml::Value::Table(table) => {
            let entries = table
                .into_iter()
                .map(|(k, v)| {
                    let converted = from_toml(&k, v, path)?;
                    Ok((k, converted))
                })
                .collect::<Result<Mapping>>()?;
            classify(key, entries, path)?
        }
    })
}

fn from_yaml(key: &str, value: serde_yaml::Value, path: &Path) -> Result<ConfigValue> {
    use serde_yaml::Value;

    Ok(match value {
        Value::Null => ConfigValue::none(),
        Value::Bool(b) => b.into(),
        Value::Number(n) => match n.as_i64() {
            Some(i) => i.into(),
            None => match n.as_f64() {
                Some(f) => f.into(),
                None => return Err(invalid(path, key, "number out of range")),
            },
        },
        Value::String(s) => s.into(),
        Value::Sequence(items) => items
            .into_iter()
            .map(|item| from_yaml(key, item, path))
            .collect::<Result<Vec<_>>>()?
            .into(),
        Value::Mapping(entries) => classify(key, yaml_entries(entries, path)?, path)?,
        Value::Tagged(tagged) => {
            let serde_yaml::value::TaggedValue { tag, value } = *tagged;
            if tag != CLASS_TAG {
                return Err(invalid(path, key, &format!("unsupported tag {}", tag)));
            }
            match value {
                Value::Mapping(entries) => {
                    let mut attrs = yaml_entries(entries, path)?;
                    attrs.shift_remove(CLASS_MARKER);
                    ClassNamespace::new(key, attrs).into()
                }
                Value::Null => ClassNamespace::new(key, Mapping::new()).into(),
                _ => return Err(invalid(path, key, "!class must tag a mapping")),
            }
        }
    })
}

fn yaml_entries(entries: serde_yaml::Mapping, path: &Path) -> Result<Mapping> {
    entries
        .into_iter()
        .map(|(k, v)| {
            let key = yaml_key(k, path)?;
            let converted = from_yaml(&key, v, path)?;
            Ok((key, converted))
        })
        .collect()
}

fn yaml_key(key: serde_yaml::Value, path: &Path) -> Result<String> {
    use serde_yaml::Value;

    match key {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(invalid(path, &format!("{:?}", other), "mapping keys must be scalars")),
    }
}

/// Turn a parsed table into a class-like namespace when it carries the marker.
fn classify(key: &str, mut entries: Mapping, path: &Path) -> Result<ConfigValue> {
    let Some(marker) = entries.shift_remove(CLASS_MARKER) else {
        return Ok(entries.into());
    };

    let name = match marker {
        ConfigValue::Scalar(Scalar::Str(name)) if !name.is_empty() => name,
        ConfigValue::Scalar(Scalar::Bool(true)) => key.to_string(),
        ConfigValue::Scalar(Scalar::Bool(false)) => return Ok(entries.into()),
        _ => return Err(invalid(path, key, "__class__ must be a non-empty string or a boolean")),
    };
    Ok(ClassNamespace::new(name, entries).into())
}

fn invalid(path: &Path, key: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        path: path.to_path_buf(),
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

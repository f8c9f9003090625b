//! Key extraction: reduce any source to its uppercase-public entries
//!
//! The uppercase-public naming convention is the contract between the loader
//! and everything that produces configuration. Filtering happens here and
//! nowhere else.

use crate::domain::{ClassNamespace, ConfigSource, ConfigValue, Kind, Mapping, Module};
use crate::error::{ConfigError, Result};
use once_cell::sync::Lazy;
use regex::Regex;

static PUBLIC_KEY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z][A-Z0-9_]*$").unwrap());

/// Returns true for names like `SECRET_KEY` or `ROW_LIMIT_2`.
///
/// Lowercase names, dunders, and underscore-prefixed names are private.
pub fn is_public_key(key: &str) -> bool {
    PUBLIC_KEY.is_match(key)
}

/// Something exposing an attribute namespace.
pub trait AttributeSource {
    /// The attribute dictionary, or `None` when the value has no namespace.
    fn attributes(&self) -> Option<&Mapping>;

    fn describe_kind(&self) -> Kind;
}

impl AttributeSource for Mapping {
    fn attributes(&self) -> Option<&Mapping> {
        Some(self)
    }

    fn describe_kind(&self) -> Kind {
        Kind::Mapping
    }
}

impl AttributeSource for ClassNamespace {
    fn attributes(&self) -> Option<&Mapping> {
        Some(self.attrs())
    }

    fn describe_kind(&self) -> Kind {
        Kind::Class
    }
}

impl AttributeSource for Module {
    fn attributes(&self) -> Option<&Mapping> {
        Some(self.namespace())
    }

    fn describe_kind(&self) -> Kind {
        Kind::Mapping
    }
}

impl AttributeSource for ConfigValue {
    fn attributes(&self) -> Option<&Mapping> {
        match self {
            ConfigValue::Class(c) => Some(c.attrs()),
            ConfigValue::Mapping(m) => Some(m),
            ConfigValue::Scalar(_) => None,
        }
    }

    fn describe_kind(&self) -> Kind {
        self.kind()
    }
}

impl AttributeSource for ConfigSource {
    fn attributes(&self) -> Option<&Mapping> {
        match self {
            ConfigSource::Module(m) => m.attributes(),
            ConfigSource::Class(c) => c.attributes(),
            ConfigSource::Mapping(m) => Some(m),
        }
    }

    fn describe_kind(&self) -> Kind {
        match self {
            ConfigSource::Class(_) => Kind::Class,
            ConfigSource::Module(_) | ConfigSource::Mapping(_) => Kind::Mapping,
        }
    }
}

/// Produce a fresh mapping holding exactly the uppercase-public entries of `source`.
///
/// Entry order follows the source; values are cloned verbatim.
pub fn extract<S: AttributeSource + ?Sized>(source: &S) -> Result<Mapping> {
    let attrs = source
        .attributes()
        .ok_or(ConfigError::NotANamespace { kind: source.describe_kind() })?;
    Ok(public_entries(attrs))
}

fn public_entries(attrs: &Mapping) -> Mapping {
    attrs
        .iter()
        .filter(|(k, _)| is_public_key(k))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ns(pairs: &[(&str, i64)]) -> Mapping {
        pairs.iter().map(|(k, v)| (k.to_string(), ConfigValue::from(*v))).collect()
    }

    #[test]
    fn public_key_pattern() {
        assert!(is_public_key("PUBLIC"));
        assert!(is_public_key("ROW_LIMIT_2"));
        assert!(is_public_key("A"));
        assert!(!is_public_key("_hidden"));
        assert!(!is_public_key("__DUNDER__"));
        assert!(!is_public_key("lowercase"));
        assert!(!is_public_key("Mixed"));
        assert!(!is_public_key("1ABC"));
        assert!(!is_public_key(""));
        assert!(!is_public_key("WITH-DASH"));
    }

    #[test]
    fn extract_keeps_only_public_entries() {
        let source = ns(&[("PUBLIC", 1), ("_hidden", 2), ("lowercase", 3), ("__dunder", 4)]);
        let out = extract(&source).expect("extract");
        assert_eq!(out.len(), 1);
        assert_eq!(out.get("PUBLIC").and_then(|v| v.as_i64()), Some(1));
    }

    #[test]
    fn extract_preserves_order() {
        let source = ns(&[("Z", 1), ("skip", 0), ("A", 2), ("M", 3)]);
        let out = extract(&source).expect("extract");
        let keys: Vec<_> = out.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Z", "A", "M"]);
    }

    #[test]
    fn extract_reads_class_own_attributes() {
        let base = ClassNamespace::new("Base", ns(&[("INHERITED", 1)]));
        let class = ClassNamespace::with_base("Child", Some(base), ns(&[("OWN", 2), ("own", 3)]));
        let out = extract(&class).expect("extract");
        assert_eq!(out.keys().collect::<Vec<_>>(), vec!["OWN"]);
    }

    #[test]
    fn extract_reads_module_namespace() {
        let module = Module::builtin("superset.config", ns(&[("ROW_LIMIT", 50000), ("os", 0)]));
        let out = extract(&ConfigSource::from(module)).expect("extract");
        assert_eq!(out.keys().collect::<Vec<_>>(), vec!["ROW_LIMIT"]);
    }

    #[test]
    fn extract_rejects_scalars() {
        let err = extract(&ConfigValue::from("x")).unwrap_err();
        assert!(matches!(err, ConfigError::NotANamespace { kind: Kind::Scalar }));
    }
}

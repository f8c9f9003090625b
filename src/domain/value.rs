//! Configuration values and their merge kinds

use super::namespace::ClassNamespace;
use indexmap::IndexMap;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use std::fmt;

/// Insertion-ordered string → value map.
pub type Mapping = IndexMap<String, ConfigValue>;

/// Coarse classification used to pick a merge strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Class,
    Mapping,
    Scalar,
}

impl Kind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Class => "class-like",
            Kind::Mapping => "mapping",
            Kind::Scalar => "scalar",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Leaf values. Lists are scalars: they are never merged element-wise.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<ConfigValue>),
}

/// The right-hand side of one configuration entry.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    Class(ClassNamespace),
    Mapping(Mapping),
    Scalar(Scalar),
}

impl ConfigValue {
    pub fn kind(&self) -> Kind {
        match self {
            ConfigValue::Class(_) => Kind::Class,
            ConfigValue::Mapping(_) => Kind::Mapping,
            ConfigValue::Scalar(_) => Kind::Scalar,
        }
    }

    pub fn none() -> Self {
        ConfigValue::Scalar(Scalar::None)
    }

    pub fn is_none(&self) -> bool {
        matches!(self, ConfigValue::Scalar(Scalar::None))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::Scalar(Scalar::Str(s)) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigValue::Scalar(Scalar::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ConfigValue::Scalar(Scalar::Int(i)) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ConfigValue::Scalar(Scalar::Float(f)) => Some(*f),
            ConfigValue::Scalar(Scalar::Int(i)) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[ConfigValue]> {
        match self {
            ConfigValue::Scalar(Scalar::List(items)) => Some(items),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            ConfigValue::Mapping(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_class(&self) -> Option<&ClassNamespace> {
        match self {
            ConfigValue::Class(c) => Some(c),
            _ => None,
        }
    }

    /// Look up a direct child: a mapping entry or a class attribute
    /// (class lookups follow the base chain).
    pub fn child(&self, name: &str) -> Option<&ConfigValue> {
        match self {
            ConfigValue::Mapping(m) => m.get(name),
            ConfigValue::Class(c) => c.get(name),
            ConfigValue::Scalar(_) => None,
        }
    }
}

impl From<Scalar> for ConfigValue {
    fn from(value: Scalar) -> Self {
        ConfigValue::Scalar(value)
    }
}

impl From<Mapping> for ConfigValue {
    fn from(value: Mapping) -> Self {
        ConfigValue::Mapping(value)
    }
}

impl From<ClassNamespace> for ConfigValue {
    fn from(value: ClassNamespace) -> Self {
        ConfigValue::Class(value)
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        ConfigValue::Scalar(Scalar::Bool(value))
    }
}

impl From<i64> for ConfigValue {
    fn from(value: i64) -> Self {
        ConfigValue::Scalar(Scalar::Int(value))
    }
}

impl From<f64> for ConfigValue {
    fn from(value: f64) -> Self {
        ConfigValue::Scalar(Scalar::Float(value))
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        ConfigValue::Scalar(Scalar::Str(value.to_string()))
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        ConfigValue::Scalar(Scalar::Str(value))
    }
}

impl From<Vec<ConfigValue>> for ConfigValue {
    fn from(value: Vec<ConfigValue>) -> Self {
        ConfigValue::Scalar(Scalar::List(value))
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Scalar::None => serializer.serialize_none(),
            Scalar::Bool(b) => serializer.serialize_bool(*b),
            Scalar::Int(i) => serializer.serialize_i64(*i),
            Scalar::Float(f) => serializer.serialize_f64(*f),
            Scalar::Str(s) => serializer.serialize_str(s),
            Scalar::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
        }
    }
}

/// Class namespaces serialize as maps led by a `__class__` entry holding the name.
impl Serialize for ConfigValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ConfigValue::Scalar(s) => s.serialize(serializer),
            ConfigValue::Mapping(m) => {
                let mut map = serializer.serialize_map(Some(m.len()))?;
                for (k, v) in m {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
            ConfigValue::Class(c) => {
                let mut map = serializer.serialize_map(Some(c.attrs().len() + 1))?;
                map.serialize_entry("__class__", c.name())?;
                for (k, v) in c.attrs() {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

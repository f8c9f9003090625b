//! The merged configuration handed to the application

use crate::domain::{ConfigValue, Mapping};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Final mapping of uppercase keys to merged values, in assembly order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EffectiveConfig {
    entries: Mapping,
}

impl EffectiveConfig {
    pub fn new(entries: Mapping) -> Self {
        Self { entries }
    }

    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.entries.get(key)
    }

    /// Resolve a dotted path such as `CACHE_CONFIG.BACKEND` through mappings
    /// and class attributes (including inherited ones).
    pub fn get_path(&self, path: &str) -> Option<&ConfigValue> {
        let mut segments = path.split('.');
        let mut current = self.entries.get(segments.next()?)?;
        for segment in segments {
            current = current.child(segment)?;
        }
        Some(current)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConfigValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn as_mapping(&self) -> &Mapping {
        &self.entries
    }
}

impl Serialize for EffectiveConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

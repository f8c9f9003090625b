//! Ordered deep merge of two mappings

use crate::domain::{ConfigValue, Mapping};
use thiserror::Error;

/// Nesting limit for recursive merges.
pub const MAX_DEPTH: usize = 64;

/// The deep merge refused its inputs. Recovered by the caller with a shallow override.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("mapping nesting exceeds {max} levels at '{path}'")]
pub struct DeepMergeRejected {
    pub path: String,
    pub max: usize,
}

/// Deep-merge `right` onto `left`.
///
/// Keys on one side only are copied. Keys on both sides recurse when both
/// values are mappings; otherwise the right value wins. The result keeps the
/// left key order and appends right-only keys in right order.
pub fn deep_merge(left: &Mapping, right: &Mapping) -> Result<Mapping, DeepMergeRejected> {
    merge_at(left, right, "", 0)
}

fn merge_at(
    left: &Mapping,
    right: &Mapping,
    path: &str,
    depth: usize,
) -> Result<Mapping, DeepMergeRejected> {
    if depth >= MAX_DEPTH {
        return Err(DeepMergeRejected { path: path.to_string(), max: MAX_DEPTH });
    }

    let mut merged = left.clone();
    for (key, right_value) in right {
        let value = match (left.get(key), right_value) {
            (Some(ConfigValue::Mapping(l)), ConfigValue::Mapping(r)) => {
                let child = if path.is_empty() { key.clone() } else { format!("{}.{}", path, key) };
                ConfigValue::Mapping(merge_at(l, r, &child, depth + 1)?)
            }
            _ => right_value.clone(),
        };
        // IndexMap::insert keeps the slot of an existing key.
        merged.insert(key.clone(), value);
    }
    Ok(merged)
}

/// Copy `left`, then assign every entry of `right` on top.
pub fn shallow_override(left: &Mapping, right: &Mapping) -> Mapping {
    let mut merged = left.clone();
    for (key, value) in right {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

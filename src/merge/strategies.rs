//! Merge strategy primitives
//!
//! Every strategy takes `(left, right, key)`, where `left` comes from the
//! defaults and `right` from the override, and returns the merged value.

use super::recursive::{deep_merge, shallow_override};
use crate::domain::{ClassNamespace, ConfigValue};
use crate::error::Result;
use crate::extract::extract;

/// Signature shared by all strategies, including caller-supplied ones.
pub type StrategyFn = fn(&ConfigValue, &ConfigValue, &str) -> Result<ConfigValue>;

/// A named strategy that can be installed in a [`super::MergeStrategyTable`].
#[derive(Debug, Clone, Copy)]
pub enum MergeStrategy {
    TakeRight,
    OverrideRightAsClass,
    MergeAsClass,
    OverrideRightAsMapping,
    MergeAsMapping,
    Custom { name: &'static str, apply: StrategyFn },
}

impl MergeStrategy {
    pub fn name(&self) -> &'static str {
        match self {
            MergeStrategy::TakeRight => "take-right",
            MergeStrategy::OverrideRightAsClass => "override-right-as-class",
            MergeStrategy::MergeAsClass => "merge-as-class",
            MergeStrategy::OverrideRightAsMapping => "override-right-as-mapping",
            MergeStrategy::MergeAsMapping => "merge-as-mapping",
            MergeStrategy::Custom { name, .. } => *name,
        }
    }

    pub fn apply(&self, left: &ConfigValue, right: &ConfigValue, key: &str) -> Result<ConfigValue> {
        match self {
            MergeStrategy::TakeRight => take_right(left, right, key),
            MergeStrategy::OverrideRightAsClass => override_right_as_class(left, right, key),
            MergeStrategy::MergeAsClass => merge_as_class(left, right, key),
            MergeStrategy::OverrideRightAsMapping => override_right_as_mapping(left, right, key),
            MergeStrategy::MergeAsMapping => merge_as_mapping(left, right, key),
            MergeStrategy::Custom { apply, .. } => apply(left, right, key),
        }
    }
}

pub fn take_right(_left: &ConfigValue, right: &ConfigValue, _key: &str) -> Result<ConfigValue> {
    Ok(right.clone())
}

/// Replace the namespace outright with a class named `key` holding the right side's public keys.
pub fn override_right_as_class(
    _left: &ConfigValue,
    right: &ConfigValue,
    key: &str,
) -> Result<ConfigValue> {
    Ok(ClassNamespace::new(key, extract(right)?).into())
}

/// Extend the left namespace: a class named `key` deriving from `left` when it
/// is class-like, holding the union of both sides' public keys.
pub fn merge_as_class(left: &ConfigValue, right: &ConfigValue, key: &str) -> Result<ConfigValue> {
    let mut attrs = extract(left)?;
    for (k, v) in extract(right)? {
        attrs.insert(k, v);
    }
    let base = left.as_class().cloned();
    Ok(ClassNamespace::with_base(key, base, attrs).into())
}

pub fn override_right_as_mapping(
    left: &ConfigValue,
    right: &ConfigValue,
    _key: &str,
) -> Result<ConfigValue> {
    // The left side is reduced only to reject scalars.
    let _left = extract(left)?;
    Ok(extract(right)?.into())
}

/// Deep-merge both reduced sides, falling back to a shallow override when the
/// deep merge rejects them.
pub fn merge_as_mapping(left: &ConfigValue, right: &ConfigValue, key: &str) -> Result<ConfigValue> {
    let left = extract(left)?;
    let right = extract(right)?;
    let merged = match deep_merge(&left, &right) {
        Ok(merged) => merged,
        Err(rejected) => {
            tracing::debug!("Deep merge of {} rejected ({}); using shallow override", key, rejected);
            shallow_override(&left, &right)
        }
    };
    Ok(merged.into())
}

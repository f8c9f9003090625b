//! Strategy dispatch keyed by the pair of value kinds

use super::strategies::MergeStrategy;
use crate::domain::{ConfigValue, Kind};
use crate::error::Result;
use std::collections::HashMap;

/// Lookup from `(kind(left), kind(right))` to the strategy that merges them.
///
/// Pairs without an entry use the fallback, which is take-right unless
/// replaced. The assembler only consults the table, so installing a
/// different policy never requires touching it.
#[derive(Debug, Clone)]
pub struct MergeStrategyTable {
    entries: HashMap<(Kind, Kind), MergeStrategy>,
    fallback: MergeStrategy,
}

impl MergeStrategyTable {
    /// A table with no entries: every pair takes the right side.
    pub fn empty() -> Self {
        Self { entries: HashMap::new(), fallback: MergeStrategy::TakeRight }
    }

    /// Install `strategy` for the ordered pair `(left, right)`.
    pub fn with(mut self, left: Kind, right: Kind, strategy: MergeStrategy) -> Self {
        self.set(left, right, strategy);
        self
    }

    pub fn with_fallback(mut self, fallback: MergeStrategy) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn set(&mut self, left: Kind, right: Kind, strategy: MergeStrategy) {
        self.entries.insert((left, right), strategy);
    }

    pub fn lookup(&self, left: Kind, right: Kind) -> MergeStrategy {
        self.entries.get(&(left, right)).copied().unwrap_or(self.fallback)
    }

    /// Merge two values bound to the same key.
    pub fn merge(&self, key: &str, left: &ConfigValue, right: &ConfigValue) -> Result<ConfigValue> {
        let (lk, rk) = (left.kind(), right.kind());
        let strategy = self.lookup(lk, rk);
        tracing::debug!("Merging {} ({}, {}) with {}", key, lk, rk, strategy.name());
        strategy.apply(left, right, key)
    }
}

impl Default for MergeStrategyTable {
    /// Any class-like side replaces the namespace; two mappings deep-merge.
    fn default() -> Self {
        Self::empty()
            .with(Kind::Class, Kind::Class, MergeStrategy::OverrideRightAsClass)
            .with(Kind::Class, Kind::Mapping, MergeStrategy::OverrideRightAsClass)
            .with(Kind::Mapping, Kind::Class, MergeStrategy::OverrideRightAsClass)
            .with(Kind::Mapping, Kind::Mapping, MergeStrategy::MergeAsMapping)
    }
}

//! Type-aware merging of configuration values
//!
//! Two values bound to the same key are combined by a strategy chosen from
//! the pair of their kinds (class-like, mapping, scalar).

pub mod recursive;
pub mod strategies;
pub mod table;

pub use recursive::{deep_merge, shallow_override, DeepMergeRejected};
pub use strategies::{MergeStrategy, StrategyFn};
pub use table::MergeStrategyTable;

//! Core configuration types: values, class-like namespaces, and sources

pub mod namespace;
pub mod source;
pub mod value;

pub use namespace::ClassNamespace;
pub use source::{ConfigSource, Module};
pub use value::{ConfigValue, Kind, Mapping, Scalar};

//! Class-like option namespaces

use super::value::{ConfigValue, Mapping};

/// A named group of options with attribute-style access.
///
/// Unlike a plain mapping, a namespace carries an identity (its name) that
/// survives merging, and may extend a base namespace. Attribute lookup checks
/// the namespace's own attributes first, then walks the base chain.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassNamespace {
    name: String,
    base: Option<Box<ClassNamespace>>,
    attrs: Mapping,
}

impl ClassNamespace {
    /// Create a namespace deriving from nothing but the universal base.
    pub fn new(name: impl Into<String>, attrs: Mapping) -> Self {
        Self { name: name.into(), base: None, attrs }
    }

    /// Create a namespace that extends `base` when one is given.
    pub fn with_base(name: impl Into<String>, base: Option<ClassNamespace>, attrs: Mapping) -> Self {
        Self { name: name.into(), base: base.map(Box::new), attrs }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base(&self) -> Option<&ClassNamespace> {
        self.base.as_deref()
    }

    /// The namespace's own attribute dictionary, excluding inherited entries.
    pub fn attrs(&self) -> &Mapping {
        &self.attrs
    }

    /// Attribute lookup with inheritance.
    pub fn get(&self, attr: &str) -> Option<&ConfigValue> {
        self.attrs.get(attr).or_else(|| self.base.as_ref().and_then(|b| b.get(attr)))
    }
}

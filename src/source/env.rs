//! Environment snapshots

use std::collections::HashMap;

/// An immutable view of environment variables.
///
/// Loaders read the environment through this snapshot so that resolution is
/// a function of its inputs and tests never touch the process environment.
#[derive(Debug, Clone, Default)]
pub struct Env {
    vars: HashMap<String, String>,
}

impl Env {
    /// Snapshot the process environment. Non-UTF-8 entries are skipped.
    pub fn from_process() -> Self {
        let vars = std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect();
        Self { vars }
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self { vars: pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
    }

    /// Value of `name`. A variable set to the empty string is still set.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairs_are_visible() {
        let env = Env::from_pairs([("SUPERSET_CONFIG", "deploy.defaults"), ("EMPTY", "")]);
        assert_eq!(env.get("SUPERSET_CONFIG"), Some("deploy.defaults"));
        assert_eq!(env.get("EMPTY"), Some(""));
        assert_eq!(env.get("MISSING"), None);
    }
}

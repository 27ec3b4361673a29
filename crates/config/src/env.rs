//! Immutable environment snapshot.

use std::collections::HashMap;

/// A read-only snapshot of environment variables.
///
/// Resolution never touches `std::env` directly; tests construct a
/// snapshot from a map and production code takes one at process start.
/// Values that are set but empty are treated as unset, matching how CI
/// systems pass through undefined expression results.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    vars: HashMap<String, String>,
}

impl Environment {
    /// Snapshot the process environment.
    pub fn from_os() -> Self {
        Self {
            vars: std::env::vars().collect(),
        }
    }

    /// Build a snapshot from explicit pairs.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }

    /// Look up a variable, treating empty values as unset.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// The first set variable among `names`.
    pub fn first_of<'a>(&'a self, names: &[&str]) -> Option<&'a str> {
        names.iter().find_map(|name| self.get(name))
    }

    /// Iterate `(suffix, value)` pairs for variables starting with
    /// `prefix`, skipping empty values.
    pub fn iter_prefixed<'a>(
        &'a self,
        prefix: &'a str,
    ) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        self.vars.iter().filter_map(move |(name, value)| {
            if value.is_empty() {
                return None;
            }
            name.strip_prefix(prefix).map(|suffix| (suffix, value.as_str()))
        })
    }
}

//! Environment variable overrides for settings.
//!
//! A setting `key` is overridden by the variable named `key` upper-cased
//! (`api_port` ← `API_PORT`). Override values are returned verbatim.

use std::collections::HashMap;

/// Name of the variable overriding `key`.
pub fn override_var_name(key: &str) -> String {
    key.to_uppercase()
}

/// Where override variables are looked up.
#[derive(Debug, Clone, Default)]
pub enum EnvSource {
    /// The live process environment.
    #[default]
    Process,
    /// A fixed map (useful for testing and embedding).
    Fixed(HashMap<String, String>),
}

impl EnvSource {
    /// Build a fixed environment from `(name, value)` pairs.
    pub fn fixed<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        EnvSource::Fixed(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Look up the override for `key`, returning the variable name and value.
    pub fn lookup(&self, key: &str) -> Option<(String, String)> {
        let name = override_var_name(key);
        if name.is_empty() {
            return None;
        }
        let value = match self {
            EnvSource::Process => std::env::var(&name).ok(),
            EnvSource::Fixed(map) => map.get(&name).cloned(),
        }?;
        Some((name, value))
    }
}

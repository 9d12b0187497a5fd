//! Environment sources read by the executable generator.
//!
//! Lookups are exact: one lookup per schema key, by name, no case folding
//! and no fallback sources. [`EnvSnapshot`] freezes a set of variables so
//! a generation pass (or a test) never observes the environment changing.

use std::collections::BTreeMap;
use std::ffi::OsString;

/// Read-only view of environment variables.
pub trait EnvSource {
    /// The value of `key`, or `None` when unset.
    fn var(&self, key: &str) -> Option<String>;
}

impl<T: EnvSource + ?Sized> EnvSource for &T {
    fn var(&self, key: &str) -> Option<String> {
        (**self).var(key)
    }
}

/// The live process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var_os(key).map(|value| into_string_lossy(key, value))
    }
}

/// An immutable copy of a set of environment variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    vars: BTreeMap<String, String>,
}

impl EnvSnapshot {
    /// Copy the current process environment.
    ///
    /// Variables whose names are not valid Unicode are skipped; they can
    /// never match a schema key.
    pub fn capture() -> Self {
        let vars = std::env::vars_os()
            .filter_map(|(key, value)| {
                let key = key.into_string().ok()?;
                let value = into_string_lossy(&key, value);
                Some((key, value))
            })
            .collect();
        Self { vars }
    }

    /// The value of `key`, if set.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Number of captured variables.
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Whether no variables were captured.
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for EnvSnapshot
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl EnvSource for EnvSnapshot {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).map(str::to_string)
    }
}

fn into_string_lossy(key: &str, value: OsString) -> String {
    value.into_string().unwrap_or_else(|raw| {
        tracing::warn!(key, "environment value is not valid Unicode; converting lossily");
        raw.to_string_lossy().into_owned()
    })
}

//! Environment sources and typed value parsing.
//!
//! Resolution never touches `std::env` directly; it goes through an
//! [`EnvSource`] so tests can resolve profiles against a plain map.

use std::collections::{BTreeSet, HashMap};
use std::str::FromStr;
use std::time::Duration;

use crate::errors::ConfigError;

/// A read-only view of environment variables.
pub trait EnvSource {
    /// Get the raw value of a variable, if set.
    fn get(&self, key: &str) -> Option<String>;
}

/// The process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// In-memory environment, used by tests and embedders.
#[derive(Debug, Clone, Default)]
pub struct MapEnv {
    vars: HashMap<String, String>,
}

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }
}

impl<K, V> FromIterator<(K, V)> for MapEnv
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

impl EnvSource for MapEnv {
    fn get(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

impl<E: EnvSource + ?Sized> EnvSource for &E {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }
}

/// Typed reader over an [`EnvSource`] that falls back to defaults.
pub(crate) struct EnvReader<'a, E: ?Sized> {
    source: &'a E,
}

impl<'a, E: EnvSource + ?Sized> EnvReader<'a, E> {
    pub(crate) fn new(source: &'a E) -> Self {
        Self { source }
    }

    pub(crate) fn string(&self, key: &str, default: &str) -> String {
        self.source.get(key).unwrap_or_else(|| default.to_string())
    }

    pub(crate) fn number<T>(&self, key: &'static str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match self.source.get(key) {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|e: T::Err| ConfigError::invalid(key, &raw, e.to_string())),
            None => Ok(default),
        }
    }

    /// Whole seconds, no more than `max`.
    pub(crate) fn seconds(
        &self,
        key: &'static str,
        default: u64,
        max: u64,
    ) -> Result<Duration, ConfigError> {
        let secs = self.number(key, default)?;
        if secs > max {
            return Err(ConfigError::invalid(
                key,
                &secs.to_string(),
                format!("must be at most {max} seconds"),
            ));
        }
        Ok(Duration::from_secs(secs))
    }

    pub(crate) fn flag(&self, key: &'static str, default: bool) -> Result<bool, ConfigError> {
        match self.source.get(key) {
            Some(raw) => parse_bool(&raw)
                .ok_or_else(|| ConfigError::invalid(key, &raw, "expected a boolean")),
            None => Ok(default),
        }
    }

    pub(crate) fn list(&self, key: &str, default: &str) -> Vec<String> {
        split_csv(&self.string(key, default))
    }

    /// Lower-cased set, used for file extensions.
    pub(crate) fn set(&self, key: &str, default: &str) -> BTreeSet<String> {
        self.list(key, default)
            .into_iter()
            .map(|item| item.to_ascii_lowercase())
            .collect()
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Split a comma-separated value, trimming entries and dropping empty ones.
pub fn split_csv(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

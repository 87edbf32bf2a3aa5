use std::str::FromStr;

use super::types::ConfigError;

const DEFAULT_CORS_ORIGINS: &[&str] =
    &["http://localhost:5173", "http://localhost:3000", "http://localhost:8000"];

/// Reads trimmed, non-empty configuration values from a key lookup.
pub(super) struct EnvSource<F> {
    lookup: F,
}

impl EnvSource<fn(&str) -> Option<String>> {
    pub(super) fn process() -> Self {
        Self::new(read_process_env)
    }
}

fn read_process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

impl<F> EnvSource<F>
where
    F: Fn(&str) -> Option<String>,
{
    pub(super) fn new(lookup: F) -> Self {
        Self { lookup }
    }

    pub(super) fn get(&self, key: &str) -> Option<String> {
        (self.lookup)(key).map(|value| value.trim().to_string()).filter(|value| !value.is_empty())
    }

    /// First key that is set wins.
    pub(super) fn first_of(&self, keys: &[&str]) -> Option<String> {
        keys.iter().find_map(|key| self.get(key))
    }

    pub(super) fn text(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }

    pub(super) fn flag(&self, key: &str) -> bool {
        self.get(key).is_some_and(|value| {
            matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
        })
    }

    pub(super) fn number<T: FromStr>(&self, key: &'static str, default: T) -> Result<T, ConfigError> {
        match self.get(key) {
            Some(raw) => raw.parse().map_err(|_| ConfigError::invalid(key, raw, "expected a number")),
            None => Ok(default),
        }
    }

    /// Accepts a JSON array or a comma separated list; empty input falls back to local dev origins.
    pub(super) fn origins(&self, key: &'static str) -> Result<Vec<String>, ConfigError> {
        let Some(raw) = self.get(key) else {
            return Ok(default_origins());
        };

        let origins: Vec<String> = if raw.starts_with('[') {
            serde_json::from_str(&raw)
                .map_err(|_| ConfigError::invalid(key, raw.clone(), "malformed JSON array"))?
        } else {
            raw.split(',').map(str::trim).filter(|item| !item.is_empty()).map(String::from).collect()
        };

        Ok(if origins.is_empty() { default_origins() } else { origins })
    }
}

fn default_origins() -> Vec<String> {
    DEFAULT_CORS_ORIGINS.iter().map(|origin| origin.to_string()).collect()
}

#[cfg(test)]
pub(super) fn from_pairs(pairs: &[(&str, &str)]) -> EnvSource<impl Fn(&str) -> Option<String>> {
    let values: std::collections::HashMap<String, String> =
        pairs.iter().map(|(key, value)| (key.to_string(), value.to_string())).collect();
    EnvSource::new(move |key: &str| values.get(key).cloned())
}

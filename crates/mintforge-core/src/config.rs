//! Configuration module
//!
//! All configuration flows through the [`SettingsSource`] abstraction: a
//! key-value lookup owned by the host runtime. Components read the settings
//! they need once, at initialization, and never re-read afterwards.

use std::collections::HashMap;
use std::env;

/// Key-value settings lookup provided by the host runtime.
///
/// Implementations return `None` for unknown keys. Empty strings are treated
/// as absent by callers that require a value.
pub trait SettingsSource: Send + Sync {
    /// Look up a setting by key.
    fn get_setting(&self, key: &str) -> Option<String>;

    /// Look up a setting, treating empty values as absent.
    fn get_required(&self, key: &str) -> Option<String> {
        self.get_setting(key).filter(|v| !v.trim().is_empty())
    }
}

/// Settings backed by process environment variables.
///
/// Hosts that keep configuration in `.env` files should call
/// `dotenvy::dotenv()` before constructing components.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvSettings;

impl EnvSettings {
    pub fn new() -> Self {
        Self
    }

    /// Load variables from a `.env` file (when present) before reading.
    pub fn with_dotenv() -> Self {
        let _ = dotenvy::dotenv();
        Self
    }
}

impl SettingsSource for EnvSettings {
    fn get_setting(&self, key: &str) -> Option<String> {
        env::var(key).ok()
    }
}

/// Settings backed by an in-memory map.
///
/// Used by host runtimes that carry per-agent settings, and by tests.
#[derive(Debug, Clone, Default)]
pub struct MapSettings {
    values: HashMap<String, String>,
}

impl MapSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }
}

impl SettingsSource for MapSettings {
    fn get_setting(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

impl<S: ::std::hash::BuildHasher + Send + Sync> SettingsSource for HashMap<String, String, S> {
    fn get_setting(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

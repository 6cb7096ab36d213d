//! Configuration types.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Directory holding the site's local state, relative to the project root.
pub const STATE_DIR: &str = ".vansanten";

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Translation settings.
    pub i18n: I18nConfig,
    /// Where the selected locale is persisted.
    pub storage: StorageConfig,
    /// Logging defaults (overridden by env and CLI flags).
    pub log: LogSettings,
}

/// Translation settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct I18nConfig {
    /// Translation document to load; `None` uses the embedded one.
    pub translations: Option<PathBuf>,
}

/// Storage backend selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// JSON file at `storage.path`.
    #[default]
    File,
    /// Kept in memory for the life of the process.
    Memory,
    /// Nothing is persisted.
    None,
}

/// Locale persistence settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Storage file for the `file` backend.
    pub path: Option<PathBuf>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::File,
            path: Some(PathBuf::from(STATE_DIR).join("storage.json")),
        }
    }
}

/// Logging defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// `trace`, `debug`, `info`, `warn` or `error`.
    pub level: String,
    /// `pretty`, `compact` or `json`.
    pub format: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: "pretty".to_string(),
        }
    }
}

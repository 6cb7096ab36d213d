//! Best-effort key/value storage for the selected locale.
//!
//! Backends never report errors to the caller. A failed read looks like an
//! absent key and a failed write is logged and dropped.

use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use tracing::{debug, warn};

/// Persistent string storage, the same shape as browser local storage.
pub trait LocaleStorage: Send + Sync {
    /// Read a value.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value, best-effort.
    fn set(&self, key: &str, value: &str);
}

/// Storage used when no backend is available.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopStorage;

impl LocaleStorage for NoopStorage {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn set(&self, _key: &str, _value: &str) {}
}

/// In-process storage.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-populated with one entry.
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let storage = Self::new();
        if let Ok(mut values) = storage.values.write() {
            values.insert(key.into(), value.into());
        }
        storage
    }
}

impl LocaleStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values.read().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut values) = self.values.write() {
            values.insert(key.to_string(), value.to_string());
        }
    }
}

/// Storage backed by a JSON object file, e.g. `{"locale": "fr"}`.
///
/// The file is re-read on every access so several processes sharing it see
/// each other's writes.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Map<String, Value> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "storage file not readable");
                return Map::new();
            }
        };

        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(entries)) => entries,
            Ok(_) | Err(_) => {
                warn!(path = %self.path.display(), "ignoring corrupt storage file");
                Map::new()
            }
        }
    }

    fn write_entries(&self, entries: &Map<String, Value>) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, json)
    }
}

impl LocaleStorage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        match self.read_entries().remove(key)? {
            Value::String(value) => Some(value),
            _ => None,
        }
    }

    fn set(&self, key: &str, value: &str) {
        let mut entries = self.read_entries();
        entries.insert(key.to_string(), Value::String(value.to_string()));

        if let Err(e) = self.write_entries(&entries) {
            warn!(path = %self.path.display(), error = %e, "failed to persist {key}");
        }
    }
}

impl<S: LocaleStorage + ?Sized> LocaleStorage for Box<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) {
        (**self).set(key, value)
    }
}

impl<S: LocaleStorage + ?Sized> LocaleStorage for Arc<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) {
        (**self).set(key, value)
    }
}

//! The locale resolver: current locale, persistence and key lookup.

use super::bundle::TranslationBundle;
use super::detect::{fallback_chain, initial_locale_with_override};
use super::interpolate::interpolate;
use super::observer::{Observers, SubscriptionId};
use super::storage::{LocaleStorage, NoopStorage};
use super::{SupportedLocales, Vars, STORAGE_KEY};
use serde_json::Value;
use std::fmt;
use std::sync::{Mutex, RwLock};
use tracing::{debug, trace};

/// Result of resolving a key.
#[derive(Debug, Clone, PartialEq)]
pub enum Translation {
    /// An interpolated string, or the raw path when nothing matched.
    Text(String),
    /// A non-string node (subtree, list, number) returned as stored.
    Value(Value),
}

impl Translation {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Value(_) => None,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    /// Convert into a JSON value; text becomes a JSON string.
    pub fn into_value(self) -> Value {
        match self {
            Self::Text(text) => Value::String(text),
            Self::Value(value) => value,
        }
    }

    fn from_node(node: &Value, vars: &Vars) -> Self {
        match node {
            Value::String(template) => Self::Text(interpolate(template, vars)),
            other => Self::Value(other.clone()),
        }
    }
}

impl fmt::Display for Translation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Value(value) => write!(f, "{value}"),
        }
    }
}

impl PartialEq<&str> for Translation {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}

/// Owns the current locale and resolves keys against a [`TranslationBundle`].
///
/// Created once by the host and shared with every view that renders text
/// (wrap in an `Arc` to share across threads). Views that need to re-render
/// on a language switch register through [`LocaleResolver::subscribe`].
pub struct LocaleResolver {
    bundle: TranslationBundle,
    storage: Box<dyn LocaleStorage>,
    current: RwLock<String>,
    /// Held across update, persist and notify so concurrent writers commit
    /// in one order.
    writer: Mutex<()>,
    observers: Observers,
}

impl LocaleResolver {
    /// Resolver without persistence.
    pub fn new(bundle: TranslationBundle) -> Self {
        Self::with_storage(bundle, NoopStorage)
    }

    /// Resolver that restores and persists its locale through `storage`.
    pub fn with_storage(bundle: TranslationBundle, storage: impl LocaleStorage + 'static) -> Self {
        Self::with_override(bundle, storage, None)
    }

    /// Like [`LocaleResolver::with_storage`], but a supported `override_locale`
    /// is used as the starting locale. The override is not persisted.
    pub fn with_override(
        bundle: TranslationBundle,
        storage: impl LocaleStorage + 'static,
        override_locale: Option<&str>,
    ) -> Self {
        let stored = storage.get(STORAGE_KEY);
        let current = initial_locale_with_override(bundle.locales(), override_locale, stored.as_deref());
        debug!(locale = %current, stored = ?stored, "locale resolver ready");

        Self {
            bundle,
            storage: Box::new(storage),
            current: RwLock::new(current),
            writer: Mutex::new(()),
            observers: Observers::new(),
        }
    }

    /// The current locale code.
    pub fn locale(&self) -> String {
        match self.current.read() {
            Ok(current) => current.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Codes accepted by [`LocaleResolver::set_locale`], in document order.
    pub fn supported_locales(&self) -> &SupportedLocales {
        self.bundle.locales()
    }

    /// Switch to `code` and persist it.
    ///
    /// Unsupported codes are ignored. Returns whether `code` was accepted.
    /// Subscribers are notified only when the locale actually changes.
    pub fn set_locale(&self, code: &str) -> bool {
        if !self.bundle.locales().contains(code) {
            debug!(locale = code, "ignoring unsupported locale");
            return false;
        }

        let _writer = match self.writer.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        let changed = {
            let mut current = match self.current.write() {
                Ok(current) => current,
                Err(poisoned) => poisoned.into_inner(),
            };
            let changed = *current != code;
            *current = code.to_string();
            changed
        };

        self.storage.set(STORAGE_KEY, code);

        if changed {
            debug!(locale = code, "locale changed");
            self.observers.notify(code);
        }
        true
    }

    /// Resolve a dotted key path in the current locale.
    ///
    /// Falls back to `en`, then to `path` itself. Strings are interpolated
    /// with `vars`; other nodes are returned untouched.
    pub fn resolve(&self, path: &str, vars: &Vars) -> Translation {
        let locale = self.locale();

        for code in fallback_chain(&locale) {
            if let Some(node) = self.bundle.lookup(code, path) {
                if code != locale {
                    trace!(path, locale = %locale, fallback = code, "resolved via fallback");
                }
                return Translation::from_node(node, vars);
            }
        }

        debug!(path, locale = %locale, "missing translation");
        Translation::Text(path.to_string())
    }

    /// Resolve `path` and render it as a string.
    pub fn t(&self, path: &str) -> String {
        self.t_with(path, &Vars::new())
    }

    /// Resolve `path` with `vars` and render it as a string.
    pub fn t_with(&self, path: &str, vars: &Vars) -> String {
        self.resolve(path, vars).to_string()
    }

    /// Register a callback for locale changes.
    ///
    /// Callbacks run on the thread that called [`LocaleResolver::set_locale`]
    /// and may read the resolver, but must not call `set_locale` themselves.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.observers.subscribe(callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }
}

impl fmt::Debug for LocaleResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocaleResolver")
            .field("locale", &self.locale())
            .field("locales", self.bundle.locales())
            .field("observers", &self.observers)
            .finish()
    }
}

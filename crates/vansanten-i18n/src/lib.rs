//! Locale resolution for the Van Santen site.
//!
//! Translations live in one JSON document shaped like
//! `{ "locales": ["en", "nl"], "en": { ... }, "nl": { ... } }`. A
//! [`LocaleResolver`] owns the current locale, persists it through a
//! [`LocaleStorage`] backend, and resolves dotted key paths such as
//! `"nav.home"` with the fallback chain current locale, then `en`, then the
//! raw path itself.
//!
//! Lookups never fail: a missing key renders as its own path so a page stays
//! renderable with incomplete translation data.

pub mod bundle;
pub mod detect;
pub mod interpolate;
pub mod observer;
pub mod resolver;
pub mod storage;

use std::collections::BTreeMap;
use std::path::PathBuf;

/// Locale every lookup falls back to.
pub const DEFAULT_LOCALE: &str = "en";

/// Storage key the selected locale is persisted under.
pub const STORAGE_KEY: &str = "locale";

/// Ordered set of locale codes a bundle accepts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SupportedLocales {
    codes: Vec<String>,
}

impl SupportedLocales {
    /// Build from codes, keeping first occurrence order and dropping repeats.
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for code in codes {
            let code = code.into();
            if !unique.contains(&code) {
                unique.push(code);
            }
        }
        Self { codes: unique }
    }

    /// Whether `code` is accepted.
    pub fn contains(&self, code: &str) -> bool {
        self.codes.iter().any(|c| c == code)
    }

    /// First listed code, if any.
    pub fn first(&self) -> Option<&str> {
        self.codes.first().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.codes.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.codes
    }
}

/// Placeholder values for a single lookup.
///
/// A `{name}` token with no entry here renders as an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vars {
    values: BTreeMap<String, String>,
}

impl Vars {
    /// Create an empty set of vars.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl ToString) {
        self.values.insert(name.into(), value.to_string());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Vars
where
    K: Into<String>,
    V: ToString,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut vars = Vars::new();
        for (k, v) in iter {
            vars.insert(k, v);
        }
        vars
    }
}

/// i18n errors.
///
/// Only bundle loading can fail; resolution degrades instead.
#[derive(Debug, thiserror::Error)]
pub enum I18nError {
    #[error("failed to load translations from {path}: {source}")]
    LoadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid translation JSON: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("invalid translation document: {0}")]
    InvalidDocument(String),
}

/// Resolve a key against a [`LocaleResolver`], optionally with `name = value`
/// placeholder bindings.
///
/// ```
/// use vansanten_i18n::{t, LocaleResolver, TranslationBundle};
///
/// let resolver = LocaleResolver::new(TranslationBundle::embedded());
/// assert_eq!(t!(resolver, "nav.home"), "Home");
/// assert_eq!(t!(resolver, "home.welcome", name = "Ana"), "Welcome, Ana");
/// ```
#[macro_export]
macro_rules! t {
    ($resolver:expr, $path:expr) => {
        $resolver.t($path)
    };
    ($resolver:expr, $path:expr, $($key:ident = $value:expr),+ $(,)?) => {{
        let vars = $crate::Vars::new()
            $(.with(stringify!($key), &$value))+;
        $resolver.t_with($path, &vars)
    }};
}

pub use bundle::TranslationBundle;
pub use detect::{fallback_chain, initial_locale, initial_locale_with_override};
pub use interpolate::interpolate;
pub use observer::{Observers, SubscriptionId};
pub use resolver::{LocaleResolver, Translation};
pub use storage::{FileStorage, LocaleStorage, MemoryStorage, NoopStorage};

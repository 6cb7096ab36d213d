//! Translation document loading.

use super::{I18nError, SupportedLocales, DEFAULT_LOCALE};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// The site's bundled translation document.
const EMBEDDED_TRANSLATIONS: &str = include_str!("../locales/languages.json");

/// Key of the locale list in a translation document.
const LOCALES_KEY: &str = "locales";

/// Supported locales plus one translation tree per locale.
///
/// Immutable once loaded.
#[derive(Debug, Clone, Default)]
pub struct TranslationBundle {
    locales: SupportedLocales,
    trees: HashMap<String, Value>,
}

impl TranslationBundle {
    /// Build a bundle from already-parsed parts.
    pub fn new(locales: SupportedLocales, trees: HashMap<String, Value>) -> Self {
        Self { locales, trees }
    }

    /// Parse a translation document.
    pub fn from_json_str(json: &str) -> Result<Self, I18nError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Read and parse a translation document from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, I18nError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| I18nError::LoadError {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded translation document");
        Self::from_json_str(&content)
    }

    /// The translations compiled into the crate.
    pub fn embedded() -> Self {
        // An empty bundle still resolves every key to its own path.
        Self::from_json_str(EMBEDDED_TRANSLATIONS).unwrap_or_else(|e| {
            warn!(error = %e, "embedded translations are invalid");
            Self::default()
        })
    }

    /// Build from a parsed document value.
    pub fn from_value(value: Value) -> Result<Self, I18nError> {
        let Value::Object(mut root) = value else {
            return Err(I18nError::InvalidDocument(
                "top level must be an object".to_string(),
            ));
        };

        let locales = parse_locales(&mut root)?;

        let trees: HashMap<String, Value> = root
            .into_iter()
            .filter(|(_, tree)| tree.is_object())
            .collect();

        if !trees.contains_key(DEFAULT_LOCALE) {
            warn!("translation document has no `{DEFAULT_LOCALE}` tree to fall back to");
        }
        for code in locales.iter() {
            if !trees.contains_key(code) {
                warn!(locale = code, "listed locale has no translation tree");
            }
        }

        Ok(Self { locales, trees })
    }

    /// Locale codes this bundle accepts.
    pub fn locales(&self) -> &SupportedLocales {
        &self.locales
    }

    /// Translation tree for a locale.
    pub fn tree(&self, locale: &str) -> Option<&Value> {
        self.trees.get(locale)
    }

    /// Look up a dotted path in one locale's tree.
    ///
    /// `None` when the locale has no tree or any segment is missing or null.
    pub fn lookup(&self, locale: &str, path: &str) -> Option<&Value> {
        self.tree(locale).and_then(|tree| get_by_path(tree, path))
    }
}

/// Remove and parse the `locales` array.
fn parse_locales(root: &mut Map<String, Value>) -> Result<SupportedLocales, I18nError> {
    match root.remove(LOCALES_KEY) {
        Some(Value::Array(items)) => {
            let mut codes = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    Value::String(code) => codes.push(code),
                    other => {
                        return Err(I18nError::InvalidDocument(format!(
                            "`{LOCALES_KEY}` entries must be strings, found {other}"
                        )))
                    }
                }
            }
            Ok(SupportedLocales::new(codes))
        }
        Some(_) => Err(I18nError::InvalidDocument(format!(
            "`{LOCALES_KEY}` must be an array"
        ))),
        None => Err(I18nError::InvalidDocument(format!(
            "missing `{LOCALES_KEY}` array"
        ))),
    }
}

/// Descend one segment at a time. Objects index by key, arrays by position.
pub(crate) fn get_by_path<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    let mut node = root;
    for segment in path.split('.') {
        node = match node {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(array_index(segment)?)?,
            _ => return None,
        };
        if node.is_null() {
            return None;
        }
    }
    Some(node)
}

/// Canonical decimal index: digits only, no leading zero except `0` itself.
fn array_index(segment: &str) -> Option<usize> {
    let canonical = match segment.as_bytes() {
        [] => false,
        [b'0'] => true,
        [b'0', ..] => false,
        bytes => bytes.iter().all(u8::is_ascii_digit),
    };
    if canonical {
        segment.parse().ok()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;
    use vansanten_test_utils::{assert_err, assert_ok, temp_file, SAMPLE_TRANSLATIONS};

    #[test]
    fn test_parse_sample_document() {
        let bundle = TranslationBundle::from_json_str(SAMPLE_TRANSLATIONS).unwrap();
        assert_eq!(bundle.locales().as_slice(), &["en", "fr"]);
        assert!(bundle.tree("en").is_some());
        assert!(bundle.tree("fr").is_some());
        assert!(bundle.tree("de").is_none());
    }

    #[test]
    fn test_lookup_nested_path() {
        let bundle = TranslationBundle::from_json_str(SAMPLE_TRANSLATIONS).unwrap();
        assert_eq!(bundle.lookup("en", "nav.home"), Some(&json!("Home")));
        assert_eq!(bundle.lookup("fr", "nav.home"), Some(&json!("Accueil")));
        assert_eq!(bundle.lookup("en", "nav.missing"), None);
        assert_eq!(bundle.lookup("de", "nav.home"), None);
    }

    #[test]
    fn test_get_by_path_stops_at_null_and_leaves() {
        let tree = json!({
            "a": { "b": null, "c": "leaf" },
            "list": ["zero", "one"],
        });

        assert_eq!(get_by_path(&tree, "a.b"), None);
        assert_eq!(get_by_path(&tree, "a.b.c"), None);
        assert_eq!(get_by_path(&tree, "a.c.d"), None);
        assert_eq!(get_by_path(&tree, "a.c"), Some(&json!("leaf")));
        assert_eq!(get_by_path(&tree, "list.1"), Some(&json!("one")));
        assert_eq!(get_by_path(&tree, "list.2"), None);
        assert_eq!(get_by_path(&tree, "list.x"), None);
        assert_eq!(get_by_path(&tree, "a"), Some(&json!({ "b": null, "c": "leaf" })));
        assert_eq!(get_by_path(&tree, ""), None);
    }

    #[test_case("list.0", Some("zero") ; "zero")]
    #[test_case("list.10", Some("ten") ; "two digits")]
    #[test_case("list.01", None ; "leading zero")]
    #[test_case("list.00", None ; "double zero")]
    #[test_case("list.+1", None ; "plus sign")]
    #[test_case("list.-1", None ; "minus sign")]
    #[test_case("list. 1", None ; "whitespace")]
    #[test_case("list.", None ; "empty segment")]
    fn test_array_segments_must_be_canonical(path: &str, expected: Option<&str>) {
        let tree = json!({
            "list": ["zero", "one", "two", "three", "four", "five",
                     "six", "seven", "eight", "nine", "ten"],
        });
        assert_eq!(get_by_path(&tree, path).and_then(Value::as_str), expected);
    }

    #[test]
    fn test_non_object_entries_are_not_trees() {
        let bundle = TranslationBundle::from_json_str(
            r#"{ "locales": ["en"], "en": { "k": "v" }, "version": 3 }"#,
        )
        .unwrap();
        assert!(bundle.tree("version").is_none());
        assert!(bundle.tree("locales").is_none());
    }

    #[test]
    fn test_missing_locales_is_rejected() {
        let err = assert_err!(TranslationBundle::from_json_str(r#"{ "en": {} }"#));
        assert!(matches!(err, I18nError::InvalidDocument(_)));
    }

    #[test]
    fn test_non_array_locales_is_rejected() {
        let err = assert_err!(TranslationBundle::from_json_str(r#"{ "locales": "en" }"#));
        assert!(matches!(err, I18nError::InvalidDocument(_)));

        let err = assert_err!(TranslationBundle::from_json_str(r#"{ "locales": ["en", 1] }"#));
        assert!(matches!(err, I18nError::InvalidDocument(_)));
    }

    #[test]
    fn test_top_level_must_be_object() {
        let err = assert_err!(TranslationBundle::from_json_str("[]"));
        assert!(matches!(err, I18nError::InvalidDocument(_)));
    }

    #[test]
    fn test_malformed_json() {
        let err = assert_err!(TranslationBundle::from_json_str("{ not json"));
        assert!(matches!(err, I18nError::ParseError(_)));
    }

    #[test]
    fn test_missing_en_tree_is_tolerated() {
        let bundle =
            TranslationBundle::from_json_str(r#"{ "locales": ["fr"], "fr": { "k": "v" } }"#)
                .unwrap();
        assert!(bundle.tree("en").is_none());
        assert_eq!(bundle.lookup("fr", "k"), Some(&json!("v")));
    }

    #[test]
    fn test_from_path() {
        let (_dir, path) = temp_file(SAMPLE_TRANSLATIONS);
        let bundle = assert_ok!(TranslationBundle::from_path(&path));
        assert_eq!(bundle.locales().len(), 2);
    }

    #[test]
    fn test_from_path_missing_file() {
        let err = assert_err!(TranslationBundle::from_path("/nonexistent/languages.json"));
        assert!(matches!(err, I18nError::LoadError { .. }));
    }

    #[test]
    fn test_embedded_translations() {
        // Parse directly so a broken document fails here instead of degrading.
        let bundle = TranslationBundle::from_json_str(EMBEDDED_TRANSLATIONS).unwrap();
        assert_eq!(bundle.locales().as_slice(), &["en", "nl", "fr"]);
        for code in bundle.locales().iter() {
            assert!(bundle.tree(code).is_some(), "no tree for {code}");
        }
        assert_eq!(bundle.lookup("en", "nav.artworks"), Some(&json!("Artworks")));
        assert_eq!(bundle.lookup("nl", "nav.artworks"), Some(&json!("Kunstwerken")));
    }
}

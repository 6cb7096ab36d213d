//! Test utilities for the vansanten crates.

use std::path::PathBuf;
use tempfile::TempDir;

/// Small two-locale translation document.
///
/// `fr` deliberately lacks `nav.contact` and `artworks` so lookups exercise
/// the English fallback.
pub const SAMPLE_TRANSLATIONS: &str = r#"{
  "locales": ["en", "fr"],
  "en": {
    "nav": {
      "home": "Home",
      "contact": "Contact us",
      "greet": "Hi {name}"
    },
    "home": {
      "welcome": "Welcome, {name}"
    },
    "artworks": {
      "categories": ["Paintings", "Prints"]
    }
  },
  "fr": {
    "nav": {
      "home": "Accueil"
    },
    "home": {
      "welcome": "Bienvenue, {name}"
    }
  }
}"#;

/// Creates a temporary directory that is cleaned up on drop.
pub fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Creates a temporary file with given content.
pub fn temp_file(content: &str) -> (TempDir, PathBuf) {
    let dir = temp_dir();
    let path = dir.path().join("test_file");
    std::fs::write(&path, content).expect("Failed to write temp file");
    (dir, path)
}

/// Writes [`SAMPLE_TRANSLATIONS`] into `dir` as `languages.json`.
pub fn write_sample_translations(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("languages.json");
    std::fs::write(&path, SAMPLE_TRANSLATIONS).expect("Failed to write translations");
    path
}

/// Assert that a Result is Ok and return the value.
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

/// Assert that a Result is Err.
#[macro_export]
macro_rules! assert_err {
    ($expr:expr) => {
        match $expr {
            Ok(v) => panic!("Expected Err, got Ok: {:?}", v),
            Err(e) => e,
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_temp_dir_creation() {
        let dir = temp_dir();
        assert!(dir.path().exists());
        assert!(dir.path().is_dir());
    }

    #[test]
    fn test_sample_translations_is_valid_json() {
        let value: serde_json::Value = serde_json::from_str(SAMPLE_TRANSLATIONS).unwrap();
        assert_eq!(value["locales"], serde_json::json!(["en", "fr"]));
        assert_eq!(value["en"]["nav"]["home"], "Home");
        assert!(value["fr"]["nav"].get("contact").is_none());
    }

    #[test]
    fn test_write_sample_translations() {
        let dir = temp_dir();
        let path = write_sample_translations(&dir);
        let content = std::fs::read_to_string(path).unwrap();
        assert_eq!(content, SAMPLE_TRANSLATIONS);
    }

    #[test]
    fn test_assert_macros() {
        let ok: Result<u8, String> = Ok(1);
        assert_eq!(assert_ok!(ok), 1);

        let err: Result<u8, String> = Err("boom".to_string());
        assert_eq!(assert_err!(err), "boom");
    }

    proptest! {
        #[test]
        fn test_temp_file_content_roundtrip(content in "\\PC*") {
            let (_dir, path) = temp_file(&content);
            let read_content = std::fs::read_to_string(&path).unwrap();
            prop_assert_eq!(content, read_content);
        }
    }
}

//! Environment variable handling.

use std::env;
use std::path::Path;
use thiserror::Error;

/// Environment variable errors.
#[derive(Debug, Error)]
pub enum EnvError {
    #[error("failed to load .env file: {0}")]
    DotenvError(#[from] dotenvy::Error),
}

/// Environment variable names.
pub mod vars {
    // Configuration
    pub const VANSANTEN_CONFIG: &str = "VANSANTEN_CONFIG";
    pub const VANSANTEN_TRANSLATIONS: &str = "VANSANTEN_TRANSLATIONS";
    pub const VANSANTEN_LOCALE: &str = "VANSANTEN_LOCALE";

    // Deployment
    pub const VANSANTEN_ENV: &str = "VANSANTEN_ENV";
}

/// Environment configuration.
pub struct Environment {
    loaded: Vec<String>,
}

impl Environment {
    /// Initialize environment from .env files in the working directory.
    ///
    /// Loads `.env`, `.env.local`, then `.env.<VANSANTEN_ENV>`. Variables
    /// already set in the process are never overwritten. Missing files are
    /// skipped; malformed ones are errors.
    pub fn init() -> Result<Self, EnvError> {
        Self::init_in(Path::new(""))
    }

    /// Like [`Environment::init`], reading the files from `dir`.
    pub fn init_in(dir: &Path) -> Result<Self, EnvError> {
        let mut files = vec![".env".to_string(), ".env.local".to_string()];
        if let Ok(name) = env::var(vars::VANSANTEN_ENV) {
            files.push(format!(".env.{name}"));
        }

        let mut loaded = Vec::new();
        for file in files {
            match dotenvy::from_path(dir.join(&file)) {
                Ok(()) => loaded.push(file),
                Err(e) if e.not_found() => {}
                Err(e) => return Err(e.into()),
            }
        }

        Ok(Self { loaded })
    }

    /// The .env files that were found and loaded.
    pub fn loaded_files(&self) -> &[String] {
        &self.loaded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_no_env_files() {
        let dir = tempdir().unwrap();
        let environment = Environment::init_in(dir.path()).unwrap();
        assert!(environment.loaded_files().is_empty());
    }

    #[test]
    fn test_loads_env_then_local() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(".env"), "VANSANTEN_TEST_DOTENV_A=base\n").unwrap();
        fs::write(
            dir.path().join(".env.local"),
            "VANSANTEN_TEST_DOTENV_A=local\nVANSANTEN_TEST_DOTENV_B=local\n",
        )
        .unwrap();

        let environment = Environment::init_in(dir.path()).unwrap();
        assert_eq!(environment.loaded_files(), [".env", ".env.local"]);

        // Earlier files win; nothing is overwritten.
        assert_eq!(env::var("VANSANTEN_TEST_DOTENV_A").unwrap(), "base");
        assert_eq!(env::var("VANSANTEN_TEST_DOTENV_B").unwrap(), "local");

        env::remove_var("VANSANTEN_TEST_DOTENV_A");
        env::remove_var("VANSANTEN_TEST_DOTENV_B");
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(".env"), "VANSANTEN_TEST_DOTENV_BAD='unterminated\n").unwrap();

        assert!(matches!(
            Environment::init_in(dir.path()),
            Err(EnvError::DotenvError(_))
        ));
    }
}

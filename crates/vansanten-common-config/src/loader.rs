//! Configuration file loading and parsing.

use crate::types::{SiteConfig, StorageBackend, STATE_DIR};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use thiserror::Error;

const CONFIG_FILE: &str = "config.yaml";
const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "warning", "error"];
const LOG_FORMATS: &[&str] = &["pretty", "compact", "json"];

/// Config loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("failed to read config: {source}")]
    ReadError {
        #[from]
        source: std::io::Error,
    },

    #[error("invalid YAML at line {}: {message}", line.map(|l| l.to_string()).unwrap_or_else(|| "unknown".to_string()))]
    ParseError { line: Option<usize>, message: String },

    #[error("validation error: {message}")]
    ValidationError { message: String },

    #[error("environment variable not found: {var}")]
    EnvVarNotFound { var: String },
}

fn env_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}:]+)(?::-([^}]*))?\}").unwrap())
}

/// Configuration loader.
///
/// Relative paths in the loaded config are resolved against the project
/// directory, or against the directory of an explicit config file.
pub struct ConfigLoader {
    base_path: PathBuf,
    config_path: PathBuf,
    explicit: bool,
}

impl ConfigLoader {
    /// Create a loader for the given project directory.
    ///
    /// Reads `.vansanten/config.yaml`; a missing file yields defaults.
    pub fn new(project_dir: impl AsRef<Path>) -> Self {
        let base_path = project_dir.as_ref().to_path_buf();
        let config_path = base_path.join(STATE_DIR).join(CONFIG_FILE);
        Self {
            base_path,
            config_path,
            explicit: false,
        }
    }

    /// Create a loader for an explicit config file; a missing file is an error.
    ///
    /// A relative `config_path` is taken from `project_dir`.
    pub fn from_file(project_dir: impl AsRef<Path>, config_path: impl AsRef<Path>) -> Self {
        let config_path = project_dir.as_ref().join(config_path);
        let base_path = match config_path.parent() {
            Some(dir) => dir.to_path_buf(),
            None => project_dir.as_ref().to_path_buf(),
        };
        Self {
            base_path,
            config_path,
            explicit: true,
        }
    }

    /// Load the configuration.
    pub fn load(&self) -> Result<SiteConfig, ConfigError> {
        if !self.config_path.exists() {
            if self.explicit {
                return Err(ConfigError::NotFound {
                    path: self.config_path.clone(),
                });
            }
            return Ok(self.resolve_paths(SiteConfig::default()));
        }

        let contents = std::fs::read_to_string(&self.config_path)?;
        let config = self.parse(&contents)?;
        Ok(self.resolve_paths(config))
    }

    /// Parse and validate YAML without touching the filesystem.
    pub fn parse(&self, contents: &str) -> Result<SiteConfig, ConfigError> {
        let expanded = self.expand_env_vars(contents)?;

        // An empty or comment-only file means "all defaults".
        let blank = expanded.lines().all(|line| {
            let line = line.trim();
            line.is_empty() || line.starts_with('#')
        });
        let config: SiteConfig = if blank {
            SiteConfig::default()
        } else {
            serde_yaml::from_str(&expanded).map_err(|e| ConfigError::ParseError {
                line: e.location().map(|l| l.line()),
                message: e.to_string(),
            })?
        };

        self.validate(&config)?;
        Ok(config)
    }

    /// Expand environment variables in the form `${VAR}` or `${VAR:-default}`.
    fn expand_env_vars(&self, content: &str) -> Result<String, ConfigError> {
        let mut result = content.to_string();

        for cap in env_pattern().captures_iter(content) {
            let full_match = &cap[0];
            let var_name = &cap[1];
            let default = cap.get(2).map(|m| m.as_str());

            let value = match std::env::var(var_name) {
                Ok(v) => v,
                Err(_) => match default {
                    Some(d) => d.to_string(),
                    None => {
                        return Err(ConfigError::EnvVarNotFound {
                            var: var_name.to_string(),
                        })
                    }
                },
            };

            result = result.replace(full_match, &value);
        }

        Ok(result)
    }

    /// Validate configuration values.
    fn validate(&self, config: &SiteConfig) -> Result<(), ConfigError> {
        if let Some(path) = &config.i18n.translations {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::ValidationError {
                    message: "i18n.translations must not be empty".to_string(),
                });
            }
        }

        if config.storage.backend == StorageBackend::File {
            let missing = config
                .storage
                .path
                .as_ref()
                .map_or(true, |p| p.as_os_str().is_empty());
            if missing {
                return Err(ConfigError::ValidationError {
                    message: "storage.path is required for the file backend".to_string(),
                });
            }
        }

        if !LOG_LEVELS.contains(&config.log.level.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError {
                message: format!("log.level must be one of {}", LOG_LEVELS.join(", ")),
            });
        }

        if !LOG_FORMATS.contains(&config.log.format.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError {
                message: format!("log.format must be one of {}", LOG_FORMATS.join(", ")),
            });
        }

        Ok(())
    }

    fn resolve_paths(&self, mut config: SiteConfig) -> SiteConfig {
        config.i18n.translations = config.i18n.translations.map(|p| self.base_path.join(p));
        config.storage.path = config.storage.path.map(|p| self.base_path.join(p));
        config
    }
}

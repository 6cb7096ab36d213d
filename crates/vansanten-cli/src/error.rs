//! CLI error handling.

use std::io;
use std::process::ExitCode;

use thiserror::Error;
use vansanten_common_config::{ConfigError, EnvError};
use vansanten_i18n::I18nError;

use crate::Exit;

/// CLI error type with context
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("{message}")]
    Io {
        message: String,
        #[source]
        source: io::Error,
    },

    #[error("{message}")]
    Translations {
        message: String,
        #[source]
        source: I18nError,
    },

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        self.exit().into()
    }

    fn exit(&self) -> Exit {
        match self {
            Self::Config { .. } => Exit::ConfigError,
            Self::Io { .. } => Exit::IoError,
            Self::Translations { source, .. } => match source {
                I18nError::LoadError { .. } => Exit::IoError,
                I18nError::ParseError(_) | I18nError::InvalidDocument(_) => Exit::ValidationError,
            },
            Self::Other(_) => Exit::GeneralError,
        }
    }

    /// Create an IO error
    pub fn io(message: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }
}

// Conversion implementations
impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self::Config {
            message: format!("Configuration error: {err}"),
            source: Some(Box::new(err)),
        }
    }
}

impl From<EnvError> for CliError {
    fn from(err: EnvError) -> Self {
        Self::Config {
            message: format!("Environment error: {err}"),
            source: Some(Box::new(err)),
        }
    }
}

impl From<I18nError> for CliError {
    fn from(err: I18nError) -> Self {
        Self::Translations {
            message: format!("Translation error: {err}"),
            source: err,
        }
    }
}

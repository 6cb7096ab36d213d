//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};
use vansanten_common_config::{vars, ConfigLoader, LogSettings, SiteConfig};
use vansanten_common_log::{LogConfig, LogFormat, LogLevel};
use vansanten_i18n::LocaleResolver;

use crate::commands::{LocaleCommand, LocalesCommand, TranslateCommand};
use crate::error::CliError;
use crate::host;

/// Translations for the Van Santen site
///
/// Resolve translation keys and manage the persisted locale the same way
/// the site does in the browser.
#[derive(Debug, Parser)]
#[command(
    name = "vansanten",
    author,
    version,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(
        short,
        long,
        action = ArgAction::Count,
        global = true,
        help = "Increase verbosity level"
    )]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(
        short,
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Only log errors"
    )]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(
        short,
        long,
        global = true,
        env = vars::VANSANTEN_CONFIG,
        value_hint = ValueHint::FilePath,
        help = "Path to configuration file"
    )]
    pub config: Option<PathBuf>,

    /// Translation document overriding the configured one
    #[arg(
        long,
        global = true,
        env = vars::VANSANTEN_TRANSLATIONS,
        value_hint = ValueHint::FilePath,
        help = "Translation document to load"
    )]
    pub translations: Option<PathBuf>,

    /// Locale for this invocation only; not persisted
    #[arg(
        long,
        global = true,
        env = vars::VANSANTEN_LOCALE,
        help = "Use this locale without persisting it"
    )]
    pub locale: Option<String>,

    /// Output format
    #[arg(
        long,
        global = true,
        default_value = "text",
        value_enum,
        help = "Output format (text, json)"
    )]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Available subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve a translation key
    #[command(visible_alias = "translate")]
    T(TranslateCommand),

    /// Show or change the current locale
    Locale(LocaleCommand),

    /// List supported locales
    Locales(LocalesCommand),
}

impl Cli {
    /// Load configuration from `--config` or the current directory.
    pub fn load_config(&self) -> Result<SiteConfig, CliError> {
        let project_dir = std::env::current_dir().unwrap_or_default();
        let loader = match &self.config {
            Some(path) => ConfigLoader::from_file(&project_dir, path),
            None => ConfigLoader::new(&project_dir),
        };
        Ok(loader.load()?)
    }

    /// Logging config: file settings, then env, then `-v`/`-q`.
    pub fn log_config(&self, settings: Option<&LogSettings>) -> LogConfig {
        let mut config = LogConfig::default();

        if let Some(settings) = settings {
            if let Some(level) = LogLevel::parse(&settings.level) {
                config.level = level;
            }
            if let Some(format) = LogFormat::parse(&settings.format) {
                config.format = format;
            }
        }

        let mut config = config.merge_env();

        if self.quiet {
            config.level = LogLevel::Error;
        } else if self.verbose > 0 {
            config.level = LogLevel::from_verbosity(self.verbose);
        }
        config.ansi = std::env::var_os("NO_COLOR").is_none();

        config
    }

    /// Execute the selected command
    pub fn execute(self, config: SiteConfig) -> Result<(), CliError> {
        let resolver = host::build_resolver(
            &config,
            self.translations.as_deref(),
            self.locale.as_deref(),
        )?;

        let ctx = CommandContext {
            resolver,
            format: self.format,
        };

        match self.command {
            Command::T(cmd) => cmd.execute(&ctx),
            Command::Locale(cmd) => cmd.execute(&ctx),
            Command::Locales(cmd) => cmd.execute(&ctx),
        }
    }
}

/// Context passed to all commands
#[derive(Debug)]
pub struct CommandContext {
    pub resolver: LocaleResolver,
    pub format: OutputFormat,
}

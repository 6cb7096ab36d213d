//! Command implementations.

use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};
use vansanten_i18n::{Translation, Vars};

use crate::cli::CommandContext;
use crate::error::CliError;
use crate::output::{print_output, FormattedOutput};

/// Resolve a translation key in the current locale
#[derive(Debug, Parser)]
pub struct TranslateCommand {
    /// Dotted key path, e.g. `nav.home`
    pub path: String,

    /// Placeholder value as `name=value` (repeatable)
    #[arg(long = "var", value_name = "NAME=VALUE", value_parser = parse_var)]
    pub vars: Vec<(String, String)>,
}

/// Parse a `name=value` pair. The value may itself contain `=`.
fn parse_var(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got `{s}`"))?;
    if name.is_empty() {
        return Err(format!("empty variable name in `{s}`"));
    }
    Ok((name.to_string(), value.to_string()))
}

impl TranslateCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let vars: Vars = self.vars.iter().cloned().collect();
        let translation = ctx.resolver.resolve(&self.path, &vars);

        let output = TranslationOutput {
            locale: ctx.resolver.locale(),
            path: self.path.clone(),
            value: translation.into_value(),
        };
        print_output(ctx, &output)
    }
}

/// Result of a key lookup.
#[derive(Debug, Serialize)]
pub struct TranslationOutput {
    pub locale: String,
    pub path: String,
    pub value: Value,
}

impl FormattedOutput for TranslationOutput {
    fn format_text(&self) -> String {
        match &self.value {
            Value::String(text) => text.clone(),
            other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
        }
    }

    fn format_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Show or change the current locale
#[derive(Debug, Parser)]
pub struct LocaleCommand {
    #[command(subcommand)]
    pub action: Option<LocaleAction>,
}

#[derive(Debug, Subcommand)]
pub enum LocaleAction {
    /// Print the current locale (default)
    Get,

    /// Switch to a supported locale and persist it
    Set {
        /// Locale code, e.g. `fr`
        code: String,
    },
}

impl LocaleCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let changed = match &self.action {
            None | Some(LocaleAction::Get) => false,
            Some(LocaleAction::Set { code }) => {
                let accepted = ctx.resolver.set_locale(code);
                if accepted {
                    info!(locale = %code, "locale saved");
                } else {
                    let supported: Vec<&str> = ctx.resolver.supported_locales().iter().collect();
                    warn!(
                        locale = %code,
                        supported = %supported.join(", "),
                        "unsupported locale ignored"
                    );
                }
                accepted
            }
        };

        let output = LocaleOutput {
            locale: ctx.resolver.locale(),
            changed,
        };
        print_output(ctx, &output)
    }
}

/// Current locale after a get/set.
#[derive(Debug, Serialize)]
pub struct LocaleOutput {
    pub locale: String,
    /// Whether a `set` was accepted.
    pub changed: bool,
}

impl FormattedOutput for LocaleOutput {
    fn format_text(&self) -> String {
        self.locale.clone()
    }

    fn format_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// List supported locales
#[derive(Debug, Parser)]
pub struct LocalesCommand {
    /// Show each locale's name as translated under `language.<code>`
    #[arg(long)]
    pub names: bool,
}

impl LocalesCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let resolver = &ctx.resolver;
        let current = resolver.locale();

        let locales = resolver
            .supported_locales()
            .iter()
            .map(|code| {
                let name = self.names.then(|| {
                    let key = format!("language.{code}");
                    match resolver.resolve(&key, &Vars::new()) {
                        Translation::Text(name) if name != key => name,
                        _ => code.to_string(),
                    }
                });
                LocaleEntry {
                    code: code.to_string(),
                    name,
                    current: code == current,
                }
            })
            .collect();

        print_output(ctx, &LocalesOutput { current, locales })
    }
}

/// One row of the locale switcher.
#[derive(Debug, Serialize)]
pub struct LocaleEntry {
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub current: bool,
}

#[derive(Debug, Serialize)]
pub struct LocalesOutput {
    pub current: String,
    pub locales: Vec<LocaleEntry>,
}

impl FormattedOutput for LocalesOutput {
    fn format_text(&self) -> String {
        self.locales
            .iter()
            .map(|entry| {
                let marker = if entry.current { '*' } else { ' ' };
                match &entry.name {
                    Some(name) => format!("{marker} {} ({name})", entry.code),
                    None => format!("{marker} {}", entry.code),
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn format_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

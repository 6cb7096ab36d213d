//! `{name}` placeholder substitution.

use super::Vars;
use regex::{Captures, Regex};
use std::sync::OnceLock;

fn placeholder() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| Regex::new(r"\{([A-Za-z0-9_]+)\}").unwrap())
}

/// Replace every `{name}` token with its value from `vars`.
///
/// Tokens without a matching var become empty. Braces that do not form a
/// token (`{}`, `{a b}`, a lone `{`) are left alone.
pub fn interpolate(template: &str, vars: &Vars) -> String {
    placeholder()
        .replace_all(template, |caps: &Captures<'_>| {
            vars.get(&caps[1]).unwrap_or_default().to_string()
        })
        .into_owned()
}

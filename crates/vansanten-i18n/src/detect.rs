//! Initial locale selection and fallback order.

use super::{SupportedLocales, DEFAULT_LOCALE};

/// Pick the locale to start on with an optional one-off override.
///
/// A supported override wins; otherwise this is [`initial_locale`].
pub fn initial_locale_with_override(
    supported: &SupportedLocales,
    override_locale: Option<&str>,
    stored: Option<&str>,
) -> String {
    // Explicit choice has highest priority
    if let Some(code) = override_locale {
        if supported.contains(code) {
            return code.to_string();
        }
    }

    initial_locale(supported, stored)
}

/// Pick the locale to start on.
///
/// Priority: stored choice > `en` > first supported code. An empty locale
/// list still yields `en`.
pub fn initial_locale(supported: &SupportedLocales, stored: Option<&str>) -> String {
    if let Some(code) = stored {
        if supported.contains(code) {
            return code.to_string();
        }
    }

    if supported.contains(DEFAULT_LOCALE) || supported.is_empty() {
        return DEFAULT_LOCALE.to_string();
    }

    supported.first().unwrap_or(DEFAULT_LOCALE).to_string()
}

/// Locales consulted, in order, when resolving a key.
pub fn fallback_chain(locale: &str) -> Vec<&str> {
    let mut chain = vec![locale];

    // Always fall back to English
    if locale != DEFAULT_LOCALE {
        chain.push(DEFAULT_LOCALE);
    }

    chain
}

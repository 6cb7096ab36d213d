//! Wires configuration into a [`LocaleResolver`].

use std::path::Path;

use tracing::debug;
use vansanten_common_config::{SiteConfig, StorageBackend};
use vansanten_i18n::{
    FileStorage, LocaleResolver, LocaleStorage, MemoryStorage, NoopStorage, TranslationBundle,
};

use crate::error::CliError;

/// Build the resolver the commands operate on.
///
/// `translations` (from `--translations`) wins over the configured document;
/// without either the embedded site translations are used.
pub fn build_resolver(
    config: &SiteConfig,
    translations: Option<&Path>,
    override_locale: Option<&str>,
) -> Result<LocaleResolver, CliError> {
    let bundle = load_bundle(translations.or(config.i18n.translations.as_deref()))?;
    let storage = storage_for(config);
    Ok(LocaleResolver::with_override(bundle, storage, override_locale))
}

fn load_bundle(path: Option<&Path>) -> Result<TranslationBundle, CliError> {
    match path {
        Some(path) => Ok(TranslationBundle::from_path(path)?),
        None => {
            debug!("using embedded translations");
            Ok(TranslationBundle::embedded())
        }
    }
}

fn storage_for(config: &SiteConfig) -> Box<dyn LocaleStorage> {
    match (config.storage.backend, config.storage.path.as_deref()) {
        (StorageBackend::File, Some(path)) => {
            debug!(path = %path.display(), "using file storage");
            Box::new(FileStorage::new(path))
        }
        (StorageBackend::Memory, _) => Box::new(MemoryStorage::new()),
        // Validation rejects a file backend without a path.
        (StorageBackend::File, None) | (StorageBackend::None, _) => Box::new(NoopStorage),
    }
}

//! Locale type: Flexible, validated locale representation.
//!
//! The `Locale` type is a cheap, copyable handle to a registry entry. It can
//! only be constructed through the registry, so holding one is proof that the
//! code was supported and enabled at construction time.

use anyhow::{bail, Result};

use crate::i18n::{LocaleConfig, LocaleRegistry};

/// A validated locale.
///
/// Carries the canonical registry spelling of the code, so two handles for
/// the same locale always compare equal regardless of how the original
/// request spelled it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Locale {
    /// ISO 639-1 locale code (e.g., "en", "es")
    code: &'static str,
}

impl Locale {
    /// Create a Locale from a code string, validated against the global
    /// registry (case-insensitive).
    ///
    /// # Returns
    /// * `Ok(Locale)` if the code names a supported, enabled locale
    /// * `Err` if the code is unknown or the locale is disabled
    pub fn from_code(code: &str) -> Result<Locale> {
        let registry = LocaleRegistry::get();

        match registry.get_by_code(code) {
            Some(config) if config.enabled => Ok(Locale::from_config(config)),
            Some(_) => bail!("Locale '{}' is not enabled", code),
            None => bail!("Unknown locale code: '{}'", code),
        }
    }

    /// The site-wide default locale.
    pub fn default_locale() -> Locale {
        LocaleRegistry::get().default_locale()
    }

    pub(crate) fn from_config(config: &LocaleConfig) -> Locale {
        Locale { code: config.code }
    }

    /// The ISO 639-1 locale code (canonical registry spelling).
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// The full locale configuration from the global registry.
    ///
    /// # Panics
    /// Panics if the code is not found in the global registry. This cannot
    /// happen for handles obtained from that registry.
    pub fn config(&self) -> &'static LocaleConfig {
        LocaleRegistry::get()
            .get_by_code(self.code)
            .expect("Locale code should always be valid")
    }

    /// The English name of the locale.
    pub fn name(&self) -> &'static str {
        self.config().name
    }

    /// The native name of the locale.
    pub fn native_name(&self) -> &'static str {
        self.config().native_name
    }

    /// Whether this is the site-wide default locale.
    pub fn is_default(&self) -> bool {
        self.config().is_default
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code)
    }
}

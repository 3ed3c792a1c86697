//! Locale registry: Single source of truth for all supported locales.
//!
//! This module provides a centralized registry of every locale the site can
//! serve. It uses a singleton pattern with `OnceLock` so the registry is
//! initialized once (from configuration at process start, or from the built-in
//! defaults) and is immutable afterwards.

use std::sync::OnceLock;

use anyhow::{bail, Result};

use crate::i18n::Locale;

/// Configuration for a supported locale.
#[derive(Debug, Clone)]
pub struct LocaleConfig {
    /// ISO 639-1 locale code used as the URL prefix (e.g., "en", "es", "fr")
    pub code: &'static str,

    /// English name of the locale (e.g., "English", "Spanish")
    pub name: &'static str,

    /// Native name of the locale (e.g., "English", "Español")
    pub native_name: &'static str,

    /// Whether this is the default locale (exactly one should be true)
    pub is_default: bool,

    /// Whether this locale is enabled for serving
    pub enabled: bool,
}

/// Global locale registry singleton.
///
/// Holds the ordered set of supported locales and the default locale. The
/// order is significant: static param enumeration and locale listings follow
/// registry order.
pub struct LocaleRegistry {
    locales: Vec<LocaleConfig>,
}

/// Global registry instance (initialized lazily)
static REGISTRY: OnceLock<LocaleRegistry> = OnceLock::new();

impl LocaleRegistry {
    /// Get the global locale registry instance.
    ///
    /// Falls back to the built-in default set if `install` was never called
    /// (tests rely on this).
    pub fn get() -> &'static LocaleRegistry {
        REGISTRY.get_or_init(|| LocaleRegistry {
            locales: default_locales(),
        })
    }

    /// Install a registry built from configuration as the global instance.
    ///
    /// Must be called before the first `get()` to take effect; the registry
    /// is immutable once initialized, so a second install is an error.
    pub fn install(registry: LocaleRegistry) -> Result<&'static LocaleRegistry> {
        if REGISTRY.set(registry).is_err() {
            bail!("Locale registry is already initialized");
        }
        Ok(Self::get())
    }

    /// Build a registry from an explicit locale list.
    ///
    /// # Errors
    /// Fails if the list is empty, contains duplicate codes, or does not
    /// contain exactly one enabled default locale.
    pub fn new(locales: Vec<LocaleConfig>) -> Result<Self> {
        if locales.is_empty() {
            bail!("Locale registry must contain at least one locale");
        }

        for (i, locale) in locales.iter().enumerate() {
            if locales[..i]
                .iter()
                .any(|other| other.code.eq_ignore_ascii_case(locale.code))
            {
                bail!("Duplicate locale code in registry: '{}'", locale.code);
            }
        }

        let defaults = locales
            .iter()
            .filter(|l| l.is_default && l.enabled)
            .count();
        if defaults != 1 {
            bail!(
                "Locale registry must have exactly one enabled default locale, found {}",
                defaults
            );
        }

        Ok(LocaleRegistry { locales })
    }

    /// Build a registry from plain code strings (e.g., parsed configuration).
    ///
    /// The registry lives for the whole process, so the configured codes are
    /// leaked to back `Copy` locale handles.
    pub fn from_codes(codes: &[String], default_code: &str) -> Result<Self> {
        if !codes.iter().any(|c| c.eq_ignore_ascii_case(default_code)) {
            bail!(
                "Default locale '{}' is not in the supported set {:?}",
                default_code,
                codes
            );
        }

        let locales = codes
            .iter()
            .map(|code| {
                let leaked: &'static str =
                    Box::leak(code.to_ascii_lowercase().into_boxed_str());
                LocaleConfig {
                    code: leaked,
                    name: leaked,
                    native_name: leaked,
                    is_default: code.eq_ignore_ascii_case(default_code),
                    enabled: true,
                }
            })
            .collect();

        Self::new(locales)
    }

    /// Get a locale configuration by its code (case-insensitive).
    pub fn get_by_code(&self, code: &str) -> Option<&LocaleConfig> {
        self.locales
            .iter()
            .find(|locale| locale.code.eq_ignore_ascii_case(code))
    }

    /// All enabled locales, in registry order.
    pub fn supported(&self) -> Vec<&LocaleConfig> {
        self.locales.iter().filter(|locale| locale.enabled).collect()
    }

    /// All locales (including disabled ones), in registry order.
    pub fn list_all(&self) -> Vec<&LocaleConfig> {
        self.locales.iter().collect()
    }

    /// The default locale.
    ///
    /// # Panics
    /// Panics if no default locale exists, which `new` rules out.
    pub fn default_locale(&self) -> Locale {
        let config = self
            .locales
            .iter()
            .find(|locale| locale.is_default && locale.enabled)
            .expect("Registry should always contain a default locale");
        Locale::from_config(config)
    }

    /// Check if a code names a supported, enabled locale (case-insensitive).
    pub fn is_supported(&self, code: &str) -> bool {
        self.get_by_code(code)
            .map(|locale| locale.enabled)
            .unwrap_or(false)
    }

    /// Resolve a code to a validated locale handle, if supported.
    ///
    /// Matching is case-insensitive and the returned handle always carries
    /// the canonical (registry) spelling of the code.
    pub fn match_locale(&self, code: &str) -> Option<Locale> {
        self.get_by_code(code)
            .filter(|locale| locale.enabled)
            .map(Locale::from_config)
    }
}

/// Default locale configurations used when no configuration is installed.
fn default_locales() -> Vec<LocaleConfig> {
    vec![
        LocaleConfig {
            code: "en",
            name: "English",
            native_name: "English",
            is_default: true,
            enabled: true,
        },
        LocaleConfig {
            code: "es",
            name: "Spanish",
            native_name: "Español",
            is_default: false,
            enabled: true,
        },
        LocaleConfig {
            code: "fr",
            name: "French",
            native_name: "Français",
            is_default: false,
            enabled: true,
        },
        LocaleConfig {
            code: "de",
            name: "German",
            native_name: "Deutsch",
            is_default: false,
            enabled: true,
        },
        LocaleConfig {
            code: "it",
            name: "Italian",
            native_name: "Italiano",
            is_default: false,
            enabled: true,
        },
    ]
}

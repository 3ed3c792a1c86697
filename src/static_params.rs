//! Static param enumeration for build-time pre-generation.
//!
//! The rendering pipeline calls this once per build to learn which per-locale
//! page variants to produce. Pure function of the registry; registry order is
//! preserved so builds are reproducible.

use serde::Serialize;

use crate::i18n::LocaleRegistry;

/// One pre-generation parameter record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocaleParam {
    /// The locale code a page variant should be generated for.
    pub locale: &'static str,
}

/// One record per supported locale, in registry order, no duplicates.
pub fn enumerate_locale_params(registry: &LocaleRegistry) -> Vec<LocaleParam> {
    registry
        .supported()
        .iter()
        .map(|config| LocaleParam {
            locale: config.code,
        })
        .collect()
}

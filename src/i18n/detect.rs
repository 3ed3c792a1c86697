//! Best-effort locale detection from the Accept-Language request header.
//!
//! This is the lowest-priority resolution signal: it only matters when the
//! path carries no locale segment and no valid preference cookie is present.
//! Parsing is deliberately forgiving; anything malformed is skipped rather
//! than rejected.

use crate::i18n::{Locale, LocaleRegistry};

/// Pick the best supported locale from an Accept-Language header value.
///
/// Entries are ranked by their `q` weight (missing weight counts as 1.0) and
/// matched on the primary subtag, so `fr-CH` matches a supported `fr`.
/// Returns `None` when nothing in the header is supported.
pub fn negotiate(registry: &LocaleRegistry, header: &str) -> Option<Locale> {
    let mut candidates: Vec<(f32, &str)> = header
        .split(',')
        .filter_map(|entry| {
            let mut parts = entry.trim().split(';');
            let tag = parts.next()?.trim();
            if tag.is_empty() || tag == "*" {
                return None;
            }

            let quality = parts
                .filter_map(|param| param.trim().strip_prefix("q="))
                .next()
                .and_then(|q| q.parse::<f32>().ok())
                .unwrap_or(1.0);

            let primary = tag.split('-').next().unwrap_or(tag);
            Some((quality, primary))
        })
        .collect();

    // Stable sort keeps header order for equal weights.
    candidates.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

    candidates
        .into_iter()
        .find_map(|(_, primary)| registry.match_locale(primary))
}

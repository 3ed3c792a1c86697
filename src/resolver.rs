//! Locale resolver: the per-request decision between serving a path as-is
//! and redirecting to its canonical locale-prefixed form.
//!
//! Signals are consulted in a fixed priority order:
//! 1. a supported locale segment already present in the path (pass through),
//! 2. the preference cookie written on an explicit locale switch,
//! 3. the Accept-Language header (best effort),
//! 4. the registry default.
//!
//! The redirect target always carries a supported locale segment, so applying
//! the resolver to its own output is always a pass; there is no way to loop.
//! Excluded path classes (assets, API routes, internal paths) are never
//! evaluated at all.

use std::sync::{Arc, OnceLock};

use axum::{
    extract::{Request, State},
    http::header::{ACCEPT_LANGUAGE, COOKIE},
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use regex::Regex;
use tracing::{debug, info, warn};

use crate::i18n::{negotiate, Locale, LocaleRegistry};
use crate::path;
use crate::server::AppState;

/// Path prefixes skipped by the resolver when no configuration overrides them.
pub const DEFAULT_EXCLUDED_PREFIXES: &[&str] = &["/api", "/_assets"];

/// The resolver's verdict for one request. Never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectDecision {
    /// Serve the request as it arrived.
    Pass(String),
    /// Issue a 3xx to the locale-prefixed target, query and fragment intact.
    Redirect(String),
}

impl RedirectDecision {
    /// The path this decision ends up serving.
    pub fn target(&self) -> &str {
        match self {
            RedirectDecision::Pass(p) | RedirectDecision::Redirect(p) => p,
        }
    }
}

fn asset_file_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\.[A-Za-z0-9]+$").expect("asset pattern should compile")
    })
}

/// Check whether a path belongs to an excluded class: asset files (final
/// segment carries an extension) or any configured prefix.
pub fn is_excluded(raw_path: &str, excluded_prefixes: &[String]) -> bool {
    let (path_part, _, _) = path::split_target(raw_path);

    if asset_file_pattern().is_match(path_part) {
        return true;
    }

    excluded_prefixes.iter().any(|prefix| {
        path_part == prefix
            || path_part
                .strip_prefix(prefix.as_str())
                .is_some_and(|rest| rest.starts_with('/'))
    })
}

/// Resolve one incoming request path.
///
/// `preference` is the raw preference-cookie value, if any; values outside
/// the supported set are ignored with a warning, never an error.
pub fn resolve(
    registry: &LocaleRegistry,
    raw: &str,
    preference: Option<&str>,
    accept_language: Option<&str>,
    excluded_prefixes: &[String],
) -> RedirectDecision {
    if is_excluded(raw, excluded_prefixes) {
        debug!(path = raw, "excluded path class, skipping locale resolution");
        return RedirectDecision::Pass(raw.to_string());
    }

    let (locale, logical) = path::decode(registry, raw);
    if locale.is_some() {
        return RedirectDecision::Pass(raw.to_string());
    }

    let resolved = preferred_locale(registry, preference)
        .or_else(|| accept_language.and_then(|header| negotiate(registry, header)))
        .unwrap_or_else(|| registry.default_locale());

    RedirectDecision::Redirect(path::encode(registry, resolved, &logical))
}

fn preferred_locale(registry: &LocaleRegistry, preference: Option<&str>) -> Option<Locale> {
    let value = preference?;
    let locale = registry.match_locale(value);
    if locale.is_none() {
        warn!(value, "ignoring preference cookie outside the supported set");
    }
    locale
}

/// Read a cookie value out of the `Cookie` header.
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(COOKIE)?
        .to_str()
        .ok()?
        .split(';')
        .find_map(|cookie| {
            let (cookie_name, value) = cookie.trim().split_once('=')?;
            (cookie_name == name).then(|| value.to_string())
        })
}

/// Axum middleware wrapping [`resolve`] around every site request.
///
/// Passes the request through untouched or answers with a 307 so method and
/// body survive the hop; nothing downstream runs on the redirected request.
pub async fn locale_redirect(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let raw = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());

    let preference = cookie_value(request.headers(), &state.config.locale_cookie_name);
    let accept_language = request
        .headers()
        .get(ACCEPT_LANGUAGE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    let decision = resolve(
        state.registry,
        &raw,
        preference.as_deref(),
        accept_language.as_deref(),
        &state.config.excluded_prefixes,
    );

    match decision {
        RedirectDecision::Pass(_) => next.run(request).await,
        RedirectDecision::Redirect(target) => {
            info!(from = %raw, to = %target, "redirecting to locale-prefixed path");
            Redirect::temporary(&target).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn registry() -> &'static LocaleRegistry {
        LocaleRegistry::get()
    }

    fn excluded() -> Vec<String> {
        DEFAULT_EXCLUDED_PREFIXES
            .iter()
            .map(|p| p.to_string())
            .collect()
    }

    fn resolve_plain(raw: &str) -> RedirectDecision {
        resolve(registry(), raw, None, None, &excluded())
    }

    // ==================== Decision Rule Tests ====================

    #[test]
    fn test_root_without_signals_redirects_to_default() {
        assert_eq!(
            resolve_plain("/"),
            RedirectDecision::Redirect("/en".to_string())
        );
    }

    #[test]
    fn test_preference_cookie_wins_over_default() {
        let decision = resolve(registry(), "/pricing", Some("es"), None, &excluded());
        assert_eq!(
            decision,
            RedirectDecision::Redirect("/es/pricing".to_string())
        );
    }

    #[test]
    fn test_preference_cookie_wins_over_accept_language() {
        let decision = resolve(registry(), "/pricing", Some("es"), Some("fr"), &excluded());
        assert_eq!(
            decision,
            RedirectDecision::Redirect("/es/pricing".to_string())
        );
    }

    #[test]
    fn test_accept_language_used_without_cookie() {
        let decision = resolve(
            registry(),
            "/pricing",
            None,
            Some("de-AT, en;q=0.5"),
            &excluded(),
        );
        assert_eq!(
            decision,
            RedirectDecision::Redirect("/de/pricing".to_string())
        );
    }

    #[test]
    fn test_supported_locale_segment_passes() {
        assert_eq!(
            resolve_plain("/fr/signup?ref=x"),
            RedirectDecision::Pass("/fr/signup?ref=x".to_string())
        );
    }

    #[test]
    fn test_supported_locale_passes_even_with_other_signals() {
        // An explicit path locale outranks cookie and header.
        let decision = resolve(registry(), "/fr/signup", Some("es"), Some("de"), &excluded());
        assert_eq!(decision, RedirectDecision::Pass("/fr/signup".to_string()));
    }

    #[test]
    fn test_unsupported_locale_shaped_segment_falls_through() {
        let decision = resolve_plain("/xx/app");
        assert_eq!(
            decision,
            RedirectDecision::Redirect("/en/xx/app".to_string())
        );
    }

    #[test]
    fn test_malformed_preference_ignored() {
        let decision = resolve(registry(), "/pricing", Some("zz"), Some("it"), &excluded());
        assert_eq!(
            decision,
            RedirectDecision::Redirect("/it/pricing".to_string())
        );
    }

    #[test]
    fn test_redirect_preserves_query() {
        let decision = resolve(registry(), "/search?q=hats&page=2", Some("es"), None, &excluded());
        assert_eq!(
            decision,
            RedirectDecision::Redirect("/es/search?q=hats&page=2".to_string())
        );
    }

    // ==================== Exclusion Tests ====================

    #[test]
    fn test_api_paths_pass_untouched() {
        assert_eq!(
            resolve(registry(), "/api/locales", Some("es"), None, &excluded()),
            RedirectDecision::Pass("/api/locales".to_string())
        );
    }

    #[test]
    fn test_asset_files_pass_untouched() {
        assert_eq!(
            resolve_plain("/styles/site.css"),
            RedirectDecision::Pass("/styles/site.css".to_string())
        );
        assert_eq!(
            resolve_plain("/favicon.ico"),
            RedirectDecision::Pass("/favicon.ico".to_string())
        );
    }

    #[test]
    fn test_prefix_exclusion_requires_segment_boundary() {
        assert!(is_excluded("/api", &excluded()));
        assert!(is_excluded("/api/v1/users", &excluded()));
        assert!(!is_excluded("/apiary", &excluded()));
    }

    #[test]
    fn test_exclusion_ignores_query() {
        assert!(is_excluded("/api/users?page=2", &excluded()));
    }

    // ==================== Idempotence Tests ====================

    #[test]
    fn test_no_redirect_loop() {
        for raw in ["/", "/pricing", "/xx/app", "/search?q=1"] {
            if let RedirectDecision::Redirect(target) = resolve_plain(raw) {
                assert_eq!(
                    resolve_plain(&target),
                    RedirectDecision::Pass(target.clone()),
                    "redirect target {target} must pass"
                );
            }
        }
    }

    // ==================== Cookie Header Tests ====================

    #[test]
    fn test_cookie_value_found() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, "a=1; locale_pref=es; b=2".parse().unwrap());
        assert_eq!(cookie_value(&headers, "locale_pref"), Some("es".to_string()));
    }

    #[test]
    fn test_cookie_value_absent() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, "a=1; b=2".parse().unwrap());
        assert_eq!(cookie_value(&headers, "locale_pref"), None);
        assert_eq!(cookie_value(&HeaderMap::new(), "locale_pref"), None);
    }

    // ==================== Property Tests ====================

    proptest! {
        #[test]
        fn prop_redirect_targets_always_pass(
            segments in proptest::collection::vec("[a-z0-9]{1,8}", 0..4),
            preference in proptest::option::of(prop_oneof![
                Just("en"), Just("es"), Just("fr"), Just("zz"),
            ]),
        ) {
            let raw = if segments.is_empty() {
                String::from("/")
            } else {
                format!("/{}", segments.join("/"))
            };

            let decision = resolve(registry(), &raw, preference, None, &excluded());
            if let RedirectDecision::Redirect(target) = decision {
                let next = resolve(registry(), &target, preference, None, &excluded());
                prop_assert_eq!(next, RedirectDecision::Pass(target));
            }
        }
    }
}

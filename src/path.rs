//! Path codec: the single place locale prefixes are stripped and applied.
//!
//! Both the request-time resolver and the navigation facade go through this
//! module. A second, ad-hoc prefix stripper is how double-prefixed paths like
//! `/es/es/pricing` happen; never reimplement this logic elsewhere.
//!
//! Terminology: a *raw path* is the literal wire form, possibly carrying a
//! locale as its first segment; a *logical path* is the locale-free route the
//! rest of the application reasons about. Query string and fragment ride
//! along unchanged in both directions.

use crate::i18n::{Locale, LocaleRegistry};

/// Split a raw target into `(path, query, fragment)` without allocating.
///
/// The fragment normally never reaches the server, but the codec is also used
/// client-side by the navigation facade, so it is handled everywhere.
pub fn split_target(raw: &str) -> (&str, Option<&str>, Option<&str>) {
    let (before_fragment, fragment) = match raw.split_once('#') {
        Some((head, frag)) => (head, Some(frag)),
        None => (raw, None),
    };
    let (path, query) = match before_fragment.split_once('?') {
        Some((head, q)) => (head, Some(q)),
        None => (before_fragment, None),
    };
    (path, query, fragment)
}

fn join_target(path: &str, query: Option<&str>, fragment: Option<&str>) -> String {
    let mut target = String::from(path);
    if let Some(q) = query {
        target.push('?');
        target.push_str(q);
    }
    if let Some(f) = fragment {
        target.push('#');
        target.push_str(f);
    }
    target
}

/// Strip a leading locale segment from a raw path.
///
/// If the first segment case-insensitively matches a supported locale, it is
/// removed and returned; otherwise the path comes back unchanged (normalized
/// to a leading `/`). `/{locale}` decodes to the logical root `/`, never to
/// an empty string. Query string and fragment are preserved verbatim on the
/// logical side.
pub fn decode(registry: &LocaleRegistry, raw: &str) -> (Option<Locale>, String) {
    let (path, query, fragment) = split_target(raw);
    let trimmed = path.strip_prefix('/').unwrap_or(path);

    let (first, rest) = match trimmed.split_once('/') {
        Some((first, rest)) => (first, Some(rest)),
        None => (trimmed, None),
    };

    if let Some(locale) = registry.match_locale(first) {
        let logical = match rest {
            Some(rest) if !rest.is_empty() => format!("/{rest}"),
            _ => String::from("/"),
        };
        return (Some(locale), join_target(&logical, query, fragment));
    }

    let logical = if trimmed.is_empty() {
        String::from("/")
    } else {
        format!("/{trimmed}")
    };
    (None, join_target(&logical, query, fragment))
}

/// Prefix a logical path with exactly one locale segment.
///
/// The logical side is re-decoded first, so a caller that (incorrectly) hands
/// in an already-prefixed path still gets a single prefix; repeated encoding
/// under the same locale is idempotent. The logical root encodes to
/// `/{locale}`, not `/{locale}/`.
pub fn encode(registry: &LocaleRegistry, locale: Locale, logical: &str) -> String {
    let (_, logical) = decode(registry, logical);
    let (path, query, fragment) = split_target(&logical);

    let prefixed = if path == "/" || path.is_empty() {
        format!("/{}", locale.code())
    } else {
        format!("/{}{}", locale.code(), path)
    };
    join_target(&prefixed, query, fragment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn registry() -> &'static LocaleRegistry {
        LocaleRegistry::get()
    }

    fn es() -> Locale {
        Locale::from_code("es").unwrap()
    }

    // ==================== decode Tests ====================

    #[test]
    fn test_decode_with_locale_prefix() {
        let (locale, logical) = decode(registry(), "/fr/signup");
        assert_eq!(locale.unwrap().code(), "fr");
        assert_eq!(logical, "/signup");
    }

    #[test]
    fn test_decode_preserves_query_and_fragment() {
        let (locale, logical) = decode(registry(), "/fr/signup?ref=x#top");
        assert_eq!(locale.unwrap().code(), "fr");
        assert_eq!(logical, "/signup?ref=x#top");
    }

    #[test]
    fn test_decode_bare_locale_yields_root() {
        let (locale, logical) = decode(registry(), "/es");
        assert_eq!(locale.unwrap().code(), "es");
        assert_eq!(logical, "/");
    }

    #[test]
    fn test_decode_bare_locale_trailing_slash() {
        let (locale, logical) = decode(registry(), "/es/");
        assert_eq!(locale.unwrap().code(), "es");
        assert_eq!(logical, "/");
    }

    #[test]
    fn test_decode_without_locale() {
        let (locale, logical) = decode(registry(), "/pricing");
        assert!(locale.is_none());
        assert_eq!(logical, "/pricing");
    }

    #[test]
    fn test_decode_unsupported_locale_shaped_segment() {
        let (locale, logical) = decode(registry(), "/xx/app");
        assert!(locale.is_none());
        assert_eq!(logical, "/xx/app");
    }

    #[test]
    fn test_decode_is_case_insensitive_and_canonicalizes() {
        let (locale, logical) = decode(registry(), "/ES/pricing");
        assert_eq!(locale.unwrap().code(), "es");
        assert_eq!(logical, "/pricing");
    }

    #[test]
    fn test_decode_root() {
        let (locale, logical) = decode(registry(), "/");
        assert!(locale.is_none());
        assert_eq!(logical, "/");
    }

    #[test]
    fn test_decode_root_with_query() {
        let (locale, logical) = decode(registry(), "/?utm=1");
        assert!(locale.is_none());
        assert_eq!(logical, "/?utm=1");
    }

    #[test]
    fn test_decode_locale_only_in_first_segment() {
        // "es" deeper in the path is a route segment, not a locale.
        let (locale, logical) = decode(registry(), "/docs/es/guide");
        assert!(locale.is_none());
        assert_eq!(logical, "/docs/es/guide");
    }

    // ==================== encode Tests ====================

    #[test]
    fn test_encode_simple() {
        assert_eq!(encode(registry(), es(), "/pricing"), "/es/pricing");
    }

    #[test]
    fn test_encode_root_has_no_trailing_slash() {
        assert_eq!(encode(registry(), es(), "/"), "/es");
        assert_eq!(encode(registry(), es(), ""), "/es");
    }

    #[test]
    fn test_encode_preserves_query_and_fragment() {
        assert_eq!(
            encode(registry(), es(), "/signup?ref=x#top"),
            "/es/signup?ref=x#top"
        );
    }

    #[test]
    fn test_encode_root_with_query() {
        assert_eq!(encode(registry(), es(), "/?utm=1"), "/es?utm=1");
    }

    #[test]
    fn test_encode_defends_against_double_prefix() {
        assert_eq!(encode(registry(), es(), "/es/pricing"), "/es/pricing");
    }

    #[test]
    fn test_encode_replaces_foreign_prefix() {
        // Re-encoding under a different locale swaps the prefix.
        assert_eq!(encode(registry(), es(), "/fr/pricing"), "/es/pricing");
    }

    #[test]
    fn test_encode_is_idempotent() {
        let once = encode(registry(), es(), "/app/profile");
        let twice = encode(registry(), es(), &once);
        assert_eq!(once, twice);
    }

    // ==================== split_target Tests ====================

    #[test]
    fn test_split_target_all_parts() {
        assert_eq!(
            split_target("/a/b?x=1#frag"),
            ("/a/b", Some("x=1"), Some("frag"))
        );
    }

    #[test]
    fn test_split_target_fragment_only() {
        assert_eq!(split_target("/a#frag"), ("/a", None, Some("frag")));
    }

    #[test]
    fn test_split_target_query_after_fragment_belongs_to_fragment() {
        assert_eq!(split_target("/a#f?x"), ("/a", None, Some("f?x")));
    }

    // ==================== Property Tests ====================

    /// Logical paths made of segments that never collide with locale codes.
    fn logical_path_strategy() -> impl Strategy<Value = String> {
        proptest::collection::vec("[a-z0-9]{3,8}", 0..4)
            .prop_map(|segments| {
                if segments.is_empty() {
                    String::from("/")
                } else {
                    format!("/{}", segments.join("/"))
                }
            })
    }

    fn locale_strategy() -> impl Strategy<Value = Locale> {
        prop_oneof![
            Just("en"),
            Just("es"),
            Just("fr"),
            Just("de"),
            Just("it"),
        ]
        .prop_map(|code| Locale::from_code(code).unwrap())
    }

    proptest! {
        #[test]
        fn prop_decode_encode_round_trip(
            locale in locale_strategy(),
            logical in logical_path_strategy(),
            query in proptest::option::of("[a-z]=[a-z0-9]{1,5}"),
        ) {
            let logical = match query {
                Some(q) => format!("{logical}?{q}"),
                None => logical,
            };
            let raw = encode(registry(), locale, &logical);
            let (decoded_locale, decoded_logical) = decode(registry(), &raw);

            prop_assert_eq!(decoded_locale, Some(locale));
            prop_assert_eq!(decoded_logical, logical);
        }

        #[test]
        fn prop_encode_idempotent(
            locale in locale_strategy(),
            logical in logical_path_strategy(),
        ) {
            let once = encode(registry(), locale, &logical);
            let (_, stripped) = decode(registry(), &once);
            prop_assert_eq!(encode(registry(), locale, &stripped), once.clone());
            prop_assert_eq!(encode(registry(), locale, &once), once);
        }
    }
}

//! Navigation facade: the one sanctioned way UI code moves between routes.
//!
//! Every call site navigates through [`Navigator`] with a *logical* path and
//! an explicit target locale; the facade prefixes the locale through the path
//! codec and hands the finished raw path to the history sink. Building raw
//! paths by hand at call sites is how stray unprefixed (or double-prefixed)
//! links creep in.
//!
//! The facade itself is synchronous; its only side effects are the history
//! operation and, on an explicit locale switch, the preference write that
//! makes the choice survive a full reload.

use chrono::{Duration, Utc};
use tracing::debug;

use crate::i18n::{Locale, LocaleRegistry};
use crate::path;

/// How a navigation lands in history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigateMode {
    /// Append a history entry.
    Push,
    /// Replace the current entry.
    Replace,
}

/// Where finished raw paths are sent. The underlying primitive owns
/// coalescing: a newer navigation supersedes an older in-flight one.
pub trait HistorySink {
    fn push(&mut self, raw_path: &str);
    fn replace(&mut self, raw_path: &str);
}

/// Durable store for the visitor's last explicit locale choice.
pub trait PreferenceStore {
    fn read(&self) -> Option<String>;
    fn write(&mut self, locale: Locale);
}

/// Effective lifetime of the locale preference (two years; close enough to
/// permanent for a preference the visitor can re-set any time).
pub const PREFERENCE_MAX_AGE_SECS: i64 = 2 * 365 * 24 * 60 * 60;

/// Render the `Set-Cookie` value persisting a locale choice, path-scoped to
/// the whole site.
pub fn preference_cookie(name: &str, locale: Locale) -> String {
    let expires = (Utc::now() + Duration::seconds(PREFERENCE_MAX_AGE_SECS))
        .format("%a, %d %b %Y %H:%M:%S GMT");
    format!(
        "{name}={code}; Path=/; Max-Age={max_age}; Expires={expires}; SameSite=Lax",
        code = locale.code(),
        max_age = PREFERENCE_MAX_AGE_SECS,
    )
}

/// The in-application navigation facade.
///
/// Tracks the current raw path, exposes its logical form, and turns
/// `(logical path, target locale)` requests into locale-prefixed raw paths.
pub struct Navigator<H: HistorySink, P: PreferenceStore> {
    registry: &'static LocaleRegistry,
    history: H,
    preferences: P,
    current_raw: String,
}

impl<H: HistorySink, P: PreferenceStore> Navigator<H, P> {
    pub fn new(
        registry: &'static LocaleRegistry,
        current_raw: impl Into<String>,
        history: H,
        preferences: P,
    ) -> Self {
        Self {
            registry,
            history,
            preferences,
            current_raw: current_raw.into(),
        }
    }

    /// The raw path the navigator currently sits on.
    pub fn current_raw_path(&self) -> &str {
        &self.current_raw
    }

    /// The logical (locale-stripped) form of the current location.
    pub fn current_logical_path(&self) -> String {
        path::decode(self.registry, &self.current_raw).1
    }

    /// The locale carried by the current raw path, if any.
    pub fn active_locale(&self) -> Option<Locale> {
        path::decode(self.registry, &self.current_raw).0
    }

    /// Navigate to `logical` under `target_locale`.
    ///
    /// Returns the raw path the navigation resolves to. When the target
    /// equals the current location (same locale, same logical path) this is
    /// a no-op: no history entry, no preference write. A target locale
    /// different from the active one counts as an explicit switch and is
    /// persisted before the history operation.
    pub fn navigate(
        &mut self,
        logical: &str,
        target_locale: Locale,
        mode: NavigateMode,
    ) -> String {
        let target = path::encode(self.registry, target_locale, logical);

        let same_locale = self.active_locale() == Some(target_locale);
        let same_logical =
            path::decode(self.registry, logical).1 == self.current_logical_path();
        if same_locale && same_logical {
            debug!(target = %target, "navigation target equals current location, no-op");
            return target;
        }

        if !same_locale {
            self.preferences.write(target_locale);
        }

        match mode {
            NavigateMode::Push => self.history.push(&target),
            NavigateMode::Replace => self.history.replace(&target),
        }
        self.current_raw = target.clone();
        target
    }
}

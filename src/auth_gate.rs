//! Auth gate: the guard on the protected subtree.
//!
//! An explicit state machine over the observed session state, with one latch:
//! entering `Anonymous` produces exactly one replace-redirect to the
//! locale-prefixed login path, and further `Anonymous` observations are
//! no-ops until the session authenticates again. The gate only observes; it
//! never mutates session state.
//!
//! The login target is built from the locale carried by the active raw path,
//! passed in explicitly by the caller. It is never defaulted, so a visitor on
//! `/es/app` who loses their session lands on `/es/login`, not `/login`.

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::i18n::{Locale, LocaleRegistry};
use crate::navigation::HistorySink;
use crate::path;
use crate::session::{IdentityError, SessionState};

/// Logical path of the login page. Query and fragment of the page the
/// visitor was on are deliberately dropped from the redirect.
pub const LOGIN_LOGICAL_PATH: &str = "/login";

/// What the protected subtree should do right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateAction {
    /// Render a neutral placeholder; no redirect.
    Placeholder,
    /// Replace-redirect to the carried target (the locale-prefixed login
    /// path). Issued at most once per `Anonymous` entry.
    Redirect { target: String },
    /// Render the protected content.
    Render,
}

/// The gate's transition table.
///
/// One instance guards one visitor's protected subtree; it must be
/// re-consulted on every session-state transition.
#[derive(Debug, Default)]
pub struct AuthGate {
    redirect_in_flight: bool,
}

impl AuthGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate one observation of the session state.
    ///
    /// `active_locale` is the locale of the raw path currently being served,
    /// threaded through explicitly by the caller.
    pub fn observe(
        &mut self,
        registry: &LocaleRegistry,
        session: &SessionState,
        active_locale: Locale,
    ) -> GateAction {
        match session {
            SessionState::Loading => GateAction::Placeholder,
            SessionState::Anonymous => {
                if self.redirect_in_flight {
                    debug!("anonymous re-observed while redirect in flight, no-op");
                    return GateAction::Placeholder;
                }
                self.redirect_in_flight = true;
                GateAction::Redirect {
                    target: path::encode(registry, active_locale, LOGIN_LOGICAL_PATH),
                }
            }
            SessionState::Authenticated(_) => {
                self.redirect_in_flight = false;
                GateAction::Render
            }
        }
    }

    /// Evaluate an observation that may have failed at the collaborator.
    ///
    /// A provider failure is indistinguishable from a session that has not
    /// settled yet, so it maps to the placeholder, never to a redirect.
    pub fn observe_result(
        &mut self,
        registry: &LocaleRegistry,
        result: Result<SessionState, IdentityError>,
        active_locale: Locale,
    ) -> GateAction {
        match result {
            Ok(session) => self.observe(registry, &session, active_locale),
            Err(error) => {
                warn!(%error, "identity provider failed, holding placeholder");
                GateAction::Placeholder
            }
        }
    }

    /// Drive the gate from a session-state subscription.
    ///
    /// Evaluates the current state immediately, then once per transition,
    /// applying redirects to `history` as replacements. Returns the sink when
    /// the identity collaborator closes the channel.
    pub async fn drive<H: HistorySink>(
        mut self,
        registry: &LocaleRegistry,
        mut sessions: watch::Receiver<SessionState>,
        active_locale: Locale,
        mut history: H,
    ) -> H {
        loop {
            let session = sessions.borrow_and_update().clone();
            if let GateAction::Redirect { target } =
                self.observe(registry, &session, active_locale)
            {
                history.replace(&target);
            }

            if sessions.changed().await.is_err() {
                return history;
            }
        }
    }
}

//! Narrow interfaces to the identity and profile collaborators.
//!
//! This crate never creates or destroys sessions and never interprets
//! profile documents; it only observes session state (for the auth gate) and
//! forwards profile reads/writes. Both collaborators live behind traits so
//! the real providers can be swapped for in-memory fakes in tests and demos.

use std::collections::HashMap;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::watch;

/// The authenticated principal, as reported by the identity collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub display_name: Option<String>,
}

/// Authentication status observed by the auth gate.
///
/// Owned by the identity collaborator; this crate reads it and nothing else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Not yet determined (initial load, token refresh in flight).
    Loading,
    /// No session.
    Anonymous,
    /// Valid session for the carried identity.
    Authenticated(Identity),
}

/// Failures of the identity collaborator itself.
///
/// These are transient infrastructure failures, not authentication outcomes;
/// the gate maps them to indefinite `Loading` rather than `Anonymous`.
#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("identity provider unavailable: {0}")]
    Unavailable(String),

    #[error("identity provider timed out")]
    Timeout,
}

/// Read-only view of the identity collaborator.
pub trait IdentityProvider: Send + Sync {
    /// The current session state, or an error when the provider itself
    /// cannot answer.
    fn current_session(&self) -> Result<SessionState, IdentityError>;

    /// Subscribe to session-state transitions.
    fn subscribe(&self) -> watch::Receiver<SessionState>;

    /// Ask the collaborator to end the session. Observers see the resulting
    /// `Anonymous` through their subscriptions.
    fn sign_out(&self);
}

/// Watch-channel backed identity provider for demos and tests.
///
/// Real deployments adapt their identity SDK to [`IdentityProvider`]; this
/// implementation just lets test code drive the state machine by hand.
pub struct WatchIdentity {
    sender: watch::Sender<SessionState>,
}

impl WatchIdentity {
    pub fn new(initial: SessionState) -> Self {
        let (sender, _) = watch::channel(initial);
        Self { sender }
    }

    /// Transition to a new session state, waking all subscribers.
    pub fn set(&self, state: SessionState) {
        // send_replace never fails; the sender keeps the channel alive.
        self.sender.send_replace(state);
    }
}

impl IdentityProvider for WatchIdentity {
    fn current_session(&self) -> Result<SessionState, IdentityError> {
        Ok(self.sender.borrow().clone())
    }

    fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.sender.subscribe()
    }

    fn sign_out(&self) {
        self.set(SessionState::Anonymous);
    }
}

/// A user record as stored by the record-store collaborator. Opaque to this
/// crate beyond the fields the shell pages display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub display_name: Option<String>,
    pub preferred_locale: Option<String>,
}

/// Narrow interface to the record-store collaborator.
pub trait ProfileStore: Send + Sync {
    fn get_profile(&self, id: &str) -> Option<Profile>;
    fn put_profile(&self, id: &str, profile: Profile);
}

/// In-memory profile store for demos and tests.
#[derive(Default)]
pub struct MemoryProfileStore {
    profiles: RwLock<HashMap<String, Profile>>,
}

impl ProfileStore for MemoryProfileStore {
    fn get_profile(&self, id: &str) -> Option<Profile> {
        self.profiles
            .read()
            .expect("profile store lock should not be poisoned")
            .get(id)
            .cloned()
    }

    fn put_profile(&self, id: &str, profile: Profile) {
        self.profiles
            .write()
            .expect("profile store lock should not be poisoned")
            .insert(id.to_string(), profile);
    }
}

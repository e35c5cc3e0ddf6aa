//! Session store for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Written once by the login controller after a successful sign-in; read by
//! route guards and identity-aware pages. The root component creates the one
//! store for the app and mirrors it into a reactive signal via [`SessionStore::subscribe`].
//!
//! INVARIANTS
//! ==========
//! - Starts `Unauthenticated`.
//! - Only `Unauthenticated -> Authenticated` is allowed; a second write is refused.
//! - Readers see the whole previous state or the whole new state.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::{Arc, Mutex, PoisonError, RwLock};

use crate::net::types::Identity;

/// Whether the client currently holds an identity.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Unauthenticated,
    Authenticated(Identity),
}

impl SessionState {
    #[must_use]
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Self::Unauthenticated => None,
            Self::Authenticated(identity) => Some(identity),
        }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("already signed in as {0}")]
    AlreadyAuthenticated(String),
}

type Subscriber = Arc<dyn Fn(&SessionState) + Send + Sync>;

/// Shared handle to the session state. Clones point at the same store.
#[derive(Clone, Default)]
pub struct SessionStore {
    state: Arc<RwLock<SessionState>>,
    subscribers: Arc<Mutex<Vec<Subscriber>>>,
}

impl SessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn identity(&self) -> Option<Identity> {
        self.state().identity().cloned()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_authenticated()
    }

    /// Record the signed-in identity and notify subscribers.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::AlreadyAuthenticated`] if an identity is
    /// already held; the existing identity is kept.
    pub fn set_identity(&self, identity: Identity) -> Result<(), SessionError> {
        let next = {
            let mut state = self
                .state
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            if let SessionState::Authenticated(current) = &*state {
                return Err(SessionError::AlreadyAuthenticated(current.identifier.clone()));
            }
            *state = SessionState::Authenticated(identity);
            state.clone()
        };
        self.notify(&next);
        Ok(())
    }

    /// Register a callback run after every state change, in registration order.
    pub fn subscribe<F>(&self, subscriber: F)
    where
        F: Fn(&SessionState) + Send + Sync + 'static,
    {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Arc::new(subscriber));
    }

    /// Callbacks run on a snapshot so they may subscribe or read the store.
    fn notify(&self, state: &SessionState) {
        let subscribers: Vec<Subscriber> = self
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        for subscriber in &subscribers {
            subscriber(state);
        }
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

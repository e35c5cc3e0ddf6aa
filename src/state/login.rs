//! Login form controller.
//!
//! DESIGN
//! ======
//! The controller owns the form's phase machine and is the error boundary for
//! sign-in. It validates, calls the [`Authenticator`], writes the session, and
//! navigates, in that order:
//!
//! ```text
//! Idle -> Validating -> Idle (field errors, no remote call)
//!                    -> Submitting -> Succeeded (session written, then navigate)
//!                                  -> Failed(reason) -> Idle on next edit
//! ```
//!
//! The page mirrors [`FormState`] into signals through [`LoginController::subscribe`].
//! Everything runs on the browser's single thread, so state lives in `RefCell`s
//! and is never borrowed across the authenticator await.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use std::cell::RefCell;
use std::panic::AssertUnwindSafe;
use std::rc::Rc;

use futures::FutureExt;

use crate::net::authenticator::{AuthError, Authenticator};
use crate::net::types::{Credentials, Identity};
use crate::state::session::SessionStore;
use crate::util::route_guard::{DASHBOARD_PATH, Navigator};
use crate::util::validation::{ValidationErrors, validate};

pub const FALLBACK_FAILURE_MESSAGE: &str = "An error occurred during login";
pub const EMPTY_RESULT_MESSAGE: &str = "Failed to sign in";

/// Where the form is in its submit cycle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum FormPhase {
    #[default]
    Idle,
    Validating,
    Submitting,
    Succeeded,
    Failed(String),
}

/// Result of one settled sign-in call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Success(Identity),
    Failure(String),
}

/// What a call to [`LoginController::submit`] did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitAttempt {
    /// Validation failed; the authenticator was not called.
    Invalid(ValidationErrors),
    /// Another attempt was already in flight.
    Ignored,
    Settled(SubmissionOutcome),
}

/// Render model for the login form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormState {
    pub phase: FormPhase,
    pub field_errors: ValidationErrors,
    pub attempts: u32,
}

impl FormState {
    /// True exactly while the authenticator call is outstanding.
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.phase == FormPhase::Submitting
    }

    /// Message for the aggregate error region.
    #[must_use]
    pub fn submit_error(&self) -> Option<&str> {
        match &self.phase {
            FormPhase::Failed(reason) => Some(reason),
            _ => None,
        }
    }

    #[must_use]
    pub fn submit_label(&self) -> &'static str {
        if self.is_submitting() { "Signing in..." } else { "Sign in" }
    }
}

/// Text shown for an authenticator error.
#[must_use]
pub fn failure_reason(err: &AuthError) -> String {
    let message = err.to_string();
    if message.trim().is_empty() {
        FALLBACK_FAILURE_MESSAGE.to_owned()
    } else {
        message
    }
}

type Listener = Rc<dyn Fn(&FormState)>;

struct Inner {
    authenticator: Rc<dyn Authenticator>,
    navigator: Rc<dyn Navigator>,
    session: SessionStore,
    form: RefCell<FormState>,
    listeners: RefCell<Vec<Listener>>,
}

/// Drives one login form. Clones share the same form state.
#[derive(Clone)]
pub struct LoginController {
    inner: Rc<Inner>,
}

impl LoginController {
    pub fn new(authenticator: Rc<dyn Authenticator>, navigator: Rc<dyn Navigator>, session: SessionStore) -> Self {
        Self {
            inner: Rc::new(Inner {
                authenticator,
                navigator,
                session,
                form: RefCell::new(FormState::default()),
                listeners: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Snapshot of the form state.
    #[must_use]
    pub fn form(&self) -> FormState {
        self.inner.form.borrow().clone()
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.inner.form.borrow().is_submitting()
    }

    /// Register a callback run after every form-state change.
    pub fn subscribe<F>(&self, listener: F)
    where
        F: Fn(&FormState) + 'static,
    {
        self.inner.listeners.borrow_mut().push(Rc::new(listener));
    }

    /// Note that the user changed an input.
    ///
    /// Re-arms a failed form to `Idle`. Once a submit has been attempted,
    /// inline errors are recomputed so they follow the input.
    pub fn edit(&self, draft: &Credentials) {
        let form = self.form();
        let rearm = matches!(form.phase, FormPhase::Failed(_));
        let revalidate = form.attempts > 0 && !form.is_submitting();
        if !rearm && !revalidate {
            return;
        }
        self.transition(|form| {
            if rearm {
                form.phase = FormPhase::Idle;
            }
            if revalidate {
                form.field_errors = validate(draft);
            }
        });
    }

    /// Run one sign-in attempt.
    ///
    /// The credentials are consumed and dropped when the attempt settles.
    pub async fn submit(&self, credentials: Credentials) -> SubmitAttempt {
        if self.is_submitting() {
            log::debug!("login submit ignored: attempt already in flight");
            return SubmitAttempt::Ignored;
        }

        self.transition(|form| {
            form.phase = FormPhase::Validating;
            form.attempts += 1;
        });
        let errors = validate(&credentials);
        if !errors.is_empty() {
            self.transition(|form| {
                form.phase = FormPhase::Idle;
                form.field_errors = errors.clone();
            });
            return SubmitAttempt::Invalid(errors);
        }

        self.transition(|form| {
            form.phase = FormPhase::Submitting;
            form.field_errors = ValidationErrors::default();
        });
        let mut in_flight = InFlight { controller: self, settled: false };
        let outcome = self.call_authenticator(credentials).await;
        in_flight.settled = true;

        let outcome = match outcome {
            SubmissionOutcome::Success(identity) => self.commit(identity),
            failure @ SubmissionOutcome::Failure(_) => failure,
        };
        match &outcome {
            SubmissionOutcome::Success(_) => {}
            SubmissionOutcome::Failure(reason) => {
                log::warn!("sign-in failed: {reason}");
                self.transition(|form| form.phase = FormPhase::Failed(reason.clone()));
            }
        }
        SubmitAttempt::Settled(outcome)
    }

    async fn call_authenticator(&self, credentials: Credentials) -> SubmissionOutcome {
        let authenticator = self.inner.authenticator.clone();
        let call = authenticator.authenticate(&credentials.identifier, &credentials.secret);
        match AssertUnwindSafe(call).catch_unwind().await {
            Ok(Ok(Some(identity))) if !identity.is_empty() => SubmissionOutcome::Success(identity),
            Ok(Ok(_)) => SubmissionOutcome::Failure(EMPTY_RESULT_MESSAGE.to_owned()),
            Ok(Err(err)) => SubmissionOutcome::Failure(failure_reason(&err)),
            Err(_) => {
                log::error!("authenticator panicked during sign-in");
                SubmissionOutcome::Failure(FALLBACK_FAILURE_MESSAGE.to_owned())
            }
        }
    }

    /// Write the session, then navigate. A refused write becomes a failure.
    fn commit(&self, identity: Identity) -> SubmissionOutcome {
        if let Err(err) = self.inner.session.set_identity(identity.clone()) {
            return SubmissionOutcome::Failure(err.to_string());
        }
        log::info!("signed in as {}", identity.identifier);
        self.transition(|form| form.phase = FormPhase::Succeeded);
        self.inner.navigator.navigate_to(DASHBOARD_PATH);
        SubmissionOutcome::Success(identity)
    }

    fn transition(&self, apply: impl FnOnce(&mut FormState)) {
        let snapshot = {
            let mut form = self.inner.form.borrow_mut();
            apply(&mut form);
            form.clone()
        };
        let listeners: Vec<Listener> = self.inner.listeners.borrow().clone();
        for listener in &listeners {
            listener(&snapshot);
        }
    }
}

/// Clears the submitting phase if the submit future is dropped mid-call.
struct InFlight<'a> {
    controller: &'a LoginController,
    settled: bool,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.settled && self.controller.is_submitting() {
            self.controller
                .transition(|form| form.phase = FormPhase::Idle);
        }
    }
}

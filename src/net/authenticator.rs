//! Remote authenticator seam.
//!
//! SYSTEM CONTEXT
//! ==============
//! The login controller only knows this trait. The browser build plugs in
//! [`crate::net::cognito::CognitoAuthenticator`]; tests plug in scripted mocks.
//!
//! ERROR HANDLING
//! ==============
//! Every failure is an [`AuthError`] whose `Display` text is what the user sees
//! in the aggregate error region.

use super::types::Identity;

/// Errors produced by a remote sign-in call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// The provider refused the credentials. The message may be empty.
    #[error("{message}")]
    Rejected { message: String },

    /// No user-pool client id was configured for this build.
    #[error("Sign-in is not configured")]
    NotConfigured,

    /// The request never produced a response.
    #[error("Network error: {0}")]
    Transport(String),

    /// The provider did not answer within the configured timeout.
    #[error("Sign-in timed out, please try again")]
    TimedOut,

    /// The provider asked for a follow-up step this client does not support.
    #[error("Additional sign-in step required: {0}")]
    ChallengeRequired(String),

    /// The provider answered with something unreadable.
    #[error("Unexpected response from identity provider: {0}")]
    Malformed(String),
}

impl AuthError {
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected { message: message.into() }
    }
}

/// Verifies an identifier/secret pair with the identity provider.
///
/// `Ok(None)` is an empty result: the call completed but produced no
/// principal. Callers must treat it as a failure.
#[async_trait::async_trait(?Send)]
pub trait Authenticator {
    /// # Errors
    ///
    /// Returns an [`AuthError`] when the provider rejects the credentials or
    /// cannot be reached.
    async fn authenticate(&self, identifier: &str, secret: &str) -> Result<Option<Identity>, AuthError>;
}

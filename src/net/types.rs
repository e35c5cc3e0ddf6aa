//! Shared sign-in types exchanged between the form, the authenticator, and the
//! session store.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::fmt;

/// One sign-in attempt's identifier/secret pair.
///
/// Moved into the login controller on submit and dropped once the attempt
/// settles. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Credentials {
    pub identifier: String,
    pub secret: String,
}

impl Credentials {
    pub fn new(identifier: impl Into<String>, secret: impl Into<String>) -> Self {
        Self { identifier: identifier.into(), secret: secret.into() }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("identifier", &self.identifier)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// The authenticated principal held by the client after sign-in.
#[derive(Clone, Debug, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct Identity {
    pub identifier: String,
    /// Provider subject (`sub` claim). Empty when the provider did not supply one.
    #[serde(default)]
    pub subject_id: String,
}

impl Identity {
    pub fn new(identifier: impl Into<String>, subject_id: impl Into<String>) -> Self {
        Self { identifier: identifier.into(), subject_id: subject_id.into() }
    }

    /// An identity without an identifier carries no principal.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.identifier.trim().is_empty()
    }
}

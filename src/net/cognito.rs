//! Cognito user-pool authenticator.
//!
//! Client-side (csr): a single `InitiateAuth` call with the
//! `USER_PASSWORD_AUTH` flow via `gloo-net`, raced against a timer.
//! Elsewhere the HTTP leg is a stub returning a transport error; request and
//! response shaping are plain functions so they are testable off-browser.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "cognito_test.rs"]
mod cognito_test;

use base64::prelude::*;
use serde::Deserialize;

use super::authenticator::{AuthError, Authenticator};
use super::types::Identity;
use crate::config::AuthConfig;

pub const INITIATE_AUTH_TARGET: &str = "AWSCognitoIdentityProviderService.InitiateAuth";
pub const AMZ_JSON_CONTENT_TYPE: &str = "application/x-amz-json-1.1";
const AUTH_FLOW: &str = "USER_PASSWORD_AUTH";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct InitiateAuthResponse {
    authentication_result: Option<AuthenticationResult>,
    challenge_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AuthenticationResult {
    id_token: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorResponse {
    #[serde(rename = "__type")]
    kind: Option<String>,
    #[serde(alias = "Message")]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct IdTokenClaims {
    sub: Option<String>,
}

/// JSON body for an `InitiateAuth` request.
pub fn initiate_auth_body(client_id: &str, identifier: &str, secret: &str) -> serde_json::Value {
    serde_json::json!({
        "AuthFlow": AUTH_FLOW,
        "ClientId": client_id,
        "AuthParameters": {
            "USERNAME": identifier,
            "PASSWORD": secret,
        },
    })
}

/// Interpret an `InitiateAuth` response.
///
/// `Ok(None)` means the provider answered successfully without completing the
/// sign-in and without naming a challenge.
///
/// # Errors
///
/// Returns [`AuthError::Rejected`] for non-2xx statuses (message taken from the
/// error body, possibly empty), [`AuthError::ChallengeRequired`] when a further
/// step is requested, and [`AuthError::Malformed`] for unreadable 2xx bodies.
pub fn parse_initiate_auth_response(status: u16, body: &str, identifier: &str) -> Result<Option<Identity>, AuthError> {
    if !(200..300).contains(&status) {
        let error: ErrorResponse = serde_json::from_str(body).unwrap_or_default();
        let kind = error
            .kind
            .as_deref()
            .map(|k| k.rsplit('#').next().unwrap_or(k))
            .unwrap_or("unknown");
        log::warn!("cognito rejected sign-in: status={status} type={kind}");
        return Err(AuthError::rejected(error.message.unwrap_or_default().trim()));
    }

    let response: InitiateAuthResponse =
        serde_json::from_str(body).map_err(|e| AuthError::Malformed(e.to_string()))?;
    if let Some(challenge) = response.challenge_name {
        return Err(AuthError::ChallengeRequired(challenge));
    }
    let Some(result) = response.authentication_result else {
        return Ok(None);
    };

    let subject_id = result
        .id_token
        .as_deref()
        .and_then(subject_from_id_token)
        .unwrap_or_default();
    Ok(Some(Identity::new(identifier, subject_id)))
}

/// Read the `sub` claim out of a JWT without verifying it.
///
/// The token came straight from the provider over TLS and is only used to
/// label the session.
pub fn subject_from_id_token(token: &str) -> Option<String> {
    let payload = token.split('.').nth(1)?;
    let bytes = BASE64_URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .ok()?;
    let claims: IdTokenClaims = serde_json::from_slice(&bytes).ok()?;
    claims.sub.filter(|s| !s.is_empty())
}

/// [`Authenticator`] backed by a Cognito user-pool app client.
#[derive(Debug, Clone)]
pub struct CognitoAuthenticator {
    config: AuthConfig,
}

impl CognitoAuthenticator {
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    #[cfg(feature = "csr")]
    async fn send(&self, body: String) -> Result<(u16, String), AuthError> {
        use futures::future::{Either, select};

        let timeout_ms = u32::try_from(self.config.request_timeout.as_millis()).unwrap_or(u32::MAX);
        let request = post_initiate_auth(self.config.endpoint_url(), body);
        let timeout = gloo_timers::future::TimeoutFuture::new(timeout_ms);
        futures::pin_mut!(request, timeout);

        match select(request, timeout).await {
            Either::Left((result, _)) => result,
            Either::Right(((), _)) => Err(AuthError::TimedOut),
        }
    }

    #[cfg(not(feature = "csr"))]
    async fn send(&self, body: String) -> Result<(u16, String), AuthError> {
        let _ = body;
        Err(AuthError::Transport("not available outside the browser".to_owned()))
    }
}

#[cfg(feature = "csr")]
async fn post_initiate_auth(url: String, body: String) -> Result<(u16, String), AuthError> {
    let resp = gloo_net::http::Request::post(&url)
        .header("X-Amz-Target", INITIATE_AUTH_TARGET)
        .header("Content-Type", AMZ_JSON_CONTENT_TYPE)
        .body(body)
        .map_err(|e| AuthError::Transport(e.to_string()))?
        .send()
        .await
        .map_err(|e| AuthError::Transport(e.to_string()))?;
    let status = resp.status();
    let text = resp
        .text()
        .await
        .map_err(|e| AuthError::Transport(e.to_string()))?;
    Ok((status, text))
}

#[async_trait::async_trait(?Send)]
impl Authenticator for CognitoAuthenticator {
    async fn authenticate(&self, identifier: &str, secret: &str) -> Result<Option<Identity>, AuthError> {
        if !self.config.is_configured() {
            return Err(AuthError::NotConfigured);
        }
        let body = initiate_auth_body(&self.config.client_id, identifier, secret).to_string();
        let (status, text) = self.send(body).await?;
        parse_initiate_auth_response(status, &text, identifier)
    }
}

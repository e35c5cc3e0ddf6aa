//! Identity-provider configuration baked in at build time.
//!
//! The WASM bundle has no process environment, so values come from
//! `option_env!` when the crate is compiled. [`AuthConfig::from_lookup`] holds
//! the parsing so tests can feed it a map instead.

use std::time::Duration;

pub const DEFAULT_COGNITO_REGION: &str = "us-east-1";
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 15_000;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid AUTH_COGNITO_REGION: {0:?}")]
    InvalidRegion(String),
    #[error("AUTH_REQUEST_TIMEOUT_MS must be greater than zero")]
    ZeroTimeout,
}

/// Settings for the Cognito user-pool client used on the login page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthConfig {
    pub region: String,
    /// App client id of the user pool. Empty means sign-in is not configured.
    pub client_id: String,
    /// Full endpoint override, e.g. a local Cognito emulator.
    pub endpoint: Option<String>,
    pub request_timeout: Duration,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            region: DEFAULT_COGNITO_REGION.to_owned(),
            client_id: String::new(),
            endpoint: None,
            request_timeout: Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS),
        }
    }
}

impl AuthConfig {
    /// Build config from variables captured at compile time.
    ///
    /// - `AUTH_COGNITO_REGION`: default `us-east-1`
    /// - `AUTH_COGNITO_CLIENT_ID`: user-pool app client id
    /// - `AUTH_COGNITO_ENDPOINT`: optional endpoint override
    /// - `AUTH_REQUEST_TIMEOUT_MS`: default 15000
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the region or timeout is malformed.
    pub fn from_build_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| {
            let value = match key {
                "AUTH_COGNITO_REGION" => option_env!("AUTH_COGNITO_REGION"),
                "AUTH_COGNITO_CLIENT_ID" => option_env!("AUTH_COGNITO_CLIENT_ID"),
                "AUTH_COGNITO_ENDPOINT" => option_env!("AUTH_COGNITO_ENDPOINT"),
                "AUTH_REQUEST_TIMEOUT_MS" => option_env!("AUTH_REQUEST_TIMEOUT_MS"),
                _ => None,
            };
            value.map(str::to_owned)
        })
    }

    /// Build config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the region or timeout is malformed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let region = parse_region(lookup("AUTH_COGNITO_REGION").as_deref())?;
        let client_id = lookup("AUTH_COGNITO_CLIENT_ID")
            .map(|v| v.trim().to_owned())
            .unwrap_or_default();
        let endpoint = lookup("AUTH_COGNITO_ENDPOINT")
            .map(|v| v.trim().trim_end_matches('/').to_owned())
            .filter(|v| !v.is_empty());
        let timeout_ms = parse_u64_or(lookup("AUTH_REQUEST_TIMEOUT_MS").as_deref(), DEFAULT_REQUEST_TIMEOUT_MS);
        if timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        Ok(Self { region, client_id, endpoint, request_timeout: Duration::from_millis(timeout_ms) })
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.client_id.is_empty()
    }

    /// URL the `InitiateAuth` request is posted to.
    #[must_use]
    pub fn endpoint_url(&self) -> String {
        match &self.endpoint {
            Some(endpoint) => format!("{endpoint}/"),
            None => format!("https://cognito-idp.{}.amazonaws.com/", self.region),
        }
    }
}

fn parse_region(raw: Option<&str>) -> Result<String, ConfigError> {
    let region = raw.map_or(DEFAULT_COGNITO_REGION, str::trim);
    if region.is_empty()
        || !region
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(ConfigError::InvalidRegion(region.to_owned()));
    }
    Ok(region.to_owned())
}

fn parse_u64_or(raw: Option<&str>, default: u64) -> u64 {
    raw.and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

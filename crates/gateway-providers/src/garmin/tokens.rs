// ABOUTME: OAuth1 and OAuth2 token types for Garmin Connect sessions
// ABOUTME: Encodes both tokens as one opaque base64 JSON blob handed to callers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use base64::{engine::general_purpose, Engine as _};
use gateway_core::{ProviderError, ProviderResult};
use serde::{Deserialize, Serialize};

/// Long-lived token obtained from the SSO ticket
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuth1Token {
    /// Token
    pub oauth_token: String,
    /// Token secret
    pub oauth_token_secret: String,
    /// Present when the login passed an MFA challenge
    #[serde(default)]
    pub mfa_token: Option<String>,
    /// When the MFA token stops being accepted
    #[serde(default)]
    pub mfa_expiration_timestamp: Option<String>,
    /// Regional domain the token belongs to
    #[serde(default)]
    pub domain: Option<String>,
}

impl std::fmt::Debug for OAuth1Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuth1Token")
            .field("domain", &self.domain)
            .field("has_mfa_token", &self.mfa_token.is_some())
            .finish_non_exhaustive()
    }
}

impl OAuth1Token {
    /// Parse the URL-encoded body returned by the pre-authorization call
    ///
    /// # Errors
    ///
    /// Returns a parse error when `oauth_token` or `oauth_token_secret` is missing
    pub fn from_form_body(provider: &str, body: &str, domain: &str) -> ProviderResult<Self> {
        let mut token = None;
        let mut secret = None;
        let mut mfa_token = None;
        let mut mfa_expiration = None;

        for pair in body.trim().split('&').filter(|pair| !pair.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let value = urlencoding::decode(&value.replace('+', " "))
                .map(std::borrow::Cow::into_owned)
                .map_err(|e| ProviderError::Parse {
                    provider: provider.to_owned(),
                    reason: format!("Invalid encoding for {key}: {e}"),
                })?;
            match key {
                "oauth_token" => token = Some(value),
                "oauth_token_secret" => secret = Some(value),
                "mfa_token" => mfa_token = Some(value),
                "mfa_expiration_timestamp" => mfa_expiration = Some(value),
                _ => {}
            }
        }

        let missing = |field: &str| ProviderError::Parse {
            provider: provider.to_owned(),
            reason: format!("Pre-authorization response lacks {field}"),
        };
        Ok(Self {
            oauth_token: token.ok_or_else(|| missing("oauth_token"))?,
            oauth_token_secret: secret.ok_or_else(|| missing("oauth_token_secret"))?,
            mfa_token,
            mfa_expiration_timestamp: mfa_expiration,
            domain: Some(domain.to_owned()),
        })
    }
}

/// Short-lived bearer token for the data endpoints
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuth2Token {
    /// Granted scopes
    #[serde(default)]
    pub scope: Option<String>,
    /// Token id
    #[serde(default)]
    pub jti: Option<String>,
    /// Usually `Bearer`
    pub token_type: String,
    /// Bearer token
    pub access_token: String,
    /// Refresh token
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Lifetime in seconds at issue time
    pub expires_in: i64,
    /// Unix timestamp after which the token is expired
    pub expires_at: i64,
    /// Refresh token lifetime in seconds
    #[serde(default)]
    pub refresh_token_expires_in: Option<i64>,
    /// Unix timestamp after which the refresh token is expired
    #[serde(default)]
    pub refresh_token_expires_at: Option<i64>,
}

impl std::fmt::Debug for OAuth2Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuth2Token")
            .field("token_type", &self.token_type)
            .field("expires_at", &self.expires_at)
            .finish_non_exhaustive()
    }
}

/// Raw body of the `OAuth2` exchange endpoint
#[derive(Debug, Deserialize)]
pub struct ExchangeResponse {
    #[serde(default)]
    scope: Option<String>,
    #[serde(default)]
    jti: Option<String>,
    #[serde(default = "default_token_type")]
    token_type: String,
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    expires_in: i64,
    #[serde(default)]
    refresh_token_expires_in: Option<i64>,
}

fn default_token_type() -> String {
    "Bearer".to_owned()
}

impl OAuth2Token {
    /// Stamp absolute expiry times onto an exchange response issued at `now`
    #[must_use]
    pub fn from_exchange(response: ExchangeResponse, now: i64) -> Self {
        Self {
            scope: response.scope,
            jti: response.jti,
            token_type: response.token_type,
            access_token: response.access_token,
            refresh_token: response.refresh_token,
            expires_in: response.expires_in,
            expires_at: now + response.expires_in,
            refresh_token_expires_at: response.refresh_token_expires_in.map(|secs| now + secs),
            refresh_token_expires_in: response.refresh_token_expires_in,
        }
    }

    /// Whether the bearer token is no longer valid at `now`
    #[must_use]
    pub const fn is_expired(&self, now: i64) -> bool {
        self.expires_at < now
    }
}

/// Encode both tokens as `base64(json([oauth1, oauth2]))`
///
/// # Errors
///
/// Returns a parse error if the tokens cannot be serialized
pub fn encode_session(oauth1: &OAuth1Token, oauth2: &OAuth2Token) -> ProviderResult<String> {
    let json = serde_json::to_vec(&(oauth1, oauth2))
        .map_err(|e| ProviderError::InvalidTokens(format!("Failed to encode session: {e}")))?;
    Ok(general_purpose::STANDARD.encode(json))
}

/// Decode a session blob produced by [`encode_session`]
///
/// # Errors
///
/// Returns `InvalidTokens` when the blob is not base64 or not a token pair
pub fn decode_session(blob: &str) -> ProviderResult<(OAuth1Token, OAuth2Token)> {
    let bytes = general_purpose::STANDARD
        .decode(blob.trim())
        .map_err(|e| ProviderError::InvalidTokens(format!("Session blob is not base64: {e}")))?;
    serde_json::from_slice(&bytes)
        .map_err(|e| ProviderError::InvalidTokens(format!("Session blob is malformed: {e}")))
}

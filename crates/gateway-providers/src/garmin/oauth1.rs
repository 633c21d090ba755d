// ABOUTME: OAuth 1.0a request signing with HMAC-SHA1 per RFC 5849
// ABOUTME: Builds the signature base string and the Authorization header value
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use base64::{engine::general_purpose, Engine as _};
use rand::distributions::Alphanumeric;
use rand::Rng;
use ring::hmac;

/// Length of generated nonces
const NONCE_LENGTH: usize = 32;

/// Credentials used to sign one request
#[derive(Debug, Clone, Copy)]
pub struct OAuth1Signer<'a> {
    consumer_key: &'a str,
    consumer_secret: &'a str,
    token: Option<(&'a str, &'a str)>,
}

impl<'a> OAuth1Signer<'a> {
    /// Sign with consumer credentials only (two-legged)
    #[must_use]
    pub const fn new(consumer_key: &'a str, consumer_secret: &'a str) -> Self {
        Self {
            consumer_key,
            consumer_secret,
            token: None,
        }
    }

    /// Also sign with an access token and its secret
    #[must_use]
    pub const fn with_token(mut self, token: &'a str, token_secret: &'a str) -> Self {
        self.token = Some((token, token_secret));
        self
    }

    /// Authorization header with a fresh nonce and the current timestamp
    ///
    /// `params` are the query and form-body parameters sent with the request;
    /// they are signed but not repeated in the header.
    #[must_use]
    pub fn authorization_header(
        &self,
        method: &str,
        base_url: &str,
        params: &[(String, String)],
    ) -> String {
        let nonce: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(NONCE_LENGTH)
            .map(char::from)
            .collect();
        let timestamp = chrono::Utc::now().timestamp().to_string();
        self.authorization_header_with(method, base_url, params, &nonce, &timestamp)
    }

    /// Authorization header with an explicit nonce and timestamp
    #[must_use]
    pub fn authorization_header_with(
        &self,
        method: &str,
        base_url: &str,
        params: &[(String, String)],
        nonce: &str,
        timestamp: &str,
    ) -> String {
        let mut oauth_params = self.protocol_params(nonce, timestamp);
        let signature = self.signature(method, base_url, params, &oauth_params);
        oauth_params.push(("oauth_signature".to_owned(), signature));

        let fields: Vec<String> = oauth_params
            .iter()
            .map(|(key, value)| format!("{}=\"{}\"", encode(key), encode(value)))
            .collect();
        format!("OAuth {}", fields.join(", "))
    }

    fn protocol_params(&self, nonce: &str, timestamp: &str) -> Vec<(String, String)> {
        let mut params = vec![
            ("oauth_consumer_key".to_owned(), self.consumer_key.to_owned()),
            ("oauth_nonce".to_owned(), nonce.to_owned()),
            ("oauth_signature_method".to_owned(), "HMAC-SHA1".to_owned()),
            ("oauth_timestamp".to_owned(), timestamp.to_owned()),
        ];
        if let Some((token, _)) = self.token {
            params.push(("oauth_token".to_owned(), token.to_owned()));
        }
        params.push(("oauth_version".to_owned(), "1.0".to_owned()));
        params
    }

    fn signature(
        &self,
        method: &str,
        base_url: &str,
        params: &[(String, String)],
        oauth_params: &[(String, String)],
    ) -> String {
        let all: Vec<(String, String)> = params.iter().chain(oauth_params).cloned().collect();
        let base = signature_base_string(method, base_url, &all);
        let token_secret = self.token.map_or("", |(_, secret)| secret);
        let key = format!("{}&{}", encode(self.consumer_secret), encode(token_secret));

        let key = hmac::Key::new(hmac::HMAC_SHA1_FOR_LEGACY_USE_ONLY, key.as_bytes());
        general_purpose::STANDARD.encode(hmac::sign(&key, base.as_bytes()).as_ref())
    }
}

/// RFC 3986 percent-encoding: everything except unreserved characters
#[must_use]
pub fn encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// `METHOD&encoded-url&encoded-sorted-params`
#[must_use]
pub fn signature_base_string(method: &str, base_url: &str, params: &[(String, String)]) -> String {
    let mut encoded: Vec<(String, String)> = params
        .iter()
        .map(|(key, value)| (encode(key), encode(value)))
        .collect();
    encoded.sort();

    let normalized = encoded
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{}&{}&{}",
        method.to_uppercase(),
        encode(base_url),
        encode(&normalized)
    )
}

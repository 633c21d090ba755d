// ABOUTME: Garmin OAuth exchanges: SSO ticket to OAuth1, OAuth1 to OAuth2 bearer token
// ABOUTME: Also resolves the mobile-app consumer credentials used to sign both calls
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::config::{GarminConfig, OAuthConsumer};
use super::oauth1::OAuth1Signer;
use super::tokens::{ExchangeResponse, OAuth1Token, OAuth2Token};
use crate::utils::{check_status, network_error};
use gateway_core::constants::providers;
use gateway_core::{ProviderError, ProviderResult};
use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use tracing::{debug, info};

/// Download the public consumer credential document
///
/// # Errors
///
/// Returns a network, API or parse error when the document is unavailable
pub async fn fetch_consumer(client: &Client, url: &str) -> ProviderResult<OAuthConsumer> {
    info!("Fetching Garmin OAuth consumer credentials");
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| network_error(providers::GARMIN, &e))?;
    check_status(providers::GARMIN, response)
        .await?
        .json()
        .await
        .map_err(|e| ProviderError::Parse {
            provider: providers::GARMIN.to_owned(),
            reason: format!("Consumer document: {e}"),
        })
}

/// Trade an SSO service ticket for an `OAuth1` token
///
/// # Errors
///
/// Returns an API error when Garmin rejects the ticket, or a parse error for
/// an unexpected response body
pub async fn preauthorize(
    client: &Client,
    config: &GarminConfig,
    consumer: &OAuthConsumer,
    ticket: &str,
) -> ProviderResult<OAuth1Token> {
    let url = config.api_url("oauth-service/oauth/preauthorized");
    let params = vec![
        ("ticket".to_owned(), ticket.to_owned()),
        ("login-url".to_owned(), config.sso_embed_url()),
        ("accepts-mfa-tokens".to_owned(), "true".to_owned()),
    ];
    let authorization = OAuth1Signer::new(&consumer.consumer_key, &consumer.consumer_secret)
        .authorization_header("GET", &url, &params);

    debug!("Requesting OAuth1 token for SSO ticket");
    let response = client
        .get(&url)
        .query(&params)
        .header(AUTHORIZATION, authorization)
        .send()
        .await
        .map_err(|e| network_error(providers::GARMIN, &e))?;
    let body = check_status(providers::GARMIN, response)
        .await?
        .text()
        .await
        .map_err(|e| network_error(providers::GARMIN, &e))?;

    OAuth1Token::from_form_body(providers::GARMIN, &body, &config.domain)
}

/// Trade an `OAuth1` token for a fresh `OAuth2` bearer token
///
/// # Errors
///
/// Returns an API error when Garmin rejects the token (401 maps to an auth
/// failure upstream), or a parse error for an unexpected response body
pub async fn exchange(
    client: &Client,
    config: &GarminConfig,
    consumer: &OAuthConsumer,
    oauth1: &OAuth1Token,
) -> ProviderResult<OAuth2Token> {
    let url = config.api_url("oauth-service/oauth/exchange/user/2.0");
    let form: Vec<(String, String)> = oauth1
        .mfa_token
        .iter()
        .map(|mfa| ("mfa_token".to_owned(), mfa.clone()))
        .collect();
    let authorization = OAuth1Signer::new(&consumer.consumer_key, &consumer.consumer_secret)
        .with_token(&oauth1.oauth_token, &oauth1.oauth_token_secret)
        .authorization_header("POST", &url, &form);

    debug!("Exchanging OAuth1 token for OAuth2 token");
    let response = client
        .post(&url)
        .header(AUTHORIZATION, authorization)
        .form(&form)
        .send()
        .await
        .map_err(|e| network_error(providers::GARMIN, &e))?;
    let body: ExchangeResponse = check_status(providers::GARMIN, response)
        .await?
        .json()
        .await
        .map_err(|e| ProviderError::Parse {
            provider: providers::GARMIN.to_owned(),
            reason: format!("OAuth2 exchange response: {e}"),
        })?;

    Ok(OAuth2Token::from_exchange(body, chrono::Utc::now().timestamp()))
}

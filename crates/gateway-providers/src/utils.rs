// ABOUTME: Shared request helpers for provider implementations
// ABOUTME: Bearer-token GETs, status checking and error mapping without retries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use gateway_core::{ProviderError, ProviderResult};
use reqwest::{Client, Response, StatusCode};
use serde_json::Value;
use tracing::{debug, warn};

/// Map a reqwest transport failure to a provider error
#[must_use]
pub fn network_error(provider: &str, error: &reqwest::Error) -> ProviderError {
    ProviderError::Network {
        provider: provider.to_owned(),
        message: error.to_string(),
    }
}

/// Turn a non-success response into an `ApiError` carrying the body
///
/// # Errors
///
/// Returns `ApiError` when the status is not 2xx
pub async fn check_status(provider: &str, response: Response) -> ProviderResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    warn!("{provider} request failed - status: {status}, body: {body}");
    Err(ProviderError::ApiError {
        provider: provider.to_owned(),
        status_code: status.as_u16(),
        message: body,
    })
}

/// Read a JSON body, treating 204 and empty bodies as `Value::Null`
///
/// # Errors
///
/// Returns a network error if the body cannot be read, or a parse error if
/// it is not JSON
pub async fn read_json(provider: &str, response: Response) -> ProviderResult<Value> {
    if response.status() == StatusCode::NO_CONTENT {
        return Ok(Value::Null);
    }

    let body = response
        .text()
        .await
        .map_err(|e| network_error(provider, &e))?;
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }

    serde_json::from_str(&body).map_err(|e| ProviderError::Parse {
        provider: provider.to_owned(),
        reason: e.to_string(),
    })
}

/// Make an authenticated HTTP GET request and return the JSON body
///
/// There is no retry: a failed call fails once and the caller decides
/// whether that is fatal.
///
/// # Errors
///
/// Returns an error if:
/// - The request cannot be sent
/// - The response status is not 2xx
/// - The body is not valid JSON
pub async fn api_get(
    client: &Client,
    url: &str,
    access_token: &str,
    provider: &str,
) -> ProviderResult<Value> {
    debug!("Starting {provider} API request to: {url}");

    let response = client
        .get(url)
        .bearer_auth(access_token)
        .send()
        .await
        .map_err(|e| network_error(provider, &e))?;

    debug!("Received HTTP response with status: {}", response.status());
    let response = check_status(provider, response).await?;
    let value = read_json(provider, response).await?;
    debug!(payload = %value, "{provider} API response");
    Ok(value)
}

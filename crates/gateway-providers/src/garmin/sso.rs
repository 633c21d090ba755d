// ABOUTME: Garmin SSO embedded-widget login, pausing at the MFA page when required
// ABOUTME: Scrapes CSRF token, page title and service ticket from the widget HTML
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::config::GarminConfig;
use crate::http_client::sso_client;
use crate::utils::{check_status, network_error};
use gateway_core::constants::providers;
use gateway_core::{ProviderError, ProviderResult};
use regex::Regex;
use reqwest::header::REFERER;
use reqwest::Client;
use std::sync::LazyLock;
use tracing::{debug, info};

static CSRF_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r#"name="_csrf"\s+value="(.+?)""#).ok());

static TITLE_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"<title>(.+?)</title>").ok());

static TICKET_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r#"embed\?ticket=([^"]+)""#).ok());

/// Page title of a successful sign-in
const SUCCESS_TITLE: &str = "Success";

/// Marker in the page title when a second factor is requested
const MFA_TITLE_MARKER: &str = "MFA";

/// SSO state captured at the MFA page; everything needed to submit the code
pub struct PendingSso {
    client: Client,
    signin_params: Vec<(String, String)>,
    csrf_token: String,
}

impl std::fmt::Debug for PendingSso {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingSso").finish_non_exhaustive()
    }
}

/// Where the sign-in form left us
#[derive(Debug)]
pub enum SsoOutcome {
    /// Signed in; carries the service ticket
    Ticket(String),
    /// Garmin wants an MFA code
    NeedsMfa(PendingSso),
}

fn capture(pattern: &LazyLock<Option<Regex>>, html: &str, what: &str) -> ProviderResult<String> {
    pattern
        .as_ref()
        .and_then(|re| re.captures(html))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_owned())
        .ok_or_else(|| ProviderError::Parse {
            provider: providers::GARMIN.to_owned(),
            reason: format!("Could not find {what} in SSO page"),
        })
}

/// CSRF token from the sign-in form
///
/// # Errors
///
/// Returns a parse error when the page has no `_csrf` input
pub fn extract_csrf(html: &str) -> ProviderResult<String> {
    capture(&CSRF_PATTERN, html, "CSRF token")
}

/// Text of the page `<title>`
///
/// # Errors
///
/// Returns a parse error when the page has no title
pub fn extract_title(html: &str) -> ProviderResult<String> {
    capture(&TITLE_PATTERN, html, "page title")
}

/// Service ticket from the success page
///
/// # Errors
///
/// Returns a parse error when the page carries no ticket
pub fn extract_ticket(html: &str) -> ProviderResult<String> {
    capture(&TICKET_PATTERN, html, "service ticket")
}

fn auth_failed(reason: impl Into<String>) -> ProviderError {
    ProviderError::AuthenticationFailed {
        provider: providers::GARMIN.to_owned(),
        reason: reason.into(),
    }
}

async fn send_for_html(request: reqwest::RequestBuilder) -> ProviderResult<String> {
    let response = request
        .send()
        .await
        .map_err(|e| network_error(providers::GARMIN, &e))?;
    let response = check_status(providers::GARMIN, response).await?;
    response
        .text()
        .await
        .map_err(|e| network_error(providers::GARMIN, &e))
}

/// Submit credentials through the embedded SSO widget
///
/// # Errors
///
/// Returns `AuthenticationFailed` when Garmin answers with any page other
/// than success or the MFA prompt, or a network/API error on transport failure
pub async fn sign_in(config: &GarminConfig, email: &str, password: &str) -> ProviderResult<SsoOutcome> {
    let client = sso_client()?;
    let signin_url = config.sso_url("signin");
    let signin_params = config.signin_params();

    // Sets the session cookies the sign-in form expects
    send_for_html(client.get(config.sso_embed_url()).query(&config.embed_params())).await?;

    let form_page = send_for_html(
        client
            .get(&signin_url)
            .query(&signin_params)
            .header(REFERER, config.sso_embed_url()),
    )
    .await?;
    let csrf_token = extract_csrf(&form_page)?;

    let form = [
        ("username", email),
        ("password", password),
        ("embed", "true"),
        ("_csrf", csrf_token.as_str()),
    ];
    let result_page = send_for_html(
        client
            .post(&signin_url)
            .query(&signin_params)
            .header(REFERER, &signin_url)
            .form(&form),
    )
    .await?;

    let title = extract_title(&result_page)?;
    debug!("SSO sign-in page title: {title}");

    if title.contains(MFA_TITLE_MARKER) {
        info!("Garmin requested an MFA code");
        let csrf_token = extract_csrf(&result_page)?;
        return Ok(SsoOutcome::NeedsMfa(PendingSso {
            client,
            signin_params,
            csrf_token,
        }));
    }

    if title != SUCCESS_TITLE {
        return Err(auth_failed(format!("Unexpected title: {title}")));
    }

    Ok(SsoOutcome::Ticket(extract_ticket(&result_page)?))
}

/// Submit the MFA code on the page where [`sign_in`] stopped
///
/// # Errors
///
/// Returns `AuthenticationFailed` when the code is rejected
pub async fn verify_mfa(config: &GarminConfig, pending: PendingSso, code: &str) -> ProviderResult<String> {
    let PendingSso {
        client,
        signin_params,
        csrf_token,
    } = pending;
    let verify_url = config.sso_url("verifyMFA/loginEnterMfaCode");

    let form = [
        ("mfa-code", code),
        ("embed", "true"),
        ("_csrf", csrf_token.as_str()),
        ("fromPage", "setupEnterMfaCode"),
    ];
    let page = send_for_html(
        client
            .post(&verify_url)
            .query(&signin_params)
            .header(REFERER, config.sso_url("signin"))
            .form(&form),
    )
    .await?;

    let title = extract_title(&page)?;
    if title != SUCCESS_TITLE {
        return Err(auth_failed(format!("MFA verification failed: {title}")));
    }
    extract_ticket(&page)
}

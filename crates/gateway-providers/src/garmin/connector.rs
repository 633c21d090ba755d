// ABOUTME: Garmin Connect connector: login, MFA resume and per-request sessions
// ABOUTME: Chains SSO, OAuth1 pre-authorization and OAuth2 exchange into one token blob
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::client::GarminConnectClient;
use super::config::{GarminConfig, OAuthConsumer};
use super::exchange;
use super::sso::{self, PendingSso, SsoOutcome};
use super::tokens::{decode_session, encode_session};
use crate::core::{GarminConnector, GarminDataSource, LoginOutcome, MfaContinuation, SessionTokens};
use crate::http_client::shared_client;
use async_trait::async_trait;
use gateway_core::constants::providers;
use gateway_core::{ProviderError, ProviderResult};
use tokio::sync::OnceCell;
use tracing::info;

/// Real Garmin Connect connector
#[derive(Debug)]
pub struct GarminConnectConnector {
    config: GarminConfig,
    consumer: OnceCell<OAuthConsumer>,
}

impl GarminConnectConnector {
    /// Create a connector; consumer credentials are fetched lazily unless configured
    #[must_use]
    pub fn new(config: GarminConfig) -> Self {
        let consumer = OnceCell::new_with(config.consumer.clone());
        Self { config, consumer }
    }

    /// Endpoint configuration in use
    #[must_use]
    pub const fn config(&self) -> &GarminConfig {
        &self.config
    }

    async fn consumer(&self) -> ProviderResult<&OAuthConsumer> {
        self.consumer
            .get_or_try_init(|| exchange::fetch_consumer(shared_client(), &self.config.consumer_url))
            .await
    }

    /// Ticket to `OAuth1` to `OAuth2`, encoded as one blob
    async fn complete_login(&self, ticket: &str) -> ProviderResult<SessionTokens> {
        let consumer = self.consumer().await?;
        let client = shared_client();
        let oauth1 = exchange::preauthorize(client, &self.config, consumer, ticket).await?;
        let oauth2 = exchange::exchange(client, &self.config, consumer, &oauth1).await?;
        info!("Garmin login completed");
        Ok(SessionTokens::new(encode_session(&oauth1, &oauth2)?))
    }
}

#[async_trait]
impl GarminConnector for GarminConnectConnector {
    async fn login(&self, email: &str, password: &str) -> ProviderResult<LoginOutcome> {
        match sso::sign_in(&self.config, email, password).await? {
            SsoOutcome::Ticket(ticket) => {
                Ok(LoginOutcome::Authenticated(self.complete_login(&ticket).await?))
            }
            SsoOutcome::NeedsMfa(pending) => {
                Ok(LoginOutcome::NeedsMfa(MfaContinuation::new(pending)))
            }
        }
    }

    async fn resume_login(
        &self,
        continuation: MfaContinuation,
        code: &str,
    ) -> ProviderResult<SessionTokens> {
        let pending = continuation.downcast::<PendingSso>().map_err(|_| {
            ProviderError::AuthenticationFailed {
                provider: providers::GARMIN.to_owned(),
                reason: "MFA continuation was not issued by this connector".to_owned(),
            }
        })?;
        let ticket = sso::verify_mfa(&self.config, pending, code).await?;
        self.complete_login(&ticket).await
    }

    async fn connect(&self, tokens: &str) -> ProviderResult<Box<dyn GarminDataSource>> {
        let (oauth1, mut oauth2) = decode_session(tokens)?;

        if oauth2.is_expired(chrono::Utc::now().timestamp()) {
            // Fresh token lives only for this request; the caller keeps the old blob
            info!("Garmin OAuth2 token expired, exchanging for this request");
            let consumer = self.consumer().await?;
            oauth2 = exchange::exchange(shared_client(), &self.config, consumer, &oauth1).await?;
        }

        let session = GarminConnectClient::connect(&self.config, oauth2.access_token).await?;
        Ok(Box::new(session))
    }
}

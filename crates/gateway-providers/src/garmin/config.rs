// ABOUTME: Garmin Connect region and endpoint configuration
// ABOUTME: Derives SSO and API hosts from the regional domain, overridable for tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use gateway_core::constants::regions;
use serde::{Deserialize, Serialize};

/// Public document holding the mobile-app `OAuth1` consumer credentials
pub const DEFAULT_CONSUMER_URL: &str = "https://thegarth.s3.amazonaws.com/oauth_consumer.json";

/// `OAuth1` consumer credentials of the Garmin Connect mobile app
#[derive(Clone, Serialize, Deserialize)]
pub struct OAuthConsumer {
    /// Consumer key
    pub consumer_key: String,
    /// Consumer secret
    pub consumer_secret: String,
}

impl std::fmt::Debug for OAuthConsumer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthConsumer")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"<redacted>")
            .finish()
    }
}

/// Where the Garmin Connect endpoints live
#[derive(Debug, Clone)]
pub struct GarminConfig {
    /// Regional domain, `garmin.com` or `garmin.cn`
    pub domain: String,
    /// SSO base, e.g. `https://sso.garmin.com/sso`
    pub sso_base_url: String,
    /// API base, e.g. `https://connectapi.garmin.com`
    pub api_base_url: String,
    /// Consumer credentials; fetched from `consumer_url` when absent
    pub consumer: Option<OAuthConsumer>,
    /// Location of the public consumer credential document
    pub consumer_url: String,
}

impl GarminConfig {
    /// Configuration for the global or China region
    #[must_use]
    pub fn for_region(is_cn: bool) -> Self {
        let domain = if is_cn {
            regions::CHINA_DOMAIN
        } else {
            regions::GLOBAL_DOMAIN
        };
        Self {
            domain: domain.to_owned(),
            sso_base_url: format!("https://sso.{domain}/sso"),
            api_base_url: format!("https://connectapi.{domain}"),
            consumer: None,
            consumer_url: DEFAULT_CONSUMER_URL.to_owned(),
        }
    }

    /// Point SSO and API calls at explicit base URLs
    #[must_use]
    pub fn with_base_urls(mut self, sso_base_url: &str, api_base_url: &str) -> Self {
        sso_base_url.trim_end_matches('/').clone_into(&mut self.sso_base_url);
        api_base_url.trim_end_matches('/').clone_into(&mut self.api_base_url);
        self
    }

    /// Use fixed consumer credentials instead of fetching them
    #[must_use]
    pub fn with_consumer(mut self, consumer: OAuthConsumer) -> Self {
        self.consumer = Some(consumer);
        self
    }

    /// Absolute SSO URL for a path such as `/signin`
    #[must_use]
    pub fn sso_url(&self, path: &str) -> String {
        format!("{}/{}", self.sso_base_url, path.trim_start_matches('/'))
    }

    /// Absolute API URL for a path such as `/hrv-service/hrv/2024-01-01`
    #[must_use]
    pub fn api_url(&self, path: &str) -> String {
        format!("{}/{}", self.api_base_url, path.trim_start_matches('/'))
    }

    /// The embedded widget URL, used as SSO redirect target and login-url
    #[must_use]
    pub fn sso_embed_url(&self) -> String {
        self.sso_url("embed")
    }

    /// Query parameters loading the embedded widget
    #[must_use]
    pub fn embed_params(&self) -> Vec<(String, String)> {
        vec![
            ("id".to_owned(), "gauth-widget".to_owned()),
            ("embedWidget".to_owned(), "true".to_owned()),
            ("gauthHost".to_owned(), self.sso_base_url.clone()),
        ]
    }

    /// Query parameters for the sign-in and MFA pages
    #[must_use]
    pub fn signin_params(&self) -> Vec<(String, String)> {
        let embed = self.sso_embed_url();
        vec![
            ("id".to_owned(), "gauth-widget".to_owned()),
            ("embedWidget".to_owned(), "true".to_owned()),
            ("gauthHost".to_owned(), embed.clone()),
            ("service".to_owned(), embed.clone()),
            ("source".to_owned(), embed.clone()),
            ("redirectAfterAccountLoginUrl".to_owned(), embed.clone()),
            ("redirectAfterAccountCreationUrl".to_owned(), embed),
        ]
    }
}

impl Default for GarminConfig {
    fn default() -> Self {
        Self::for_region(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_hosts() {
        let global = GarminConfig::for_region(false);
        assert_eq!(global.sso_base_url, "https://sso.garmin.com/sso");
        assert_eq!(global.api_base_url, "https://connectapi.garmin.com");

        let china = GarminConfig::for_region(true);
        assert_eq!(china.domain, "garmin.cn");
        assert_eq!(
            china.api_url("/hrv-service/hrv/2024-01-01"),
            "https://connectapi.garmin.cn/hrv-service/hrv/2024-01-01"
        );
    }

    #[test]
    fn test_signin_params_target_embed_widget() {
        let config = GarminConfig::default();
        let params = config.signin_params();
        let service = params.iter().find(|(k, _)| k == "service").map(|(_, v)| v.as_str());
        assert_eq!(service, Some("https://sso.garmin.com/sso/embed"));
    }

    #[test]
    fn test_base_url_override_strips_trailing_slash() {
        let config = GarminConfig::default().with_base_urls("http://127.0.0.1:9/sso/", "http://127.0.0.1:9/");
        assert_eq!(config.sso_url("signin"), "http://127.0.0.1:9/sso/signin");
        assert_eq!(config.api_url("/x"), "http://127.0.0.1:9/x");
    }
}

// ABOUTME: Authenticated Garmin Connect data client for one request
// ABOUTME: Maps every metric kind and activity detail to its Connect API endpoint
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::config::GarminConfig;
use crate::core::GarminDataSource;
use crate::http_client::shared_client;
use crate::utils;
use async_trait::async_trait;
use chrono::NaiveDate;
use gateway_core::constants::providers;
use gateway_core::dates::format_iso_date;
use gateway_core::{ProviderError, ProviderResult};
use reqwest::Client;
use serde_json::{json, Value};
use std::borrow::Cow;
use tracing::{debug, info};

/// Activities requested per search page
const ACTIVITY_PAGE_SIZE: usize = 20;

/// Workouts requested from the workout list
const WORKOUT_LIST_LIMIT: usize = 100;

/// Garmin Connect session bound to one bearer token
pub struct GarminConnectClient {
    client: Client,
    api_base_url: String,
    access_token: String,
    display_name: String,
}

impl std::fmt::Debug for GarminConnectClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GarminConnectClient")
            .field("api_base_url", &self.api_base_url)
            .field("display_name", &self.display_name)
            .finish_non_exhaustive()
    }
}

impl GarminConnectClient {
    /// Open a session and resolve the user's display name
    ///
    /// Several wellness endpoints are keyed by display name rather than date only.
    ///
    /// # Errors
    ///
    /// Returns an API error (401 for a rejected token) or a parse error when
    /// the social profile has no display name
    pub async fn connect(config: &GarminConfig, access_token: String) -> ProviderResult<Self> {
        let mut session = Self {
            client: shared_client().clone(),
            api_base_url: config.api_base_url.clone(),
            access_token,
            display_name: String::new(),
        };

        let profile = session.get("userprofile-service/socialProfile").await?;
        let display_name = profile
            .get("displayName")
            .and_then(Value::as_str)
            .ok_or_else(|| ProviderError::Parse {
                provider: providers::GARMIN.to_owned(),
                reason: "Social profile has no displayName".to_owned(),
            })?;
        display_name.clone_into(&mut session.display_name);
        info!("Opened Garmin Connect session");
        Ok(session)
    }

    /// Display name used by per-user endpoints
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Display name escaped for use as a URL path segment
    fn encoded_display_name(&self) -> Cow<'_, str> {
        urlencoding::encode(&self.display_name)
    }

    async fn get(&self, path: &str) -> ProviderResult<Value> {
        let url = format!("{}/{}", self.api_base_url, path.trim_start_matches('/'));
        utils::api_get(&self.client, &url, &self.access_token, providers::GARMIN).await
    }

    async fn activity_document(&self, activity_id: &str, document: &str) -> ProviderResult<Value> {
        self.get(&format!("activity-service/activity/{activity_id}/{document}"))
            .await
    }

    async fn activities_page(
        &self,
        start: &str,
        end: &str,
        activity_type: Option<&str>,
        offset: usize,
    ) -> ProviderResult<Vec<Value>> {
        let mut path = format!(
            "activitylist-service/activities/search/activities?startDate={start}&endDate={end}&start={offset}&limit={ACTIVITY_PAGE_SIZE}"
        );
        if let Some(activity_type) = activity_type {
            path.push_str("&activityType=");
            path.push_str(&urlencoding::encode(activity_type));
        }

        match self.get(&path).await? {
            Value::Array(items) => Ok(items),
            Value::Null => Ok(Vec::new()),
            other => Err(ProviderError::Parse {
                provider: providers::GARMIN.to_owned(),
                reason: format!("Expected activity list, got {}", json_kind(&other)),
            }),
        }
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[async_trait]
impl GarminDataSource for GarminConnectClient {
    async fn user_summary(&self, date: NaiveDate) -> ProviderResult<Value> {
        let date = format_iso_date(date);
        self.get(&format!(
            "usersummary-service/usersummary/daily/{}?calendarDate={date}",
            self.encoded_display_name()
        ))
        .await
    }

    async fn floors(&self, date: NaiveDate) -> ProviderResult<Value> {
        self.get(&format!(
            "wellness-service/wellness/floorsChartData/daily/{}",
            format_iso_date(date)
        ))
        .await
    }

    async fn fitness_age(&self, date: NaiveDate) -> ProviderResult<Value> {
        self.get(&format!(
            "fitnessage-service/fitnessage/{}",
            format_iso_date(date)
        ))
        .await
    }

    async fn heart_rates(&self, date: NaiveDate) -> ProviderResult<Value> {
        let date = format_iso_date(date);
        self.get(&format!(
            "wellness-service/wellness/dailyHeartRate/{}?date={date}",
            self.encoded_display_name()
        ))
        .await
    }

    async fn sleep_data(&self, date: NaiveDate) -> ProviderResult<Value> {
        let date = format_iso_date(date);
        self.get(&format!(
            "wellness-service/wellness/dailySleepData/{}?date={date}&nonSleepBufferMinutes=60",
            self.encoded_display_name()
        ))
        .await
    }

    async fn stress(&self, date: NaiveDate) -> ProviderResult<Value> {
        self.get(&format!(
            "wellness-service/wellness/dailyStress/{}",
            format_iso_date(date)
        ))
        .await
    }

    async fn respiration(&self, date: NaiveDate) -> ProviderResult<Value> {
        self.get(&format!(
            "wellness-service/wellness/daily/respiration/{}",
            format_iso_date(date)
        ))
        .await
    }

    async fn spo2(&self, date: NaiveDate) -> ProviderResult<Value> {
        self.get(&format!(
            "wellness-service/wellness/daily/spo2/{}",
            format_iso_date(date)
        ))
        .await
    }

    async fn intensity_minutes(&self, date: NaiveDate) -> ProviderResult<Value> {
        self.get(&format!(
            "wellness-service/wellness/daily/im/{}",
            format_iso_date(date)
        ))
        .await
    }

    async fn training_readiness(&self, date: NaiveDate) -> ProviderResult<Value> {
        self.get(&format!(
            "metrics-service/metrics/trainingreadiness/{}",
            format_iso_date(date)
        ))
        .await
    }

    async fn training_status(&self, date: NaiveDate) -> ProviderResult<Value> {
        self.get(&format!(
            "metrics-service/metrics/trainingstatus/aggregated/{}",
            format_iso_date(date)
        ))
        .await
    }

    async fn max_metrics(&self, date: NaiveDate) -> ProviderResult<Value> {
        let date = format_iso_date(date);
        self.get(&format!("metrics-service/metrics/maxmet/daily/{date}/{date}"))
            .await
    }

    async fn hrv(&self, date: NaiveDate) -> ProviderResult<Value> {
        self.get(&format!("hrv-service/hrv/{}", format_iso_date(date)))
            .await
    }

    async fn endurance_score(&self, date: NaiveDate) -> ProviderResult<Value> {
        self.get(&format!(
            "metrics-service/metrics/endurancescore?calendarDate={}",
            format_iso_date(date)
        ))
        .await
    }

    async fn hill_score(&self, date: NaiveDate) -> ProviderResult<Value> {
        self.get(&format!(
            "metrics-service/metrics/hillscore?calendarDate={}",
            format_iso_date(date)
        ))
        .await
    }

    async fn blood_pressure(&self, date: NaiveDate) -> ProviderResult<Value> {
        let date = format_iso_date(date);
        self.get(&format!(
            "bloodpressure-service/bloodpressure/range/{date}/{date}?includeAll=true"
        ))
        .await
    }

    async fn body_battery(&self, date: NaiveDate) -> ProviderResult<Value> {
        let date = format_iso_date(date);
        self.get(&format!(
            "wellness-service/wellness/bodyBattery/reports/daily?startDate={date}&endDate={date}"
        ))
        .await
    }

    async fn menstrual_data(&self, date: NaiveDate) -> ProviderResult<Value> {
        self.get(&format!(
            "periodichealth-service/menstrualcycle/dayview/{}",
            format_iso_date(date)
        ))
        .await
    }

    async fn menstrual_calendar(&self, date: NaiveDate) -> ProviderResult<Value> {
        let date = format_iso_date(date);
        self.get(&format!(
            "periodichealth-service/menstrualcycle/calendar/{date}/{date}"
        ))
        .await
    }

    async fn body_composition(&self, date: NaiveDate) -> ProviderResult<Value> {
        let date = format_iso_date(date);
        self.get(&format!(
            "weight-service/weight/dateRange?startDate={date}&endDate={date}"
        ))
        .await
    }

    async fn lactate_threshold(&self) -> ProviderResult<Value> {
        let speed_and_heart_rate = self
            .get("biometric-service/biometric/latestLactateThreshold")
            .await?;
        let power = self
            .get("biometric-service/biometric/latestFunctionalThresholdPower/CYCLING")
            .await?;
        Ok(json!({
            "speed_and_heart_rate": speed_and_heart_rate,
            "power": power,
        }))
    }

    async fn race_predictions(&self) -> ProviderResult<Value> {
        self.get(&format!(
            "metrics-service/metrics/racepredictions/latest/{}",
            self.encoded_display_name()
        ))
        .await
    }

    async fn pregnancy_summary(&self) -> ProviderResult<Value> {
        self.get("periodichealth-service/menstrualcycle/pregnancysnapshot")
            .await
    }

    async fn activities_by_date(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        activity_type: Option<&str>,
    ) -> ProviderResult<Vec<Value>> {
        let (start, end) = (format_iso_date(start), format_iso_date(end));
        let mut activities = Vec::new();

        loop {
            let page = self
                .activities_page(&start, &end, activity_type, activities.len())
                .await?;
            if page.is_empty() {
                break;
            }
            debug!(
                "Fetched activity page - offset: {}, items: {}",
                activities.len(),
                page.len()
            );
            activities.extend(page);
        }

        info!("Fetched {} activities between {start} and {end}", activities.len());
        Ok(activities)
    }

    async fn activity_details(&self, activity_id: &str) -> ProviderResult<Value> {
        self.activity_document(activity_id, "details").await
    }

    async fn activity_splits(&self, activity_id: &str) -> ProviderResult<Value> {
        self.activity_document(activity_id, "splits").await
    }

    async fn activity_weather(&self, activity_id: &str) -> ProviderResult<Value> {
        self.activity_document(activity_id, "weather").await
    }

    async fn activity_hr_in_timezones(&self, activity_id: &str) -> ProviderResult<Value> {
        self.activity_document(activity_id, "hrTimeInZones").await
    }

    async fn activity_exercise_sets(&self, activity_id: &str) -> ProviderResult<Value> {
        self.activity_document(activity_id, "exerciseSets").await
    }

    async fn activity_gear(&self, activity_id: &str) -> ProviderResult<Value> {
        self.get(&format!("gear-service/gear/filterGear?activityId={activity_id}"))
            .await
    }

    async fn workouts(&self) -> ProviderResult<Vec<Value>> {
        match self
            .get(&format!(
                "workout-service/workouts?start=0&limit={WORKOUT_LIST_LIMIT}"
            ))
            .await?
        {
            Value::Array(items) => Ok(items),
            Value::Null => Ok(Vec::new()),
            other => Err(ProviderError::Parse {
                provider: providers::GARMIN.to_owned(),
                reason: format!("Expected workout list, got {}", json_kind(&other)),
            }),
        }
    }

    async fn workout(&self, workout_id: &str) -> ProviderResult<Value> {
        self.get(&format!("workout-service/workout/{workout_id}"))
            .await
    }
}

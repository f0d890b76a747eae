//! OpenWeather API client: bounded-retry fetching with latency tracking,
//! plus payload interpretation helpers for the interactive loop.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::model::{FetchResult, ForecastEntry, Units};

const API_BASE: &str = "https://api.openweathermap.org/data/2.5";
const IP_LOOKUP_BASE: &str = "http://ip-api.com";

/// Attempt budget for one fetch. Flat backoff, no growth.
const MAX_ATTEMPTS: u32 = 3;
const ATTEMPT_TIMEOUT: Duration = Duration::from_secs(10);
const RETRY_BACKOFF: Duration = Duration::from_millis(300);
const IP_LOOKUP_TIMEOUT: Duration = Duration::from_secs(5);

/// Application-level failure detected in an otherwise completed fetch.
///
/// Never produced by the fetch loop itself; the interactive loop derives it
/// from the payload (or its absence) via [`interpret_current`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Provider answered with an error code embedded in the body.
    #[error("{message}")]
    CityNotFound { message: String },

    /// Every attempt was exhausted without a decodable response.
    #[error("City not found.")]
    NoData,
}

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    api_base: String,
    ip_base: String,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(api_key: String) -> Result<Self> {
        Self::with_base_urls(api_key, API_BASE, IP_LOOKUP_BASE)
    }

    /// Client pointed at alternative endpoints. Integration tests use this to
    /// target a local mock server.
    pub fn with_base_urls(api_key: String, api_base: &str, ip_base: &str) -> Result<Self> {
        let http = Client::builder()
            .timeout(ATTEMPT_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            api_key,
            api_base: api_base.trim_end_matches('/').to_string(),
            ip_base: ip_base.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Fetch current conditions for `city`.
    pub async fn current_weather(&self, city: &str, units: Units) -> FetchResult {
        let url = format!("{}/weather", self.api_base);
        self.fetch(&url, &[("q", city), ("appid", &self.api_key), ("units", units.as_str())])
            .await
    }

    /// Fetch the 5-day / 3-hour forecast for `city`.
    pub async fn forecast(&self, city: &str, units: Units) -> FetchResult {
        let url = format!("{}/forecast", self.api_base);
        self.fetch(&url, &[("q", city), ("appid", &self.api_key), ("units", units.as_str())])
            .await
    }

    /// GET with up to [`MAX_ATTEMPTS`] tries and a flat backoff in between.
    ///
    /// An attempt is abandoned on network error, non-2xx status, or an
    /// undecodable body. Latency is the send-to-receipt delta of the attempt
    /// that returned the decoded payload. Exhaustion never raises; it yields
    /// an empty result with zero latency.
    async fn fetch(&self, url: &str, params: &[(&str, &str)]) -> FetchResult {
        for attempt in 1..=MAX_ATTEMPTS {
            let started = Instant::now();
            match self.http.get(url).query(params).send().await {
                Ok(res) => {
                    let latency_ms = started.elapsed().as_millis() as u64;
                    let status = res.status();
                    if status.is_success() {
                        match res.json::<Value>().await {
                            Ok(payload) => {
                                return FetchResult { payload: Some(payload), latency_ms };
                            }
                            Err(err) => {
                                debug!(attempt, %err, "response body was not valid JSON");
                            }
                        }
                    } else {
                        debug!(attempt, %status, "request rejected");
                    }
                }
                Err(err) => {
                    debug!(attempt, %err, "request failed");
                }
            }

            if attempt < MAX_ATTEMPTS {
                tokio::time::sleep(RETRY_BACKOFF).await;
            }
        }

        FetchResult::empty()
    }

    /// Best-effort city lookup from the caller's public IP.
    ///
    /// Single attempt, short timeout; any failure means "no default city".
    pub async fn detect_city(&self) -> Option<String> {
        let url = format!("{}/json/", self.ip_base);
        let res = self
            .http
            .get(&url)
            .timeout(IP_LOOKUP_TIMEOUT)
            .send()
            .await
            .ok()?;

        if !res.status().is_success() {
            return None;
        }

        let body: Value = res.json().await.ok()?;
        body.get("city").and_then(Value::as_str).map(ToOwned::to_owned)
    }
}

/// True when a current-weather payload reports success (numeric `cod` 200).
pub fn current_ok(payload: &Value) -> bool {
    payload.get("cod").and_then(Value::as_i64) == Some(200)
}

/// True when a forecast payload reports success (the forecast endpoint sends
/// its `cod` as the string `"200"`).
pub fn forecast_ok(payload: &Value) -> bool {
    payload.get("cod").and_then(Value::as_str) == Some("200")
}

/// Provider-supplied error message, when present.
pub fn error_message(payload: &Value) -> Option<String> {
    payload.get("message").and_then(Value::as_str).map(ToOwned::to_owned)
}

/// Decide whether a current-weather fetch is usable by the dashboard.
pub fn interpret_current(result: &FetchResult) -> Result<&Value, ApiError> {
    let Some(payload) = result.payload.as_ref() else {
        return Err(ApiError::NoData);
    };

    if current_ok(payload) {
        Ok(payload)
    } else {
        match error_message(payload) {
            Some(message) => Err(ApiError::CityNotFound { message }),
            None => Err(ApiError::NoData),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawForecast {
    #[serde(default)]
    list: Vec<RawForecastEntry>,
}

#[derive(Debug, Deserialize)]
struct RawForecastEntry {
    dt: i64,
    main: RawEntryMain,
    #[serde(default)]
    pop: f64,
    #[serde(default)]
    weather: Vec<RawEntryWeather>,
}

#[derive(Debug, Deserialize)]
struct RawEntryMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct RawEntryWeather {
    description: String,
}

/// Extract the flat reading list from a forecast payload.
///
/// A payload that does not match the expected shape yields an empty list, so
/// the dashboard degrades to "no forecast" instead of failing the render.
pub fn forecast_entries(payload: &Value) -> Vec<ForecastEntry> {
    let Ok(raw) = serde_json::from_value::<RawForecast>(payload.clone()) else {
        return Vec::new();
    };

    raw.list
        .into_iter()
        .map(|e| ForecastEntry {
            timestamp: e.dt,
            temperature: e.main.temp,
            precipitation_probability: e.pop,
            description: e
                .weather
                .into_iter()
                .next()
                .map(|w| w.description)
                .unwrap_or_else(|| "Unknown".to_string()),
        })
        .collect()
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Measurement system requested from the provider.
///
/// `Metric` means Celsius / meters-per-second, `Imperial` means
/// Fahrenheit / miles-per-hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }

    /// Lenient parse: empty or unrecognized input falls back to metric.
    pub fn parse_or_default(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "imperial" => Units::Imperial,
            _ => Units::Metric,
        }
    }

    pub fn temp_suffix(&self) -> &'static str {
        match self {
            Units::Metric => "°C",
            Units::Imperial => "°F",
        }
    }

    pub fn wind_suffix(&self) -> &'static str {
        match self {
            Units::Metric => "m/s",
            Units::Imperial => "mph",
        }
    }
}

impl std::fmt::Display for Units {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One 3-hour-resolution reading from the forecast endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastEntry {
    /// Seconds since epoch, UTC.
    pub timestamp: i64,
    pub temperature: f64,
    /// Probability in `0.0..=1.0`; absent in the payload means 0.0.
    pub precipitation_probability: f64,
    pub description: String,
}

/// Aggregated outlook for one UTC calendar day.
#[derive(Debug, Clone, PartialEq)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub min_temp: f64,
    pub max_temp: f64,
    /// Mean precipitation probability of the day's entries, as a whole percent.
    pub precipitation_pct: u8,
    /// Most frequent raw description among the day's entries, sentence-cased.
    pub description: String,
}

/// Outcome of one fetch: a decoded body when any attempt succeeded, and the
/// round-trip latency of that attempt in milliseconds (0 when none did).
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub payload: Option<Value>,
    pub latency_ms: u64,
}

impl FetchResult {
    pub fn empty() -> Self {
        Self { payload: None, latency_ms: 0 }
    }
}

/// Typed view of the current-weather payload, consumed by the renderer.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentConditions {
    pub name: String,
    pub sys: CurrentSys,
    pub main: CurrentMain,
    pub wind: CurrentWind,
    pub weather: Vec<CurrentWeather>,
    /// Meters; the provider omits it in some regions.
    #[serde(default)]
    pub visibility: Option<u32>,
    pub clouds: CurrentClouds,
    /// Offset of the city's local time from UTC, in seconds.
    #[serde(default)]
    pub timezone: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CurrentSys {
    pub country: String,
    pub sunrise: i64,
    pub sunset: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CurrentMain {
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: u8,
    pub pressure: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CurrentWind {
    pub speed: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CurrentWeather {
    pub main: String,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CurrentClouds {
    pub all: u8,
}

impl CurrentConditions {
    pub fn from_value(payload: &Value) -> anyhow::Result<Self> {
        serde_json::from_value(payload.clone())
            .map_err(|e| anyhow::anyhow!("Malformed current weather payload: {e}"))
    }
}

//! Core library for the weather dashboard CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather API client with bounded retry and latency tracking
//! - Forecast summarization into daily aggregates
//! - Shared domain models
//!
//! It is used by `dashboard-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod model;
pub mod openweather;
pub mod summary;

pub use config::{Config, Preferences};
pub use model::{CurrentConditions, DailySummary, FetchResult, ForecastEntry, Units};
pub use openweather::{ApiError, OpenWeatherClient};
pub use summary::summarize;

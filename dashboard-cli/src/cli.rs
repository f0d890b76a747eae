use anyhow::Result;
use clap::Parser;
use dashboard_core::{Config, CurrentConditions, OpenWeatherClient, Units, openweather, summarize};
use inquire::{InquireError, Text};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-dashboard", version, about = "Terminal weather dashboard")]
pub struct Cli {
    /// City to show once, skipping the interactive loop.
    #[arg(long)]
    pub city: Option<String>,

    /// Measurement system: "metric" or "imperial".
    #[arg(long)]
    pub units: Option<String>,

    /// Number of forecast days to summarize.
    #[arg(long)]
    pub days: Option<usize>,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let config = Config::load()?;
        let client = OpenWeatherClient::new(config.api_key.clone())?;

        let days = self.days.unwrap_or(config.forecast_days);
        let units = match self.units.as_deref() {
            Some(raw) => Units::parse_or_default(raw),
            None if self.city.is_some() => config.units,
            None => prompt_units(config.units)?,
        };

        if let Some(city) = self.city.as_deref() {
            show_city(&client, city, units, days).await;
            return Ok(());
        }

        interactive_loop(&client, units, days).await
    }
}

fn prompt_units(default: Units) -> Result<Units> {
    let raw = match Text::new("Units (metric/imperial):").with_default(default.as_str()).prompt() {
        Ok(raw) => raw,
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
            return Ok(default);
        }
        Err(err) => return Err(err.into()),
    };

    Ok(Units::parse_or_default(&raw))
}

/// Prompt for cities until the user quits. Recoverable fetch failures print a
/// message and re-prompt; only startup failures terminate the program.
async fn interactive_loop(client: &OpenWeatherClient, units: Units, days: usize) -> Result<()> {
    println!("Weather Dashboard");

    let auto_city = client.detect_city().await;
    let hint = auto_city.as_deref().unwrap_or("London");

    loop {
        let prompt = format!("Enter city name (e.g. {hint}) or 'q' to quit:");
        let input = match Text::new(&prompt).prompt() {
            Ok(input) => input.trim().to_string(),
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err.into()),
        };

        if is_quit(&input) {
            println!("Goodbye.");
            break;
        }

        let city = if input.is_empty() {
            match auto_city.as_deref() {
                Some(city) => city.to_string(),
                None => {
                    println!("Could not auto-detect a city; please type one.");
                    continue;
                }
            }
        } else {
            input
        };

        show_city(client, &city, units, days).await;
    }

    Ok(())
}

/// One dashboard round trip: current weather, then forecast, then render.
///
/// A bad or missing forecast degrades to an empty summary list; the current
/// conditions still render.
async fn show_city(client: &OpenWeatherClient, city: &str, units: Units, days: usize) {
    let current = client.current_weather(city, units).await;
    let forecast = client.forecast(city, units).await;
    tracing::debug!(
        city,
        current_ms = current.latency_ms,
        forecast_ms = forecast.latency_ms,
        "fetch complete"
    );

    let payload = match openweather::interpret_current(&current) {
        Ok(payload) => payload,
        Err(err) => {
            render::unavailable(&err.to_string());
            return;
        }
    };

    let conditions = match CurrentConditions::from_value(payload) {
        Ok(conditions) => conditions,
        Err(err) => {
            render::unavailable(&err.to_string());
            return;
        }
    };

    let summaries = match forecast.payload.as_ref().filter(|p| openweather::forecast_ok(p)) {
        Some(payload) => summarize(&openweather::forecast_entries(payload), days),
        None => Vec::new(),
    };

    render::dashboard(
        &conditions,
        &summaries,
        (current.latency_ms, forecast.latency_ms),
        units,
    );
}

/// Case-insensitive quit signal.
fn is_quit(input: &str) -> bool {
    matches!(input.to_lowercase().as_str(), "q" | "quit" | "exit")
}

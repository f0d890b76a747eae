//! Plain-text dashboard rendering. Pure presentation, no I/O besides stdout.

use chrono::{DateTime, FixedOffset, Offset, Utc};
use dashboard_core::{CurrentConditions, DailySummary, Units, summary::capitalize};

const RULE: &str = "──────────────────────────────────────────────────";

/// Error panel shown when no usable current-weather payload came back.
pub fn unavailable(message: &str) {
    println!();
    println!("{RULE}");
    println!("  Weather Data Unavailable");
    println!("  Error: {message}");
    println!("  Please check the city name and try again.");
    println!("{RULE}");
}

/// Render the full dashboard: header, current conditions, forecast table and
/// the latency footer.
pub fn dashboard(
    current: &CurrentConditions,
    forecast: &[DailySummary],
    latencies: (u64, u64),
    units: Units,
) {
    let temp = units.temp_suffix();
    let offset = city_offset(current.timezone);
    let now = Utc::now();

    println!();
    println!("{RULE}");
    println!("  {}, {}", current.name, current.sys.country);
    println!(
        "  Local: {}  •  Updated: {}",
        now.with_timezone(&offset).format("%Y-%m-%d %H:%M"),
        now.format("%Y-%m-%d %H:%M UTC"),
    );
    println!();

    let (condition, description) = current
        .weather
        .first()
        .map(|w| (w.main.as_str(), w.description.as_str()))
        .unwrap_or(("Unknown", "unknown"));

    detail("Condition", condition.to_string());
    detail("Description", capitalize(description));
    detail("Temperature", format!("{:.1}{temp}", current.main.temp));
    detail("Feels Like", format!("{:.1}{temp}", current.main.feels_like));
    detail("Humidity", format!("{}%", current.main.humidity));
    detail("Pressure", format!("{} hPa", current.main.pressure));
    detail("Wind", format!("{} {}", current.wind.speed, units.wind_suffix()));
    detail(
        "Visibility",
        format!("{:.1} km", f64::from(current.visibility.unwrap_or(0)) / 1000.0),
    );
    detail("Clouds", format!("{}%", current.clouds.all));
    detail("Sunrise", local_hhmm(current.sys.sunrise, offset));
    detail("Sunset", local_hhmm(current.sys.sunset, offset));

    println!();
    println!("  FORECAST");
    if forecast.is_empty() {
        println!("  (no forecast data)");
    } else {
        println!("  {:<12} {:>9} {:>9} {:>5}  {}", "Date", "Min", "Max", "Pop", "Summary");
        for day in forecast {
            println!(
                "  {:<12} {:>9} {:>9} {:>4}%  {}",
                day.date.to_string(),
                format!("{:.1}{temp}", day.min_temp),
                format!("{:.1}{temp}", day.max_temp),
                day.precipitation_pct,
                day.description,
            );
        }
    }

    println!();
    println!(
        "  API latencies: current={}ms  forecast={}ms  |  Units: {units}",
        latencies.0, latencies.1,
    );
    println!("{RULE}");
}

fn detail(label: &str, value: String) {
    println!("  {label:>12}  {value}");
}

fn city_offset(seconds: i32) -> FixedOffset {
    FixedOffset::east_opt(seconds).unwrap_or_else(|| Utc.fix())
}

fn local_hhmm(timestamp: i64, offset: FixedOffset) -> String {
    DateTime::from_timestamp(timestamp, 0)
        .map(|dt| dt.with_timezone(&offset).format("%H:%M").to_string())
        .unwrap_or_else(|| "--:--".to_string())
}

//! Forecast summarization: 3-hour readings grouped into daily aggregates.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate};

use crate::model::{DailySummary, ForecastEntry};

/// Group forecast entries by their UTC calendar date and reduce each of the
/// first `days` dates to a single [`DailySummary`].
///
/// The output is ordered ascending by date and is never padded: fewer than
/// `days` distinct dates in the input yields fewer summaries, and an empty
/// input yields an empty vector. The transformation is pure.
pub fn summarize(entries: &[ForecastEntry], days: usize) -> Vec<DailySummary> {
    let mut grouped: BTreeMap<NaiveDate, Vec<&ForecastEntry>> = BTreeMap::new();
    for entry in entries {
        if let Some(date) = entry_date(entry) {
            grouped.entry(date).or_default().push(entry);
        }
    }

    grouped
        .into_iter()
        .take(days)
        .map(|(date, day_entries)| reduce_day(date, &day_entries))
        .collect()
}

fn entry_date(entry: &ForecastEntry) -> Option<NaiveDate> {
    DateTime::from_timestamp(entry.timestamp, 0).map(|dt| dt.date_naive())
}

/// Collapse one day's entries into min/max temperature, mean precipitation
/// probability and the dominant description.
fn reduce_day(date: NaiveDate, entries: &[&ForecastEntry]) -> DailySummary {
    let mut min_temp = f64::INFINITY;
    let mut max_temp = f64::NEG_INFINITY;
    let mut pop_sum = 0.0;

    for entry in entries {
        min_temp = min_temp.min(entry.temperature);
        max_temp = max_temp.max(entry.temperature);
        pop_sum += entry.precipitation_probability;
    }

    // Truncation toward zero, matching the upstream dashboard's arithmetic.
    let precipitation_pct = (pop_sum / entries.len() as f64 * 100.0) as u8;

    DailySummary {
        date,
        min_temp,
        max_temp,
        precipitation_pct,
        description: capitalize(dominant_description(entries)),
    }
}

/// Most frequent description; ties go to the one encountered first.
fn dominant_description<'a>(entries: &[&'a ForecastEntry]) -> &'a str {
    let mut tally: Vec<(&str, usize)> = Vec::new();
    for entry in entries {
        match tally.iter_mut().find(|(desc, _)| *desc == entry.description) {
            Some((_, count)) => *count += 1,
            None => tally.push((&entry.description, 1)),
        }
    }

    let mut best: (&str, usize) = ("", 0);
    for (desc, count) in tally {
        if count > best.1 {
            best = (desc, count);
        }
    }
    best.0
}

/// Sentence-case: first character uppercased, the rest untouched.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::model::Units;

/// Environment variable holding the OpenWeather API key.
pub const API_KEY_VAR: &str = "OPENWEATHER_API_KEY";

const DEFAULT_FORECAST_DAYS: usize = 3;

/// Optional user preferences stored on disk.
///
/// Example TOML:
/// units = "imperial"
/// forecast_days = 5
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Preferences {
    pub units: Option<Units>,
    pub forecast_days: Option<usize>,
}

impl Preferences {
    /// Load preferences from disk, or return defaults if the file doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read preferences file: {}", path.display()))?;

        let prefs: Preferences = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse preferences file: {}", path.display()))?;

        Ok(prefs)
    }

    /// Save preferences to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create preferences directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize preferences to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write preferences file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the preferences file.
    pub fn file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-dashboard", "dashboard-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("preferences.toml"))
    }
}

/// Resolved runtime configuration: the required credential plus defaults for
/// the interactive loop.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub units: Units,
    pub forecast_days: usize,
}

impl Config {
    /// Build configuration from the environment and the preferences file.
    ///
    /// A missing or empty API key is a fatal startup condition; everything
    /// else falls back to defaults.
    pub fn load() -> Result<Self> {
        let api_key = std::env::var(API_KEY_VAR)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| anyhow!("Missing {API_KEY_VAR} in environment."))?;

        let prefs = Preferences::load()?;
        Ok(Self::from_parts(api_key, &prefs))
    }

    /// Combine an explicit API key with preferences. Kept separate from
    /// [`Config::load`] so tests don't have to touch the environment.
    pub fn from_parts(api_key: String, prefs: &Preferences) -> Self {
        Self {
            api_key,
            units: prefs.units.unwrap_or_default(),
            forecast_days: prefs.forecast_days.unwrap_or(DEFAULT_FORECAST_DAYS),
        }
    }
}

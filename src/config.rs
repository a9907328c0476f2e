//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::db::keys;
use crate::models::Coordinates;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory for the file-backed store
    pub data_dir: PathBuf,
    /// Storage key holding the whole encoded collection
    pub storage_key: String,
    /// Zoom level for the initial view and for panning to a record
    pub map_zoom: u8,
    /// Fixed position reported by the position provider, if any
    pub home_position: Option<Coordinates>,
    /// Delay before the hidden form's display is restored
    pub form_restore_delay: Duration,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".workout-map"),
            storage_key: keys::EXERCISES.to_string(),
            map_zoom: 13,
            home_position: None,
            form_restore_delay: Duration::from_millis(1000),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let defaults = Self::default();

        let home_position = match (env::var("HOME_LATITUDE"), env::var("HOME_LONGITUDE")) {
            (Ok(lat), Ok(lng)) => Some(parse_position(&lat, &lng)?),
            (Err(_), Err(_)) => None,
            (Ok(_), Err(_)) => return Err(ConfigError::Missing("HOME_LONGITUDE")),
            (Err(_), Ok(_)) => return Err(ConfigError::Missing("HOME_LATITUDE")),
        };

        Ok(Self {
            data_dir: env::var("WORKOUT_MAP_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            storage_key: env::var("WORKOUT_MAP_STORAGE_KEY").unwrap_or(defaults.storage_key),
            map_zoom: env::var("MAP_ZOOM_LEVEL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.map_zoom),
            home_position,
            form_restore_delay: env::var("FORM_RESTORE_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.form_restore_delay),
        })
    }
}

fn parse_position(lat: &str, lng: &str) -> Result<Coordinates, ConfigError> {
    let lat: f64 = lat
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid("HOME_LATITUDE", lat.to_string()))?;
    let lng: f64 = lng
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid("HOME_LONGITUDE", lng.to_string()))?;
    if !(-90.0..=90.0).contains(&lat) {
        return Err(ConfigError::Invalid("HOME_LATITUDE", lat.to_string()));
    }
    if !(-180.0..=180.0).contains(&lng) {
        return Err(ConfigError::Invalid("HOME_LONGITUDE", lng.to_string()));
    }
    Ok(Coordinates::new(lat, lng))
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

pub const CONFIG_PATH_ENV: &str = "EVENT_TIMELINE_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config file: {0}")]
    Toml(#[from] toml::de::Error),
}

/// A month/day pair bounding the daylight-saving window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MonthDay {
    pub month: u32,
    pub day: u32,
}

impl MonthDay {
    pub const fn new(month: u32, day: u32) -> Self {
        Self { month, day }
    }
}

/// Fixed observer used by the sunset estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObserverLocation {
    pub latitude_deg: f64,
    /// Local standard time of solar noon, in minutes after midnight.
    pub solar_noon_minutes: i64,
    pub dst_start: MonthDay,
    /// Inclusive.
    pub dst_end: MonthDay,
}

impl Default for ObserverLocation {
    fn default() -> Self {
        Self {
            latitude_deg: 40.0,
            solar_noon_minutes: 12 * 60,
            dst_start: MonthDay::new(3, 10),
            dst_end: MonthDay::new(11, 2),
        }
    }
}

/// Tunable constants for the recompute engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Guest arrival plus staging time held before the ceremony.
    pub base_allowance_minutes: u32,
    /// Break between getting ready and the pre-ceremony program.
    pub buffer_break_minutes: u32,
    pub last_dance_offset_minutes: u32,
    pub private_last_dance_offset_minutes: u32,
    pub grand_exit_offset_minutes: u32,
    pub location: ObserverLocation,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            base_allowance_minutes: 45,
            buffer_break_minutes: 25,
            last_dance_offset_minutes: 10,
            private_last_dance_offset_minutes: 5,
            grand_exit_offset_minutes: 0,
            location: ObserverLocation::default(),
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path.as_ref())?;
        debug!(path = %path.as_ref().display(), "loading engine config");
        Self::from_toml_str(&raw)
    }

    /// Reads the file named by `EVENT_TIMELINE_CONFIG`, or falls back to defaults
    /// when the variable is unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_PATH_ENV) {
            Some(path) => Self::from_toml_file(path),
            None => Ok(Self::default()),
        }
    }
}

//! TOML configuration for the core and its front ends.
//!
//! Every field has a default, so an empty file is a valid configuration.
//!
//! ```toml
//! [database]
//! path = "hrdash.sqlite3"
//!
//! [logging]
//! level = "info"
//! dir = "/var/log/hrdash"
//!
//! [reminders]
//! poll_interval_seconds = 120
//! utc_offset_minutes = -300
//! ```

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_POLL_INTERVAL_SECONDS: u64 = 120;
const MAX_UTC_OFFSET_MINUTES: i32 = 14 * 60;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config `{}`: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to render config: {0}")]
    Render(#[from] toml::ser::Error),
    #[error("utc offset of {0} minutes is out of range")]
    InvalidUtcOffset(i32),
    #[error("poll interval must be at least one second")]
    InvalidPollInterval,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub reminders: ReminderConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("hrdash.sqlite3"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// File logging stays off when unset.
    pub dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: crate::logging::default_log_level().to_string(),
            dir: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReminderConfig {
    pub poll_interval_seconds: u64,
    /// Offset used to decide which calendar day "today" is.
    pub utc_offset_minutes: i32,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            poll_interval_seconds: DEFAULT_POLL_INTERVAL_SECONDS,
            utc_offset_minutes: 0,
        }
    }
}

impl CoreConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    /// Starter file with every default spelled out.
    pub fn default_toml() -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(&Self::default())?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.utc_offset()?;
        if self.reminders.poll_interval_seconds == 0 {
            return Err(ConfigError::InvalidPollInterval);
        }
        Ok(())
    }

    pub fn utc_offset(&self) -> Result<FixedOffset, ConfigError> {
        let minutes = self.reminders.utc_offset_minutes;
        if minutes.abs() > MAX_UTC_OFFSET_MINUTES {
            return Err(ConfigError::InvalidUtcOffset(minutes));
        }
        FixedOffset::east_opt(minutes * 60).ok_or(ConfigError::InvalidUtcOffset(minutes))
    }

    pub fn poll_interval_ms(&self) -> i64 {
        i64::try_from(self.reminders.poll_interval_seconds.saturating_mul(1000)).unwrap_or(i64::MAX)
    }
}

//! Logger configuration
//!
//! `LoggerConfig` is the immutable snapshot of key names, formats and flags
//! shared by a logger and every entry it produces. An empty key omits that
//! field from the output.

use super::error::Result;
use super::log_level::LevelNames;
use super::timestamp::{TimestampFormat, TimestampZone};
use serde::{Deserialize, Serialize};

pub const DEFAULT_LEVEL_KEY: &str = "severity";
pub const DEFAULT_TIMESTAMP_KEY: &str = "timestamp";
pub const DEFAULT_CALLER_KEY: &str = "caller";
pub const DEFAULT_MESSAGE_KEY: &str = "message";
pub const DEFAULT_SEPARATOR: &str = "\n";

/// # Examples
///
/// ```
/// use rust_json_logger::core::{LoggerConfig, TimestampFormat};
///
/// let config = LoggerConfig::new()
///     .with_level_key("level")
///     .with_caller_key("")
///     .with_timestamp_format(TimestampFormat::UnixMillis);
///
/// assert_eq!(config.level_key, "level");
/// assert!(config.caller_key.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub level_key: String,
    pub timestamp_key: String,
    pub caller_key: String,
    pub message_key: String,
    pub timestamp_format: TimestampFormat,
    pub timestamp_zone: TimestampZone,
    pub levels: LevelNames,
    /// Render the caller as `dir/file:line` instead of the full path
    pub short_caller: bool,
    /// Written after every record
    pub separator: String,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level_key: DEFAULT_LEVEL_KEY.to_string(),
            timestamp_key: DEFAULT_TIMESTAMP_KEY.to_string(),
            caller_key: DEFAULT_CALLER_KEY.to_string(),
            message_key: DEFAULT_MESSAGE_KEY.to_string(),
            timestamp_format: TimestampFormat::default(),
            timestamp_zone: TimestampZone::default(),
            levels: LevelNames::default(),
            short_caller: true,
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }
}

impl LoggerConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_level_key(mut self, key: impl Into<String>) -> Self {
        self.level_key = key.into();
        self
    }

    #[must_use]
    pub fn with_timestamp_key(mut self, key: impl Into<String>) -> Self {
        self.timestamp_key = key.into();
        self
    }

    #[must_use]
    pub fn with_caller_key(mut self, key: impl Into<String>) -> Self {
        self.caller_key = key.into();
        self
    }

    #[must_use]
    pub fn with_message_key(mut self, key: impl Into<String>) -> Self {
        self.message_key = key.into();
        self
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    #[must_use]
    pub fn with_timestamp_zone(mut self, zone: TimestampZone) -> Self {
        self.timestamp_zone = zone;
        self
    }

    #[must_use]
    pub fn with_levels(mut self, levels: LevelNames) -> Self {
        self.levels = levels;
        self
    }

    #[must_use]
    pub fn with_short_caller(mut self, short: bool) -> Self {
        self.short_caller = short;
        self
    }

    #[must_use]
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Check the timestamp pattern and zone.
    pub fn validate(&self) -> Result<()> {
        self.timestamp_format.validate()?;
        self.timestamp_zone.validate()
    }

    /// Parse a configuration from JSON; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

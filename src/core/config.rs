//! Serializable logger configuration

use super::{
    error::{LoggerError, Result},
    formatter::{FormatterConfig, LogFormatter, OutputFormat},
    log_level::LogLevel,
    timestamp::TimestampFormat,
};
use serde::{Deserialize, Serialize};

/// Default number of entries the dispatch channel can hold
pub const DEFAULT_CAPACITY: usize = 1024;

/// Logger settings, loadable from JSON
///
/// Missing keys take their defaults.
///
/// # Example
///
/// ```
/// use rust_entry_logger::{LoggerConfig, LogLevel, OutputFormat};
///
/// let config = LoggerConfig::from_json(r#"{"min_level": "warn", "output_format": "json"}"#).unwrap();
/// assert_eq!(config.min_level, LogLevel::Warn);
/// assert_eq!(config.output_format, OutputFormat::Json);
/// assert_eq!(config.capacity, 1024);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub min_level: LogLevel,
    pub capacity: usize,
    pub output_format: OutputFormat,
    pub timestamp_format: TimestampFormat,
    pub level_uppercase: bool,
    pub use_colors: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Info,
            capacity: DEFAULT_CAPACITY,
            output_format: OutputFormat::default(),
            timestamp_format: TimestampFormat::default(),
            level_uppercase: false,
            use_colors: false,
        }
    }
}

impl LoggerConfig {
    /// Parse and validate a JSON configuration
    pub fn from_json(json: &str) -> Result<Self> {
        let config: LoggerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(LoggerError::config(
                "LoggerConfig",
                "capacity must be greater than zero",
            ));
        }
        Ok(())
    }

    /// Formatter described by this configuration
    pub fn formatter(&self) -> LogFormatter {
        LogFormatter::new(self.output_format).with_config(
            FormatterConfig::new()
                .with_timestamp_format(self.timestamp_format.clone())
                .with_level_uppercase(self.level_uppercase)
                .with_colors(self.use_colors),
        )
    }
}

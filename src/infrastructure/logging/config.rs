use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::models::config::LoggingConfig;
use crate::infrastructure::config::ConfigError;

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Output format (json, pretty)
    pub format: LogFormat,

    /// Directory for the log file (optional, if None logs only to stderr)
    pub log_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            log_dir: None,
        }
    }
}

impl TryFrom<&LoggingConfig> for LogConfig {
    type Error = ConfigError;

    fn try_from(config: &LoggingConfig) -> Result<Self, Self::Error> {
        let format = match config.format.as_str() {
            "json" => LogFormat::Json,
            "pretty" => LogFormat::Pretty,
            other => return Err(ConfigError::InvalidLogFormat(other.to_string())),
        };
        Ok(Self {
            level: config.level.clone(),
            format,
            log_dir: config.log_dir.clone(),
        })
    }
}

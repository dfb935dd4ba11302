use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Main configuration structure for the curriculum CLI
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Defaults for `curriculum run`
    #[serde(default)]
    pub run: RunConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Defaults for the `run` command; explicit CLI flags win.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RunConfig {
    /// Do not print the suggested trainer state
    #[serde(default)]
    pub mute_trainer_state: bool,

    /// Do not print the computed metrics
    #[serde(default)]
    pub mute_metrics: bool,

    /// Directory that receives `metrics.json`
    #[serde(default)]
    pub output_metrics: Option<PathBuf>,

    /// Directory that receives `suggestion.json`
    #[serde(default)]
    pub output_suggestion: Option<PathBuf>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Also write logs to `curriculum.log` in this directory
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
        }
    }
}

use std::io;

use anyhow::{Context, Result};
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use super::config::{LogConfig, LogFormat};

/// Name of the log file written under `log_dir`
pub const LOG_FILE_NAME: &str = "curriculum.log";

/// Logger implementation using tracing
pub struct LoggerImpl {
    _guard: Option<WorkerGuard>,
}

impl LoggerImpl {
    /// Install the global subscriber.
    ///
    /// Records go to stderr so that stdout only carries command output.
    /// `RUST_LOG` takes precedence over `config.level`.
    pub fn init(config: &LogConfig) -> Result<Self> {
        let default_level = parse_log_level(&config.level)?;
        let env_filter = || {
            EnvFilter::builder()
                .with_default_directive(default_level.into())
                .from_env_lossy()
        };

        let stderr_layer = match config.format {
            LogFormat::Json => tracing_subscriber::fmt::layer()
                .json()
                .with_writer(io::stderr)
                .with_current_span(true)
                .with_target(true)
                .with_filter(env_filter())
                .boxed(),
            LogFormat::Pretty => tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .with_filter(env_filter())
                .boxed(),
        };

        let (file_layer, guard) = match config.log_dir {
            Some(ref log_dir) => {
                let (non_blocking_file, guard) =
                    tracing_appender::non_blocking(rolling::never(log_dir, LOG_FILE_NAME));
                let layer = tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(non_blocking_file)
                    .with_ansi(false)
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_filter(env_filter());
                (Some(layer), Some(guard))
            }
            None => (None, None),
        };

        tracing_subscriber::registry()
            .with(stderr_layer)
            .with(file_layer)
            .try_init()
            .context("Failed to install tracing subscriber")?;

        tracing::debug!(
            level = %config.level,
            format = ?config.format,
            file_output = config.log_dir.is_some(),
            "logger initialized"
        );

        Ok(Self { _guard: guard })
    }
}

/// Parse log level string to Level
fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => anyhow::bail!("Invalid log level: {level}"),
    }
}

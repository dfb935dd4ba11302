use std::path::Path;

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::config::Config;

/// Project defaults, relative to the working directory
pub const DEFAULT_CONFIG_FILE: &str = "curriculum_default.yml";

/// Local overrides, relative to the working directory
pub const LOCAL_CONFIG_FILE: &str = "local/curriculum_custom.yml";

/// Prefix of environment overrides; `__` separates nested keys
pub const ENV_PREFIX: &str = "CURRICULUM_";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Output path for {0} cannot be empty")]
    EmptyOutputPath(&'static str),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration relative to the working directory
    pub fn load() -> Result<Config> {
        Self::load_from_dir(Path::new("."))
    }

    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. `<dir>/curriculum_default.yml`
    /// 3. `<dir>/local/curriculum_custom.yml` (optional)
    /// 4. Environment variables (`CURRICULUM_*` prefix)
    ///
    /// Explicit CLI flags are applied on top by the caller.
    pub fn load_from_dir(dir: &Path) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(dir.join(DEFAULT_CONFIG_FILE)))
            .merge(Yaml::file(dir.join(LOCAL_CONFIG_FILE)))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file, still honoring environment
    /// overrides
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        anyhow::ensure!(path.is_file(), "Config file {} not found", path.display());

        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .with_context(|| format!("Failed to load config from {}", path.display()))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        if config
            .run
            .output_metrics
            .as_ref()
            .is_some_and(|p| p.as_os_str().is_empty())
        {
            return Err(ConfigError::EmptyOutputPath("metrics"));
        }
        if config
            .run
            .output_suggestion
            .as_ref()
            .is_some_and(|p| p.as_os_str().is_empty())
        {
            return Err(ConfigError::EmptyOutputPath("suggestion"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn no_env<F: FnOnce()>(f: F) {
        temp_env::with_vars_unset(
            [
                "CURRICULUM_RUN__MUTE_METRICS",
                "CURRICULUM_RUN__MUTE_TRAINER_STATE",
                "CURRICULUM_LOGGING__LEVEL",
            ],
            f,
        );
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "pretty");
        assert!(!config.run.mute_metrics);
        assert!(config.run.output_suggestion.is_none());
        ConfigLoader::validate(&config).expect("Default config should be valid");
    }

    #[test]
    fn test_yaml_parsing() {
        let yaml = r"
run:
  mute_metrics: true
  output_suggestion: /tmp/out
logging:
  level: debug
  format: json
";

        let config: Config = serde_yaml::from_str(yaml).expect("YAML should parse");

        assert!(config.run.mute_metrics);
        assert!(!config.run.mute_trainer_state);
        assert_eq!(config.run.output_suggestion, Some(PathBuf::from("/tmp/out")));
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "json");
        ConfigLoader::validate(&config).expect("Parsed config should be valid");
    }

    #[test]
    fn test_load_from_dir_without_files_gives_defaults() {
        let tmp = TempDir::new().unwrap();
        no_env(|| {
            let config = ConfigLoader::load_from_dir(tmp.path()).unwrap();
            assert_eq!(config.run, Config::default().run);
        });
    }

    #[test]
    fn test_local_file_overrides_default_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(DEFAULT_CONFIG_FILE),
            "run:\n  mute_metrics: true\n  output_metrics: defaults\n",
        )
        .unwrap();
        fs::create_dir_all(tmp.path().join("local")).unwrap();
        fs::write(
            tmp.path().join(LOCAL_CONFIG_FILE),
            "run:\n  output_metrics: custom\n",
        )
        .unwrap();

        no_env(|| {
            let config = ConfigLoader::load_from_dir(tmp.path()).unwrap();
            assert!(config.run.mute_metrics);
            assert_eq!(config.run.output_metrics, Some(PathBuf::from("custom")));
        });
    }

    #[test]
    fn test_env_overrides_files() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(DEFAULT_CONFIG_FILE),
            "run:\n  mute_trainer_state: false\n",
        )
        .unwrap();

        temp_env::with_var("CURRICULUM_RUN__MUTE_TRAINER_STATE", Some("true"), || {
            let config = ConfigLoader::load_from_dir(tmp.path()).unwrap();
            assert!(config.run.mute_trainer_state);
        });
    }

    #[test]
    fn test_load_from_missing_file_fails() {
        let tmp = TempDir::new().unwrap();
        assert!(ConfigLoader::load_from_file(tmp.path().join("nope.yml")).is_err());
    }

    #[test]
    fn test_load_from_file_validates() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bad.yml");
        fs::write(&path, "logging:\n  level: loud\n").unwrap();
        no_env(|| {
            let err = ConfigLoader::load_from_file(&path).unwrap_err();
            assert!(err.to_string().contains("Invalid log level"));
        });
    }

    #[test]
    fn test_validate_invalid_log_format() {
        let mut config = Config::default();
        config.logging.format = "xml".to_string();

        match ConfigLoader::validate(&config).unwrap_err() {
            ConfigError::InvalidLogFormat(format) => assert_eq!(format, "xml"),
            other => panic!("Expected InvalidLogFormat error, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_empty_output_path() {
        let mut config = Config::default();
        config.run.output_suggestion = Some(PathBuf::new());
        assert!(matches!(
            ConfigLoader::validate(&config).unwrap_err(),
            ConfigError::EmptyOutputPath("suggestion")
        ));
    }
}

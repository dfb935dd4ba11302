//! Metrics computed from a session data directory.

use std::path::Path;

use tracing::debug;

use crate::domain::errors::{CurriculumError, CurriculumResult};
use crate::domain::models::Metrics;

/// File holding per-trial scores, as a JSON array of numbers.
pub const TRIALS_FILE: &str = "trials.json";

/// Compute metrics for one session.
///
/// `metric2_history` is the contents of [`TRIALS_FILE`] and `metric1` its
/// mean. Sessions without the file get `metric1 = 1.0` and a history of
/// `[1, 2, 3]`.
pub fn metrics_from_dataset(data_directory: &Path) -> CurriculumResult<Metrics> {
    if !data_directory.is_dir() {
        return Err(CurriculumError::DataDirectory(
            data_directory.display().to_string(),
        ));
    }

    let trials_path = data_directory.join(TRIALS_FILE);
    if !trials_path.is_file() {
        debug!(path = %trials_path.display(), "no trials file, using default metrics");
        return Ok(Metrics::new(1.0, vec![1.0, 2.0, 3.0]));
    }

    let contents =
        std::fs::read_to_string(&trials_path).map_err(|e| CurriculumError::io(&trials_path, e))?;
    let history: Vec<f64> = serde_json::from_str(&contents)
        .map_err(|e| CurriculumError::deserialization(TRIALS_FILE, e))?;

    let metric1 = mean(&history);

    debug!(trials = history.len(), metric1, "metrics computed");
    Ok(Metrics::new(metric1, history))
}

/// Mean that stays finite for finite input; each term is scaled before summing.
#[allow(clippy::cast_precision_loss)]
fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let len = values.len() as f64;
    values.iter().map(|v| v / len).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_without_trials_file() {
        let dir = TempDir::new().unwrap();
        let metrics = metrics_from_dataset(dir.path()).unwrap();
        assert_eq!(metrics, Metrics::new(1.0, vec![1.0, 2.0, 3.0]));
    }

    #[test]
    fn test_mean_of_trials() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(TRIALS_FILE), "[0.0, 1.0, 2.0, 5.0]").unwrap();
        let metrics = metrics_from_dataset(dir.path()).unwrap();
        assert!((metrics.metric1 - 2.0).abs() < f64::EPSILON);
        assert_eq!(metrics.metric2_history, vec![0.0, 1.0, 2.0, 5.0]);
    }

    #[test]
    fn test_mean_of_huge_trials_stays_finite() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(TRIALS_FILE), "[1e308, 1e308]").unwrap();
        let metrics = metrics_from_dataset(dir.path()).unwrap();
        assert_eq!(metrics.metric1, 1e308);

        let json = serde_json::to_string(&metrics).unwrap();
        let back: Metrics = serde_json::from_str(&json).unwrap();
        assert_eq!(back, metrics);
    }

    #[test]
    fn test_mean_of_opposite_extremes() {
        assert_eq!(mean(&[f64::MAX, -f64::MAX]), 0.0);
    }

    #[test]
    fn test_empty_trials() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(TRIALS_FILE), "[]").unwrap();
        let metrics = metrics_from_dataset(dir.path()).unwrap();
        assert_eq!(metrics, Metrics::new(0.0, vec![]));
    }

    #[test]
    fn test_malformed_trials() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(TRIALS_FILE), r#"{"not": "a list"}"#).unwrap();
        let err = metrics_from_dataset(dir.path()).unwrap_err();
        assert!(matches!(err, CurriculumError::Deserialization { .. }));
    }

    #[test]
    fn test_missing_directory() {
        let dir = TempDir::new().unwrap();
        let err = metrics_from_dataset(&dir.path().join("missing")).unwrap_err();
        assert!(matches!(err, CurriculumError::DataDirectory(_)));
    }
}

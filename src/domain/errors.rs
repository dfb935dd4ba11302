//! Domain errors for curriculum definition and evaluation.

use thiserror::Error;

/// A trainer state or curriculum definition that is inconsistent with the
/// curriculum it is used against.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("Stage '{0}' is not part of curriculum")]
    UnknownStage(String),

    #[error("Stage '{0}' is already registered with a different definition")]
    ConflictingStage(String),

    #[error("Policy '{policy}' is not declared on stage '{stage}'")]
    UndeclaredPolicy { stage: String, policy: String },

    #[error("Policy '{policy}' is listed more than once for stage '{stage}'")]
    DuplicatePolicy { stage: String, policy: String },

    #[error("Task '{name}' version {version} is not allowed by this curriculum")]
    TaskNotAllowed { name: String, version: String },

    #[error("Stage '{stage}' runs task '{expected}' but trainer state carries '{actual}'")]
    TaskMismatch {
        stage: String,
        expected: String,
        actual: String,
    },

    #[error("Transition '{transition}' is already registered on stage '{stage}'")]
    DuplicateTransition { stage: String, transition: String },

    #[error("Trainer state belongs to curriculum {actual}, expected {expected}")]
    CurriculumMismatch { expected: String, actual: String },
}

/// Errors raised while building, evaluating or feeding a curriculum.
#[derive(Debug, Error)]
pub enum CurriculumError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Stage '{0}' does not declare a metrics provider")]
    MetricsProviderNotFound(String),

    #[error("Failed to deserialize {what}: {source}")]
    Deserialization {
        what: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize {what}: {source}")]
    Serialization {
        what: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid extra argument: '{0}'. Parameters must be in the form of 'k1:v1, k2:v2'")]
    InvalidArgument(String),

    #[error("Data directory {0} does not exist or is not a directory")]
    DataDirectory(String),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl CurriculumError {
    /// Whether this error reports an inconsistent curriculum or trainer state.
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    pub(crate) fn deserialization(what: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Deserialization {
            what: what.into(),
            source,
        }
    }

    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }
}

pub type CurriculumResult<T> = Result<T, CurriculumError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_error_converts() {
        let err: CurriculumError = ConfigurationError::UnknownStage("stage_z".to_string()).into();
        assert!(err.is_configuration());
        assert_eq!(
            err.to_string(),
            "Configuration error: Stage 'stage_z' is not part of curriculum"
        );
    }

    #[test]
    fn test_invalid_argument_message_names_token() {
        let err = CurriculumError::InvalidArgument("k1".to_string());
        assert!(err.to_string().contains("'k1'"));
        assert!(!err.is_configuration());
    }
}

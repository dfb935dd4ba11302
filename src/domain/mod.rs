//! Domain layer: the curriculum model
//!
//! Tasks, metrics, policies, stages, transitions, the curriculum graph and
//! the trainer state. Everything here is plain data plus `fn` pointers.

pub mod errors;
pub mod models;

pub use errors::{ConfigurationError, CurriculumError, CurriculumResult};

/// Version of the curriculum definition model.
pub const DSL_VERSION: &str = "0.1.0";

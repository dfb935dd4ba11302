//! Behavior Curriculum - stage/policy curricula and the trainer that walks them
//!
//! A curriculum is a directed graph of stages. Each stage runs a task with a
//! set of parameters; policies rewrite those parameters from session metrics,
//! and guarded transitions move a subject from stage to stage. The
//! [`Trainer`] evaluates one step of that state machine, turning a
//! [`TrainerState`] and fresh [`Metrics`] into the suggested next state.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): the curriculum model
//! - **Service Layer** (`services`): trainer evaluation
//! - **Template** (`template`): the concrete curriculum shipped with this crate
//! - **Infrastructure Layer** (`infrastructure`): configuration, logging, files
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```
//! use behavior_curriculum::template;
//!
//! let trainer = template::build_trainer().unwrap();
//! let state = template::demo_trainer_state(&trainer).unwrap();
//! let next = trainer.evaluate(&state, &template::demo_metrics()).unwrap();
//! assert_eq!(next.stage, "stage_b");
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;
pub mod template;

// Re-export commonly used types for convenience
pub use domain::models::{
    Config, Curriculum, Metrics, Mode, Policy, PolicyTransition, Stage, StageTransition, Task,
    TaskParameters, TrainerState,
};
pub use domain::{ConfigurationError, CurriculumError, CurriculumResult, DSL_VERSION};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{Evaluation, Trainer};

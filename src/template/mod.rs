//! The template curriculum.
//!
//! Two stages and a single transition from the first to the second. While
//! `stage_a` is active its policy keeps the task mode in step with
//! `metric1`.
//!
//! Naming convention used here:
//! - policies are named after what they do (`set_mode_from_metric1`)
//! - stage transitions are named `<from>_to_<to>`
//! - stages are named `stage_<letter>`

pub mod metrics;
pub mod policies;
pub mod transitions;

use crate::domain::errors::ConfigurationError;
use crate::domain::models::{
    Curriculum, Metrics, Mode, Stage, Task, TaskParameters, TaskVariant, TrainerState,
    TASK_VERSION,
};
use crate::services::Trainer;

pub use metrics::metrics_from_dataset;
pub use policies::{IDENTITY, SET_MODE_FROM_METRIC1};
pub use transitions::STAGE_A_TO_STAGE_B;

/// Name of the template curriculum.
pub const CURRICULUM_NAME: &str = "TemplateCurriculum";

/// Version of the template curriculum.
pub const CURRICULUM_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Task variants the template curriculum accepts.
pub fn allowed_tasks() -> Vec<TaskVariant> {
    vec![
        TaskVariant::new("TemplateTask", TASK_VERSION),
        TaskVariant::new("AnotherTask", TASK_VERSION),
    ]
}

pub fn stage_a() -> Stage {
    Stage::new("stage_a", Task::template(TaskParameters::new(Mode::Foo)))
        .with_start_policies(vec![SET_MODE_FROM_METRIC1])
        .with_metrics_provider(metrics_from_dataset)
}

pub fn stage_b() -> Stage {
    Stage::new("stage_b", Task::template(TaskParameters::new(Mode::Bar)))
        .with_metrics_provider(metrics_from_dataset)
}

/// Build the template curriculum.
pub fn build_curriculum() -> Result<Curriculum, ConfigurationError> {
    let mut curriculum = Curriculum::new(CURRICULUM_NAME, CURRICULUM_VERSION, allowed_tasks());
    curriculum.add_stage_transition(&stage_a(), &stage_b(), STAGE_A_TO_STAGE_B)?;
    Ok(curriculum)
}

/// A trainer over the template curriculum.
pub fn build_trainer() -> Result<Trainer, ConfigurationError> {
    build_curriculum().map(Trainer::new)
}

/// State of a subject that just entered `stage_a`.
pub fn demo_trainer_state(trainer: &Trainer) -> Result<TrainerState, ConfigurationError> {
    trainer.create_trainer_state(&stage_a(), true, &[SET_MODE_FROM_METRIC1])
}

/// Metrics used by `curriculum run --demo`. Changing `metric1` changes the
/// suggestion.
pub fn demo_metrics() -> Metrics {
    Metrics::new(50.0, vec![1.0, 2.0, 3.0])
}

//! Trainer: advances trainer states through a curriculum.
//!
//! One evaluation step:
//!
//! 1. validate the state against the curriculum,
//! 2. leave off-curriculum states untouched,
//! 3. fold the active policies over the task parameters,
//! 4. take the first outgoing stage transition whose predicate holds, or
//!    else the first matching policy transition of the current stage.
//!
//! Moving to another stage resets the task to the destination's declared
//! task and activates its start policies.

use std::path::Path;

use tracing::{debug, info, instrument};

use crate::domain::errors::{ConfigurationError, CurriculumError, CurriculumResult};
use crate::domain::models::transition::first_firing;
use crate::domain::models::{
    apply_policies, Curriculum, Metrics, MetricsProvider, Policy, Stage, Task, TrainerState,
};

/// Outcome of one evaluation step.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// The suggested next state
    pub state: TrainerState,

    /// Task of the source stage after applying the active policies
    pub updated_task: Task,

    /// Stage transition that fired, if any
    pub stage_transition: Option<String>,

    /// Policy transition that fired, if any
    pub policy_transition: Option<String>,
}

impl Evaluation {
    fn unchanged(state: &TrainerState) -> Self {
        Self {
            state: state.clone(),
            updated_task: state.task.clone(),
            stage_transition: None,
            policy_transition: None,
        }
    }
}

/// Evaluates trainer states against a single curriculum.
#[derive(Debug, Clone)]
pub struct Trainer {
    curriculum: Curriculum,
}

impl Trainer {
    pub const fn new(curriculum: Curriculum) -> Self {
        Self { curriculum }
    }

    pub const fn curriculum(&self) -> &Curriculum {
        &self.curriculum
    }

    /// Build the initial state of a subject entering `stage`.
    pub fn create_trainer_state(
        &self,
        stage: &Stage,
        is_on_curriculum: bool,
        active_policies: &[Policy],
    ) -> Result<TrainerState, ConfigurationError> {
        if !self.curriculum.contains(stage) {
            return Err(ConfigurationError::UnknownStage(stage.name().to_string()));
        }
        let names: Vec<&str> = active_policies.iter().map(Policy::name).collect();
        resolve_policies(stage, &names)?;

        Ok(TrainerState {
            curriculum: self.curriculum.id().clone(),
            stage: stage.name().to_string(),
            task: stage.task().clone(),
            is_on_curriculum,
            active_policies: names.into_iter().map(str::to_string).collect(),
        })
    }

    /// Check that `state` is consistent with this trainer's curriculum and
    /// return its stage together with its resolved active policies.
    pub fn validate(&self, state: &TrainerState) -> Result<(&Stage, Vec<Policy>), ConfigurationError> {
        let expected = self.curriculum.id();
        if &state.curriculum != expected {
            return Err(ConfigurationError::CurriculumMismatch {
                expected: expected.to_string(),
                actual: state.curriculum.to_string(),
            });
        }

        let stage = self
            .curriculum
            .stage(&state.stage)
            .ok_or_else(|| ConfigurationError::UnknownStage(state.stage.clone()))?;

        if !self.curriculum.is_task_allowed(&state.task) {
            let variant = state.task.variant();
            return Err(ConfigurationError::TaskNotAllowed {
                name: variant.name,
                version: variant.version,
            });
        }
        if state.task.variant() != stage.task().variant() {
            return Err(ConfigurationError::TaskMismatch {
                stage: stage.name().to_string(),
                expected: stage.task().variant().to_string(),
                actual: state.task.variant().to_string(),
            });
        }

        let policies = resolve_policies(stage, &state.active_policy_names())?;
        Ok((stage, policies))
    }

    /// Evaluate one step and return the suggested next state.
    pub fn evaluate(&self, state: &TrainerState, metrics: &Metrics) -> CurriculumResult<TrainerState> {
        self.evaluate_with_trace(state, metrics)
            .map(|evaluation| evaluation.state)
    }

    /// Evaluate one step, keeping the intermediate results.
    #[instrument(skip_all, fields(stage = %state.stage, on_curriculum = state.is_on_curriculum))]
    pub fn evaluate_with_trace(
        &self,
        state: &TrainerState,
        metrics: &Metrics,
    ) -> CurriculumResult<Evaluation> {
        let (stage, policies) = self.validate(state)?;

        if !state.is_on_curriculum {
            debug!("subject is off curriculum, state left unchanged");
            return Ok(Evaluation::unchanged(state));
        }

        let parameters = apply_policies(&policies, metrics, state.task.parameters().clone());
        let updated_task = state.task.with_parameters(parameters);

        let edges = self.curriculum.stage_transitions(stage.name());
        if let Some(edge) = first_firing(edges, metrics, |edge, m| edge.transition.fires(m)) {
            let destination = self
                .curriculum
                .stage(&edge.destination)
                .ok_or_else(|| ConfigurationError::UnknownStage(edge.destination.clone()))?;

            info!(
                from = stage.name(),
                to = destination.name(),
                transition = edge.transition.name(),
                "stage transition"
            );

            return Ok(Evaluation {
                state: TrainerState {
                    curriculum: state.curriculum.clone(),
                    stage: destination.name().to_string(),
                    task: destination.task().clone(),
                    is_on_curriculum: state.is_on_curriculum,
                    active_policies: destination
                        .start_policies()
                        .iter()
                        .map(|policy| policy.name().to_string())
                        .collect(),
                },
                updated_task,
                stage_transition: Some(edge.transition.name().to_string()),
                policy_transition: None,
            });
        }

        let active = state.active_policy_names();
        let policy_transition = stage
            .policy_transitions()
            .iter()
            .find(|pt| pt.starts_from(&active) && pt.fires(metrics));

        let active_policies = policy_transition.map_or_else(
            || state.active_policies.clone(),
            |pt| {
                info!(stage = stage.name(), transition = pt.name(), "policy transition");
                pt.to_policies()
                    .iter()
                    .map(|policy| policy.name().to_string())
                    .collect()
            },
        );

        Ok(Evaluation {
            state: TrainerState {
                curriculum: state.curriculum.clone(),
                stage: state.stage.clone(),
                task: updated_task.clone(),
                is_on_curriculum: state.is_on_curriculum,
                active_policies,
            },
            updated_task,
            stage_transition: None,
            policy_transition: policy_transition.map(|pt| pt.name().to_string()),
        })
    }

    /// Metrics provider declared by the state's current stage.
    pub fn metrics_provider(&self, state: &TrainerState) -> CurriculumResult<MetricsProvider> {
        let stage = self
            .curriculum
            .stage(&state.stage)
            .ok_or_else(|| ConfigurationError::UnknownStage(state.stage.clone()))?;
        stage
            .metrics_provider()
            .ok_or_else(|| CurriculumError::MetricsProviderNotFound(stage.name().to_string()))
    }

    /// Compute metrics for `state` from a session data directory.
    pub fn compute_metrics(
        &self,
        state: &TrainerState,
        data_directory: &Path,
    ) -> CurriculumResult<Metrics> {
        let provider = self.metrics_provider(state)?;
        debug!(stage = %state.stage, data_directory = %data_directory.display(), "computing metrics");
        provider(data_directory)
    }
}

/// Resolve policy names against the policies declared on `stage`.
fn resolve_policies(stage: &Stage, names: &[&str]) -> Result<Vec<Policy>, ConfigurationError> {
    let mut resolved: Vec<Policy> = Vec::with_capacity(names.len());
    for name in names {
        let policy = stage
            .policy(name)
            .ok_or_else(|| ConfigurationError::UndeclaredPolicy {
                stage: stage.name().to_string(),
                policy: (*name).to_string(),
            })?;
        if resolved.contains(&policy) {
            return Err(ConfigurationError::DuplicatePolicy {
                stage: stage.name().to_string(),
                policy: (*name).to_string(),
            });
        }
        resolved.push(policy);
    }
    Ok(resolved)
}

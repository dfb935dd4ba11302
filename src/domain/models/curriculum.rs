//! The curriculum graph: stages, the transitions between them, and the task
//! variants the curriculum accepts.
//!
//! ```text
//! stage_a ──[stage_a_to_stage_b]──▶ stage_b
//! ```
//!
//! Outgoing transitions of a stage keep their registration order, which is
//! the order the trainer evaluates them in.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::stage::Stage;
use super::task::{Task, TaskVariant};
use super::transition::StageTransition;
use crate::domain::errors::ConfigurationError;

/// Name and version identifying a curriculum.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CurriculumId {
    pub name: String,
    pub version: String,
}

impl fmt::Display for CurriculumId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.version)
    }
}

/// An outgoing edge of a stage.
#[derive(Debug, Clone)]
pub struct StageEdge {
    pub destination: String,
    pub transition: StageTransition,
}

/// Directed graph of stages guarded by metric predicates.
#[derive(Debug, Clone)]
pub struct Curriculum {
    id: CurriculumId,
    allowed_tasks: Vec<TaskVariant>,
    stages: Vec<Stage>,
    transitions: HashMap<String, Vec<StageEdge>>,
}

impl Curriculum {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        allowed_tasks: Vec<TaskVariant>,
    ) -> Self {
        Self {
            id: CurriculumId {
                name: name.into(),
                version: version.into(),
            },
            allowed_tasks,
            stages: Vec::new(),
            transitions: HashMap::new(),
        }
    }

    pub const fn id(&self) -> &CurriculumId {
        &self.id
    }

    pub fn allowed_tasks(&self) -> &[TaskVariant] {
        &self.allowed_tasks
    }

    pub fn is_task_allowed(&self, task: &Task) -> bool {
        self.allowed_tasks.contains(&task.variant())
    }

    /// Register a stage.
    ///
    /// Registering a stage whose name is already taken is a no-op when the
    /// definitions match and an error otherwise.
    pub fn add_stage(&mut self, stage: Stage) -> Result<(), ConfigurationError> {
        if let Some(existing) = self.stage(stage.name()) {
            if existing.same_definition(&stage) {
                return Ok(());
            }
            return Err(ConfigurationError::ConflictingStage(stage.name().to_string()));
        }

        if !self.is_task_allowed(stage.task()) {
            let variant = stage.task().variant();
            return Err(ConfigurationError::TaskNotAllowed {
                name: variant.name,
                version: variant.version,
            });
        }

        let mut seen: Vec<&str> = Vec::new();
        for policy in stage.start_policies() {
            if seen.contains(&policy.name()) {
                return Err(ConfigurationError::DuplicatePolicy {
                    stage: stage.name().to_string(),
                    policy: policy.name().to_string(),
                });
            }
            seen.push(policy.name());
        }

        tracing::debug!(curriculum = %self.id, stage = stage.name(), "stage registered");
        self.stages.push(stage);
        Ok(())
    }

    /// Register both stages (if needed) and a guarded edge between them.
    pub fn add_stage_transition(
        &mut self,
        from: &Stage,
        to: &Stage,
        transition: StageTransition,
    ) -> Result<(), ConfigurationError> {
        self.add_stage(from.clone())?;
        self.add_stage(to.clone())?;

        let edges = self.transitions.entry(from.name().to_string()).or_default();
        if edges
            .iter()
            .any(|edge| edge.transition.name() == transition.name())
        {
            return Err(ConfigurationError::DuplicateTransition {
                stage: from.name().to_string(),
                transition: transition.name().to_string(),
            });
        }

        tracing::debug!(
            curriculum = %self.id,
            from = from.name(),
            to = to.name(),
            transition = transition.name(),
            "stage transition registered"
        );
        edges.push(StageEdge {
            destination: to.name().to_string(),
            transition,
        });
        Ok(())
    }

    pub fn stage(&self, name: &str) -> Option<&Stage> {
        self.stages.iter().find(|stage| stage.name() == name)
    }

    /// Stages in registration order.
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Whether `stage` is registered here with the same definition.
    pub fn contains(&self, stage: &Stage) -> bool {
        self.stage(stage.name())
            .is_some_and(|existing| existing.same_definition(stage))
    }

    /// Outgoing edges of `stage_name`, in evaluation order.
    pub fn stage_transitions(&self, stage_name: &str) -> &[StageEdge] {
        match self.transitions.get(stage_name) {
            Some(edges) => edges,
            None => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::metrics::Metrics;
    use crate::domain::models::policy::{identity_policy, Policy};
    use crate::domain::models::task::{Mode, TaskParameters, TASK_VERSION};

    fn always(_: &Metrics) -> bool {
        true
    }

    fn empty_curriculum() -> Curriculum {
        Curriculum::new(
            "TestCurriculum",
            "1.0.0",
            vec![TaskVariant::new("TemplateTask", TASK_VERSION)],
        )
    }

    fn stage(name: &str, mode: Mode) -> Stage {
        Stage::new(name, Task::template(TaskParameters::new(mode)))
    }

    #[test]
    fn test_add_stage_transition_registers_both_stages() {
        let mut curriculum = empty_curriculum();
        let a = stage("a", Mode::Foo);
        let b = stage("b", Mode::Bar);
        curriculum
            .add_stage_transition(&a, &b, StageTransition::new("a_to_b", always))
            .unwrap();

        assert_eq!(curriculum.stages().len(), 2);
        assert!(curriculum.contains(&a));
        assert!(curriculum.contains(&b));
        let edges = curriculum.stage_transitions("a");
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].destination, "b");
        assert!(curriculum.stage_transitions("b").is_empty());
    }

    #[test]
    fn test_transitions_keep_registration_order() {
        let mut curriculum = empty_curriculum();
        let a = stage("a", Mode::Foo);
        let b = stage("b", Mode::Bar);
        let c = stage("c", Mode::Baz);
        curriculum
            .add_stage_transition(&a, &c, StageTransition::new("a_to_c", always))
            .unwrap();
        curriculum
            .add_stage_transition(&a, &b, StageTransition::new("a_to_b", always))
            .unwrap();

        let destinations: Vec<_> = curriculum
            .stage_transitions("a")
            .iter()
            .map(|edge| edge.destination.as_str())
            .collect();
        assert_eq!(destinations, vec!["c", "b"]);
    }

    #[test]
    fn test_conflicting_stage_is_rejected() {
        let mut curriculum = empty_curriculum();
        curriculum.add_stage(stage("a", Mode::Foo)).unwrap();
        curriculum.add_stage(stage("a", Mode::Foo)).unwrap();
        let err = curriculum.add_stage(stage("a", Mode::Bar)).unwrap_err();
        assert_eq!(err, ConfigurationError::ConflictingStage("a".to_string()));
    }

    #[test]
    fn test_disallowed_task_is_rejected() {
        let mut curriculum = empty_curriculum();
        let err = curriculum
            .add_stage(Stage::new("x", Task::another(TaskParameters::new(Mode::Foo))))
            .unwrap_err();
        assert!(matches!(err, ConfigurationError::TaskNotAllowed { ref name, .. } if name == "AnotherTask"));
    }

    #[test]
    fn test_duplicate_start_policy_is_rejected() {
        let mut curriculum = empty_curriculum();
        let p = Policy::new("p", identity_policy);
        let err = curriculum
            .add_stage(stage("a", Mode::Foo).with_start_policies(vec![p, p]))
            .unwrap_err();
        assert!(matches!(err, ConfigurationError::DuplicatePolicy { .. }));
    }

    #[test]
    fn test_duplicate_transition_name_is_rejected() {
        let mut curriculum = empty_curriculum();
        let a = stage("a", Mode::Foo);
        let b = stage("b", Mode::Bar);
        curriculum
            .add_stage_transition(&a, &b, StageTransition::new("a_to_b", always))
            .unwrap();
        let err = curriculum
            .add_stage_transition(&a, &b, StageTransition::new("a_to_b", always))
            .unwrap_err();
        assert!(matches!(err, ConfigurationError::DuplicateTransition { .. }));
    }
}

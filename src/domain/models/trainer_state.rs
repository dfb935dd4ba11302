//! Trainer state: the persisted unit of curriculum progress.
//!
//! A trainer state refers to its stage and policies by name. It is never
//! mutated by evaluation; the trainer returns a new state instead.

use serde::{Deserialize, Serialize};

use super::curriculum::CurriculumId;
use super::task::Task;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainerState {
    /// Curriculum this state was created by
    pub curriculum: CurriculumId,

    /// Name of the current stage
    pub stage: String,

    /// Task to run next, with policy-derived parameters
    pub task: Task,

    /// Off-curriculum subjects are never advanced
    pub is_on_curriculum: bool,

    /// Names of the active policies, in application order
    #[serde(default)]
    pub active_policies: Vec<String>,
}

impl TrainerState {
    /// Active policy names as string slices.
    pub fn active_policy_names(&self) -> Vec<&str> {
        self.active_policies.iter().map(String::as_str).collect()
    }
}

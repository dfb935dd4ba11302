//! Stage transition predicates.

use crate::domain::models::{Metrics, StageTransition};

pub const STAGE_A_TO_STAGE_B: StageTransition =
    StageTransition::new("stage_a_to_stage_b", stage_a_to_stage_b);

pub fn stage_a_to_stage_b(metrics: &Metrics) -> bool {
    metrics.metric1 > 1.0
}

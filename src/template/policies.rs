//! Policies that update task parameters from metrics.

use crate::domain::models::{identity_policy, Metrics, Mode, Policy, TaskParameters};

/// Does nothing.
pub const IDENTITY: Policy = Policy::new("identity", identity_policy);

/// Picks the task mode from `metric1`.
pub const SET_MODE_FROM_METRIC1: Policy = Policy::new("set_mode_from_metric1", set_mode_from_metric1);

/// `metric1 < 0` → foo, `0 <= metric1 < 0.5` → bar, anything else → baz.
pub fn set_mode_from_metric1(metrics: &Metrics, mut parameters: TaskParameters) -> TaskParameters {
    parameters.mode = if metrics.metric1 < 0.0 {
        Mode::Foo
    } else if (0.0..0.5).contains(&metrics.metric1) {
        Mode::Bar
    } else {
        Mode::Baz
    };
    parameters
}

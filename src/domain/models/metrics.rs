//! Session metrics that drive policies and stage transitions.

use serde::{Deserialize, Serialize};

/// Measurements computed from one session's data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub metric1: f64,

    #[serde(default)]
    pub metric2_history: Vec<f64>,
}

impl Metrics {
    pub const fn new(metric1: f64, metric2_history: Vec<f64>) -> Self {
        Self {
            metric1,
            metric2_history,
        }
    }
}

//! Policies: named pure functions that rewrite task parameters from metrics.

use std::fmt;

use super::metrics::Metrics;
use super::task::TaskParameters;

/// Signature every policy rule implements.
pub type PolicyRule = fn(&Metrics, TaskParameters) -> TaskParameters;

/// A named policy rule.
///
/// Policies are identified by name: two policies with the same name are the
/// same policy, and the name is what a trainer state persists.
#[derive(Clone, Copy)]
pub struct Policy {
    name: &'static str,
    rule: PolicyRule,
}

impl Policy {
    pub const fn new(name: &'static str, rule: PolicyRule) -> Self {
        Self { name, rule }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Run the rule.
    pub fn apply(&self, metrics: &Metrics, parameters: TaskParameters) -> TaskParameters {
        (self.rule)(metrics, parameters)
    }
}

impl PartialEq for Policy {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Policy {}

impl fmt::Debug for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Policy").field(&self.name).finish()
    }
}

/// Policy that returns its input unchanged.
pub fn identity_policy(_metrics: &Metrics, parameters: TaskParameters) -> TaskParameters {
    parameters
}

/// Fold `policies` over `parameters` in order; each policy sees the output of
/// the previous one.
pub fn apply_policies<'a, I>(policies: I, metrics: &Metrics, parameters: TaskParameters) -> TaskParameters
where
    I: IntoIterator<Item = &'a Policy>,
{
    policies
        .into_iter()
        .fold(parameters, |acc, policy| policy.apply(metrics, acc))
}

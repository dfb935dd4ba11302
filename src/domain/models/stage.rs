//! Stages: a task configuration plus the policies active while it runs.

use std::fmt;
use std::path::Path;

use super::metrics::Metrics;
use super::policy::Policy;
use super::task::Task;
use super::transition::PolicyTransition;
use crate::domain::errors::CurriculumResult;

/// Computes [`Metrics`] from a session data directory.
pub type MetricsProvider = fn(&Path) -> CurriculumResult<Metrics>;

/// A named phase of training.
#[derive(Clone)]
pub struct Stage {
    name: String,
    task: Task,
    start_policies: Vec<Policy>,
    metrics_provider: Option<MetricsProvider>,
    policy_transitions: Vec<PolicyTransition>,
}

impl Stage {
    pub fn new(name: impl Into<String>, task: Task) -> Self {
        Self {
            name: name.into(),
            task,
            start_policies: Vec::new(),
            metrics_provider: None,
            policy_transitions: Vec::new(),
        }
    }

    /// Policies active when a subject enters this stage.
    #[must_use]
    pub fn with_start_policies(mut self, policies: Vec<Policy>) -> Self {
        self.start_policies = policies;
        self
    }

    #[must_use]
    pub fn with_metrics_provider(mut self, provider: MetricsProvider) -> Self {
        self.metrics_provider = Some(provider);
        self
    }

    /// Append a policy transition. Transitions are tried in the order added.
    #[must_use]
    pub fn with_policy_transition(mut self, transition: PolicyTransition) -> Self {
        self.policy_transitions.push(transition);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn task(&self) -> &Task {
        &self.task
    }

    pub fn start_policies(&self) -> &[Policy] {
        &self.start_policies
    }

    pub const fn metrics_provider(&self) -> Option<MetricsProvider> {
        self.metrics_provider
    }

    pub fn policy_transitions(&self) -> &[PolicyTransition] {
        &self.policy_transitions
    }

    /// Every policy this stage knows about: start policies first, then those
    /// introduced by policy transitions, without repeats.
    pub fn declared_policies(&self) -> Vec<Policy> {
        let mut declared: Vec<Policy> = Vec::new();
        let from_transitions = self
            .policy_transitions
            .iter()
            .flat_map(|pt| pt.from_policies().iter().chain(pt.to_policies()));
        for policy in self.start_policies.iter().chain(from_transitions) {
            if !declared.contains(policy) {
                declared.push(*policy);
            }
        }
        declared
    }

    /// Look up a declared policy by name.
    pub fn policy(&self, name: &str) -> Option<Policy> {
        self.declared_policies()
            .into_iter()
            .find(|policy| policy.name() == name)
    }

    fn start_policy_names(&self) -> Vec<&'static str> {
        self.start_policies.iter().map(Policy::name).collect()
    }

    fn policy_transition_names(&self) -> Vec<&'static str> {
        self.policy_transitions.iter().map(PolicyTransition::name).collect()
    }

    /// Structural identity used when the same stage is registered twice.
    ///
    /// Function pointers are not compared; rules are identified by name.
    pub fn same_definition(&self, other: &Self) -> bool {
        self.name == other.name
            && self.task == other.task
            && self.start_policy_names() == other.start_policy_names()
            && self.metrics_provider.is_some() == other.metrics_provider.is_some()
            && self.policy_transition_names() == other.policy_transition_names()
    }
}

impl fmt::Debug for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stage")
            .field("name", &self.name)
            .field("task", &self.task)
            .field("start_policies", &self.start_policies)
            .field("has_metrics_provider", &self.metrics_provider.is_some())
            .field("policy_transitions", &self.policy_transitions)
            .finish()
    }
}

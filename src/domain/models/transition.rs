//! Guarded transitions between stages and between policy sets.

use std::fmt;

use super::metrics::Metrics;
use super::policy::Policy;

/// Predicate guarding a transition. Must be total over [`Metrics`].
pub type TransitionRule = fn(&Metrics) -> bool;

/// Guard on an edge from one stage to another.
#[derive(Clone, Copy)]
pub struct StageTransition {
    name: &'static str,
    rule: TransitionRule,
}

impl StageTransition {
    pub const fn new(name: &'static str, rule: TransitionRule) -> Self {
        Self { name, rule }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub fn fires(&self, metrics: &Metrics) -> bool {
        (self.rule)(metrics)
    }
}

impl fmt::Debug for StageTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("StageTransition").field(&self.name).finish()
    }
}

/// Guarded edge between two policy sets within one stage.
#[derive(Clone)]
pub struct PolicyTransition {
    name: &'static str,
    from: Vec<Policy>,
    to: Vec<Policy>,
    rule: TransitionRule,
}

impl PolicyTransition {
    pub fn new(name: &'static str, from: Vec<Policy>, to: Vec<Policy>, rule: TransitionRule) -> Self {
        Self {
            name,
            from,
            to,
            rule,
        }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub fn from_policies(&self) -> &[Policy] {
        &self.from
    }

    pub fn to_policies(&self) -> &[Policy] {
        &self.to
    }

    /// Whether `active` is this transition's source set, ignoring order.
    pub fn starts_from(&self, active: &[&str]) -> bool {
        self.from.len() == active.len()
            && self.from.iter().all(|policy| active.contains(&policy.name()))
    }

    pub fn fires(&self, metrics: &Metrics) -> bool {
        (self.rule)(metrics)
    }
}

impl fmt::Debug for PolicyTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PolicyTransition")
            .field("name", &self.name)
            .field("from", &self.from)
            .field("to", &self.to)
            .finish_non_exhaustive()
    }
}

/// First transition in `transitions` whose predicate holds.
pub fn first_firing<'a, T, F>(transitions: &'a [T], metrics: &Metrics, fires: F) -> Option<&'a T>
where
    F: Fn(&T, &Metrics) -> bool,
{
    transitions.iter().find(|transition| fires(transition, metrics))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::policy::identity_policy;

    fn above_one(m: &Metrics) -> bool {
        m.metric1 > 1.0
    }

    fn above_ten(m: &Metrics) -> bool {
        m.metric1 > 10.0
    }

    #[test]
    fn test_stage_transition_fires() {
        let st = StageTransition::new("above_one", above_one);
        assert!(st.fires(&Metrics::new(1.5, vec![])));
        assert!(!st.fires(&Metrics::new(1.0, vec![])));
    }

    #[test]
    fn test_first_firing_prefers_declaration_order() {
        let transitions = [
            StageTransition::new("above_one", above_one),
            StageTransition::new("above_ten", above_ten),
        ];
        let hit = first_firing(&transitions, &Metrics::new(50.0, vec![]), StageTransition::fires);
        assert_eq!(hit.map(StageTransition::name), Some("above_one"));

        let none = first_firing(&transitions, &Metrics::new(0.0, vec![]), StageTransition::fires);
        assert!(none.is_none());
    }

    #[test]
    fn test_policy_transition_source_set_ignores_order() {
        let a = Policy::new("a", identity_policy);
        let b = Policy::new("b", identity_policy);
        let pt = PolicyTransition::new("pt", vec![a, b], vec![a], above_one);
        assert!(pt.starts_from(&["b", "a"]));
        assert!(!pt.starts_from(&["a"]));
        assert!(!pt.starts_from(&["a", "c"]));
    }
}

//! Bounded record of accepted transitions.
//!
//! Only events that produced a state change or an outcome other than an
//! error are recorded; ignored events leave no trace.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Record of a single accepted transition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateTransition {
    /// Name of the state before the event.
    pub from: String,
    /// Name of the state after the event.
    pub to: String,
    /// Name of the outcome that was emitted.
    pub outcome: String,
    /// When the transition occurred.
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of transitions, oldest first, holding at most `limit`
/// entries.
///
/// # Example
///
/// ```rust
/// use pagekit::core::{StateHistory, StateTransition};
/// use chrono::Utc;
///
/// let history = StateHistory::with_limit(2);
/// let history = history.record(StateTransition {
///     from: "Inactive".into(),
///     to: "Active".into(),
///     outcome: "Activated".into(),
///     timestamp: Utc::now(),
/// });
/// assert_eq!(history.transitions().count(), 1);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StateHistory {
    limit: usize,
    transitions: VecDeque<StateTransition>,
}

impl Default for StateHistory {
    fn default() -> Self {
        Self::with_limit(64)
    }
}

impl StateHistory {
    /// Empty history keeping at most `limit` transitions.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit,
            transitions: VecDeque::with_capacity(limit.min(64)),
        }
    }

    /// Record a transition, returning the new history.
    ///
    /// The oldest entry is dropped once the limit is reached.
    pub fn record(mut self, transition: StateTransition) -> Self {
        if self.limit == 0 {
            return self;
        }
        while self.transitions.len() >= self.limit {
            self.transitions.pop_front();
        }
        self.transitions.push_back(transition);
        self
    }

    /// Recorded transitions in order.
    pub fn transitions(&self) -> impl Iterator<Item = &StateTransition> {
        self.transitions.iter()
    }

    pub fn last(&self) -> Option<&StateTransition> {
        self.transitions.back()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// Path of state names traversed: the first `from`, then every `to`.
    pub fn get_path(&self) -> Vec<&str> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.front() {
            path.push(first.from.as_str());
        }
        path.extend(self.transitions.iter().map(|t| t.to.as_str()));
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transition(from: &str, to: &str, outcome: &str) -> StateTransition {
        StateTransition {
            from: from.to_string(),
            to: to.to_string(),
            outcome: outcome.to_string(),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn record_appends_in_order() {
        let history = StateHistory::with_limit(8)
            .record(transition("Inactive", "Active", "Activated"))
            .record(transition("Active", "Active", "Updated"))
            .record(transition("Active", "Inactive", "Deactivated"));

        assert_eq!(
            history.get_path(),
            vec!["Inactive", "Active", "Active", "Inactive"]
        );
        assert_eq!(history.last().unwrap().outcome, "Deactivated");
    }

    #[test]
    fn record_drops_oldest_past_limit() {
        let history = StateHistory::with_limit(2)
            .record(transition("Inactive", "Active", "Activated"))
            .record(transition("Active", "Active", "Updated"))
            .record(transition("Active", "Inactive", "Deactivated"));

        let outcomes: Vec<&str> = history.transitions().map(|t| t.outcome.as_str()).collect();
        assert_eq!(outcomes, vec!["Updated", "Deactivated"]);
    }

    #[test]
    fn zero_limit_records_nothing() {
        let history =
            StateHistory::with_limit(0).record(transition("Inactive", "Active", "Activated"));
        assert!(history.is_empty());
        assert!(history.get_path().is_empty());
    }

    #[test]
    fn history_serializes_correctly() {
        let history =
            StateHistory::with_limit(4).record(transition("Inactive", "Active", "Activated"));
        let json = serde_json::to_string(&history).unwrap();
        let restored: StateHistory = serde_json::from_str(&json).unwrap();
        assert_eq!(
            restored.transitions().collect::<Vec<_>>(),
            history.transitions().collect::<Vec<_>>()
        );
    }
}

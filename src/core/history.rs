//! Bounded record of committed transitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// What caused a transition to commit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    /// The first registered state was entered automatically.
    Activation,
    /// A caller asked for the transition.
    Explicit,
    /// The previous state's duration expired.
    Timer,
    /// A snapshot from another machine was applied.
    Replicated,
}

/// Record of a single committed transition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateTransition {
    /// The state being left, `None` for the first activation
    pub from: Option<String>,
    /// The state being entered
    pub to: String,
    pub trigger: Trigger,
    /// Clock reading at which `to` was entered
    pub entered_at: Duration,
    /// Wall-clock time of the commit, for diagnostics
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of committed transitions, oldest first.
///
/// Once `capacity` entries are held, recording evicts the oldest one.
/// A capacity of zero disables recording.
///
/// # Example
///
/// ```rust
/// use tickstate::core::{StateHistory, StateTransition, Trigger};
/// use chrono::Utc;
/// use std::time::Duration;
///
/// let mut history = StateHistory::with_capacity(8);
/// history.record(StateTransition {
///     from: None,
///     to: "Idle".to_string(),
///     trigger: Trigger::Activation,
///     entered_at: Duration::ZERO,
///     timestamp: Utc::now(),
/// });
/// history.record(StateTransition {
///     from: Some("Idle".to_string()),
///     to: "Walking".to_string(),
///     trigger: Trigger::Explicit,
///     entered_at: Duration::from_secs(2),
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(history.get_path(), vec!["Idle", "Walking"]);
/// assert_eq!(history.duration(), Some(Duration::from_secs(2)));
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StateHistory {
    transitions: VecDeque<StateTransition>,
    capacity: usize,
}

impl StateHistory {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            transitions: VecDeque::with_capacity(capacity.min(256)),
            capacity,
        }
    }

    pub fn record(&mut self, transition: StateTransition) {
        if self.capacity == 0 {
            return;
        }
        while self.transitions.len() >= self.capacity {
            self.transitions.pop_front();
        }
        self.transitions.push_back(transition);
    }

    /// Names of the states traversed.
    ///
    /// Starts with the `from` state of the oldest retained transition when
    /// there is one, followed by the `to` state of each transition.
    pub fn get_path(&self) -> Vec<&str> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(from) = self.transitions.front().and_then(|t| t.from.as_deref()) {
            path.push(from);
        }
        for transition in &self.transitions {
            path.push(transition.to.as_str());
        }
        path
    }

    /// Clock time between the oldest and newest retained transitions.
    pub fn duration(&self) -> Option<Duration> {
        let first = self.transitions.front()?;
        let last = self.transitions.back()?;
        Some(last.entered_at.saturating_sub(first.entered_at))
    }

    pub fn iter(&self) -> impl Iterator<Item = &StateTransition> {
        self.transitions.iter()
    }

    pub fn last(&self) -> Option<&StateTransition> {
        self.transitions.back()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.transitions.clear();
    }
}

//! Static checks over a state table.
//!
//! A timed state whose timer can never name a successor only fails when the
//! timer fires, which may be long after the table was built. Linting finds
//! those defects up front. Checks use Stillwater's `Validation` so every
//! issue is reported in one pass instead of stopping at the first.
//!
//! # Example
//!
//! ```rust
//! use tickstate::core::{StateDefinition, StateTable};
//! use tickstate::lint::lint_states;
//! use std::time::Duration;
//! use stillwater::validation::Validation;
//!
//! let mut table: StateTable<()> = StateTable::new();
//! table.insert(StateDefinition::indefinite("Idle"));
//! table.insert(StateDefinition::new("Dash", Duration::from_secs(1)));
//! table.insert(StateDefinition::new("Walk", Duration::from_secs(5)).then("Run"));
//!
//! match lint_states(&table) {
//!     Validation::Failure(issues) => assert_eq!(issues.len(), 2),
//!     Validation::Success(_) => panic!("expected issues"),
//! }
//! ```

use crate::core::{StateDefinition, StateTable};
use crate::engine::StateMachine;
use std::time::Duration;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// A configuration defect found by [`lint_states`].
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigIssue {
    #[error("State '{state}' lasts {duration:?} but has no completed hook to name a successor")]
    TimedWithoutCompleted { state: String, duration: Duration },

    #[error("State '{state}' hands over to '{next}', which is not registered")]
    UnknownNextState { state: String, next: String },
}

/// Check every state in `table`, accumulating ALL issues.
pub fn lint_states<C>(table: &StateTable<C>) -> Validation<(), NonEmptyVec<ConfigIssue>> {
    if table.is_empty() {
        return Validation::success(());
    }

    let checks: Vec<Validation<(), NonEmptyVec<ConfigIssue>>> = table
        .iter()
        .flat_map(|definition| {
            [
                check_timer(definition),
                check_successor(table, definition),
            ]
        })
        .collect();

    Validation::all_vec(checks).map(|_| ())
}

fn check_timer<C>(definition: &StateDefinition<C>) -> Validation<(), NonEmptyVec<ConfigIssue>> {
    if definition.is_timed() && !definition.has_completed_hook() {
        Validation::fail(ConfigIssue::TimedWithoutCompleted {
            state: definition.name().to_string(),
            duration: definition.duration(),
        })
    } else {
        Validation::success(())
    }
}

fn check_successor<C>(
    table: &StateTable<C>,
    definition: &StateDefinition<C>,
) -> Validation<(), NonEmptyVec<ConfigIssue>> {
    match definition.next_state() {
        Some(next) if !table.contains(next) => Validation::fail(ConfigIssue::UnknownNextState {
            state: definition.name().to_string(),
            next: next.to_string(),
        }),
        _ => Validation::success(()),
    }
}

impl<C> StateMachine<C> {
    /// Lint this machine's registered states.
    pub fn lint(&self) -> Validation<(), NonEmptyVec<ConfigIssue>> {
        let result = lint_states(self.states());
        if let Validation::Failure(issues) = &result {
            for issue in issues.iter() {
                tracing::warn!(identity = %self.identity(), %issue, "State configuration issue");
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issues(table: &StateTable<()>) -> Vec<ConfigIssue> {
        match lint_states(table) {
            Validation::Success(_) => Vec::new(),
            Validation::Failure(issues) => issues.iter().cloned().collect(),
        }
    }

    #[test]
    fn well_formed_table_passes() {
        let mut table: StateTable<()> = StateTable::new();
        table.insert(StateDefinition::indefinite("Idle"));
        table.insert(StateDefinition::new("Walking", Duration::from_secs(5)).then("Idle"));
        table.insert(
            StateDefinition::new("Attack", Duration::from_secs(1))
                .on_completed(|_, _| Some("Idle".to_string())),
        );

        assert!(lint_states(&table).is_success());
    }

    #[test]
    fn empty_table_passes() {
        let table: StateTable<()> = StateTable::new();
        assert!(lint_states(&table).is_success());
    }

    #[test]
    fn timed_state_without_hook_is_reported() {
        let mut table: StateTable<()> = StateTable::new();
        table.insert(StateDefinition::new("Dash", Duration::from_millis(250)));

        assert_eq!(
            issues(&table),
            vec![ConfigIssue::TimedWithoutCompleted {
                state: "Dash".to_string(),
                duration: Duration::from_millis(250),
            }]
        );
    }

    #[test]
    fn unregistered_successor_is_reported() {
        let mut table: StateTable<()> = StateTable::new();
        table.insert(StateDefinition::new("Walking", Duration::from_secs(5)).then("Sleep"));

        assert_eq!(
            issues(&table),
            vec![ConfigIssue::UnknownNextState {
                state: "Walking".to_string(),
                next: "Sleep".to_string(),
            }]
        );
    }

    #[test]
    fn lint_accumulates_all_issues() {
        let mut table: StateTable<()> = StateTable::new();
        table.insert(StateDefinition::new("A", Duration::from_secs(1)));
        table.insert(StateDefinition::new("B", Duration::from_secs(1)).then("Missing"));
        table.insert(StateDefinition::new("C", Duration::from_secs(1)));

        let result = lint_states(&table);
        assert!(result.is_failure());
        assert_eq!(issues(&table).len(), 3);
    }

    #[test]
    fn machine_lint_uses_registered_states() {
        let mut fsm: StateMachine = StateMachine::builder()
            .identity("Linted")
            .registry(crate::registry::StateRegistry::shared())
            .build()
            .unwrap();
        fsm.add_state(StateDefinition::indefinite("Idle")).unwrap();
        assert!(fsm.lint().is_success());

        fsm.add_state(StateDefinition::new("Dash", Duration::from_secs(1)))
            .unwrap();
        assert!(fsm.lint().is_failure());
    }
}

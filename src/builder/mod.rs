//! Builder API for ergonomic machine and state construction.
//!
//! This module provides fluent builders and a macro for creating state
//! machines with minimal boilerplate, plus shorthands for the most common
//! kinds of state.

pub mod error;
pub mod machine;
pub mod macros;
pub mod state;

pub use error::BuildError;
pub use machine::StateMachineBuilder;
pub use state::StateBuilder;

use crate::core::StateDefinition;
use std::time::Duration;

/// A state that lasts `duration` and then moves to `next`.
///
/// # Example
///
/// ```
/// use tickstate::builder::timed_state;
/// use std::time::Duration;
///
/// let attack = timed_state::<()>("Attack", Duration::from_millis(400), "Recover");
/// assert_eq!(attack.next_state(), Some("Recover"));
/// ```
pub fn timed_state<C>(
    name: impl Into<String>,
    duration: Duration,
    next: impl Into<String>,
) -> StateDefinition<C> {
    StateDefinition::new(name, duration).then(next)
}

/// An indefinite state entered only when `guard` admits the context.
///
/// # Example
///
/// ```
/// use tickstate::builder::guarded_state;
///
/// let flee = guarded_state("Flee", |health: &u32| *health < 20);
/// assert!(flee.guard().unwrap().check(&5));
/// ```
pub fn guarded_state<C, F>(name: impl Into<String>, guard: F) -> StateDefinition<C>
where
    F: Fn(&C) -> bool + Send + Sync + 'static,
{
    StateDefinition::indefinite(name).with_enter(guard)
}

//! Engine and configuration error types.

use crate::registry::RegistryError;
use thiserror::Error;

/// Errors raised by [`StateMachine`](crate::StateMachine) operations.
///
/// Transitions that are merely refused (already active, unknown target,
/// guard rejection) are not errors; they are reported as a
/// [`TransitionOutcome`](crate::TransitionOutcome).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FsmError {
    #[error("State machine '{identity}' has been destroyed")]
    Destroyed { identity: String },

    #[error("State name must not be empty")]
    EmptyStateName,

    /// A timed state expired but has no completed hook to name its successor.
    #[error("State '{state}' of machine '{identity}' has a duration but no completed hook")]
    MissingCompletedHook { identity: String, state: String },

    /// A timed state expired and its completed hook returned no successor.
    #[error("Completed hook of state '{state}' in machine '{identity}' returned no next state")]
    NoNextState { identity: String, state: String },

    #[error("Machine '{identity}' exceeded the reentrant transition depth of {depth}")]
    ReentrancyLimit { identity: String, depth: usize },

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Errors raised while loading or validating a [`MachineConfig`](crate::MachineConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid machine config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("max_reentrancy_depth must be at least 1")]
    ZeroReentrancyDepth,
}

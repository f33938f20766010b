//! Core state machine types.
//!
//! This module contains the building blocks a machine is assembled from:
//! - State definitions and their lifecycle hooks
//! - Enter guards
//! - The insertion-ordered state table and its ordinal codec
//! - Bounded transition history

mod guard;
mod history;
mod state;
mod table;

pub use guard::Guard;
pub use history::{StateHistory, StateTransition, Trigger};
pub use state::{CompletedHook, StartedHook, StateDefinition};
pub use table::StateTable;

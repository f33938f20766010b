//! The transition engine.
//!
//! [`StateMachine`] owns a machine's state table and runs every transition
//! through the same sequence: resolve the target, check its guard, run the
//! outgoing state's completed hook, commit, run the target's started hook,
//! and publish the new state to the registry. [`StateMachine::update`]
//! drives the same sequence when a timed state expires.

mod machine;
mod target;

pub use machine::{StateMachine, TransitionOutcome};
pub use target::Target;

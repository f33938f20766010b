//! Tickstate: tick-driven finite state machines for game entities
//!
//! Each entity owns a [`StateMachine`] holding a table of named states. A
//! state may be guarded, may run hooks when it starts and completes, and may
//! last for a fixed duration after which the host's per-tick call to
//! [`StateMachine::update`] moves it on. Every machine publishes its current
//! state to a shared [`StateRegistry`] so other systems can look it up by
//! identity.
//!
//! # Core Concepts
//!
//! - **States**: Named definitions with an optional duration and hooks
//! - **Guards**: Predicates over the transition context that gate entry
//! - **Ordinals**: 1-based insertion positions, a compact state encoding
//! - **Registry**: Identity to current-state lookup shared between machines
//!
//! # Example
//!
//! ```rust
//! use tickstate::{StateMachine, StateRegistry, TransitionOutcome};
//! use tickstate::core::StateDefinition;
//! use std::time::Duration;
//!
//! #[derive(Default)]
//! struct Senses {
//!     enemy_distance: f32,
//! }
//!
//! let registry = StateRegistry::shared();
//! let mut orc: StateMachine<Senses> = StateMachine::builder()
//!     .identity("Orc")
//!     .registry(registry.clone())
//!     .build()
//!     .unwrap();
//!
//! orc.add_state(StateDefinition::indefinite("Idle")).unwrap();
//! orc.add_state(
//!     StateDefinition::new("Chase", Duration::from_secs(3))
//!         .with_enter(|s: &Senses| s.enemy_distance < 10.0)
//!         .then("Idle"),
//! )
//! .unwrap();
//!
//! let far = Senses { enemy_distance: 40.0 };
//! assert_eq!(orc.change_state_with("Chase", &far).unwrap(), TransitionOutcome::GuardRejected);
//!
//! let near = Senses { enemy_distance: 4.0 };
//! assert!(orc.change_state_with("Chase", &near).unwrap().is_committed());
//! assert_eq!(registry.get_state("Orc").as_deref(), Some("Chase"));
//! ```

pub mod builder;
pub mod cleanup;
pub mod clock;
pub mod config;
pub mod core;
pub mod engine;
pub mod error;
pub mod lint;
pub mod registry;
pub mod snapshot;

// Re-export commonly used types
pub use builder::{BuildError, StateBuilder, StateMachineBuilder};
pub use cleanup::CleanupRegistrar;
pub use config::{AbsentGuardPolicy, MachineConfig};
pub use core::{Guard, StateDefinition, StateHistory, StateTable, StateTransition, Trigger};
pub use engine::{StateMachine, Target, TransitionOutcome};
pub use error::{ConfigError, FsmError};
pub use lint::{lint_states, ConfigIssue};
pub use registry::{current_state, RegistryError, StateRegistry};
pub use snapshot::{MachineSnapshot, SnapshotError};

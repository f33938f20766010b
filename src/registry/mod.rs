//! Shared lookup of each machine's current state by identity.
//!
//! Every [`StateMachine`](crate::StateMachine) claims an identity in a
//! [`StateRegistry`] when it is built and publishes its current state there
//! on every committed transition. Observers can then ask for an entity's
//! state by name without holding the machine itself.
//!
//! Registries are ordinary values shared through an [`Arc`]. Tests and hosts
//! that want isolation build their own; [`StateRegistry::global`] provides the
//! process-wide default used by [`StateMachine::new`](crate::StateMachine::new).
//!
//! # Example
//!
//! ```rust
//! use tickstate::{StateMachine, StateRegistry, core::StateDefinition};
//!
//! let registry = StateRegistry::shared();
//! let mut guard: StateMachine = StateMachine::builder()
//!     .identity("Guard7")
//!     .registry(registry.clone())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(registry.get_state("Guard7"), Some(String::new()));
//!
//! guard.add_state(StateDefinition::indefinite("Idle")).unwrap();
//! assert_eq!(registry.get_state("Guard7").as_deref(), Some("Idle"));
//!
//! guard.destroy().unwrap();
//! assert_eq!(registry.get_state("Guard7"), None);
//! ```

mod error;

pub use error::RegistryError;

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

/// Prefix of identities synthesized for machines built without one.
pub const AUTO_IDENTITY_PREFIX: &str = "fsm_";

#[derive(Debug, Default)]
struct Entries {
    states: HashMap<String, String>,
    counter: u64,
}

/// Mapping from machine identity to current state name.
///
/// An entry holds the empty string until its machine commits its first
/// transition. Writes come only from the machines themselves.
#[derive(Debug, Default)]
pub struct StateRegistry {
    entries: RwLock<Entries>,
}

impl StateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh registry ready to be handed to several machines.
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// The process-wide registry, created on first use.
    pub fn global() -> Arc<Self> {
        static GLOBAL: OnceLock<Arc<StateRegistry>> = OnceLock::new();
        Arc::clone(GLOBAL.get_or_init(StateRegistry::shared))
    }

    /// Current state published under `identity`.
    ///
    /// Returns `None` if the identity was never registered or its machine
    /// has been destroyed.
    pub fn get_state(&self, identity: &str) -> Option<String> {
        self.entries.read().states.get(identity).cloned()
    }

    pub fn contains(&self, identity: &str) -> bool {
        self.entries.read().states.contains_key(identity)
    }

    /// Registered identities, sorted.
    pub fn identities(&self) -> Vec<String> {
        let mut identities: Vec<String> = self.entries.read().states.keys().cloned().collect();
        identities.sort();
        identities
    }

    pub fn len(&self) -> usize {
        self.entries.read().states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().states.is_empty()
    }

    /// Value of the identity counter: registrations minus removals.
    pub fn live_count(&self) -> u64 {
        self.entries.read().counter
    }

    /// Claim `identity` for a new machine.
    pub(crate) fn register_named(&self, identity: &str) -> Result<(), RegistryError> {
        if identity.is_empty() {
            return Err(RegistryError::EmptyIdentity);
        }

        let mut entries = self.entries.write();
        if entries.states.contains_key(identity) {
            return Err(RegistryError::DuplicateIdentity(identity.to_string()));
        }
        entries.states.insert(identity.to_string(), String::new());
        entries.counter += 1;
        Ok(())
    }

    /// Claim a synthesized identity built from the counter.
    ///
    /// Since removals decrement the counter, the candidate may already be
    /// taken; the first free suffix at or above it is used.
    pub(crate) fn register_auto(&self) -> String {
        let mut entries = self.entries.write();
        entries.counter += 1;

        let mut suffix = entries.counter;
        let mut identity = format!("{AUTO_IDENTITY_PREFIX}{suffix}");
        while entries.states.contains_key(&identity) {
            suffix += 1;
            identity = format!("{AUTO_IDENTITY_PREFIX}{suffix}");
        }

        entries.states.insert(identity.clone(), String::new());
        identity
    }

    /// Mirror a committed transition. Returns `false` for unknown identities.
    pub(crate) fn publish(&self, identity: &str, state: &str) -> bool {
        let mut entries = self.entries.write();
        match entries.states.get_mut(identity) {
            Some(current) => {
                current.clear();
                current.push_str(state);
                true
            }
            None => false,
        }
    }

    /// Drop the entry for a destroyed machine.
    pub(crate) fn unregister(&self, identity: &str) -> bool {
        let mut entries = self.entries.write();
        let removed = entries.states.remove(identity).is_some();
        if removed {
            entries.counter = entries.counter.saturating_sub(1);
        }
        removed
    }
}

/// Current state of `identity` in the [global](StateRegistry::global) registry.
pub fn current_state(identity: &str) -> Option<String> {
    StateRegistry::global().get_state(identity)
}

//! Compact snapshots for replicating a machine's position.
//!
//! A snapshot carries the current state as an ordinal plus the time already
//! spent in it, which is enough for a replica with the same state table to
//! catch up. Hooks and guards are not serializable and are not included:
//! applying a snapshot drives an ordinary transition on the replica, so its
//! own hooks and guards run as usual.
//!
//! # Example
//!
//! ```rust
//! use tickstate::{MachineSnapshot, StateMachine, StateRegistry, core::StateDefinition};
//!
//! let registry = StateRegistry::shared();
//! let build = |identity: &str| -> StateMachine {
//!     let mut fsm: StateMachine = StateMachine::builder()
//!         .identity(identity)
//!         .registry(registry.clone())
//!         .build()
//!         .unwrap();
//!     fsm.add_state(StateDefinition::indefinite("Idle")).unwrap();
//!     fsm.add_state(StateDefinition::indefinite("Attack")).unwrap();
//!     fsm
//! };
//!
//! let mut server = build("Orc12");
//! let mut client = build("Orc12-replica");
//! server.change_state("Attack").unwrap();
//!
//! let bytes = server.snapshot().to_bytes().unwrap();
//! let snapshot = MachineSnapshot::from_bytes(&bytes).unwrap();
//! client.apply_snapshot(&snapshot).unwrap();
//!
//! assert_eq!(client.current_state(), Some("Attack"));
//! ```

use crate::core::Trigger;
use crate::engine::{StateMachine, Target, TransitionOutcome};
use crate::error::FsmError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub mod error;

pub use error::SnapshotError;

/// Version identifier for snapshot format
pub const SNAPSHOT_VERSION: u32 = 1;

/// Serializable position of a state machine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MachineSnapshot {
    /// Snapshot format version
    pub version: u32,

    /// Identity of the machine the snapshot was taken from
    pub identity: String,

    /// Ordinal of the current state, `None` before the first transition
    pub ordinal: Option<usize>,

    /// Time already spent in the current state
    pub elapsed_in_state: Duration,

    /// When the snapshot was taken
    pub taken_at: DateTime<Utc>,
}

impl MachineSnapshot {
    /// Encode with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        bincode::serialize(self).map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    /// Decode a bincode snapshot, rejecting unknown format versions.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let snapshot: Self = bincode::deserialize(bytes)
            .map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))?;
        snapshot.check_version()
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string(self).map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self = serde_json::from_str(json)
            .map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))?;
        snapshot.check_version()
    }

    fn check_version(self) -> Result<Self, SnapshotError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: self.version,
                supported: SNAPSHOT_VERSION,
            });
        }
        Ok(self)
    }
}

impl<C> StateMachine<C> {
    /// Capture the current state and the time spent in it.
    pub fn snapshot(&self) -> MachineSnapshot {
        MachineSnapshot {
            version: SNAPSHOT_VERSION,
            identity: self.identity().to_string(),
            ordinal: self.current_ordinal(),
            elapsed_in_state: self.time_in_state().unwrap_or_default(),
            taken_at: Utc::now(),
        }
    }
}

impl<C: Default> StateMachine<C> {
    /// Move this machine to the state recorded in `snapshot`.
    ///
    /// The transition goes through the target's guard and hooks with the
    /// default context. When the replica ends up in the snapshot's state, its
    /// timer is rebased so the time already spent on the source counts.
    /// A snapshot taken before any transition leaves the replica untouched
    /// and reports [`TransitionOutcome::UnknownState`].
    pub fn apply_snapshot(
        &mut self,
        snapshot: &MachineSnapshot,
    ) -> Result<TransitionOutcome, SnapshotError> {
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: snapshot.version,
                supported: SNAPSHOT_VERSION,
            });
        }
        if self.is_destroyed() {
            return Err(FsmError::Destroyed {
                identity: self.identity().to_string(),
            }
            .into());
        }

        let Some(ordinal) = snapshot.ordinal else {
            return Ok(TransitionOutcome::UnknownState);
        };
        if self.name_from_ordinal(ordinal).is_none() {
            return Err(SnapshotError::UnknownOrdinal(ordinal));
        }

        let outcome = self.transition(
            Target::Ordinal(ordinal),
            &C::default(),
            Trigger::Replicated,
        )?;

        if !self.is_destroyed() && self.current_ordinal() == Some(ordinal) {
            self.rebase_entry(snapshot.elapsed_in_state);
        }

        tracing::debug!(
            identity = %self.identity(),
            source = %snapshot.identity,
            ordinal,
            ?outcome,
            "Snapshot applied"
        );
        Ok(outcome)
    }
}

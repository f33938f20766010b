//! Snapshot error types.

use crate::error::FsmError;
use thiserror::Error;

/// Errors that can occur while encoding, decoding or applying snapshots
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SnapshotError {
    /// Serialization to JSON or binary format failed
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// Deserialization from JSON or binary format failed
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    /// Snapshot version is not supported by this version
    #[error("Unsupported snapshot version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// The snapshot names an ordinal the replica has no state for
    #[error("No state registered at ordinal {0}")]
    UnknownOrdinal(usize),

    #[error(transparent)]
    Machine(#[from] FsmError),
}

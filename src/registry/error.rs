//! Registry error types.

use thiserror::Error;

/// Errors that can occur when claiming an identity in a registry
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// Another live machine already publishes under this identity
    #[error("Identity '{0}' is already registered")]
    DuplicateIdentity(String),

    #[error("Identity must not be empty")]
    EmptyIdentity,
}

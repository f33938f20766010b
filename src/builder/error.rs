//! Build errors for machine and state builders.

use crate::error::ConfigError;
use crate::registry::RegistryError;
use thiserror::Error;

/// Errors that can occur when building machines and state definitions.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("State name not specified. Call .name(name) before .build()")]
    MissingStateName,

    #[error("State duration must be a finite, non-negative number of seconds, got {0}")]
    InvalidDuration(f64),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

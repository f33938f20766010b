//! Per-machine configuration.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// What a transition does when the target state has no enter guard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbsentGuardPolicy {
    /// A state without a guard can always be entered.
    #[default]
    Allow,

    /// A state without a guard can never be entered, including by
    /// auto-activation of the first registered state.
    Deny,
}

impl AbsentGuardPolicy {
    pub fn permits(self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Tunables for a single [`StateMachine`](crate::StateMachine).
///
/// Missing fields fall back to their defaults when deserialized.
///
/// # Example
///
/// ```rust
/// use tickstate::{AbsentGuardPolicy, MachineConfig};
///
/// let config = MachineConfig::from_json(r#"{ "absent_guard": "deny" }"#).unwrap();
/// assert_eq!(config.absent_guard, AbsentGuardPolicy::Deny);
/// assert_eq!(config.max_reentrancy_depth, 16);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    pub absent_guard: AbsentGuardPolicy,

    /// How deeply hooks may nest transitions before the machine refuses.
    pub max_reentrancy_depth: usize,

    /// Number of committed transitions kept in history. Zero disables it.
    pub history_capacity: usize,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            absent_guard: AbsentGuardPolicy::Allow,
            max_reentrancy_depth: 16,
            history_capacity: 64,
        }
    }
}

impl MachineConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_reentrancy_depth == 0 {
            return Err(ConfigError::ZeroReentrancyDepth);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_allows_unguarded_states() {
        let config = MachineConfig::default();
        assert!(config.absent_guard.permits());
        assert!(!AbsentGuardPolicy::Deny.permits());
    }

    #[test]
    fn empty_json_yields_defaults() {
        let config = MachineConfig::from_json("{}").unwrap();
        assert_eq!(config, MachineConfig::default());
    }

    #[test]
    fn json_overrides_fields() {
        let config = MachineConfig::from_json(
            r#"{ "absent_guard": "deny", "max_reentrancy_depth": 4, "history_capacity": 0 }"#,
        )
        .unwrap();

        assert_eq!(config.absent_guard, AbsentGuardPolicy::Deny);
        assert_eq!(config.max_reentrancy_depth, 4);
        assert_eq!(config.history_capacity, 0);
    }

    #[test]
    fn zero_depth_is_rejected() {
        let result = MachineConfig::from_json(r#"{ "max_reentrancy_depth": 0 }"#);
        assert!(matches!(result, Err(ConfigError::ZeroReentrancyDepth)));
    }

    #[test]
    fn malformed_json_is_rejected() {
        let result = MachineConfig::from_json(r#"{ "absent_guard": "sometimes" }"#);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}

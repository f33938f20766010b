//! Builder for constructing state machines.

use crate::builder::error::BuildError;
use crate::clock::{Clock, SystemClock};
use crate::config::MachineConfig;
use crate::engine::StateMachine;
use crate::registry::StateRegistry;
use std::marker::PhantomData;
use std::sync::Arc;

/// Builder for constructing state machines with a fluent API.
///
/// Every setting is optional: without an identity one is synthesized, the
/// registry defaults to [`StateRegistry::global`] and the clock to a fresh
/// [`SystemClock`].
pub struct StateMachineBuilder<C> {
    identity: Option<String>,
    registry: Option<Arc<StateRegistry>>,
    clock: Option<Arc<dyn Clock>>,
    config: MachineConfig,
    _phantom: PhantomData<fn(&C)>,
}

impl<C> StateMachineBuilder<C> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            identity: None,
            registry: None,
            clock: None,
            config: MachineConfig::default(),
            _phantom: PhantomData,
        }
    }

    /// Identity to publish under. Must be unique within the registry.
    pub fn identity(mut self, identity: impl Into<String>) -> Self {
        self.identity = Some(identity.into());
        self
    }

    /// Registry to publish to, instead of the global one.
    pub fn registry(mut self, registry: Arc<StateRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Time source used to stamp state entry.
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn config(mut self, config: MachineConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the machine and claim its identity.
    ///
    /// Fails if the config is invalid or the identity is empty or taken.
    pub fn build(self) -> Result<StateMachine<C>, BuildError> {
        self.config.validate()?;

        let registry = self.registry.unwrap_or_else(StateRegistry::global);
        let identity = match self.identity {
            Some(identity) => {
                registry.register_named(&identity)?;
                identity
            }
            None => registry.register_auto(),
        };
        let clock = self
            .clock
            .unwrap_or_else(|| Arc::new(SystemClock::new()));

        Ok(StateMachine::from_parts(
            identity,
            registry,
            clock,
            self.config,
        ))
    }
}

impl<C> Default for StateMachineBuilder<C> {
    fn default() -> Self {
        Self::new()
    }
}

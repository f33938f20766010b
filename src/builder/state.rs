//! Builder for constructing state definitions.

use crate::builder::error::BuildError;
use crate::core::{CompletedHook, Guard, StartedHook, StateDefinition};
use crate::engine::StateMachine;
use std::sync::Arc;
use std::time::Duration;

/// Builder for constructing state definitions with a fluent API.
///
/// Unlike [`StateDefinition::new`], the builder checks its input: the name
/// must be set and non-empty, and durations given in seconds must be finite
/// and non-negative.
pub struct StateBuilder<C> {
    name: Option<String>,
    duration: Duration,
    seconds: Option<f64>,
    guard: Option<Guard<C>>,
    started: Option<StartedHook<C>>,
    completed: Option<CompletedHook<C>>,
    next: Option<String>,
}

impl<C> StateBuilder<C> {
    /// Create a new state builder.
    pub fn new() -> Self {
        Self {
            name: None,
            duration: Duration::ZERO,
            seconds: None,
            guard: None,
            started: None,
            completed: None,
            next: None,
        }
    }

    /// Set the state name (required).
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set how long the state lasts before it advances on its own.
    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self.seconds = None;
        self
    }

    /// Set the duration in seconds, as hosts with float timers often do.
    ///
    /// Validated by [`build`](Self::build).
    pub fn duration_secs(mut self, seconds: f64) -> Self {
        self.seconds = Some(seconds);
        self
    }

    /// Add a guard (optional).
    pub fn guard(mut self, guard: Guard<C>) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Add a guard using a closure (optional).
    pub fn when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&C) -> bool + Send + Sync + 'static,
    {
        self.guard = Some(Guard::new(predicate));
        self
    }

    pub fn on_started<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut StateMachine<C>, &C) + Send + Sync + 'static,
    {
        self.started = Some(Arc::new(hook));
        self
    }

    pub fn on_completed<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut StateMachine<C>, &C) -> Option<String> + Send + Sync + 'static,
    {
        self.completed = Some(Arc::new(hook));
        self.next = None;
        self
    }

    /// Name the state that follows when the duration expires.
    pub fn then(mut self, next: impl Into<String>) -> Self {
        self.next = Some(next.into());
        self.completed = None;
        self
    }

    /// Build the state definition.
    pub fn build(self) -> Result<StateDefinition<C>, BuildError> {
        let name = self
            .name
            .filter(|name| !name.is_empty())
            .ok_or(BuildError::MissingStateName)?;

        let duration = match self.seconds {
            Some(seconds) => Duration::try_from_secs_f64(seconds)
                .map_err(|_| BuildError::InvalidDuration(seconds))?,
            None => self.duration,
        };

        let mut definition = StateDefinition::new(name, duration);
        if let Some(guard) = self.guard {
            definition = definition.with_guard(guard);
        }
        if let Some(started) = self.started {
            definition = definition.with_started_hook(started);
        }
        if let Some(completed) = self.completed {
            definition = definition.with_completed_hook(completed);
        }
        if let Some(next) = self.next {
            definition = definition.then(next);
        }
        Ok(definition)
    }
}

impl<C> Default for StateBuilder<C> {
    fn default() -> Self {
        Self::new()
    }
}

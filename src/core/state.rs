//! State definitions and their lifecycle hooks.

use super::guard::Guard;
use crate::engine::StateMachine;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Hook run right after a state becomes current.
pub type StartedHook<C> = Arc<dyn Fn(&mut StateMachine<C>, &C) + Send + Sync>;

/// Hook run when a state is left, and when its duration expires.
///
/// On an explicit exit the return value is ignored. When the duration of a
/// timed state expires, the hook is called with the default context and must
/// return the name of the next state; the subsequent transition then calls
/// it a second time as the exit hook.
pub type CompletedHook<C> = Arc<dyn Fn(&mut StateMachine<C>, &C) -> Option<String> + Send + Sync>;

/// A named state with an optional duration and up to three hooks.
///
/// A duration of [`Duration::ZERO`] makes the state indefinite: it is only
/// left by an explicit transition.
///
/// # Example
///
/// ```rust
/// use tickstate::core::StateDefinition;
/// use std::time::Duration;
///
/// #[derive(Default)]
/// struct Senses {
///     tired: bool,
/// }
///
/// let walking: StateDefinition<Senses> =
///     StateDefinition::new("Walking", Duration::from_secs(5))
///         .with_enter(|s: &Senses| !s.tired)
///         .then("Idle");
///
/// assert_eq!(walking.name(), "Walking");
/// assert!(walking.is_timed());
/// assert_eq!(walking.next_state(), Some("Idle"));
/// ```
pub struct StateDefinition<C> {
    name: String,
    duration: Duration,
    enter: Option<Guard<C>>,
    started: Option<StartedHook<C>>,
    completed: Option<CompletedHook<C>>,
    next: Option<String>,
}

impl<C> StateDefinition<C> {
    pub fn new(name: impl Into<String>, duration: Duration) -> Self {
        Self {
            name: name.into(),
            duration,
            enter: None,
            started: None,
            completed: None,
            next: None,
        }
    }

    /// Indefinite state with no hooks.
    pub fn indefinite(name: impl Into<String>) -> Self {
        Self::new(name, Duration::ZERO)
    }

    /// Gate entry on a predicate over the transition context.
    pub fn with_enter<F>(self, predicate: F) -> Self
    where
        F: Fn(&C) -> bool + Send + Sync + 'static,
    {
        self.with_guard(Guard::new(predicate))
    }

    pub fn with_guard(mut self, guard: Guard<C>) -> Self {
        self.enter = Some(guard);
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

    /// Completed hook that always names `next` as the successor.
    pub fn then(self, next: impl Into<String>) -> Self {
        let next = next.into();
        let successor = next.clone();
        let mut definition = self.on_completed(move |_, _| Some(successor.clone()));
        definition.next = Some(next);
        definition
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Whether the state advances on its own once its duration elapses.
    pub fn is_timed(&self) -> bool {
        !self.duration.is_zero()
    }

    /// Successor declared with [`then`](Self::then), if any.
    pub fn next_state(&self) -> Option<&str> {
        self.next.as_deref()
    }

    pub fn guard(&self) -> Option<&Guard<C>> {
        self.enter.as_ref()
    }

    pub fn has_started_hook(&self) -> bool {
        self.started.is_some()
    }

    pub fn has_completed_hook(&self) -> bool {
        self.completed.is_some()
    }

    pub(crate) fn with_started_hook(mut self, hook: StartedHook<C>) -> Self {
        self.started = Some(hook);
        self
    }

    pub(crate) fn with_completed_hook(mut self, hook: CompletedHook<C>) -> Self {
        self.completed = Some(hook);
        self.next = None;
        self
    }

    pub(crate) fn started_hook(&self) -> Option<StartedHook<C>> {
        self.started.clone()
    }

    pub(crate) fn completed_hook(&self) -> Option<CompletedHook<C>> {
        self.completed.clone()
    }
}

impl<C> Clone for StateDefinition<C> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            duration: self.duration,
            enter: self.enter.clone(),
            started: self.started.clone(),
            completed: self.completed.clone(),
            next: self.next.clone(),
        }
    }
}

impl<C> fmt::Debug for StateDefinition<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateDefinition")
            .field("name", &self.name)
            .field("duration", &self.duration)
            .field("guarded", &self.enter.is_some())
            .field("started", &self.started.is_some())
            .field("completed", &self.completed.is_some())
            .field("next", &self.next)
            .finish()
    }
}

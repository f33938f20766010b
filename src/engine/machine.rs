//! State machine that owns its states and drives transitions.

use crate::builder::StateMachineBuilder;
use crate::cleanup::CleanupRegistrar;
use crate::clock::{Clock, SystemClock};
use crate::config::MachineConfig;
use crate::core::{
    StartedHook, StateDefinition, StateHistory, StateTable, StateTransition, Trigger,
};
use crate::engine::target::Target;
use crate::error::FsmError;
use crate::registry::StateRegistry;
use chrono::Utc;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// How a transition request was resolved.
///
/// Everything except [`Committed`](Self::Committed) is a silent no-op: the
/// current state, its entry time and the registry are left untouched and no
/// hook other than the target's guard has run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// The machine moved to the target state
    Committed,

    /// The target is already the current state
    AlreadyActive,

    /// The target names no registered state
    UnknownState,

    /// The target's guard refused entry
    GuardRejected,
}

impl TransitionOutcome {
    pub fn is_committed(self) -> bool {
        matches!(self, Self::Committed)
    }
}

/// A finite state machine for one entity.
///
/// States are registered with [`add_state`](Self::add_state); the first one
/// registered is entered immediately. Transitions happen explicitly through
/// [`change_state`](Self::change_state) or when [`update`](Self::update)
/// finds that a timed state has run its course. Every committed transition is
/// published to the machine's [`StateRegistry`] under its identity.
///
/// `C` is the context handed to every hook of a transition. Transitions that
/// carry no context (activation, timer expiry, [`change_state`](Self::change_state))
/// use `C::default()`.
///
/// # Example
///
/// ```rust
/// use tickstate::{StateMachine, StateRegistry, core::StateDefinition, clock::ManualClock};
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// let clock = Arc::new(ManualClock::new());
/// let registry = StateRegistry::shared();
/// let mut agent: StateMachine = StateMachine::builder()
///     .identity("Agent1")
///     .registry(registry.clone())
///     .clock(clock.clone())
///     .build()
///     .unwrap();
///
/// agent.add_state(StateDefinition::indefinite("Idle")).unwrap();
/// agent
///     .add_state(
///         StateDefinition::new("Walking", Duration::from_secs(5))
///             .with_enter(|_| true)
///             .then("Idle"),
///     )
///     .unwrap();
///
/// agent.change_state("Walking").unwrap();
///
/// clock.advance(Duration::from_secs(3));
/// agent.update().unwrap();
/// assert_eq!(agent.current_state(), Some("Walking"));
///
/// clock.advance(Duration::from_millis(2200));
/// agent.update().unwrap();
/// assert_eq!(registry.get_state("Agent1").as_deref(), Some("Idle"));
/// ```
pub struct StateMachine<C = ()> {
    identity: String,
    states: StateTable<C>,
    current: Option<String>,
    active_duration: Duration,
    entry_time: Duration,
    carried_over: Duration,
    registry: Arc<StateRegistry>,
    clock: Arc<dyn Clock>,
    cleanup: CleanupRegistrar,
    history: StateHistory,
    config: MachineConfig,
    depth: usize,
    overflowed: bool,
    destroyed: bool,
}

impl<C> StateMachine<C> {
    /// Machine with a synthesized identity in the global registry, timed by
    /// the system clock.
    pub fn new() -> Self {
        let registry = StateRegistry::global();
        let identity = registry.register_auto();
        Self::from_parts(
            identity,
            registry,
            Arc::new(SystemClock::new()),
            MachineConfig::default(),
        )
    }

    /// Machine publishing under `identity` in the global registry.
    pub fn named(identity: impl Into<String>) -> Result<Self, FsmError> {
        let identity = identity.into();
        let registry = StateRegistry::global();
        registry.register_named(&identity)?;
        Ok(Self::from_parts(
            identity,
            registry,
            Arc::new(SystemClock::new()),
            MachineConfig::default(),
        ))
    }

    pub fn builder() -> StateMachineBuilder<C> {
        StateMachineBuilder::new()
    }

    /// Assemble a machine whose identity is already claimed in `registry`.
    pub(crate) fn from_parts(
        identity: String,
        registry: Arc<StateRegistry>,
        clock: Arc<dyn Clock>,
        config: MachineConfig,
    ) -> Self {
        let history = StateHistory::with_capacity(config.history_capacity);
        Self {
            identity,
            states: StateTable::new(),
            current: None,
            active_duration: Duration::ZERO,
            entry_time: Duration::ZERO,
            carried_over: Duration::ZERO,
            registry,
            clock,
            cleanup: CleanupRegistrar::new(),
            history,
            config,
            depth: 0,
            overflowed: false,
            destroyed: false,
        }
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// Name of the current state, `None` until the first transition commits.
    pub fn current_state(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn current_definition(&self) -> Option<&StateDefinition<C>> {
        self.current
            .as_deref()
            .and_then(|name| self.states.get(name))
    }

    pub fn current_ordinal(&self) -> Option<usize> {
        self.current
            .as_deref()
            .and_then(|name| self.states.ordinal_from_name(name))
    }

    pub fn states(&self) -> &StateTable<C> {
        &self.states
    }

    pub fn history(&self) -> &StateHistory {
        &self.history
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    pub fn registry(&self) -> &Arc<StateRegistry> {
        &self.registry
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Duration of the current state as it was when entered.
    pub fn active_duration(&self) -> Duration {
        self.active_duration
    }

    pub fn name_from_ordinal(&self, ordinal: usize) -> Option<&str> {
        self.states.name_from_ordinal(ordinal)
    }

    pub fn ordinal_from_name(&self, name: &str) -> Option<usize> {
        self.states.ordinal_from_name(name)
    }

    /// Time spent in the current state.
    pub fn time_in_state(&self) -> Option<Duration> {
        self.current
            .as_ref()
            .map(|_| self.elapsed_in_state())
    }

    /// Time left before a timed state expires; `None` for indefinite states.
    pub fn remaining(&self) -> Option<Duration> {
        if self.active_duration.is_zero() {
            return None;
        }
        self.time_in_state()
            .map(|elapsed| self.active_duration.saturating_sub(elapsed))
    }

    /// Register a teardown action to run when the machine is destroyed.
    pub fn on_destroy<F>(&mut self, action: F) -> Result<(), FsmError>
    where
        F: FnOnce() + Send + 'static,
    {
        self.ensure_alive()?;
        self.cleanup.register(action);
        Ok(())
    }

    /// Transition to `target`, handing `context` to every hook involved.
    ///
    /// In order: the target's guard is checked, the current state's completed
    /// hook runs, the target becomes current, the target's started hook runs,
    /// and the registry is updated. Hooks may trigger further transitions;
    /// nesting deeper than `max_reentrancy_depth` fails with
    /// [`FsmError::ReentrancyLimit`], leaving the machine in the last state
    /// that committed.
    pub fn change_state_with(
        &mut self,
        target: impl Into<Target>,
        context: &C,
    ) -> Result<TransitionOutcome, FsmError> {
        self.transition(target.into(), context, Trigger::Explicit)
    }

    /// Remove the registry entry and run all teardown actions.
    ///
    /// Every later call on the machine, including another `destroy`, fails
    /// with [`FsmError::Destroyed`].
    pub fn destroy(&mut self) -> Result<(), FsmError> {
        self.ensure_alive()?;
        self.teardown();
        Ok(())
    }

    pub(crate) fn transition(
        &mut self,
        target: Target,
        context: &C,
        trigger: Trigger,
    ) -> Result<TransitionOutcome, FsmError> {
        self.ensure_alive()?;

        let Some(name) = self.resolve(&target) else {
            return Ok(self.refused(TransitionOutcome::UnknownState, &target, trigger));
        };
        if self.current.as_deref() == Some(name.as_str()) {
            return Ok(self.refused(TransitionOutcome::AlreadyActive, &target, trigger));
        }
        let Some(definition) = self.states.get(&name) else {
            return Ok(self.refused(TransitionOutcome::UnknownState, &target, trigger));
        };

        let admitted = match definition.guard() {
            Some(guard) => guard.check(context),
            None => self.config.absent_guard.permits(),
        };
        if !admitted {
            return Ok(self.refused(TransitionOutcome::GuardRejected, &target, trigger));
        }

        let duration = definition.duration();
        let started = definition.started_hook();

        if self.depth >= self.config.max_reentrancy_depth {
            tracing::warn!(
                identity = %self.identity,
                target = %name,
                depth = self.depth,
                "Reentrant transition limit reached"
            );
            self.overflowed = true;
            return Err(FsmError::ReentrancyLimit {
                identity: self.identity.clone(),
                depth: self.depth,
            });
        }

        self.depth += 1;
        let result = self.commit(name, duration, started, context, trigger);
        self.depth -= 1;

        if self.depth == 0 && std::mem::take(&mut self.overflowed) && result.is_ok() {
            return Err(FsmError::ReentrancyLimit {
                identity: self.identity.clone(),
                depth: self.config.max_reentrancy_depth,
            });
        }
        result
    }

    fn commit(
        &mut self,
        name: String,
        duration: Duration,
        started: Option<StartedHook<C>>,
        context: &C,
        trigger: Trigger,
    ) -> Result<TransitionOutcome, FsmError> {
        let exit = self
            .current_definition()
            .and_then(StateDefinition::completed_hook);
        if let Some(exit) = exit {
            let _ = exit(self, context);
        }
        // The exit hook may have destroyed the machine.
        self.ensure_alive()?;

        let from = self.current.replace(name.clone());
        self.active_duration = duration;
        self.entry_time = self.clock.now();
        self.carried_over = Duration::ZERO;
        self.history.record(StateTransition {
            from: from.clone(),
            to: name.clone(),
            trigger,
            entered_at: self.entry_time,
            timestamp: Utc::now(),
        });

        tracing::debug!(
            identity = %self.identity,
            from = from.as_deref().unwrap_or(""),
            to = %name,
            ?trigger,
            "State committed"
        );

        if let Some(started) = started {
            started(self, context);
        }

        // Publish whatever is current now: a reentrant transition from the
        // started hook has already published its own target.
        if !self.destroyed {
            if let Some(current) = self.current.as_deref() {
                self.registry.publish(&self.identity, current);
            }
        }

        Ok(TransitionOutcome::Committed)
    }

    fn resolve(&self, target: &Target) -> Option<String> {
        match target {
            Target::Name(name) => Some(name.clone()),
            Target::Ordinal(ordinal) => self.states.name_from_ordinal(*ordinal).map(str::to_string),
        }
    }

    fn refused(
        &self,
        outcome: TransitionOutcome,
        target: &Target,
        trigger: Trigger,
    ) -> TransitionOutcome {
        tracing::debug!(
            identity = %self.identity,
            target = %target,
            ?outcome,
            ?trigger,
            "Transition not taken"
        );
        outcome
    }

    /// Count `elapsed` as already spent in the current state, restarting
    /// the local measurement from now.
    pub(crate) fn rebase_entry(&mut self, elapsed: Duration) {
        self.entry_time = self.clock.now();
        self.carried_over = elapsed;
    }

    fn elapsed_in_state(&self) -> Duration {
        self.clock
            .now()
            .saturating_sub(self.entry_time)
            .saturating_add(self.carried_over)
    }

    fn ensure_alive(&self) -> Result<(), FsmError> {
        if self.destroyed {
            return Err(FsmError::Destroyed {
                identity: self.identity.clone(),
            });
        }
        Ok(())
    }

    fn teardown(&mut self) {
        self.destroyed = true;
        self.registry.unregister(&self.identity);
        let released = self.cleanup.release_all();
        tracing::debug!(identity = %self.identity, released, "State machine destroyed");
    }
}

impl<C: Default> StateMachine<C> {
    /// Register a state, overwriting any state with the same name.
    ///
    /// The first state registered on a machine is entered immediately,
    /// subject to its guard.
    pub fn add_state(&mut self, definition: StateDefinition<C>) -> Result<(), FsmError> {
        self.ensure_alive()?;
        if definition.name().is_empty() {
            return Err(FsmError::EmptyStateName);
        }

        let activate = self.states.is_empty();
        let name = definition.name().to_string();
        let is_new = self.states.insert(definition);
        tracing::debug!(
            identity = %self.identity,
            state = %name,
            replaced = !is_new,
            "State registered"
        );

        if activate {
            self.transition(Target::Name(name), &C::default(), Trigger::Activation)?;
        }
        Ok(())
    }

    /// Transition to `target` with the default context.
    pub fn change_state(&mut self, target: impl Into<Target>) -> Result<TransitionOutcome, FsmError> {
        self.change_state_with(target, &C::default())
    }

    /// Poll the current state's timer. Call once per host tick.
    ///
    /// Returns `Ok(None)` until a timed state's duration has elapsed. Then the
    /// state's completed hook names the successor and the machine transitions
    /// to it. A timed state without a completed hook, or whose hook names no
    /// successor, is a configuration defect reported as an error.
    pub fn update(&mut self) -> Result<Option<TransitionOutcome>, FsmError> {
        self.ensure_alive()?;

        let Some(current) = self.current.clone() else {
            return Ok(None);
        };
        if self.active_duration.is_zero() {
            return Ok(None);
        }

        let elapsed = self.elapsed_in_state();
        if elapsed < self.active_duration {
            tracing::trace!(identity = %self.identity, state = %current, ?elapsed, "Timer pending");
            return Ok(None);
        }

        let Some(completed) = self
            .states
            .get(&current)
            .and_then(StateDefinition::completed_hook)
        else {
            tracing::error!(
                identity = %self.identity,
                state = %current,
                "Timed state expired without a completed hook"
            );
            return Err(FsmError::MissingCompletedHook {
                identity: self.identity.clone(),
                state: current,
            });
        };

        let context = C::default();
        let Some(next) = completed(self, &context) else {
            tracing::error!(
                identity = %self.identity,
                state = %current,
                "Completed hook of timed state named no next state"
            );
            return Err(FsmError::NoNextState {
                identity: self.identity.clone(),
                state: current,
            });
        };
        self.ensure_alive()?;

        tracing::debug!(
            identity = %self.identity,
            from = %current,
            to = %next,
            ?elapsed,
            "State duration expired"
        );
        self.transition(Target::Name(next), &context, Trigger::Timer)
            .map(Some)
    }
}

impl<C> Default for StateMachine<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Drop for StateMachine<C> {
    fn drop(&mut self) {
        if !self.destroyed {
            self.teardown();
        }
    }
}

impl<C> fmt::Debug for StateMachine<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateMachine")
            .field("identity", &self.identity)
            .field("current", &self.current)
            .field("states", &self.states.len())
            .field("active_duration", &self.active_duration)
            .field("destroyed", &self.destroyed)
            .finish()
    }
}

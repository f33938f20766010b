//! Enter guards for controlling state transitions.
//!
//! A guard is the predicate attached to a state that decides whether the
//! machine may enter it. It sees only the transition context, never the
//! machine, so it cannot cause side effects or reentrant transitions.

use std::fmt;
use std::sync::Arc;

/// Predicate that decides whether a state may be entered.
///
/// # Example
///
/// ```rust
/// use tickstate::core::Guard;
///
/// struct Senses {
///     enemy_visible: bool,
/// }
///
/// let can_chase = Guard::new(|s: &Senses| s.enemy_visible);
///
/// assert!(can_chase.check(&Senses { enemy_visible: true }));
/// assert!(!can_chase.check(&Senses { enemy_visible: false }));
/// ```
pub struct Guard<C> {
    predicate: Arc<dyn Fn(&C) -> bool + Send + Sync>,
}

impl<C> Guard<C> {
    /// Create a guard from a predicate over the transition context.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&C) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Arc::new(predicate),
        }
    }

    /// Guard that always admits the transition.
    pub fn always() -> Self {
        Self::new(|_| true)
    }

    /// Guard that always refuses the transition.
    pub fn never() -> Self {
        Self::new(|_| false)
    }

    /// Check if the guard admits a transition with this context.
    pub fn check(&self, context: &C) -> bool {
        (self.predicate)(context)
    }
}

impl<C> Clone for Guard<C> {
    fn clone(&self) -> Self {
        Self {
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<C> fmt::Debug for Guard<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Guard(..)")
    }
}

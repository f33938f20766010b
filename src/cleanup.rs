//! Teardown actions released together when a machine is destroyed.

use std::fmt;

type CleanupAction = Box<dyn FnOnce() + Send>;

/// Accumulates teardown actions and runs them exactly once.
///
/// Actions run in reverse registration order, so a resource registered
/// after another one that it depends on is released first.
#[derive(Default)]
pub struct CleanupRegistrar {
    actions: Vec<CleanupAction>,
    released: bool,
}

impl CleanupRegistrar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a teardown action.
    ///
    /// Registering after release runs the action immediately.
    pub fn register<F>(&mut self, action: F)
    where
        F: FnOnce() + Send + 'static,
    {
        if self.released {
            action();
            return;
        }
        self.actions.push(Box::new(action));
    }

    /// Number of pending actions.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Run every pending action, newest first. Returns how many ran.
    ///
    /// Subsequent calls run nothing and return 0.
    pub fn release_all(&mut self) -> usize {
        if self.released {
            return 0;
        }
        self.released = true;

        let mut count = 0;
        while let Some(action) = self.actions.pop() {
            action();
            count += 1;
        }
        count
    }
}

impl fmt::Debug for CleanupRegistrar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CleanupRegistrar")
            .field("pending", &self.actions.len())
            .field("released", &self.released)
            .finish()
    }
}

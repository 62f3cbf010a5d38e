//! Builder for constructing transitions.

use crate::builder::error::BuildError;
use crate::core::{Guard, State, Transition};

/// Builder for constructing transitions with a fluent API.
pub struct TransitionBuilder<T, S: State> {
    to: Option<S>,
    guard: Option<Guard<T>>,
    skippable: bool,
}

impl<T, S: State> TransitionBuilder<T, S> {
    /// Create a new transition builder.
    pub fn new() -> Self {
        Self {
            to: None,
            guard: None,
            skippable: false,
        }
    }

    /// Set the target state (required).
    pub fn to(mut self, state: S) -> Self {
        self.to = Some(state);
        self
    }

    /// Add a guard (optional).
    pub fn guard(mut self, guard: Guard<T>) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Add a guard using a closure (optional).
    pub fn when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.guard = Some(Guard::new(predicate));
        self
    }

    /// Let resolution look past this transition's target.
    pub fn skippable(mut self) -> Self {
        self.skippable = true;
        self
    }

    /// Build the transition.
    pub fn build(self) -> Result<Transition<T, S>, BuildError> {
        let to = self.to.ok_or(BuildError::MissingTargetState)?;
        if to.name().is_empty() {
            return Err(BuildError::EmptyTargetState);
        }

        Ok(Transition::from_parts(to, self.guard, self.skippable))
    }
}

impl<T, S: State> Default for TransitionBuilder<T, S> {
    fn default() -> Self {
        Self::new()
    }
}

//! Guard predicates deciding whether a transition is currently passable.
//!
//! Guards read the owning object; they must not mutate it. They are
//! evaluated on every resolution and never memoized.

use std::fmt;
use std::sync::Arc;

/// Predicate over the owning object of a state machine.
///
/// Cloning a guard is cheap: the predicate is shared.
///
/// # Example
///
/// ```rust
/// use statekeeper::core::Guard;
///
/// struct Invoice {
///     paid_cents: u64,
///     total_cents: u64,
/// }
///
/// let fully_paid = Guard::new(|invoice: &Invoice| invoice.paid_cents >= invoice.total_cents);
///
/// assert!(fully_paid.check(&Invoice { paid_cents: 500, total_cents: 500 }));
/// assert!(!fully_paid.check(&Invoice { paid_cents: 100, total_cents: 500 }));
/// ```
pub struct Guard<T> {
    predicate: Arc<dyn Fn(&T) -> bool + Send + Sync>,
}

impl<T> Guard<T> {
    /// Create a guard from a predicate.
    ///
    /// The predicate must be side-effect free and thread-safe (Send + Sync).
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Arc::new(predicate),
        }
    }

    /// Evaluate the guard against the owner.
    pub fn check(&self, owner: &T) -> bool {
        (self.predicate)(owner)
    }
}

impl<T> Clone for Guard<T> {
    fn clone(&self) -> Self {
        Self {
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<T> fmt::Debug for Guard<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Guard(..)")
    }
}

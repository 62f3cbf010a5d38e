//! Builder API for declaring transitions and graphs.
//!
//! This module provides fluent builders and macros for declaring a
//! domain's states and transition graph with minimal boilerplate.

pub mod error;
pub mod graph;
pub mod macros;
pub mod transition;

pub use error::BuildError;
pub use graph::GraphBuilder;
pub use transition::TransitionBuilder;

use crate::core::{State, Transition};

/// Create a transition that is only passable while `guard` holds.
///
/// # Example
///
/// ```
/// use statekeeper::builder::guarded_transition;
///
/// struct Order {
///     paid: bool,
/// }
///
/// let transition = guarded_transition("shipped".to_string(), |o: &Order| o.paid);
/// assert!(transition.can_pass(&Order { paid: true }));
/// ```
pub fn guarded_transition<T, S, F>(to: S, guard: F) -> Transition<T, S>
where
    S: State,
    F: Fn(&T) -> bool + Send + Sync + 'static,
{
    Transition::to(to).when(guard)
}

/// Create a skippable transition, optionally passable on its own.
///
/// # Example
///
/// ```
/// use statekeeper::builder::skippable_transition;
///
/// struct Order;
///
/// let transition = skippable_transition::<Order, _, _>("review".to_string(), |_| false);
/// assert!(transition.is_skippable());
/// assert!(!transition.can_pass(&Order));
/// ```
pub fn skippable_transition<T, S, F>(to: S, guard: F) -> Transition<T, S>
where
    S: State,
    F: Fn(&T) -> bool + Send + Sync + 'static,
{
    Transition::to(to).when(guard).skippable()
}

//! Core value types.
//!
//! This module contains the immutable building blocks of a state machine:
//! - State identifiers via the `State` trait
//! - Guard predicates over the owning object
//! - Declared transition edges
//! - History of committed changes
//!
//! Nothing here mutates an owner or a machine.

mod guard;
mod history;
mod state;
mod transition;

pub use guard::Guard;
pub use history::{ChangeRecord, StateHistory};
pub use state::State;
pub use transition::Transition;

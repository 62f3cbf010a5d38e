//! Statekeeper: guarded, skippable state transitions for domain objects
//!
//! A domain object carries a named state and moves along a declared graph
//! of transitions. Transitions may be guarded by a predicate over the
//! object and may be *skippable*: resolution looks past a skippable
//! transition to the states behind it, even when the skippable one is not
//! currently passable.
//!
//! # Core Concepts
//!
//! - **State**: identifier implementing the `State` trait
//! - **Transition**: edge toward a target state with optional guard
//! - **Resolution**: computing every state reachable in one effective move
//! - **Change protocol**: validate, apply side effects, commit, notify,
//!   roll back if a listener rejects the change
//!
//! # Example
//!
//! ```rust
//! use statekeeper::prelude::*;
//! use std::borrow::Cow;
//! use std::sync::Arc;
//!
//! state_enum! {
//!     pub enum Review {
//!         Submitted,
//!         Triage,
//!         Accepted,
//!     }
//!     final: [Accepted]
//! }
//!
//! struct Paper {
//!     machine: StateMachine<Paper>,
//!     graph: TransitionGraph<Paper, Review>,
//! }
//!
//! impl Stateful for Paper {
//!     type State = Review;
//!     type Params = ();
//!     type Error = StateError;
//!
//!     fn state_machine(&self) -> &StateMachine<Self> {
//!         &self.machine
//!     }
//!
//!     fn state_transitions(&self, state: &Review) -> Cow<'_, [Transition<Self, Review>]> {
//!         self.graph.transitions(state)
//!     }
//!
//!     fn apply_state_change(&self, _target: &Review, _params: &()) -> Result<(), StateError> {
//!         Ok(())
//!     }
//! }
//!
//! let graph = TransitionGraph::new()
//!     .with_state(Review::Submitted, vec![Transition::to(Review::Triage).skippable().when(|_| false)])
//!     .with_state(Review::Triage, vec![Transition::to(Review::Accepted)]);
//!
//! let paper = Paper { machine: StateMachine::new(), graph };
//! paper.initialize_state(Review::Submitted).unwrap();
//! paper.state_machine().attach(Arc::new(InMemoryContext::default()));
//!
//! assert_eq!(paper.available_states(), vec![Review::Accepted]);
//! paper.change_state(Review::Accepted).unwrap();
//! assert!(paper.has_state([Review::Accepted]));
//! ```

pub mod builder;
pub mod checkpoint;
pub mod core;
pub mod events;
pub mod graph;
pub mod machine;

// Re-export commonly used types
pub use crate::core::{ChangeRecord, Guard, State, StateHistory, Transition};
pub use crate::events::{EventBus, EventSink, InMemoryContext, PersistenceContext, StateChanged};
pub use crate::graph::{compute_available_states, TransitionGraph, TransitionGraphProvider};
pub use crate::machine::{MachineConfig, StateError, StateMachine, Stateful};

/// Everything needed to declare a stateful domain type.
pub mod prelude {
    pub use crate::builder::{GraphBuilder, TransitionBuilder};
    pub use crate::core::{Guard, State, Transition};
    pub use crate::events::{sink_fn, EventBus, EventSink, InMemoryContext, StateChanged};
    pub use crate::graph::{TransitionGraph, TransitionGraphProvider};
    pub use crate::machine::{MachineConfig, StateError, StateMachine, Stateful};
    pub use crate::state_enum;
}

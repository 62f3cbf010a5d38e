//! The capability set an owning object provides to its state machine.

use super::{StateError, StateMachine};
use crate::core::{State, Transition};
use crate::graph::Reachable;
use serde_json::Value;
use std::borrow::{Borrow, Cow};

/// Implemented by domain objects that carry a state.
///
/// Implementors supply three things: access to their [`StateMachine`],
/// the transitions declared for a state, and the side-effect hook run
/// before a change commits. Everything else is provided.
///
/// # Example
///
/// ```rust
/// use statekeeper::core::Transition;
/// use statekeeper::events::InMemoryContext;
/// use statekeeper::machine::{StateError, StateMachine, Stateful};
/// use std::borrow::Cow;
/// use std::sync::Arc;
///
/// struct Article {
///     machine: StateMachine<Article>,
/// }
///
/// impl Stateful for Article {
///     type State = String;
///     type Params = ();
///     type Error = StateError;
///
///     fn state_machine(&self) -> &StateMachine<Self> {
///         &self.machine
///     }
///
///     fn state_transitions(&self, state: &String) -> Cow<'_, [Transition<Self, String>]> {
///         match state.as_str() {
///             "draft" => Cow::Owned(vec![Transition::to("published".to_string())]),
///             _ => Cow::Owned(Vec::new()),
///         }
///     }
///
///     fn apply_state_change(&self, _target: &String, _params: &()) -> Result<(), StateError> {
///         Ok(())
///     }
/// }
///
/// let article = Article { machine: StateMachine::new() };
/// article.initialize_state("draft".to_string()).unwrap();
/// article.state_machine().attach(Arc::new(InMemoryContext::default()));
///
/// article.change_state("published".to_string()).unwrap();
/// assert_eq!(article.state().unwrap(), "published");
/// ```
pub trait Stateful: Sized {
    type State: State;
    /// Extra information the side-effect hook needs to perform a change.
    type Params;
    /// Error returned by change requests. Engine errors convert into it;
    /// hook and sink errors are already of this type.
    type Error: From<StateError>;

    fn state_machine(&self) -> &StateMachine<Self>;

    /// Transitions declared for `state`, in priority order.
    fn state_transitions(&self, state: &Self::State) -> Cow<'_, [Transition<Self, Self::State>]>;

    /// Prepare dependent data before `target` becomes current.
    ///
    /// Runs while the old state is still current. Returning an error aborts
    /// the change with the state untouched. Work done here is not undone
    /// if the event sink later rejects the change.
    fn apply_state_change(
        &self,
        target: &Self::State,
        params: &Self::Params,
    ) -> Result<(), Self::Error>;

    /// Owner-specific payload attached to the change event.
    ///
    /// Called after commit, before the sink runs. Defaults to `Value::Null`.
    fn state_change_details(&self, _prev_state: &Self::State, _new_state: &Self::State) -> Value {
        Value::Null
    }

    fn state(&self) -> Result<Self::State, StateError> {
        self.state_machine().current()
    }

    fn initialize_state(&self, default_state: Self::State) -> Result<(), StateError> {
        self.state_machine().initialize(default_state)
    }

    /// States reachable right now. Guards are re-evaluated on each call.
    fn available_states(&self) -> Vec<Self::State> {
        self.reachable_states()
            .into_iter()
            .map(|reachable| reachable.state)
            .collect()
    }

    fn reachable_states(&self) -> Vec<Reachable<Self::State>> {
        self.state_machine().reachable(self)
    }

    /// Skipped states on the way to `target`, if it is available now.
    fn route_to(&self, target: &Self::State) -> Option<Vec<Self::State>> {
        self.reachable_states()
            .into_iter()
            .find(|reachable| &reachable.state == target)
            .map(|reachable| reachable.via)
    }

    fn can_change_to(&self, target: &Self::State) -> bool {
        self.available_states().contains(target)
    }

    /// True when the current state is one of `allowed`.
    fn has_state<I>(&self, allowed: I) -> bool
    where
        I: IntoIterator,
        I::Item: Borrow<Self::State>,
    {
        match self.state() {
            Ok(current) => allowed
                .into_iter()
                .any(|state| Borrow::<Self::State>::borrow(&state) == &current),
            Err(_) => false,
        }
    }

    /// Precondition guard: fails with `WrongState` unless the current
    /// state is one of `allowed`.
    fn check_state<I>(&self, allowed: I) -> Result<(), StateError>
    where
        I: IntoIterator,
        I::Item: Borrow<Self::State>,
    {
        let current = self.state()?;
        let allowed: Vec<I::Item> = allowed.into_iter().collect();
        if allowed
            .iter()
            .any(|state| Borrow::<Self::State>::borrow(state) == &current)
        {
            return Ok(());
        }
        Err(StateError::WrongState {
            current: current.name().to_string(),
            expected: allowed
                .iter()
                .map(|state| Borrow::<Self::State>::borrow(state).name().to_string())
                .collect(),
        })
    }

    fn request_state_change(
        &self,
        target: Self::State,
        params: Self::Params,
    ) -> Result<(), Self::Error> {
        self.state_machine().request_change(self, target, params)
    }

    /// Change state with default parameters.
    fn change_state(&self, target: Self::State) -> Result<(), Self::Error>
    where
        Self::Params: Default,
    {
        self.request_state_change(target, Self::Params::default())
    }
}

//! Resolution of the states reachable in one effective move.
//!
//! Resolution is depth-first in declared order. A target already found is
//! neither re-added nor re-expanded, and every state is expanded at most
//! once, so cycles among skippable transitions terminate.

use super::TransitionGraphProvider;
use crate::core::State;
use serde::{Deserialize, Serialize};

/// A state reachable from the origin, with the skipped states on the way.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Reachable<S: State> {
    pub state: S,
    /// Skippable targets passed through, in order, before reaching `state`.
    /// Empty for a direct transition.
    pub via: Vec<S>,
}

/// Compute every state reachable from `origin` right now, with routes.
///
/// Guards are evaluated against `owner` on every call; nothing is cached.
pub fn compute_reachable<T, P>(provider: &P, origin: &P::State, owner: &T) -> Vec<Reachable<P::State>>
where
    P: TransitionGraphProvider<T> + ?Sized,
{
    let mut resolution = Resolution {
        found: Vec::new(),
        expanded: vec![origin.clone()],
        route: Vec::new(),
    };
    resolution.expand(provider, origin, owner);
    resolution.found
}

/// Compute the set of states reachable from `origin` right now.
///
/// # Example
///
/// ```rust
/// use statekeeper::core::Transition;
/// use statekeeper::graph::{compute_available_states, TransitionGraph};
///
/// struct Doc;
///
/// let graph: TransitionGraph<Doc, String> = TransitionGraph::new()
///     .with_state("a".to_string(), vec![Transition::to("b".to_string()).skippable().when(|_| false)])
///     .with_state("b".to_string(), vec![Transition::to("c".to_string())]);
///
/// let available = compute_available_states(&graph, &"a".to_string(), &Doc);
/// assert_eq!(available, vec!["c".to_string()]);
/// ```
pub fn compute_available_states<T, P>(provider: &P, origin: &P::State, owner: &T) -> Vec<P::State>
where
    P: TransitionGraphProvider<T> + ?Sized,
{
    compute_reachable(provider, origin, owner)
        .into_iter()
        .map(|reachable| reachable.state)
        .collect()
}

struct Resolution<S: State> {
    found: Vec<Reachable<S>>,
    expanded: Vec<S>,
    route: Vec<S>,
}

impl<S: State> Resolution<S> {
    fn expand<T, P>(&mut self, provider: &P, state: &S, owner: &T)
    where
        P: TransitionGraphProvider<T, State = S> + ?Sized,
    {
        let transitions = provider.transitions(state);
        for transition in transitions.iter() {
            let target = transition.target_state();
            if self.found.iter().any(|r| &r.state == target) {
                continue;
            }

            if transition.can_pass(owner) {
                self.found.push(Reachable {
                    state: target.clone(),
                    via: self.route.clone(),
                });
            }

            // Skippable targets are looked past even when not passable.
            if transition.is_skippable() && !self.expanded.contains(target) {
                self.expanded.push(target.clone());
                self.route.push(target.clone());
                self.expand(provider, target, owner);
                self.route.pop();
            }
        }
    }
}

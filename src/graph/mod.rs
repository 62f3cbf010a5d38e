//! Transition graphs and their resolution.
//!
//! A graph maps each source state to the ordered transitions declared for
//! it. Graphs are declared once per domain type and shared by every
//! instance; guards receive the instance being resolved.

mod resolver;
mod validate;

pub use resolver::{compute_available_states, compute_reachable, Reachable};
pub use validate::{validate_graph, GraphViolation};

use crate::core::{State, Transition};
use std::borrow::Cow;

/// Capability supplying the outgoing transitions of a state.
///
/// Static declarations return borrowed slices; providers that build their
/// transitions on demand return owned vectors.
pub trait TransitionGraphProvider<T> {
    type State: State;

    fn transitions(&self, state: &Self::State) -> Cow<'_, [Transition<T, Self::State>]>;
}

/// Static transition declaration: source state to ordered transitions.
///
/// Lookup is linear in the number of declared sources; states only need
/// `PartialEq`.
pub struct TransitionGraph<T, S: State> {
    entries: Vec<(S, Vec<Transition<T, S>>)>,
}

impl<T, S: State> TransitionGraph<T, S> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Declare the transitions leaving `source`.
    ///
    /// Declaring the same source again appends to its transitions; use
    /// [`GraphBuilder`](crate::builder::GraphBuilder) to reject that.
    pub fn with_state(mut self, source: S, transitions: Vec<Transition<T, S>>) -> Self {
        self.declare(source, transitions);
        self
    }

    pub(crate) fn declare(&mut self, source: S, transitions: Vec<Transition<T, S>>) {
        match self.entries.iter_mut().find(|(state, _)| *state == source) {
            Some((_, existing)) => existing.extend(transitions),
            None => self.entries.push((source, transitions)),
        }
    }

    pub(crate) fn declares(&self, source: &S) -> bool {
        self.entries.iter().any(|(state, _)| state == source)
    }

    /// Declared transitions leaving `state`; empty when undeclared.
    pub fn transitions_from(&self, state: &S) -> &[Transition<T, S>] {
        self.entries
            .iter()
            .find(|(source, _)| source == state)
            .map(|(_, transitions)| transitions.as_slice())
            .unwrap_or(&[])
    }

    /// Source states in declaration order.
    pub fn sources(&self) -> impl Iterator<Item = &S> {
        self.entries.iter().map(|(state, _)| state)
    }

    pub(crate) fn entries(&self) -> &[(S, Vec<Transition<T, S>>)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T, S: State> Default for TransitionGraph<T, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, S: State> Clone for TransitionGraph<T, S> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }
}

impl<T, S: State> std::fmt::Debug for TransitionGraph<T, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransitionGraph")
            .field("entries", &self.entries)
            .finish()
    }
}

impl<T, S: State> TransitionGraphProvider<T> for TransitionGraph<T, S> {
    type State = S;

    fn transitions(&self, state: &S) -> Cow<'_, [Transition<T, S>]> {
        Cow::Borrowed(self.transitions_from(state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Owner;

    fn s(name: &str) -> String {
        name.to_string()
    }

    #[test]
    fn transitions_from_returns_declared_order() {
        let graph: TransitionGraph<Owner, String> = TransitionGraph::new().with_state(
            s("A"),
            vec![Transition::to(s("C")), Transition::to(s("B"))],
        );

        let targets: Vec<&String> = graph
            .transitions_from(&s("A"))
            .iter()
            .map(|t| t.target_state())
            .collect();
        assert_eq!(targets, vec!["C", "B"]);
    }

    #[test]
    fn undeclared_state_has_no_transitions() {
        let graph: TransitionGraph<Owner, String> = TransitionGraph::new();
        assert!(graph.transitions_from(&s("A")).is_empty());
        assert!(graph.is_empty());
    }

    #[test]
    fn redeclaring_a_source_appends() {
        let graph: TransitionGraph<Owner, String> = TransitionGraph::new()
            .with_state(s("A"), vec![Transition::to(s("B"))])
            .with_state(s("A"), vec![Transition::to(s("C"))]);

        assert_eq!(graph.len(), 1);
        assert_eq!(graph.transitions_from(&s("A")).len(), 2);
    }

    #[test]
    fn provider_borrows_static_declaration() {
        let graph: TransitionGraph<Owner, String> =
            TransitionGraph::new().with_state(s("A"), vec![Transition::to(s("B"))]);

        let transitions = graph.transitions(&s("A"));
        assert!(matches!(transitions, Cow::Borrowed(_)));
        assert_eq!(transitions.len(), 1);
    }
}

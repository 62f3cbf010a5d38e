//! Declaration checks for transition graphs.
//!
//! All problems are accumulated with `Validation` instead of stopping at
//! the first one.

use super::TransitionGraph;
use crate::core::State;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// A problem found in a graph declaration.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum GraphViolation {
    #[error("transition declared from '{from}' has an empty target state")]
    EmptyTarget { from: String },

    #[error("final state '{state}' declares {count} outgoing transition(s)")]
    FinalStateHasTransitions { state: String, count: usize },

    #[error("'{from}' declares an unguarded transition to '{to}' more than once")]
    DuplicateUnguarded { from: String, to: String },
}

/// Check a graph declaration, accumulating every violation.
pub fn validate_graph<T, S: State>(
    graph: &TransitionGraph<T, S>,
) -> Validation<(), NonEmptyVec<GraphViolation>> {
    let mut checks: Vec<Validation<(), NonEmptyVec<GraphViolation>>> = Vec::new();

    for (source, transitions) in graph.entries() {
        if source.is_final() && !transitions.is_empty() {
            checks.push(Validation::fail(GraphViolation::FinalStateHasTransitions {
                state: source.name().to_string(),
                count: transitions.len(),
            }));
        }

        for (index, transition) in transitions.iter().enumerate() {
            let target = transition.target_state();
            if target.name().is_empty() {
                checks.push(Validation::fail(GraphViolation::EmptyTarget {
                    from: source.name().to_string(),
                }));
            }

            // Only the first unguarded declaration can ever contribute.
            let repeated = !transition.is_guarded()
                && transitions[..index]
                    .iter()
                    .any(|earlier| !earlier.is_guarded() && earlier.target_state() == target);
            if repeated {
                checks.push(Validation::fail(GraphViolation::DuplicateUnguarded {
                    from: source.name().to_string(),
                    to: target.name().to_string(),
                }));
            }
        }
    }

    Validation::all_vec(checks).map(|_| ())
}

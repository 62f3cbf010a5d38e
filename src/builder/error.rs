//! Build errors for transition and graph builders.

use thiserror::Error;

/// Errors that can occur when building transitions and graphs.
#[derive(Debug, Error, PartialEq)]
pub enum BuildError {
    #[error("Transition target state not specified. Call .to(state)")]
    MissingTargetState,

    #[error("Transition target state has an empty name")]
    EmptyTargetState,

    #[error("Transitions from '{0}' are declared more than once")]
    DuplicateSource(String),

    #[error("Source state has an empty name")]
    EmptySourceState,
}

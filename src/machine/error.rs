//! Errors raised by the state machine itself.

use thiserror::Error;

/// Failures produced by the engine.
///
/// Errors raised by an owner's side-effect hook or by an event sink are
/// not wrapped in this type; they reach the caller as the owner's own
/// error type.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StateError {
    #[error("state has not been initialized")]
    UninitializedState,

    #[error("state is already set to '{current}'; request a state change instead")]
    AlreadyInitialized { current: String },

    #[error("unavailable state transition '{from}' > '{to}' in {owner}")]
    InvalidTransition {
        from: String,
        to: String,
        owner: &'static str,
    },

    #[error("wrong state '{current}', expected one of {expected:?}")]
    WrongState {
        current: String,
        expected: Vec<String>,
    },

    #[error("cannot change state of an object without a live persistence context; attach it first")]
    NotPersisted,

    /// For collaborators that use `StateError` as their error type.
    #[error("state change rejected: {0}")]
    Rejected(String),
}

impl StateError {
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::Rejected(reason.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_states_involved() {
        let err = StateError::InvalidTransition {
            from: "new".to_string(),
            to: "shipped".to_string(),
            owner: "Order",
        };
        assert_eq!(
            err.to_string(),
            "unavailable state transition 'new' > 'shipped' in Order"
        );

        let err = StateError::WrongState {
            current: "C".to_string(),
            expected: vec!["A".to_string(), "B".to_string()],
        };
        assert_eq!(err.to_string(), "wrong state 'C', expected one of [\"A\", \"B\"]");
    }
}

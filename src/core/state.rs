//! The `State` trait implemented by every state identifier.
//!
//! A state is an opaque value: the engine only ever compares states for
//! equality and reads their name for logging and error reporting.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for state identifiers.
///
/// # Required Traits
///
/// - `Clone`: states are copied into events, history and errors
/// - `PartialEq`: transition resolution is equality based
/// - `Debug`: states must be debuggable for diagnostics
/// - `Serialize` + `Deserialize`: states are stored in checkpoints
///
/// # Example
///
/// ```rust
/// use statekeeper::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum OrderState {
///     New,
///     Paid,
///     Shipped,
/// }
///
/// impl State for OrderState {
///     fn name(&self) -> &str {
///         match self {
///             Self::New => "New",
///             Self::Paid => "Paid",
///             Self::Shipped => "Shipped",
///         }
///     }
///
///     fn is_final(&self) -> bool {
///         matches!(self, Self::Shipped)
///     }
/// }
/// ```
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Name used in logs and error messages. Must not be empty.
    fn name(&self) -> &str;

    /// Terminal states are expected to declare no outgoing transitions.
    ///
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }
}

/// Plain strings are valid states, matching string-keyed domain models.
impl State for String {
    fn name(&self) -> &str {
        self.as_str()
    }
}

//! Change notification and the persistence precondition.
//!
//! A committed change produces one [`StateChanged`] event, handed to the
//! machine's [`EventSink`] synchronously while the new state is already
//! current. A sink error rolls the change back.

mod bus;
mod context;

pub use bus::EventBus;
pub use context::{InMemoryContext, PersistenceContext};

use crate::machine::Stateful;
use crate::core::State;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::fmt;
use uuid::Uuid;

/// Event describing one committed state change.
pub struct StateChanged<'a, O: Stateful> {
    id: Uuid,
    owner: &'a O,
    prev_state: O::State,
    new_state: O::State,
    occurred_at: DateTime<Utc>,
    details: Value,
}

impl<'a, O: Stateful> StateChanged<'a, O> {
    pub(crate) fn new(
        owner: &'a O,
        prev_state: O::State,
        new_state: O::State,
        occurred_at: DateTime<Utc>,
        details: Value,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner,
            prev_state,
            new_state,
            occurred_at,
            details,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The object whose state changed. Its current state is already `new_state`.
    pub fn owner(&self) -> &'a O {
        self.owner
    }

    pub fn prev_state(&self) -> &O::State {
        &self.prev_state
    }

    pub fn new_state(&self) -> &O::State {
        &self.new_state
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    /// Payload from [`Stateful::state_change_details`].
    pub fn details(&self) -> &Value {
        &self.details
    }
}

impl<O: Stateful> fmt::Debug for StateChanged<'_, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateChanged")
            .field("id", &self.id)
            .field("owner", &std::any::type_name::<O>())
            .field("prev_state", &self.prev_state.name())
            .field("new_state", &self.new_state.name())
            .field("occurred_at", &self.occurred_at)
            .field("details", &self.details)
            .finish()
    }
}

/// Listener notified after every committed change.
///
/// Returning an error rejects the change: the machine restores the
/// previous state and the error reaches the caller unmodified.
pub trait EventSink<O: Stateful>: Send + Sync {
    fn notify(&self, event: &StateChanged<'_, O>) -> Result<(), O::Error>;
}

/// Sink that accepts every change. Default for new machines.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl<O: Stateful> EventSink<O> for NoopSink {
    fn notify(&self, _event: &StateChanged<'_, O>) -> Result<(), O::Error> {
        Ok(())
    }
}

/// Closure-backed sink, see [`sink_fn`].
pub struct FnSink<F> {
    handler: F,
}

impl<O, F> EventSink<O> for FnSink<F>
where
    O: Stateful,
    F: Fn(&StateChanged<'_, O>) -> Result<(), O::Error> + Send + Sync,
{
    fn notify(&self, event: &StateChanged<'_, O>) -> Result<(), O::Error> {
        (self.handler)(event)
    }
}

/// Adapt a closure into an [`EventSink`].
pub fn sink_fn<O, F>(handler: F) -> FnSink<F>
where
    O: Stateful,
    F: Fn(&StateChanged<'_, O>) -> Result<(), O::Error> + Send + Sync,
{
    FnSink { handler }
}

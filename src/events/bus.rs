//! Fan-out sink dispatching change events to named listeners.

use super::{EventSink, StateChanged};
use crate::core::State;
use crate::machine::Stateful;
use tracing::{debug, warn};

type Handler<O> =
    Box<dyn Fn(&StateChanged<'_, O>) -> Result<(), <O as Stateful>::Error> + Send + Sync>;

struct Listener<O: Stateful> {
    name: String,
    only_into: Option<O::State>,
    handler: Handler<O>,
}

/// Ordered collection of listeners acting as one sink.
///
/// Listeners run in subscription order. The first listener error stops
/// dispatch and is returned as-is, which rolls the change back.
pub struct EventBus<O: Stateful> {
    listeners: Vec<Listener<O>>,
}

impl<O: Stateful> EventBus<O> {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    /// Listen to every change.
    pub fn subscribe<F>(mut self, name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&StateChanged<'_, O>) -> Result<(), O::Error> + Send + Sync + 'static,
    {
        self.listeners.push(Listener {
            name: name.into(),
            only_into: None,
            handler: Box::new(handler),
        });
        self
    }

    /// Listen only to changes into `state`.
    pub fn subscribe_to<F>(mut self, name: impl Into<String>, state: O::State, handler: F) -> Self
    where
        F: Fn(&StateChanged<'_, O>) -> Result<(), O::Error> + Send + Sync + 'static,
    {
        self.listeners.push(Listener {
            name: name.into(),
            only_into: Some(state),
            handler: Box::new(handler),
        });
        self
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl<O: Stateful> Default for EventBus<O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: Stateful> EventSink<O> for EventBus<O> {
    fn notify(&self, event: &StateChanged<'_, O>) -> Result<(), O::Error> {
        for listener in &self.listeners {
            if let Some(state) = &listener.only_into {
                if state != event.new_state() {
                    continue;
                }
            }

            debug!(
                listener = %listener.name,
                event_id = %event.id(),
                new_state = event.new_state().name(),
                "dispatching state change"
            );
            if let Err(err) = (listener.handler)(event) {
                warn!(
                    listener = %listener.name,
                    event_id = %event.id(),
                    "listener rejected state change"
                );
                return Err(err);
            }
        }
        Ok(())
    }
}

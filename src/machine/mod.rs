//! State machine instances and the state-change protocol.
//!
//! Each owning object holds one [`StateMachine`] and implements
//! [`Stateful`] to supply its transition graph and side-effect hook.
//!
//! A change request runs to completion on the caller's stack:
//!
//! 1. duplicate check: a request for the target already in flight is a no-op
//! 2. validation against the currently available states
//! 3. persistence precondition
//! 4. the owner's side-effect hook
//! 5. commit of the new state and its history record
//! 6. synchronous notification of the event sink
//! 7. rollback of the state field and history if the sink fails
//!
//! The instance lock is released around every callback, so guards, hooks
//! and sinks may call back into this or any other machine.

mod config;
mod error;
mod stateful;

pub use config::{ConfigError, MachineConfig};
pub use error::StateError;
pub use stateful::Stateful;

use crate::checkpoint::{Checkpoint, CheckpointError};
use crate::core::{ChangeRecord, State, StateHistory, Transition};
use crate::events::{EventSink, NoopSink, PersistenceContext, StateChanged};
use crate::graph::{compute_reachable, Reachable, TransitionGraphProvider};
use chrono::Utc;
use parking_lot::Mutex;
use std::borrow::Cow;
use std::sync::Arc;
use tracing::{debug, info, warn};

struct Inner<O: Stateful> {
    current: Option<O::State>,
    pending: Option<O::State>,
    history: StateHistory<O::State>,
    context: Option<Arc<dyn PersistenceContext>>,
    sink: Arc<dyn EventSink<O>>,
}

/// Per-object state holder.
///
/// The instance does not serialize concurrent callers: the pending marker
/// only protects against reentrancy on one call stack. Owners shared
/// across threads must serialize their own change requests.
pub struct StateMachine<O: Stateful> {
    inner: Mutex<Inner<O>>,
    config: MachineConfig,
}

impl<O: Stateful> StateMachine<O> {
    /// Uninitialized machine with the default configuration and no-op sink.
    pub fn new() -> Self {
        Self::with_config(MachineConfig::default())
    }

    /// Machine with `config` after checking it with [`MachineConfig::validate`].
    pub fn try_with_config(config: MachineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_config(config))
    }

    /// Machine with `config` as given.
    ///
    /// The config is not validated here: a `history_limit` of zero with
    /// history enabled keeps no records. Use
    /// [`try_with_config`](Self::try_with_config) for untrusted input.
    pub fn with_config(config: MachineConfig) -> Self {
        Self {
            inner: Mutex::new(Inner {
                current: None,
                pending: None,
                history: StateHistory::new(),
                context: None,
                sink: Arc::new(NoopSink),
            }),
            config,
        }
    }

    /// Replace the event sink, builder style.
    pub fn with_sink(self, sink: impl EventSink<O> + 'static) -> Self {
        self.set_sink(sink);
        self
    }

    /// Replace the event sink.
    pub fn set_sink(&self, sink: impl EventSink<O> + 'static) {
        self.inner.lock().sink = Arc::new(sink);
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    /// Attach the persistence context required before changes.
    pub fn attach(&self, context: Arc<dyn PersistenceContext>) {
        debug!(context = context.name(), "attaching persistence context");
        self.inner.lock().context = Some(context);
    }

    pub fn detach(&self) {
        self.inner.lock().context = None;
    }

    /// True when a live persistence context is attached.
    pub fn is_attached(&self) -> bool {
        self.inner
            .lock()
            .context
            .as_ref()
            .is_some_and(|context| context.is_live())
    }

    /// One-time setter of the initial state.
    pub fn initialize(&self, default_state: O::State) -> Result<(), StateError> {
        let mut inner = self.inner.lock();
        if let Some(current) = &inner.current {
            return Err(StateError::AlreadyInitialized {
                current: current.name().to_string(),
            });
        }
        debug!(state = default_state.name(), "initializing state");
        inner.current = Some(default_state);
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.inner.lock().current.is_some()
    }

    pub fn current(&self) -> Result<O::State, StateError> {
        self.inner
            .lock()
            .current
            .clone()
            .ok_or(StateError::UninitializedState)
    }

    /// Target of the change in flight, if any.
    pub fn pending(&self) -> Option<O::State> {
        self.inner.lock().pending.clone()
    }

    pub fn is_changing(&self) -> bool {
        self.inner.lock().pending.is_some()
    }

    pub fn history(&self) -> StateHistory<O::State> {
        self.inner.lock().history.clone()
    }

    /// States reachable from the current one, with skipped routes.
    /// Empty while uninitialized.
    pub fn reachable(&self, owner: &O) -> Vec<Reachable<O::State>> {
        // Guards may read the owner's state, so the lock is released first.
        let current = self.inner.lock().current.clone();
        match current {
            Some(current) => compute_reachable(&OwnerGraph(owner), &current, owner),
            None => Vec::new(),
        }
    }

    /// Run the change protocol for `target`.
    ///
    /// Engine failures are converted into `O::Error`; errors from the
    /// owner's hook and the sink are returned unchanged after the state
    /// field, history and pending marker are restored.
    pub fn request_change(
        &self,
        owner: &O,
        target: O::State,
        params: O::Params,
    ) -> Result<(), O::Error> {
        let current = {
            let inner = self.inner.lock();
            if inner.pending.as_ref() == Some(&target) {
                debug!(
                    target_state = target.name(),
                    "change already in flight, ignoring duplicate request"
                );
                return Ok(());
            }
            inner.current.clone().ok_or(StateError::UninitializedState)?
        };

        let reachable = compute_reachable(&OwnerGraph(owner), &current, owner);
        if !reachable.iter().any(|r| r.state == target) {
            warn!(
                owner = std::any::type_name::<O>(),
                from = current.name(),
                to = target.name(),
                "rejected unavailable state transition"
            );
            return Err(StateError::InvalidTransition {
                from: current.name().to_string(),
                to: target.name().to_string(),
                owner: std::any::type_name::<O>(),
            }
            .into());
        }

        let (sink, outer_pending) = {
            let mut inner = self.inner.lock();
            if self.config.require_persistence
                && !inner.context.as_ref().is_some_and(|context| context.is_live())
            {
                warn!(
                    owner = std::any::type_name::<O>(),
                    to = target.name(),
                    "state change requested without a live persistence context"
                );
                return Err(StateError::NotPersisted.into());
            }
            let outer_pending = inner.pending.replace(target.clone());
            (Arc::clone(&inner.sink), outer_pending)
        };

        debug!(from = current.name(), to = target.name(), "applying state change side effects");
        if let Err(err) = owner.apply_state_change(&target, &params) {
            warn!(to = target.name(), "side effects failed, state left unchanged");
            self.inner.lock().pending = outer_pending;
            return Err(err);
        }

        // Recorded at commit: nested changes made by listeners land after
        // this record, and rollback restores the snapshot.
        let (prev_state, prev_history, occurred_at) = {
            let mut inner = self.inner.lock();
            // Checked at entry and never cleared afterwards.
            let prev_state = inner
                .current
                .replace(target.clone())
                .unwrap_or_else(|| current.clone());
            let prev_history = inner.history.clone();
            let occurred_at = Utc::now();
            if self.config.record_history {
                let history = inner.history.record(ChangeRecord {
                    from: prev_state.clone(),
                    to: target.clone(),
                    timestamp: occurred_at,
                });
                inner.history = match self.config.history_limit {
                    Some(limit) => history.retain_last(limit),
                    None => history,
                };
            }
            (prev_state, prev_history, occurred_at)
        };

        let details = owner.state_change_details(&prev_state, &target);
        let event = StateChanged::new(owner, prev_state.clone(), target.clone(), occurred_at, details);
        if let Err(err) = sink.notify(&event) {
            let mut inner = self.inner.lock();
            inner.current = Some(prev_state.clone());
            inner.history = prev_history;
            inner.pending = outer_pending;
            warn!(
                event_id = %event.id(),
                restored = prev_state.name(),
                rejected = target.name(),
                "event sink failed, state change rolled back"
            );
            return Err(err);
        }

        self.inner.lock().pending = outer_pending;
        info!(
            event_id = %event.id(),
            from = prev_state.name(),
            to = target.name(),
            "state change committed"
        );
        Ok(())
    }

    /// Snapshot of the committed state and history.
    ///
    /// Refused while a change is in flight, since it may still roll back.
    pub fn checkpoint(&self) -> Result<Checkpoint<O::State>, CheckpointError> {
        let inner = self.inner.lock();
        if let Some(pending) = &inner.pending {
            return Err(CheckpointError::ChangeInFlight {
                target: pending.name().to_string(),
            });
        }
        Ok(Checkpoint::new(inner.current.clone(), inner.history.clone()))
    }

    /// Rebuild a machine from a checkpoint.
    ///
    /// The restored machine is detached and uses the no-op sink.
    pub fn from_checkpoint(
        checkpoint: Checkpoint<O::State>,
        config: MachineConfig,
    ) -> Result<Self, CheckpointError> {
        checkpoint.validate()?;
        config
            .validate()
            .map_err(|err| CheckpointError::ValidationFailed(err.to_string()))?;
        let history = match config.history_limit {
            Some(limit) => checkpoint.history.retain_last(limit),
            None => checkpoint.history,
        };
        let machine = Self::with_config(config);
        {
            let mut inner = machine.inner.lock();
            inner.current = checkpoint.current_state;
            inner.history = history;
        }
        Ok(machine)
    }
}

impl<O: Stateful> Default for StateMachine<O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: Stateful> std::fmt::Debug for StateMachine<O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("StateMachine")
            .field("current", &inner.current)
            .field("pending", &inner.pending)
            .field("history_len", &inner.history.len())
            .field("attached", &inner.context.is_some())
            .field("config", &self.config)
            .finish()
    }
}

/// Presents an owner's declared transitions to the resolver.
struct OwnerGraph<'a, O>(&'a O);

impl<O: Stateful> TransitionGraphProvider<O> for OwnerGraph<'_, O> {
    type State = O::State;

    fn transitions(&self, state: &O::State) -> Cow<'_, [Transition<O, O::State>]> {
        self.0.state_transitions(state)
    }
}

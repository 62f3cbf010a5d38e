//! Checkpoint and restore of a machine's committed state.
//!
//! A checkpoint captures the current state and history of one machine so
//! an owner can be reloaded later. Transition graphs, sinks and the
//! persistence context are not part of it; the owner re-supplies them.

use crate::core::{State, StateHistory};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable snapshot of a state machine.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Checkpoint<S: State> {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: Uuid,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    /// Current state, `None` for an uninitialized machine
    pub current_state: Option<S>,

    /// Committed change history
    pub history: StateHistory<S>,
}

impl<S: State> Checkpoint<S> {
    pub(crate) fn new(current_state: Option<S>, history: StateHistory<S>) -> Self {
        Self {
            version: CHECKPOINT_VERSION,
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            current_state,
            history,
        }
    }

    /// Check version and that the history ends in the current state.
    pub fn validate(&self) -> Result<(), CheckpointError> {
        if self.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            });
        }

        match (self.history.last(), &self.current_state) {
            (Some(_), None) => Err(CheckpointError::ValidationFailed(
                "history present for an uninitialized machine".to_string(),
            )),
            (Some(last), Some(current)) if &last.to != current => {
                Err(CheckpointError::ValidationFailed(format!(
                    "history ends in '{}' but current state is '{}'",
                    last.to.name(),
                    current.name()
                )))
            }
            _ => Ok(()),
        }
    }

    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        serde_json::from_str(json).map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))
    }

    /// Compact binary encoding.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CheckpointError> {
        bincode::deserialize(bytes).map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ChangeRecord;

    #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    enum Shipment {
        Packed,
        InTransit,
        Delivered,
    }

    impl State for Shipment {
        fn name(&self) -> &str {
            match self {
                Self::Packed => "Packed",
                Self::InTransit => "InTransit",
                Self::Delivered => "Delivered",
            }
        }
    }

    fn delivered_checkpoint() -> Checkpoint<Shipment> {
        let history = StateHistory::new()
            .record(ChangeRecord {
                from: Shipment::Packed,
                to: Shipment::InTransit,
                timestamp: Utc::now(),
            })
            .record(ChangeRecord {
                from: Shipment::InTransit,
                to: Shipment::Delivered,
                timestamp: Utc::now(),
            });
        Checkpoint::new(Some(Shipment::Delivered), history)
    }

    #[test]
    fn new_checkpoint_uses_current_version() {
        let checkpoint = delivered_checkpoint();
        assert_eq!(checkpoint.version, CHECKPOINT_VERSION);
        assert!(checkpoint.validate().is_ok());
    }

    #[test]
    fn json_preserves_state_and_history() {
        let checkpoint = delivered_checkpoint();
        let restored = Checkpoint::<Shipment>::from_json(&checkpoint.to_json().unwrap()).unwrap();

        assert_eq!(restored.id, checkpoint.id);
        assert_eq!(restored.current_state, Some(Shipment::Delivered));
        assert_eq!(restored.history.len(), 2);
    }

    #[test]
    fn binary_preserves_state_and_history() {
        let checkpoint = delivered_checkpoint();
        let restored = Checkpoint::<Shipment>::from_bytes(&checkpoint.to_bytes().unwrap()).unwrap();

        assert_eq!(restored.current_state, Some(Shipment::Delivered));
        assert_eq!(restored.history.get_path().len(), 3);
    }

    #[test]
    fn unsupported_version_is_rejected() {
        let mut checkpoint = delivered_checkpoint();
        checkpoint.version = CHECKPOINT_VERSION + 1;

        assert!(matches!(
            checkpoint.validate(),
            Err(CheckpointError::UnsupportedVersion { found: 2, supported: 1 })
        ));
    }

    #[test]
    fn history_must_end_in_current_state() {
        let mut checkpoint = delivered_checkpoint();
        checkpoint.current_state = Some(Shipment::Packed);
        assert!(matches!(
            checkpoint.validate(),
            Err(CheckpointError::ValidationFailed(_))
        ));

        checkpoint.current_state = None;
        assert!(matches!(
            checkpoint.validate(),
            Err(CheckpointError::ValidationFailed(_))
        ));
    }

    #[test]
    fn garbage_input_fails_to_deserialize() {
        assert!(matches!(
            Checkpoint::<Shipment>::from_json("{}"),
            Err(CheckpointError::DeserializationFailed(_))
        ));
        assert!(matches!(
            Checkpoint::<Shipment>::from_bytes(&[1, 2, 3]),
            Err(CheckpointError::DeserializationFailed(_))
        ));
    }
}

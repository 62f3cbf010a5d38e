//! Per-machine configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse machine configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid machine configuration: {0}")]
    Invalid(String),
}

/// Behaviour switches for a [`StateMachine`](crate::machine::StateMachine).
///
/// Missing fields take their defaults when deserialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// Refuse changes unless a live persistence context is attached.
    pub require_persistence: bool,
    /// Record committed changes in the machine's history.
    pub record_history: bool,
    /// Keep only the most recent records. `None` keeps everything.
    pub history_limit: Option<usize>,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            require_persistence: true,
            record_history: true,
            history_limit: None,
        }
    }
}

impl MachineConfig {
    /// Detached machines for tests: no persistence context required.
    pub fn for_test() -> Self {
        Self {
            require_persistence: false,
            record_history: true,
            history_limit: Some(64),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.record_history && self.history_limit == Some(0) {
            return Err(ConfigError::Invalid(
                "history_limit must be positive when record_history is enabled".to_string(),
            ));
        }
        Ok(())
    }
}

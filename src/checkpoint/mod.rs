//! Checkpoint and resume of a machine's runtime position.
//!
//! A checkpoint captures where a machine is (current state, trajectory,
//! fire count), not how it is wired. Transition tables hold actions and
//! are never serialized; a checkpoint is restored onto a machine built
//! with the same configuration via [`Fsm::restore`](crate::machine::Fsm::restore).

use crate::core::{State, StateHistory};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable snapshot of a machine's position.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: Uuid,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    /// Name of the machine the checkpoint was taken from
    pub machine: String,

    pub initial_state: State,

    pub current_state: State,

    /// Complete transition history
    pub history: StateHistory,

    /// Successful fires at the time of the snapshot
    pub events_fired: u64,
}

impl Checkpoint {
    pub(crate) fn new(
        machine: &str,
        initial_state: State,
        current_state: State,
        history: StateHistory,
        events_fired: u64,
    ) -> Self {
        Self {
            version: CHECKPOINT_VERSION,
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            machine: machine.to_string(),
            initial_state,
            current_state,
            history,
            events_fired,
        }
    }

    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        serde_json::from_str(json).map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))
    }

    /// Compact binary encoding.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CheckpointError> {
        bincode::deserialize(bytes)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))
    }
}

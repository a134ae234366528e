//! Snapshot and restore of a whole ledger.
//!
//! A checkpoint is a value copy of every record and its history. Restoring
//! re-validates the ledger invariants, so a tampered or truncated snapshot is
//! rejected instead of producing a ledger the state machine could never have
//! reached.

use crate::config::LedgerConfig;
use crate::core::{Batch, BatchHistory, BatchStage, TransitionKind};
use crate::ledger::Ledger;
use crate::policy;
use crate::store::{BatchEntry, RecordStore};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// One record of a checkpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CheckpointEntry {
    pub batch: Batch,
    pub history: BatchHistory,
}

/// Serializable snapshot of a ledger.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LedgerCheckpoint {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: String,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    /// Records in ascending id order
    pub entries: Vec<CheckpointEntry>,
}

impl LedgerCheckpoint {
    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        serde_json::from_str(json).map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CheckpointError> {
        bincode::deserialize(bytes)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))
    }

    /// Check version and every ledger invariant.
    pub fn validate(&self) -> Result<(), CheckpointError> {
        if self.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            });
        }

        for (position, entry) in self.entries.iter().enumerate() {
            let batch = &entry.batch;
            let fail = |reason: &str| {
                Err(CheckpointError::ValidationFailed {
                    position,
                    id: batch.id,
                    reason: reason.to_string(),
                })
            };

            if batch.id != position as u64 + 1 {
                return fail("ids must be dense and start at 1");
            }
            if batch.crop_type.trim().is_empty() || batch.quantity == 0 {
                return fail("creation fields are malformed");
            }
            if !batch.flags_are_ordered() {
                return fail("flags are out of pipeline order");
            }
            let mut stage = BatchStage::Created;
            for record in entry.history.records() {
                if record.from != stage {
                    return fail("history records do not chain");
                }
                if !policy::legal_from(record.kind).contains(&record.from) {
                    return fail("history records an illegal transition");
                }
                if record.to != policy::leads_to(record.kind, record.from) {
                    return fail("history records the wrong target stage");
                }
                stage = record.to;
            }
            if stage != batch.stage() {
                return fail("history does not end at the batch stage");
            }

            let measured = entry
                .history
                .records()
                .iter()
                .any(|r| r.kind == TransitionKind::UpdateTemperature);
            if measured != batch.temperature.is_some() {
                return fail("temperature disagrees with history");
            }
        }
        Ok(())
    }
}

impl Ledger {
    /// Snapshot every record and its history.
    pub fn checkpoint(&self) -> LedgerCheckpoint {
        let entries = self
            .store()
            .entries()
            .into_iter()
            .map(|BatchEntry { batch, history }| CheckpointEntry { batch, history })
            .collect();

        LedgerCheckpoint {
            version: CHECKPOINT_VERSION,
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            entries,
        }
    }

    /// Build a ledger from a validated checkpoint and a valid config.
    pub fn restore(
        checkpoint: LedgerCheckpoint,
        config: LedgerConfig,
    ) -> Result<Ledger, CheckpointError> {
        config.validate()?;
        checkpoint.validate()?;
        let count = checkpoint.entries.len();
        let store = RecordStore::from_entries(
            checkpoint
                .entries
                .into_iter()
                .map(|CheckpointEntry { batch, history }| BatchEntry { batch, history })
                .collect(),
        );
        info!(checkpoint_id = %checkpoint.id, batches = count, "ledger restored");
        Ok(Ledger::from_parts(config, store))
    }
}

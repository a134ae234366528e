//! Checkpoint error types.

use crate::config::ConfigError;
use crate::core::BatchId;
use thiserror::Error;

/// Errors that can occur during checkpoint operations
#[derive(Debug, Error)]
pub enum CheckpointError {
    /// Serialization to JSON or binary format failed
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// Deserialization from JSON or binary format failed
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    /// Checkpoint version is not supported by this version
    #[error("Unsupported checkpoint version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// A restored record breaks a ledger invariant
    #[error("Checkpoint entry {position} (batch {id}) is invalid: {reason}")]
    ValidationFailed {
        position: usize,
        id: BatchId,
        reason: String,
    },

    /// The configuration supplied for the restored ledger is invalid
    #[error("Invalid ledger config: {0}")]
    InvalidConfig(#[from] ConfigError),
}

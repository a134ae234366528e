//! Ledger error types.

use crate::core::{BatchId, BatchStage, TransitionKind};
use crate::validation::InputViolation;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Errors returned by ledger operations.
///
/// Every variant is caller-correctable. A failed call leaves the ledger
/// exactly as it was.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LedgerError {
    /// Creation arguments or a temperature payload were malformed.
    #[error("Invalid input: {}", join(.0))]
    InvalidInput(Vec<InputViolation>),

    #[error("Batch {id} not found")]
    NotFound { id: BatchId },

    /// The transition is not legal from the batch's current stage.
    #[error("{kind} is not allowed for batch {id} in stage {stage}")]
    InvalidTransition {
        id: BatchId,
        kind: TransitionKind,
        stage: BatchStage,
    },
}

impl LedgerError {
    pub fn is_invalid_transition(&self) -> bool {
        matches!(self, Self::InvalidTransition { .. })
    }
}

fn join(violations: &[InputViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

//! Lifecycle stages of a batch.
//!
//! The `State` trait describes any lifecycle position in pure terms. The
//! ledger's only implementation is `BatchStage`, which is always derived from a
//! batch's four monotonic flags and never stored on its own.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};

/// Trait for lifecycle states.
///
/// All methods are pure - no side effects. States are immutable values that
/// describe the current position of a record in its lifecycle.
///
/// # Required Traits
///
/// - `Clone`: states are copied into history entries
/// - `PartialEq`: guards compare states
/// - `Debug`: states appear in diagnostics
/// - `Serialize` + `Deserialize`: states are part of checkpoints
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;

    /// Check if this is a final (terminal) state.
    ///
    /// No transition is legal out of a final state.
    ///
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }
}

/// Position of a batch in the supply-chain pipeline.
///
/// Stages are totally ordered: `Created < Approved < Picked < Received <
/// Delivered`.
///
/// # Example
///
/// ```rust
/// use harvest_ledger::core::{BatchStage, State};
///
/// assert_eq!(BatchStage::Created.name(), "Created");
/// assert!(BatchStage::Delivered.is_final());
/// assert!(BatchStage::Approved < BatchStage::Picked);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub enum BatchStage {
    Created,
    Approved,
    Picked,
    Received,
    Delivered,
}

impl BatchStage {
    /// All stages in pipeline order.
    pub const ALL: [BatchStage; 5] = [
        BatchStage::Created,
        BatchStage::Approved,
        BatchStage::Picked,
        BatchStage::Received,
        BatchStage::Delivered,
    ];

    /// Derive the stage from the four lifecycle flags.
    ///
    /// Returns `None` when the flags violate the approve → pick → receive →
    /// deliver ordering, which the state machine never produces but a restored
    /// checkpoint could contain.
    pub fn from_flags(approved: bool, picked: bool, received: bool, delivered: bool) -> Option<Self> {
        match (approved, picked, received, delivered) {
            (false, false, false, false) => Some(Self::Created),
            (true, false, false, false) => Some(Self::Approved),
            (true, true, false, false) => Some(Self::Picked),
            (true, true, true, false) => Some(Self::Received),
            (true, true, true, true) => Some(Self::Delivered),
            _ => None,
        }
    }

    /// Whether the cold-chain temperature may still be overwritten.
    pub fn accepts_temperature(&self) -> bool {
        matches!(self, Self::Created | Self::Approved)
    }
}

impl State for BatchStage {
    fn name(&self) -> &str {
        match self {
            Self::Created => "Created",
            Self::Approved => "Approved",
            Self::Picked => "Picked",
            Self::Received => "Received",
            Self::Delivered => "Delivered",
        }
    }

    fn is_final(&self) -> bool {
        matches!(self, Self::Delivered)
    }
}

impl fmt::Display for BatchStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_name_returns_correct_value() {
        assert_eq!(BatchStage::Created.name(), "Created");
        assert_eq!(BatchStage::Approved.name(), "Approved");
        assert_eq!(BatchStage::Picked.name(), "Picked");
        assert_eq!(BatchStage::Received.name(), "Received");
        assert_eq!(BatchStage::Delivered.name(), "Delivered");
    }

    #[test]
    fn only_delivered_is_final() {
        for stage in BatchStage::ALL {
            assert_eq!(stage.is_final(), stage == BatchStage::Delivered);
        }
    }

    #[test]
    fn from_flags_follows_pipeline_order() {
        assert_eq!(
            BatchStage::from_flags(false, false, false, false),
            Some(BatchStage::Created)
        );
        assert_eq!(
            BatchStage::from_flags(true, true, false, false),
            Some(BatchStage::Picked)
        );
        assert_eq!(
            BatchStage::from_flags(true, true, true, true),
            Some(BatchStage::Delivered)
        );
    }

    #[test]
    fn from_flags_rejects_skipped_steps() {
        assert_eq!(BatchStage::from_flags(false, true, false, false), None);
        assert_eq!(BatchStage::from_flags(true, false, true, false), None);
        assert_eq!(BatchStage::from_flags(true, true, false, true), None);
    }

    #[test]
    fn temperature_window_closes_at_pickup() {
        assert!(BatchStage::Created.accepts_temperature());
        assert!(BatchStage::Approved.accepts_temperature());
        assert!(!BatchStage::Picked.accepts_temperature());
        assert!(!BatchStage::Received.accepts_temperature());
        assert!(!BatchStage::Delivered.accepts_temperature());
    }

    #[test]
    fn stage_serializes_correctly() {
        let json = serde_json::to_string(&BatchStage::Received).unwrap();
        assert_eq!(json, "\"Received\"");
        let deserialized: BatchStage = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, BatchStage::Received);
    }
}

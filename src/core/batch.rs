//! The batch record and caller identity.

use super::state::BatchStage;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sequential batch identifier. The first batch is `1`.
pub type BatchId = u64;

/// Opaque identity of a caller, such as a wallet address.
///
/// The ledger records identities as the actor of each fact but does not bind
/// them to roles.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Identity {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Identity {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// One tracked unit of produce.
///
/// Values of this type are snapshots: mutating a returned `Batch` never
/// affects the ledger. Identity fields are fixed at creation; the flags and
/// the temperature change only through the state machine.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Batch {
    pub id: BatchId,
    pub farmer: Identity,
    pub crop_type: String,
    /// Amount in kilograms.
    pub quantity: u64,
    /// Last recorded reading in °C, `None` until the first update.
    pub temperature: Option<i64>,
    pub approved_by_manager: bool,
    pub picked_by_transporter: bool,
    pub received_by_distributor: bool,
    pub delivered_to_consumer: bool,
    pub created_at: DateTime<Utc>,
}

impl Batch {
    /// A freshly created record: all flags false, no temperature.
    pub(crate) fn new(id: BatchId, farmer: Identity, crop_type: String, quantity: u64) -> Self {
        Self {
            id,
            farmer,
            crop_type,
            quantity,
            temperature: None,
            approved_by_manager: false,
            picked_by_transporter: false,
            received_by_distributor: false,
            delivered_to_consumer: false,
            created_at: Utc::now(),
        }
    }

    /// Derive the lifecycle stage from the flags.
    ///
    /// Records produced by the state machine always have ordered flags. A
    /// record with out-of-order flags (only constructible by hand) is treated
    /// as being at the stage of its leading run of set flags.
    pub fn stage(&self) -> BatchStage {
        if !self.approved_by_manager {
            BatchStage::Created
        } else if !self.picked_by_transporter {
            BatchStage::Approved
        } else if !self.received_by_distributor {
            BatchStage::Picked
        } else if !self.delivered_to_consumer {
            BatchStage::Received
        } else {
            BatchStage::Delivered
        }
    }

    /// Whether the flags respect the approve → pick → receive → deliver order.
    pub fn flags_are_ordered(&self) -> bool {
        BatchStage::from_flags(
            self.approved_by_manager,
            self.picked_by_transporter,
            self.received_by_distributor,
            self.delivered_to_consumer,
        )
        .is_some()
    }
}

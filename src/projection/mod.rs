//! Read-only, role-scoped views of the ledger.
//!
//! A projection never mutates the store. Each call reads the latest committed
//! state.

use crate::core::{Batch, Identity, TransitionKind};
use crate::store::RecordStore;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Participant whose view of the ledger is being rendered.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Role {
    Farmer,
    Manager,
    Transporter,
    Distributor,
    Consumer,
    Status,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown role '{0}'")]
pub struct ParseRoleError(pub String);

impl Role {
    pub const ALL: [Role; 6] = [
        Role::Farmer,
        Role::Manager,
        Role::Transporter,
        Role::Distributor,
        Role::Consumer,
        Role::Status,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Farmer => "Farmer",
            Self::Manager => "Manager",
            Self::Transporter => "Transporter",
            Self::Distributor => "Distributor",
            Self::Consumer => "Consumer",
            Self::Status => "Status",
        }
    }

    /// Whether `batch` belongs in this role's view: the batches waiting on the
    /// role's next step, or everything for Farmer and Status.
    pub fn includes(&self, batch: &Batch) -> bool {
        match self {
            Self::Farmer | Self::Status => true,
            Self::Manager => !batch.approved_by_manager,
            Self::Transporter => batch.approved_by_manager && !batch.picked_by_transporter,
            Self::Distributor => batch.picked_by_transporter && !batch.received_by_distributor,
            Self::Consumer => batch.received_by_distributor && !batch.delivered_to_consumer,
        }
    }

    /// Transition kinds this role's view offers as actions.
    pub fn actions(&self) -> &'static [TransitionKind] {
        match self {
            Self::Manager => &[TransitionKind::Approve, TransitionKind::UpdateTemperature],
            Self::Transporter => &[TransitionKind::Pick],
            Self::Distributor => &[TransitionKind::Receive],
            Self::Consumer => &[TransitionKind::Deliver],
            Self::Farmer | Self::Status => &[],
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.name() == s)
            .ok_or_else(|| ParseRoleError(s.to_string()))
    }
}

/// Query handle over a record store.
#[derive(Clone, Copy, Debug)]
pub struct Projection<'a> {
    store: &'a RecordStore,
}

impl<'a> Projection<'a> {
    pub fn new(store: &'a RecordStore) -> Self {
        Self { store }
    }

    /// Full ledger snapshot in ascending id order.
    pub fn all_batches(&self) -> Vec<Batch> {
        self.store.list()
    }

    pub fn for_role(&self, role: Role) -> Vec<Batch> {
        self.store
            .list()
            .into_iter()
            .filter(|batch| role.includes(batch))
            .collect()
    }

    /// Batches created by `farmer`.
    pub fn for_farmer(&self, farmer: &Identity) -> Vec<Batch> {
        self.store
            .list()
            .into_iter()
            .filter(|batch| &batch.farmer == farmer)
            .collect()
    }
}

//! The closed set of batch transitions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A requested mutation of one batch, with its payload.
///
/// Every transition the ledger accepts is one of these variants; the state
/// machine handles them in a single exhaustive match.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Transition {
    Approve,
    /// Overwrite the cold-chain reading, in °C.
    UpdateTemperature(i64),
    Pick,
    Receive,
    Deliver,
}

impl Transition {
    pub fn kind(&self) -> TransitionKind {
        match self {
            Self::Approve => TransitionKind::Approve,
            Self::UpdateTemperature(_) => TransitionKind::UpdateTemperature,
            Self::Pick => TransitionKind::Pick,
            Self::Receive => TransitionKind::Receive,
            Self::Deliver => TransitionKind::Deliver,
        }
    }
}

/// Payload-free discriminant of a [`Transition`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum TransitionKind {
    Approve,
    UpdateTemperature,
    Pick,
    Receive,
    Deliver,
}

impl TransitionKind {
    pub const ALL: [TransitionKind; 5] = [
        TransitionKind::Approve,
        TransitionKind::UpdateTemperature,
        TransitionKind::Pick,
        TransitionKind::Receive,
        TransitionKind::Deliver,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Approve => "Approve",
            Self::UpdateTemperature => "UpdateTemperature",
            Self::Pick => "Pick",
            Self::Receive => "Receive",
            Self::Deliver => "Deliver",
        }
    }
}

impl fmt::Display for TransitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

//! The batch lifecycle state machine.
//!
//! `decide` is a pure function from the current record and a requested
//! transition to the next record. It never touches the store: the caller
//! commits the returned value, or discards everything on error.
//!
//! ```text
//! Created --Approve--> Approved --Pick--> Picked --Receive--> Received --Deliver--> Delivered
//!    ^ UpdateTemperature   ^ UpdateTemperature
//! ```

use crate::config::LedgerConfig;
use crate::core::{Batch, Identity, Transition, TransitionRecord};
use crate::error::Result;
use crate::policy::AuthorizationPolicy;
use crate::validation;
use chrono::Utc;

/// Result of a successful decision: the next record and its history entry.
#[derive(Clone, Debug, PartialEq)]
pub struct Decision {
    pub batch: Batch,
    pub record: TransitionRecord,
}

/// Decide the outcome of `transition` on `batch` requested by `caller`.
///
/// Authorization is checked first, then the payload, then the effect is
/// computed on a copy.
pub fn decide(
    policy: &AuthorizationPolicy,
    config: &LedgerConfig,
    batch: &Batch,
    transition: Transition,
    caller: &Identity,
) -> Result<Decision> {
    let kind = transition.kind();
    policy.authorize(kind, batch, caller)?;

    let from = batch.stage();
    let mut next = batch.clone();
    match transition {
        Transition::Approve => next.approved_by_manager = true,
        Transition::UpdateTemperature(value) => {
            validation::into_result(validation::validate_temperature(config, value))?;
            next.temperature = Some(value);
        }
        Transition::Pick => next.picked_by_transporter = true,
        Transition::Receive => next.received_by_distributor = true,
        Transition::Deliver => next.delivered_to_consumer = true,
    }

    let record = TransitionRecord {
        kind,
        from,
        to: next.stage(),
        actor: caller.clone(),
        timestamp: Utc::now(),
    };

    Ok(Decision {
        batch: next,
        record,
    })
}

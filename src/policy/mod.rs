//! Authorization policy for batch transitions.
//!
//! Authorization is gated on the batch's stage alone: whoever acts next in the
//! pipeline may act. The caller's identity reaches the policy so it is
//! available at this seam, but no role is bound to any identity.
//!
//! # Example
//!
//! ```rust
//! use harvest_ledger::core::{BatchStage, TransitionKind};
//! use harvest_ledger::policy::AuthorizationPolicy;
//!
//! let policy = AuthorizationPolicy::stage_gated();
//!
//! assert_eq!(
//!     policy.permitted(BatchStage::Approved),
//!     vec![TransitionKind::UpdateTemperature, TransitionKind::Pick]
//! );
//! ```

use crate::core::{Batch, BatchStage, Guard, Identity, TransitionKind};
use crate::error::{LedgerError, Result};

/// Stages from which a transition kind is legal.
pub fn legal_from(kind: TransitionKind) -> &'static [BatchStage] {
    match kind {
        TransitionKind::Approve => &[BatchStage::Created],
        TransitionKind::UpdateTemperature => &[BatchStage::Created, BatchStage::Approved],
        TransitionKind::Pick => &[BatchStage::Approved],
        TransitionKind::Receive => &[BatchStage::Picked],
        TransitionKind::Deliver => &[BatchStage::Received],
    }
}

/// Stage a batch reaches when `kind` is applied from `from`.
///
/// Only meaningful when `from` is in [`legal_from`] for `kind`.
pub fn leads_to(kind: TransitionKind, from: BatchStage) -> BatchStage {
    match kind {
        TransitionKind::Approve => BatchStage::Approved,
        TransitionKind::UpdateTemperature => from,
        TransitionKind::Pick => BatchStage::Picked,
        TransitionKind::Receive => BatchStage::Received,
        TransitionKind::Deliver => BatchStage::Delivered,
    }
}

/// One guarded entry of the policy.
#[derive(Debug)]
pub struct TransitionRule {
    pub kind: TransitionKind,
    guard: Guard<BatchStage>,
}

impl TransitionRule {
    pub fn new(kind: TransitionKind, guard: Guard<BatchStage>) -> Self {
        Self { kind, guard }
    }

    pub fn allows(&self, stage: &BatchStage) -> bool {
        self.guard.check(stage)
    }
}

/// Decides which transitions may be invoked on a batch.
#[derive(Debug)]
pub struct AuthorizationPolicy {
    rules: Vec<TransitionRule>,
}

impl AuthorizationPolicy {
    /// The policy of the pipeline: each kind is legal exactly from the stages
    /// returned by [`legal_from`], for any caller.
    pub fn stage_gated() -> Self {
        let rules = TransitionKind::ALL
            .iter()
            .map(|&kind| TransitionRule::new(kind, Guard::any_of(legal_from(kind))))
            .collect();
        Self { rules }
    }

    /// Allow or reject `kind` on `batch`.
    ///
    /// A kind without a rule is rejected.
    pub fn authorize(&self, kind: TransitionKind, batch: &Batch, _caller: &Identity) -> Result<()> {
        let stage = batch.stage();
        let allowed = self
            .rules
            .iter()
            .find(|rule| rule.kind == kind)
            .is_some_and(|rule| rule.allows(&stage));

        if allowed {
            Ok(())
        } else {
            Err(LedgerError::InvalidTransition {
                id: batch.id,
                kind,
                stage,
            })
        }
    }

    /// Transition kinds legal from `stage`, in pipeline order.
    pub fn permitted(&self, stage: BatchStage) -> Vec<TransitionKind> {
        self.rules
            .iter()
            .filter(|rule| rule.allows(&stage))
            .map(|rule| rule.kind)
            .collect()
    }
}

impl Default for AuthorizationPolicy {
    fn default() -> Self {
        Self::stage_gated()
    }
}

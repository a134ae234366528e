//! Core ledger types and logic.
//!
//! This module contains the pure building blocks of the batch lifecycle:
//! - Stage definitions via the `State` trait
//! - Guard predicates for transition control
//! - The batch record, caller identity and transition enum
//! - Immutable per-batch history
//!
//! Nothing in this module touches shared state.

mod batch;
mod guard;
mod history;
mod state;
mod transition;

pub use batch::{Batch, BatchId, Identity};
pub use guard::Guard;
pub use history::{BatchHistory, TransitionRecord};
pub use state::{BatchStage, State};
pub use transition::{Transition, TransitionKind};

//! Harvest Ledger: a supply-chain batch ledger
//!
//! A food batch moves through a fixed pipeline: a farmer creates it, a
//! manager approves it and logs its temperature, a transporter picks it up, a
//! distributor receives it and a consumer confirms delivery. Each step is an
//! immutable fact attributed to the caller that performed it.
//!
//! The crate follows a "pure core, imperative shell" layout:
//!
//! - **core**: batch record, lifecycle stages, guards and history (pure)
//! - **machine**: the pure decision function for one transition
//! - **policy**: stage-gated authorization
//! - **store**: the append-only, lock-per-record table
//! - **projection**: role-scoped read views
//! - **ledger**: the handle tying them together
//!
//! # Example
//!
//! ```rust
//! use harvest_ledger::projection::Role;
//! use harvest_ledger::{Identity, Ledger, LedgerError};
//!
//! let ledger = Ledger::new();
//! let farmer = Identity::new("0xfarmer");
//! let manager = Identity::new("0xmanager");
//!
//! let id = ledger.create_batch(&farmer, "Wheat", 100).unwrap();
//! ledger.update_temperature(&farmer, id, 4).unwrap();
//! ledger.approve_batch(&manager, id).unwrap();
//!
//! assert_eq!(ledger.projection().for_role(Role::Transporter).len(), 1);
//!
//! ledger.pick_batch(&Identity::new("0xtransporter"), id).unwrap();
//! assert!(matches!(
//!     ledger.update_temperature(&manager, id, 6),
//!     Err(LedgerError::InvalidTransition { .. })
//! ));
//! ```

pub mod checkpoint;
pub mod config;
pub mod core;
pub mod error;
pub mod ledger;
pub mod machine;
pub mod policy;
pub mod projection;
pub mod store;
pub mod validation;

// Re-export commonly used types
pub use crate::core::{Batch, BatchId, BatchStage, Identity, Transition, TransitionKind};
pub use config::LedgerConfig;
pub use error::{LedgerError, Result};
pub use ledger::Ledger;

//! Accumulating validation of caller-supplied input.
//!
//! Creation arguments are checked with Stillwater's `Validation` so that an
//! empty crop type and a zero quantity are reported together instead of one
//! at a time.
//!
//! # Example
//!
//! ```rust
//! use harvest_ledger::config::LedgerConfig;
//! use harvest_ledger::validation::{into_result, validate_new_batch};
//! use harvest_ledger::LedgerError;
//!
//! let result = into_result(validate_new_batch(&LedgerConfig::default(), "", 0));
//!
//! match result {
//!     Err(LedgerError::InvalidInput(violations)) => assert_eq!(violations.len(), 2),
//!     other => panic!("unexpected {other:?}"),
//! }
//! ```

pub mod rules;
pub mod violations;

pub use rules::{into_result, validate_new_batch, validate_temperature, Checked};
pub use violations::InputViolation;

//! Validation rules for creation arguments and temperature payloads.

use crate::config::LedgerConfig;
use crate::error::LedgerError;
use crate::validation::violations::InputViolation;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

pub type Checked = Validation<(), NonEmptyVec<InputViolation>>;

fn check(ok: bool, violation: InputViolation) -> Checked {
    if ok {
        Validation::Success(())
    } else {
        Validation::Failure(NonEmptyVec::new(violation, Vec::new()))
    }
}

/// Validate the arguments of a batch creation, accumulating ALL violations.
pub fn validate_new_batch(config: &LedgerConfig, crop_type: &str, quantity: u64) -> Checked {
    let mut checks = vec![
        check(
            !crop_type.trim().is_empty(),
            InputViolation::EmptyCropType,
        ),
        check(quantity > 0, InputViolation::NonPositiveQuantity),
    ];

    if let Some(max) = config.max_crop_type_len {
        let len = crop_type.chars().count();
        checks.push(check(len <= max, InputViolation::CropTypeTooLong { max, len }));
    }

    Validation::all_vec(checks).map(|_| ())
}

/// Validate a temperature reading against the configured bounds.
pub fn validate_temperature(config: &LedgerConfig, value: i64) -> Checked {
    match config.temperature_bounds {
        Some(bounds) => check(
            bounds.contains(value),
            InputViolation::TemperatureOutOfRange {
                value,
                min: bounds.min,
                max: bounds.max,
            },
        ),
        None => Validation::Success(()),
    }
}

/// Collapse an accumulated validation into the ledger's error type.
pub fn into_result(checked: Checked) -> Result<(), LedgerError> {
    match checked {
        Validation::Success(()) => Ok(()),
        Validation::Failure(errors) => Err(LedgerError::InvalidInput(
            errors.iter().cloned().collect(),
        )),
    }
}

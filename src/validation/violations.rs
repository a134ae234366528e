//! Input violations.

use thiserror::Error;

/// A single problem with caller-supplied input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InputViolation {
    #[error("crop type must not be empty")]
    EmptyCropType,

    #[error("crop type is {len} characters, at most {max} allowed")]
    CropTypeTooLong { max: usize, len: usize },

    #[error("quantity must be positive")]
    NonPositiveQuantity,

    #[error("temperature {value} outside accepted range {min}..={max}")]
    TemperatureOutOfRange { value: i64, min: i64, max: i64 },
}

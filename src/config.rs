//! Ledger configuration.
//!
//! The default configuration imposes no limits beyond the lifecycle rules:
//! any non-empty crop type and any temperature reading are accepted.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Inclusive range of accepted temperature readings, in °C.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemperatureBounds {
    pub min: i64,
    pub max: i64,
}

impl TemperatureBounds {
    pub fn contains(&self, value: i64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse ledger config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Temperature bounds are inverted: min {min} > max {max}")]
    InvertedBounds { min: i64, max: i64 },
}

/// Input limits applied to creation arguments and temperature payloads.
///
/// # Example
///
/// ```rust
/// use harvest_ledger::config::LedgerConfig;
///
/// let config = LedgerConfig::new()
///     .max_crop_type_len(32)
///     .temperature_bounds(-30, 15);
///
/// assert_eq!(config.max_crop_type_len, Some(32));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Longest accepted crop type, in characters.
    pub max_crop_type_len: Option<usize>,
    pub temperature_bounds: Option<TemperatureBounds>,
}

impl LedgerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_crop_type_len(mut self, max: usize) -> Self {
        self.max_crop_type_len = Some(max);
        self
    }

    pub fn temperature_bounds(mut self, min: i64, max: i64) -> Self {
        self.temperature_bounds = Some(TemperatureBounds { min, max });
        self
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.temperature_bounds {
            Some(TemperatureBounds { min, max }) if min > max => {
                Err(ConfigError::InvertedBounds { min, max })
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_unbounded() {
        let config = LedgerConfig::default();
        assert_eq!(config.max_crop_type_len, None);
        assert_eq!(config.temperature_bounds, None);
    }

    #[test]
    fn from_json_fills_missing_fields() {
        let config = LedgerConfig::from_json(r#"{"max_crop_type_len": 16}"#).unwrap();

        assert_eq!(config.max_crop_type_len, Some(16));
        assert_eq!(config.temperature_bounds, None);
    }

    #[test]
    fn from_json_reads_bounds() {
        let config =
            LedgerConfig::from_json(r#"{"temperature_bounds": {"min": -20, "max": 8}}"#).unwrap();

        let bounds = config.temperature_bounds.unwrap();
        assert!(bounds.contains(-20));
        assert!(bounds.contains(8));
        assert!(!bounds.contains(9));
    }

    #[test]
    fn from_json_rejects_inverted_bounds() {
        let result = LedgerConfig::from_json(r#"{"temperature_bounds": {"min": 10, "max": 0}}"#);

        assert!(matches!(
            result,
            Err(ConfigError::InvertedBounds { min: 10, max: 0 })
        ));
    }

    #[test]
    fn from_json_reports_parse_errors() {
        assert!(matches!(
            LedgerConfig::from_json("not json"),
            Err(ConfigError::Parse(_))
        ));
    }
}

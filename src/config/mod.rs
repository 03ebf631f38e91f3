//! Configuration loading and management

use crate::core::error::FormError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// What a submit does while a successful booking is waiting to reset
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResubmitPolicy {
    /// Ignore the submit; the pending reset stays as scheduled
    #[default]
    Block,
    /// Validate and announce again, restarting the reset countdown
    Restart,
}

/// Form configuration
///
/// Every field has a default, so a YAML file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Delay between a successful submit and the automatic reset
    pub reset_delay_ms: u64,

    /// Smallest accepted package weight in kg (inclusive)
    pub min_weight: f64,

    /// Smallest accepted rate per kg (inclusive)
    pub min_rate_per_kg: f64,

    pub resubmit_policy: ResubmitPolicy,

    /// Buffer size of the announcement channel
    pub event_capacity: usize,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            reset_delay_ms: 3000,
            min_weight: 0.1,
            min_rate_per_kg: 0.01,
            resubmit_policy: ResubmitPolicy::Block,
            event_capacity: 1024,
        }
    }
}

impl FormConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self, FormError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, FormError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject thresholds and sizes the form cannot work with
    pub fn validate(&self) -> Result<(), FormError> {
        if self.reset_delay_ms == 0 {
            return Err(FormError::config("reset_delay_ms must be at least 1"));
        }
        if !self.min_weight.is_finite() || self.min_weight < 0.0 {
            return Err(FormError::config(format!(
                "min_weight must be a non-negative number (got {})",
                self.min_weight
            )));
        }
        if !self.min_rate_per_kg.is_finite() || self.min_rate_per_kg < 0.0 {
            return Err(FormError::config(format!(
                "min_rate_per_kg must be a non-negative number (got {})",
                self.min_rate_per_kg
            )));
        }
        if self.event_capacity == 0 {
            return Err(FormError::config("event_capacity must be at least 1"));
        }
        Ok(())
    }

    pub fn reset_delay(&self) -> Duration {
        Duration::from_millis(self.reset_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FormConfig::default();

        assert_eq!(config.reset_delay(), Duration::from_millis(3000));
        assert_eq!(config.min_weight, 0.1);
        assert_eq!(config.min_rate_per_kg, 0.01);
        assert_eq!(config.resubmit_policy, ResubmitPolicy::Block);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = FormConfig::from_yaml_str("reset_delay_ms: 500\n").unwrap();

        assert_eq!(config.reset_delay_ms, 500);
        assert_eq!(config.min_weight, 0.1);
        assert_eq!(config.event_capacity, 1024);
    }

    #[test]
    fn test_resubmit_policy_from_yaml() {
        let config = FormConfig::from_yaml_str("resubmit_policy: restart\n").unwrap();
        assert_eq!(config.resubmit_policy, ResubmitPolicy::Restart);
    }

    #[test]
    fn test_negative_threshold_is_rejected() {
        let err = FormConfig::from_yaml_str("min_weight: -1\n").unwrap_err();
        assert!(matches!(err, FormError::Config { .. }));
    }

    #[test]
    fn test_zero_reset_delay_is_rejected() {
        let err = FormConfig::from_yaml_str("reset_delay_ms: 0\n").unwrap_err();
        assert!(matches!(err, FormError::Config { .. }));
        assert!(FormConfig::from_yaml_str("reset_delay_ms: 1\n").is_ok());
    }

    #[test]
    fn test_zero_capacity_is_rejected() {
        assert!(FormConfig::from_yaml_str("event_capacity: 0\n").is_err());
    }

    #[test]
    fn test_malformed_yaml_is_rejected() {
        let err = FormConfig::from_yaml_str("reset_delay_ms: [soon").unwrap_err();
        assert!(matches!(err, FormError::Yaml(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = FormConfig::from_yaml_file("/nonexistent/booking-form.yaml").unwrap_err();
        assert!(matches!(err, FormError::Io(_)));
    }
}

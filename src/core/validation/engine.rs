//! Rule selection and whole-form validation

use super::error_map::ErrorMap;
use super::{filters, validators};
use crate::config::FormConfig;
use crate::core::error::FormError;
use crate::core::field::{FieldPath, FieldValue};
use crate::core::model::BookingForm;

pub const NAME_REQUIRED: &str = "Name is required";
pub const ADDRESS_REQUIRED: &str = "Address is required";
pub const MOBILE_INVALID: &str = "Enter valid 10-digit mobile";
pub const WEIGHT_TOO_LOW: &str = "Weight must be > 0 kg";
pub const RATE_TOO_LOW: &str = "Rate must be > ₹0.0";

/// Pure validator over record snapshots
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Validator {
    min_weight: f64,
    min_rate_per_kg: f64,
}

impl Default for Validator {
    fn default() -> Self {
        Self::from_config(&FormConfig::default())
    }
}

impl Validator {
    pub fn from_config(config: &FormConfig) -> Self {
        Self {
            min_weight: config.min_weight,
            min_rate_per_kg: config.min_rate_per_kg,
        }
    }

    /// Validate one field of `record`, returning its error message if any
    ///
    /// The first matching rule wins: any `fullName` leaf, then the address,
    /// mobile, weight and rate rules. Every other path is always valid.
    pub fn validate_field(&self, path: FieldPath, record: &BookingForm) -> Option<String> {
        let value = record.get(path);

        let result = if path.leaf() == "fullName" {
            validators::not_empty(NAME_REQUIRED)(&filters::trim()(value))
        } else {
            match path {
                FieldPath::ReceiverFullAddress => validators::not_empty(ADDRESS_REQUIRED)(&value),
                FieldPath::SenderMobileNumber => validators::mobile_number(MOBILE_INVALID)(&value),
                FieldPath::PackageWeight => {
                    validators::min_value(self.min_weight, WEIGHT_TOO_LOW)(&value)
                }
                FieldPath::PackageRatePerKg => {
                    validators::min_value(self.min_rate_per_kg, RATE_TOO_LOW)(&value)
                }
                _ => Ok(()),
            }
        };

        result.err()
    }

    /// Validate every required field, collecting failures in form order
    pub fn validate_all(&self, record: &BookingForm) -> ErrorMap {
        FieldPath::REQUIRED
            .into_iter()
            .filter_map(|path| self.validate_field(path, record).map(|msg| (path, msg)))
            .collect()
    }

    /// Validate a single value as if it were stored at `path`
    ///
    /// A value of the wrong kind, or a write to the derived total, is a
    /// [`FormError`] rather than a validation message.
    pub fn validate_value(
        &self,
        path: FieldPath,
        value: FieldValue,
    ) -> Result<Option<String>, FormError> {
        let record = BookingForm::default().with_field(path, value)?;
        Ok(self.validate_field(path, &record))
    }
}

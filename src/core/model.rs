//! The booking record and its three sections

use crate::core::error::FormError;
use crate::core::field::{FieldPath, FieldValue};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SenderDetails {
    pub full_name: String,
    pub mobile_number: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiverDetails {
    pub full_name: String,
    pub full_address: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageDetails {
    pub weight: f64,
    pub rate_per_kg: f64,
    /// Always `weight * rate_per_kg`
    pub total_cost: f64,
}

impl PackageDetails {
    pub fn new(weight: f64, rate_per_kg: f64) -> Self {
        let mut package = Self {
            weight,
            rate_per_kg,
            total_cost: 0.0,
        };
        package.recompute_total();
        package
    }

    /// Recompute the derived total, treating non-finite inputs as zero
    pub fn recompute_total(&mut self) {
        let weight = finite_or_zero(self.weight);
        let rate = finite_or_zero(self.rate_per_kg);
        self.total_cost = finite_or_zero(weight * rate);
    }
}

/// A complete booking: exactly one sender, receiver and package
///
/// Sections are shared between successive snapshots; cloning a record never
/// copies section data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookingForm {
    pub sender: Arc<SenderDetails>,
    pub receiver: Arc<ReceiverDetails>,
    pub package: Arc<PackageDetails>,
}

impl BookingForm {
    pub fn new(sender: SenderDetails, receiver: ReceiverDetails, package: PackageDetails) -> Self {
        Self {
            sender: Arc::new(sender),
            receiver: Arc::new(receiver),
            package: Arc::new(package),
        }
    }

    /// Read the value addressed by `path`
    pub fn get(&self, path: FieldPath) -> FieldValue {
        match path {
            FieldPath::SenderFullName => FieldValue::Text(self.sender.full_name.clone()),
            FieldPath::SenderMobileNumber => FieldValue::Text(self.sender.mobile_number.clone()),
            FieldPath::SenderEmail => FieldValue::Text(self.sender.email.clone()),
            FieldPath::ReceiverFullName => FieldValue::Text(self.receiver.full_name.clone()),
            FieldPath::ReceiverFullAddress => FieldValue::Text(self.receiver.full_address.clone()),
            FieldPath::PackageWeight => FieldValue::Number(self.package.weight),
            FieldPath::PackageRatePerKg => FieldValue::Number(self.package.rate_per_kg),
            FieldPath::PackageTotalCost => FieldValue::Number(self.package.total_cost),
        }
    }

    /// Return a new record with the leaf at `path` replaced
    ///
    /// Only the section owning `path` is rebuilt; the other two stay shared
    /// with `self`. Package edits recompute `total_cost` in the same step.
    /// The derived total itself cannot be written.
    pub fn with_field(&self, path: FieldPath, value: FieldValue) -> Result<Self, FormError> {
        let mut next = self.clone();
        match (path, value) {
            (FieldPath::SenderFullName, FieldValue::Text(v)) => {
                Arc::make_mut(&mut next.sender).full_name = v
            }
            (FieldPath::SenderMobileNumber, FieldValue::Text(v)) => {
                Arc::make_mut(&mut next.sender).mobile_number = v
            }
            (FieldPath::SenderEmail, FieldValue::Text(v)) => {
                Arc::make_mut(&mut next.sender).email = v
            }
            (FieldPath::ReceiverFullName, FieldValue::Text(v)) => {
                Arc::make_mut(&mut next.receiver).full_name = v
            }
            (FieldPath::ReceiverFullAddress, FieldValue::Text(v)) => {
                Arc::make_mut(&mut next.receiver).full_address = v
            }
            (FieldPath::PackageWeight, FieldValue::Number(v)) => {
                let package = Arc::make_mut(&mut next.package);
                package.weight = finite_or_zero(v);
                package.recompute_total();
            }
            (FieldPath::PackageRatePerKg, FieldValue::Number(v)) => {
                let package = Arc::make_mut(&mut next.package);
                package.rate_per_kg = finite_or_zero(v);
                package.recompute_total();
            }
            (FieldPath::PackageTotalCost, _) => {
                return Err(FormError::InvalidValue {
                    path: path.to_string(),
                    expected: "derived (read-only)",
                });
            }
            (path, _) => {
                return Err(FormError::InvalidValue {
                    path: path.to_string(),
                    expected: if path.kind().is_numeric() {
                        "number"
                    } else {
                        "text"
                    },
                });
            }
        }
        Ok(next)
    }
}

fn finite_or_zero(n: f64) -> f64 {
    if n.is_finite() { n } else { 0.0 }
}

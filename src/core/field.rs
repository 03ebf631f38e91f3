//! Field identity and field value types
//!
//! Every leaf of the booking record is addressed by a [`FieldPath`]. The same
//! path correlates an input widget, its value, its error message and its
//! validation rule, so it is the only key used across the crate.

use crate::core::error::FormError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Top-level section of the booking record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Section {
    Sender,
    Receiver,
    Package,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::Sender, Section::Receiver, Section::Package];

    /// Path segment used in dotted field paths
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Sender => "sender",
            Section::Receiver => "receiver",
            Section::Package => "package",
        }
    }

    /// Heading shown above the section's fields
    pub fn title(&self) -> &'static str {
        match self {
            Section::Sender => "Sender Details",
            Section::Receiver => "Receiver Details",
            Section::Package => "Package Details",
        }
    }

    /// Parse a top-level path segment
    pub fn from_segment(segment: &str) -> Option<Self> {
        Section::ALL.into_iter().find(|s| s.as_str() == segment)
    }
}

/// Input kind of a field, deciding how raw input is coerced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Tel,
    Email,
    Number,
    TextArea,
}

impl FieldKind {
    pub fn is_numeric(&self) -> bool {
        matches!(self, FieldKind::Number)
    }
}

/// Dotted identifier of one leaf field (`sender.fullName`, `package.weight`, ...)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FieldPath {
    SenderFullName,
    SenderMobileNumber,
    SenderEmail,
    ReceiverFullName,
    ReceiverFullAddress,
    PackageWeight,
    PackageRatePerKg,
    /// Derived from weight and rate, never edited directly
    PackageTotalCost,
}

impl FieldPath {
    /// Every leaf of the record, in display order
    pub const ALL: [FieldPath; 8] = [
        FieldPath::SenderFullName,
        FieldPath::SenderMobileNumber,
        FieldPath::SenderEmail,
        FieldPath::ReceiverFullName,
        FieldPath::ReceiverFullAddress,
        FieldPath::PackageWeight,
        FieldPath::PackageRatePerKg,
        FieldPath::PackageTotalCost,
    ];

    /// Fields checked on submission
    pub const REQUIRED: [FieldPath; 6] = [
        FieldPath::SenderFullName,
        FieldPath::SenderMobileNumber,
        FieldPath::ReceiverFullName,
        FieldPath::ReceiverFullAddress,
        FieldPath::PackageWeight,
        FieldPath::PackageRatePerKg,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldPath::SenderFullName => "sender.fullName",
            FieldPath::SenderMobileNumber => "sender.mobileNumber",
            FieldPath::SenderEmail => "sender.email",
            FieldPath::ReceiverFullName => "receiver.fullName",
            FieldPath::ReceiverFullAddress => "receiver.fullAddress",
            FieldPath::PackageWeight => "package.weight",
            FieldPath::PackageRatePerKg => "package.ratePerKg",
            FieldPath::PackageTotalCost => "package.totalCost",
        }
    }

    pub fn section(&self) -> Section {
        match self {
            FieldPath::SenderFullName | FieldPath::SenderMobileNumber | FieldPath::SenderEmail => {
                Section::Sender
            }
            FieldPath::ReceiverFullName | FieldPath::ReceiverFullAddress => Section::Receiver,
            FieldPath::PackageWeight
            | FieldPath::PackageRatePerKg
            | FieldPath::PackageTotalCost => Section::Package,
        }
    }

    /// Last path segment (`fullName`, `weight`, ...)
    pub fn leaf(&self) -> &'static str {
        let full = self.as_str();
        full.split_once('.').map_or(full, |(_, leaf)| leaf)
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            FieldPath::SenderMobileNumber => FieldKind::Tel,
            FieldPath::SenderEmail => FieldKind::Email,
            FieldPath::PackageWeight
            | FieldPath::PackageRatePerKg
            | FieldPath::PackageTotalCost => FieldKind::Number,
            FieldPath::ReceiverFullAddress => FieldKind::TextArea,
            FieldPath::SenderFullName | FieldPath::ReceiverFullName => FieldKind::Text,
        }
    }

    pub fn is_required(&self) -> bool {
        FieldPath::REQUIRED.contains(self)
    }

    /// Whether user input may target this field
    pub fn is_editable(&self) -> bool {
        !matches!(self, FieldPath::PackageTotalCost)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldPath {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldPath::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| FormError::UnknownField {
                path: s.to_string(),
            })
    }
}

impl TryFrom<String> for FieldPath {
    type Error = FormError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FieldPath> for String {
    fn from(path: FieldPath) -> Self {
        path.as_str().to_string()
    }
}

/// A value stored in one leaf of the record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(f64),
}

impl FieldValue {
    /// Coerce raw widget input according to the field kind
    ///
    /// Numeric kinds keep the longest numeric prefix of the input and fall
    /// back to `0` when nothing parses or the result is not finite.
    pub fn from_raw(kind: FieldKind, raw: &str) -> Self {
        if kind.is_numeric() {
            FieldValue::Number(parse_number_or_zero(raw))
        } else {
            FieldValue::Text(raw.to_string())
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::Number(_) => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Text(_) => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

fn parse_number_or_zero(raw: &str) -> f64 {
    let trimmed = raw.trim();
    let mut ends: Vec<usize> = trimmed.char_indices().map(|(i, c)| i + c.len_utf8()).collect();
    ends.reverse();

    ends.into_iter()
        .filter_map(|end| trimmed[..end].parse::<f64>().ok())
        .find(|n| n.is_finite())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_path_round_trips_through_its_string() {
        for path in FieldPath::ALL {
            let parsed: FieldPath = path.as_str().parse().expect("known path");
            assert_eq!(parsed, path);
        }
    }

    #[test]
    fn test_paths_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for path in FieldPath::ALL {
            assert!(seen.insert(path.as_str()), "duplicate path {}", path);
        }
    }

    #[test]
    fn test_unknown_path_is_rejected() {
        let err = "sender.nickname".parse::<FieldPath>().unwrap_err();
        assert!(matches!(err, FormError::UnknownField { .. }));
        assert!("billing.fullName".parse::<FieldPath>().is_err());
        assert!("".parse::<FieldPath>().is_err());
    }

    #[test]
    fn test_leaf_and_section() {
        assert_eq!(FieldPath::ReceiverFullAddress.leaf(), "fullAddress");
        assert_eq!(FieldPath::ReceiverFullAddress.section(), Section::Receiver);
        assert_eq!(FieldPath::PackageRatePerKg.leaf(), "ratePerKg");
        assert_eq!(FieldPath::PackageRatePerKg.section(), Section::Package);
    }

    #[test]
    fn test_required_set_excludes_email_and_total() {
        assert!(!FieldPath::SenderEmail.is_required());
        assert!(!FieldPath::PackageTotalCost.is_required());
        assert_eq!(FieldPath::REQUIRED.len(), 6);
    }

    #[test]
    fn test_total_cost_is_not_editable() {
        assert!(!FieldPath::PackageTotalCost.is_editable());
        assert!(FieldPath::PackageWeight.is_editable());
    }

    #[test]
    fn test_section_from_segment() {
        assert_eq!(Section::from_segment("package"), Some(Section::Package));
        assert_eq!(Section::from_segment("billing"), None);
    }

    #[test]
    fn test_field_path_serializes_as_dotted_string() {
        let json = serde_json::to_string(&FieldPath::SenderMobileNumber).unwrap();
        assert_eq!(json, "\"sender.mobileNumber\"");
        let back: FieldPath = serde_json::from_str(&json).unwrap();
        assert_eq!(back, FieldPath::SenderMobileNumber);
        assert!(serde_json::from_str::<FieldPath>("\"sender.age\"").is_err());
    }

    #[test]
    fn test_numeric_raw_input_parses() {
        assert_eq!(FieldValue::from_raw(FieldKind::Number, "2.5"), FieldValue::Number(2.5));
        assert_eq!(FieldValue::from_raw(FieldKind::Number, " 50 "), FieldValue::Number(50.0));
        assert_eq!(FieldValue::from_raw(FieldKind::Number, "-3"), FieldValue::Number(-3.0));
    }

    #[test]
    fn test_numeric_raw_input_keeps_leading_number() {
        assert_eq!(FieldValue::from_raw(FieldKind::Number, "12kg"), FieldValue::Number(12.0));
        assert_eq!(FieldValue::from_raw(FieldKind::Number, "0.5.1"), FieldValue::Number(0.5));
    }

    #[test]
    fn test_unparseable_numeric_input_becomes_zero() {
        assert_eq!(FieldValue::from_raw(FieldKind::Number, ""), FieldValue::Number(0.0));
        assert_eq!(FieldValue::from_raw(FieldKind::Number, "abc"), FieldValue::Number(0.0));
        assert_eq!(FieldValue::from_raw(FieldKind::Number, "NaN"), FieldValue::Number(0.0));
        assert_eq!(FieldValue::from_raw(FieldKind::Number, "inf"), FieldValue::Number(0.0));
    }

    #[test]
    fn test_text_raw_input_is_kept_verbatim() {
        assert_eq!(
            FieldValue::from_raw(FieldKind::Tel, " 98765 "),
            FieldValue::Text(" 98765 ".to_string())
        );
    }

    #[test]
    fn test_address_is_multi_line_text() {
        assert_eq!(FieldPath::ReceiverFullAddress.kind(), FieldKind::TextArea);
        assert!(!FieldKind::TextArea.is_numeric());
        assert_eq!(
            FieldValue::from_raw(FieldKind::TextArea, "12 MG Road\nBengaluru"),
            FieldValue::Text("12 MG Road\nBengaluru".to_string())
        );
    }
}

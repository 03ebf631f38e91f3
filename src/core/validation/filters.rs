//! Reusable field filters
//!
//! These filters transform a field value before a validator sees it

use crate::core::field::FieldValue;

/// Filter: trim whitespace from text
pub fn trim() -> impl Fn(FieldValue) -> FieldValue + Send + Sync + Clone {
    |value: FieldValue| match value {
        FieldValue::Text(s) => FieldValue::Text(s.trim().to_string()),
        other => other,
    }
}

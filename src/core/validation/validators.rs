//! Reusable field validators
//!
//! Each validator checks one field value and yields its fixed error message
//! on failure. The engine decides which validator applies to which path.

use crate::core::field::FieldValue;
use regex::Regex;
use std::sync::OnceLock;

/// Validator: text must not be empty
pub fn not_empty(
    message: &'static str,
) -> impl Fn(&FieldValue) -> Result<(), String> + Send + Sync + Clone {
    move |value: &FieldValue| match value.as_text() {
        Some(s) if !s.is_empty() => Ok(()),
        _ => Err(message.to_string()),
    }
}

/// Validator: text must be a 10-digit mobile number starting with 6-9
pub fn mobile_number(
    message: &'static str,
) -> impl Fn(&FieldValue) -> Result<(), String> + Send + Sync + Clone {
    move |value: &FieldValue| match value.as_text() {
        Some(s) if is_valid_mobile(s) => Ok(()),
        _ => Err(message.to_string()),
    }
}

/// Validator: number must be at least `min` (inclusive)
pub fn min_value(
    min: f64,
    message: &'static str,
) -> impl Fn(&FieldValue) -> Result<(), String> + Send + Sync + Clone {
    move |value: &FieldValue| match value.as_number() {
        Some(n) if n >= min => Ok(()),
        _ => Err(message.to_string()),
    }
}

fn is_valid_mobile(mobile: &str) -> bool {
    static MOBILE_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = MOBILE_REGEX.get_or_init(|| {
        // ASCII digits only; `\d` would also accept other Unicode digits
        Regex::new(r"^[6-9][0-9]{9}$").expect("mobile pattern is valid")
    });
    regex.is_match(mobile)
}

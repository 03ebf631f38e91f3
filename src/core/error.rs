//! Typed error handling for the booking form
//!
//! Validation failures are not errors: they live in an
//! [`ErrorMap`](crate::core::validation::ErrorMap) and are shown next to the
//! offending field. [`FormError`] only covers programming and environment
//! failures around the form:
//!
//! - a dotted path that does not name a known leaf field
//! - a value of the wrong kind for a field (text into a numeric field)
//! - a configuration file that cannot be read or parsed
//! - shared form state that became unusable after a panic
//!
//! # Example
//!
//! ```rust,ignore
//! use booking::prelude::*;
//!
//! match "sender.nickname".parse::<FieldPath>() {
//!     Ok(path) => println!("editing {}", path),
//!     Err(FormError::UnknownField { path }) => eprintln!("no such field: {}", path),
//!     Err(e) => eprintln!("other error: {}", e),
//! }
//! ```

use thiserror::Error;

/// The main error type for the booking form
#[derive(Debug, Error)]
pub enum FormError {
    /// The dotted path does not address a known leaf field
    #[error("Unknown field path '{path}'")]
    UnknownField { path: String },

    /// The value kind does not match the field kind
    #[error("Field '{path}' expects a {expected} value")]
    InvalidValue { path: String, expected: &'static str },

    /// Configuration could not be loaded or is out of range
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Configuration file could not be read
    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration YAML could not be parsed
    #[error("Failed to parse configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Shared form state lock was poisoned
    #[error("Form state is unavailable: {0}")]
    StateUnavailable(String),
}

impl FormError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            FormError::UnknownField { .. } => "UNKNOWN_FIELD",
            FormError::InvalidValue { .. } => "INVALID_VALUE",
            FormError::Config { .. } | FormError::Io(_) | FormError::Yaml(_) => "CONFIG_ERROR",
            FormError::StateUnavailable(_) => "STATE_UNAVAILABLE",
        }
    }

    pub(crate) fn config(message: impl Into<String>) -> Self {
        FormError::Config {
            message: message.into(),
        }
    }
}

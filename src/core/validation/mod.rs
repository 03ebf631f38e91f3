//! Validation and filtering system
//!
//! Field rules are small validator closures, picked per [`FieldPath`] by the
//! [`Validator`]. Results are data: a missing [`ErrorMap`] entry means valid.
//!
//! [`FieldPath`]: crate::core::field::FieldPath

pub mod engine;
pub mod error_map;
pub mod filters;
pub mod validators;

pub use engine::Validator;
pub use error_map::ErrorMap;

//! Core module containing the booking record, field identity and validation

pub mod error;
pub mod events;
pub mod field;
pub mod model;
pub mod validation;

pub use error::FormError;
pub use events::{Announcer, EventBus, EventEnvelope, FormEvent};
pub use field::{FieldKind, FieldPath, FieldValue, Section};
pub use model::{BookingForm, PackageDetails, ReceiverDetails, SenderDetails};
pub use validation::{ErrorMap, Validator};

//! # Booking Form
//!
//! The core of a single-page shipment booking form: sender, receiver and
//! package details with a derived total cost.
//!
//! ## Features
//!
//! - **Dotted Field Paths**: one [`FieldPath`](core::FieldPath) per leaf ties together input, value, error and rule
//! - **Pure Reducer**: every edit produces a new snapshot with `totalCost` already recomputed
//! - **Validation as Data**: errors live in an [`ErrorMap`](core::ErrorMap), cleared per field on edit and rebuilt on submit
//! - **Auto-Reset Lifecycle**: a successful submit is announced, then the form resets after a cancellable delay
//! - **Pluggable Announcements**: success and failure go through an [`Announcer`](core::Announcer), by default a broadcast event bus
//! - **Configuration-Based**: delay, thresholds and resubmit policy load from YAML
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use booking::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let (form, bus) = BookingFormController::with_event_bus(FormConfig::default())?;
//!     let mut events = bus.subscribe();
//!
//!     form.on_field_change("sender.fullName", "A Kumar")?;
//!     form.on_field_change("sender.mobileNumber", "9123456789")?;
//!     form.on_field_change("receiver.fullName", "B Singh")?;
//!     form.on_field_change("receiver.fullAddress", "12 MG Road")?;
//!     form.on_field_change("package.weight", "2")?;
//!     form.on_field_change("package.ratePerKg", "50")?;
//!
//!     assert_eq!(form.submit()?, SubmitOutcome::Accepted);
//!     println!("{}", events.recv().await?.event.notice());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod core;
pub mod form;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Types ===
    pub use crate::core::{
        error::FormError,
        events::{Announcer, EventBus, EventEnvelope, FormEvent},
        field::{FieldKind, FieldPath, FieldValue, Section},
        model::{BookingForm, PackageDetails, ReceiverDetails, SenderDetails},
        validation::{ErrorMap, Validator},
    };

    // === Form ===
    pub use crate::form::{
        BookingFormController, FormState, Phase, SubmitOutcome,
        presentation::{field_spec, format_total_cost, layout, render_text},
    };

    // === Config ===
    pub use crate::config::{FormConfig, ResubmitPolicy};
}

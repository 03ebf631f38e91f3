//! Form state, lifecycle and presentation plumbing

pub mod controller;
pub mod presentation;
pub mod state;
pub mod timer;

pub use controller::BookingFormController;
pub use state::{Action, Effect, FormState, Phase, SubmitOutcome, Transition};
pub use timer::ResetTimer;

//! Form announcements for the notification layer
//!
//! The form core does not show toasts. It announces outcomes through an
//! [`Announcer`]; the default announcer is the [`EventBus`], which uses
//! `tokio::sync::broadcast` so any number of presentation collaborators can
//! subscribe.
//!
//! # Architecture
//!
//! ```text
//! submit() ──▶ Announcer::on_validation_success ──▶ EventBus ──▶ toast layer
//!          └─▶ Announcer::on_validation_failure ─┘            └─▶ audit log
//! reset timer ──▶ Announcer::on_reset ────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! let bus = EventBus::new(16);
//! let mut rx = bus.subscribe();
//!
//! let form = BookingFormController::new(FormConfig::default(), bus.clone())?;
//! form.submit()?;
//!
//! if let Ok(envelope) = rx.recv().await {
//!     println!("{}", envelope.event.notice());
//! }
//! ```

use crate::core::model::BookingForm;
use crate::core::validation::ErrorMap;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

pub const SUCCESS_NOTICE: &str = "Booking created successfully!";
pub const FAILURE_NOTICE: &str = "Please fix the errors shown";

/// Outcome announced by the form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum FormEvent {
    /// Submission passed validation; carries the final record
    Submitted { record: BookingForm },
    /// Submission failed validation; carries every field error
    Rejected { errors: ErrorMap },
    /// The form returned to its initial empty state
    Reset,
}

impl FormEvent {
    /// Get the action name (submitted, rejected, reset)
    pub fn action(&self) -> &str {
        match self {
            FormEvent::Submitted { .. } => "submitted",
            FormEvent::Rejected { .. } => "rejected",
            FormEvent::Reset => "reset",
        }
    }

    /// User-facing notice text, empty for events that show nothing
    pub fn notice(&self) -> &'static str {
        match self {
            FormEvent::Submitted { .. } => SUCCESS_NOTICE,
            FormEvent::Rejected { .. } => FAILURE_NOTICE,
            FormEvent::Reset => "",
        }
    }
}

/// Envelope wrapping a form event with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    /// Unique event ID (not a booking ID)
    pub id: Uuid,
    /// When the event occurred
    pub timestamp: DateTime<Utc>,
    /// The actual event
    pub event: FormEvent,
}

impl EventEnvelope {
    pub fn new(event: FormEvent) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            event,
        }
    }
}

/// Capability to tell the user how a submission went
pub trait Announcer: Send + Sync {
    /// Called once per successful submit with the validated record
    fn on_validation_success(&self, record: &BookingForm);

    /// Called when a submit finds outstanding errors
    fn on_validation_failure(&self, errors: &ErrorMap);

    /// Called after the form resets itself or is reset explicitly
    fn on_reset(&self) {}
}

/// Broadcast-based event bus for form announcements
///
/// The bus is cheap to clone (Arc internally) and can be shared across threads.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<EventEnvelope>,
}

impl EventBus {
    /// Create a new EventBus with the given channel capacity
    ///
    /// Slow receivers lose the oldest events once `capacity` are buffered.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all subscribers
    ///
    /// Returns the number of receivers that will receive the event; zero when
    /// nobody listens.
    pub fn publish(&self, event: FormEvent) -> usize {
        let envelope = EventEnvelope::new(event);
        self.sender.send(envelope).unwrap_or(0)
    }

    /// Subscribe to events published from now on
    pub fn subscribe(&self) -> broadcast::Receiver<EventEnvelope> {
        self.sender.subscribe()
    }

    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(1024)
    }
}

impl Announcer for EventBus {
    fn on_validation_success(&self, record: &BookingForm) {
        tracing::info!(?record, "{}", SUCCESS_NOTICE);
        self.publish(FormEvent::Submitted {
            record: record.clone(),
        });
    }

    fn on_validation_failure(&self, errors: &ErrorMap) {
        tracing::debug!(error_count = errors.len(), "{}", FAILURE_NOTICE);
        self.publish(FormEvent::Rejected {
            errors: errors.clone(),
        });
    }

    fn on_reset(&self) {
        self.publish(FormEvent::Reset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::field::FieldPath;
    use crate::core::model::PackageDetails;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_submitted_event_serializes_record() {
        let event = FormEvent::Submitted {
            record: BookingForm {
                package: Arc::new(PackageDetails::new(2.0, 50.0)),
                ..Default::default()
            },
        };

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["action"], "submitted");
        assert_eq!(json["record"]["package"]["totalCost"], 100.0);
    }

    #[test]
    fn test_rejected_event_serializes_errors() {
        let mut errors = ErrorMap::new();
        errors.insert(FieldPath::SenderFullName, "Name is required");
        let event = FormEvent::Rejected { errors };

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["action"], "rejected");
        assert_eq!(json["errors"]["sender.fullName"], "Name is required");
    }

    #[test]
    fn test_notices() {
        assert_eq!(FormEvent::Reset.notice(), "");
        assert_eq!(
            FormEvent::Rejected {
                errors: ErrorMap::new()
            }
            .notice(),
            FAILURE_NOTICE
        );
    }

    #[test]
    fn test_event_envelope_has_metadata() {
        let envelope = EventEnvelope::new(FormEvent::Reset);
        assert!(!envelope.id.is_nil());
        assert!(envelope.timestamp <= Utc::now());
    }

    #[tokio::test]
    async fn test_event_bus_announces_success() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();

        bus.on_validation_success(&BookingForm::default());

        let received = rx.recv().await.unwrap();
        assert_eq!(received.event.action(), "submitted");
        assert_eq!(received.event.notice(), SUCCESS_NOTICE);
    }

    #[test]
    fn test_success_log_carries_whole_record() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let record = BookingForm::default()
            .with_field(FieldPath::ReceiverFullAddress, "12 MG Road".into())
            .unwrap();
        let bus = EventBus::new(4);
        tracing::subscriber::with_default(subscriber, || bus.on_validation_success(&record));

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains(SUCCESS_NOTICE));
        assert!(output.contains("12 MG Road"));
        assert!(output.contains("rate_per_kg"));
    }

    #[tokio::test]
    async fn test_event_bus_multiple_subscribers() {
        let bus = EventBus::new(16);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        assert_eq!(bus.publish(FormEvent::Reset), 2);

        let e1 = rx1.recv().await.unwrap();
        let e2 = rx2.recv().await.unwrap();
        assert_eq!(e1.id, e2.id);
    }

    #[test]
    fn test_event_bus_publish_without_subscribers() {
        let bus = EventBus::new(16);
        assert_eq!(bus.publish(FormEvent::Reset), 0);
    }
}

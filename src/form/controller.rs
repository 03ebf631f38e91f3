//! The booking form controller
//!
//! Owns the current [`FormState`], runs every event through the reducer and
//! carries out the resulting effects: announcements go to the [`Announcer`],
//! countdowns go to the [`ResetTimer`]. Announcements are made after the
//! state lock is released, so an announcer may read the form back.
//!
//! Dispatches are serialized end to end: a countdown that fires while the
//! success announcement is still running waits for it, so subscribers always
//! see `Submitted` before the `Reset` that follows it. An announcer must not
//! call back into the controller's mutating operations.

use crate::config::{FormConfig, ResubmitPolicy};
use crate::core::error::FormError;
use crate::core::events::{Announcer, EventBus};
use crate::core::field::{FieldPath, FieldValue};
use crate::core::model::BookingForm;
use crate::core::validation::{ErrorMap, Validator};
use crate::form::state::{Action, Effect, FormState, Phase, SubmitOutcome};
use crate::form::timer::ResetTimer;
use std::sync::{Arc, Mutex, PoisonError, RwLock, Weak};
use tokio::runtime::Handle;

struct Shared {
    /// Held for a whole dispatch, announcements included
    turn: Mutex<()>,
    state: RwLock<FormState>,
    timer: Mutex<ResetTimer>,
    validator: Validator,
    policy: ResubmitPolicy,
    announcer: Arc<dyn Announcer>,
}

/// Single-form controller
///
/// Dropping the controller cancels any pending auto-reset.
pub struct BookingFormController {
    shared: Arc<Shared>,
}

impl BookingFormController {
    /// Create a controller announcing through `announcer`
    ///
    /// Must be called inside a tokio runtime; the auto-reset countdown is
    /// spawned on it.
    pub fn new(config: FormConfig, announcer: Arc<dyn Announcer>) -> Result<Self, FormError> {
        config.validate()?;
        let runtime = Handle::try_current()
            .map_err(|e| FormError::config(format!("no tokio runtime available: {}", e)))?;

        Ok(Self {
            shared: Arc::new(Shared {
                turn: Mutex::new(()),
                state: RwLock::new(FormState::new()),
                timer: Mutex::new(ResetTimer::new(config.reset_delay(), runtime)),
                validator: Validator::from_config(&config),
                policy: config.resubmit_policy,
                announcer,
            }),
        })
    }

    /// Create a controller announcing on a fresh [`EventBus`]
    pub fn with_event_bus(config: FormConfig) -> Result<(Self, EventBus), FormError> {
        config.validate()?;
        let bus = EventBus::new(config.event_capacity);
        let controller = Self::new(config, Arc::new(bus.clone()))?;
        Ok((controller, bus))
    }

    /// Apply raw widget input to the field named by `path`
    ///
    /// Numeric fields coerce unparseable input to `0`. Paths outside the
    /// known sections and fields leave the record untouched.
    pub fn on_field_change(&self, path: &str, raw: &str) -> Result<(), FormError> {
        let field = match path.parse::<FieldPath>() {
            Ok(field) => field,
            Err(_) => {
                tracing::debug!(field = %path, "Ignoring change to unknown field");
                return Ok(());
            }
        };
        self.update_field(field, FieldValue::from_raw(field.kind(), raw))
    }

    /// Replace one leaf value and clear that field's error
    pub fn update_field(&self, path: FieldPath, value: FieldValue) -> Result<(), FormError> {
        tracing::debug!(field = %path, "Field updated");
        self.dispatch(Action::SetField { path, value })?;
        Ok(())
    }

    /// Validate the whole form and announce the outcome
    pub fn submit(&self) -> Result<SubmitOutcome, FormError> {
        let outcome = self.dispatch(Action::Submit)?;
        let outcome = outcome.unwrap_or(SubmitOutcome::Ignored);
        tracing::debug!(?outcome, "Submit handled");
        Ok(outcome)
    }

    /// Return to the initial empty state, cancelling any pending auto-reset
    pub fn reset_form(&self) -> Result<(), FormError> {
        self.dispatch(Action::Reset)?;
        Ok(())
    }

    /// Cancel the pending auto-reset without touching the record
    ///
    /// Used when the form is torn down; dropping the controller does the same.
    pub fn shutdown(&self) -> Result<(), FormError> {
        self.shared.lock_timer()?.cancel();
        Ok(())
    }

    pub fn snapshot(&self) -> Result<FormState, FormError> {
        Ok(self.shared.read_state()?.clone())
    }

    pub fn record(&self) -> Result<BookingForm, FormError> {
        Ok(self.shared.read_state()?.record.clone())
    }

    pub fn errors(&self) -> Result<ErrorMap, FormError> {
        Ok(self.shared.read_state()?.errors.clone())
    }

    pub fn error_for(&self, path: FieldPath) -> Result<Option<String>, FormError> {
        Ok(self.shared.read_state()?.errors.get(path).map(str::to_string))
    }

    pub fn phase(&self) -> Result<Phase, FormError> {
        Ok(self.shared.read_state()?.phase)
    }

    pub fn is_reset_pending(&self) -> Result<bool, FormError> {
        Ok(self.shared.lock_timer()?.is_pending())
    }

    fn dispatch(&self, action: Action) -> Result<Option<SubmitOutcome>, FormError> {
        Shared::dispatch(&self.shared, action)
    }
}

impl Shared {
    fn dispatch(this: &Arc<Self>, action: Action) -> Result<Option<SubmitOutcome>, FormError> {
        // Guards no data; a poisoned turn is still usable.
        let _turn = this.turn.lock().unwrap_or_else(PoisonError::into_inner);

        let (effects, outcome) = {
            let mut state = this
                .state
                .write()
                .map_err(|e| FormError::StateUnavailable(e.to_string()))?;
            let transition = state.apply(action, &this.validator, this.policy)?;
            *state = transition.state;

            // Timer changes happen under the state lock so a firing countdown
            // always sees the generation it was armed for.
            let mut announcements = Vec::new();
            for effect in transition.effects {
                match effect {
                    Effect::ScheduleReset { generation } => {
                        let weak = Arc::downgrade(this);
                        this.lock_timer()?
                            .start(move || Shared::fire_reset(weak, generation));
                    }
                    Effect::CancelReset => {
                        this.lock_timer()?.cancel();
                    }
                    other => announcements.push(other),
                }
            }
            (announcements, transition.outcome)
        };

        for effect in effects {
            match effect {
                Effect::AnnounceSuccess(record) => this.announcer.on_validation_success(&record),
                Effect::AnnounceFailure(errors) => this.announcer.on_validation_failure(&errors),
                Effect::AnnounceReset => {
                    tracing::info!("Booking form reset");
                    this.announcer.on_reset();
                }
                Effect::ScheduleReset { .. } | Effect::CancelReset => {}
            }
        }

        Ok(outcome)
    }

    fn fire_reset(weak: Weak<Self>, generation: u64) {
        let Some(shared) = weak.upgrade() else {
            return;
        };
        if let Err(e) = Shared::dispatch(&shared, Action::ResetTimerFired { generation }) {
            tracing::error!(error = %e, "Automatic reset failed");
        }
    }

    fn read_state(&self) -> Result<std::sync::RwLockReadGuard<'_, FormState>, FormError> {
        self.state
            .read()
            .map_err(|e| FormError::StateUnavailable(e.to_string()))
    }

    fn lock_timer(&self) -> Result<std::sync::MutexGuard<'_, ResetTimer>, FormError> {
        self.timer
            .lock()
            .map_err(|e| FormError::StateUnavailable(e.to_string()))
    }
}

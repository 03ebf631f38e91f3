//! Form state snapshots and the pure reducer that moves between them
//!
//! Every user or timer event is an [`Action`]. [`FormState::apply`] turns the
//! current snapshot and an action into the next snapshot plus the side
//! effects the controller must perform (announcements, timer changes). The
//! derived total is recomputed inside the same transition, so no snapshot
//! ever holds a stale total.

use crate::config::ResubmitPolicy;
use crate::core::error::FormError;
use crate::core::field::{FieldPath, FieldValue};
use crate::core::model::BookingForm;
use crate::core::validation::{ErrorMap, Validator};
use serde::{Deserialize, Serialize};

/// Submission lifecycle phase
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Editing,
    /// Transient: exists only inside a submit transition
    Submitting,
    /// Validation passed; waiting for the automatic reset
    Submitted,
}

/// Event driving the form
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetField { path: FieldPath, value: FieldValue },
    Submit,
    Reset,
    /// The reset countdown armed for `generation` elapsed
    ResetTimerFired { generation: u64 },
}

/// Side effect requested by a transition
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    AnnounceSuccess(BookingForm),
    AnnounceFailure(ErrorMap),
    AnnounceReset,
    ScheduleReset { generation: u64 },
    CancelReset,
}

/// Result of a submit attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitOutcome {
    /// Record announced; reset countdown started
    Accepted,
    /// Errors populated; record untouched
    Rejected,
    /// A countdown was already pending and resubmission is blocked
    Ignored,
}

/// Next snapshot plus what the controller has to do about it
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: FormState,
    pub effects: Vec<Effect>,
    pub outcome: Option<SubmitOutcome>,
}

impl Transition {
    fn unchanged(state: &FormState) -> Self {
        Self {
            state: state.clone(),
            effects: Vec::new(),
            outcome: None,
        }
    }
}

/// One immutable snapshot of the form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormState {
    pub record: BookingForm,
    pub errors: ErrorMap,
    pub phase: Phase,
    /// Bumped on every accepted submit and every reset; tags reset timers
    pub generation: u64,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_submitted(&self) -> bool {
        self.phase == Phase::Submitted
    }

    /// Compute the transition for `action`
    pub fn apply(
        &self,
        action: Action,
        validator: &Validator,
        policy: ResubmitPolicy,
    ) -> Result<Transition, FormError> {
        match action {
            Action::SetField { path, value } => self.set_field(path, value),
            Action::Submit => Ok(self.submit(validator, policy)),
            Action::Reset => Ok(self.reset(vec![Effect::CancelReset, Effect::AnnounceReset])),
            Action::ResetTimerFired { generation } => {
                if self.is_submitted() && generation == self.generation {
                    Ok(self.reset(vec![Effect::AnnounceReset]))
                } else {
                    tracing::debug!(
                        generation,
                        current = self.generation,
                        "Ignoring stale reset timer"
                    );
                    Ok(Transition::unchanged(self))
                }
            }
        }
    }

    fn set_field(&self, path: FieldPath, value: FieldValue) -> Result<Transition, FormError> {
        if !path.is_editable() {
            tracing::debug!(field = %path, "Ignoring edit of derived field");
            return Ok(Transition::unchanged(self));
        }

        let record = self.record.with_field(path, value)?;
        let mut errors = self.errors.clone();
        errors.clear(path);

        Ok(Transition {
            state: FormState {
                record,
                errors,
                phase: self.phase,
                generation: self.generation,
            },
            effects: Vec::new(),
            outcome: None,
        })
    }

    fn submit(&self, validator: &Validator, policy: ResubmitPolicy) -> Transition {
        let was_submitted = self.is_submitted();
        if was_submitted && policy == ResubmitPolicy::Block {
            tracing::debug!("Submit ignored while reset is pending");
            return Transition {
                outcome: Some(SubmitOutcome::Ignored),
                ..Transition::unchanged(self)
            };
        }

        let submitting = FormState {
            phase: Phase::Submitting,
            ..self.clone()
        };
        let errors = validator.validate_all(&submitting.record);

        if errors.is_empty() {
            let generation = self.generation + 1;
            Transition {
                effects: vec![
                    Effect::AnnounceSuccess(submitting.record.clone()),
                    Effect::ScheduleReset { generation },
                ],
                state: FormState {
                    errors,
                    phase: Phase::Submitted,
                    generation,
                    ..submitting
                },
                outcome: Some(SubmitOutcome::Accepted),
            }
        } else {
            let mut effects = Vec::new();
            if was_submitted {
                effects.push(Effect::CancelReset);
            }
            effects.push(Effect::AnnounceFailure(errors.clone()));
            Transition {
                state: FormState {
                    errors,
                    phase: Phase::Editing,
                    ..submitting
                },
                effects,
                outcome: Some(SubmitOutcome::Rejected),
            }
        }
    }

    fn reset(&self, effects: Vec<Effect>) -> Transition {
        Transition {
            state: FormState {
                generation: self.generation + 1,
                ..FormState::default()
            },
            effects,
            outcome: None,
        }
    }
}

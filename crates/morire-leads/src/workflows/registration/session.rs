use std::sync::Arc;

use tracing::{debug, error, warn};

use super::domain::{RegistrationField, RegistrationForm};
use super::service::{RegistrationError, RegistrationService};
use crate::workflows::form::{
    FailureStage, Feedback, SubmissionOutcome, NOTIFICATION_FAILED_MESSAGE, RETRY_MESSAGE,
};
use crate::workflows::navigation::{Navigator, Route};

/// Per-attempt position in the registration protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Validating,
    Persisting,
    Notifying,
    Completed { degraded: bool },
}

impl SubmissionState {
    /// While true the submit affordance must stay disabled.
    pub fn is_in_flight(self) -> bool {
        matches!(
            self,
            SubmissionState::Validating | SubmissionState::Persisting | SubmissionState::Notifying
        )
    }
}

/// Form controller for one visit to the registration page.
///
/// Owns the form, the submission state, and the latest feedback message.
/// `submit` borrows the session mutably, so a second submission cannot be
/// dispatched while one is awaiting the store or the notifier.
pub struct RegistrationSession {
    service: Arc<RegistrationService>,
    navigator: Arc<dyn Navigator>,
    form: RegistrationForm,
    state: SubmissionState,
    feedback: Option<Feedback>,
    last_error: Option<RegistrationError>,
}

impl RegistrationSession {
    pub fn new(service: Arc<RegistrationService>, navigator: Arc<dyn Navigator>) -> Self {
        Self::with_form(service, navigator, RegistrationForm::default())
    }

    pub fn with_form(
        service: Arc<RegistrationService>,
        navigator: Arc<dyn Navigator>,
        form: RegistrationForm,
    ) -> Self {
        Self {
            service,
            navigator,
            form,
            state: SubmissionState::Idle,
            feedback: None,
            last_error: None,
        }
    }

    pub fn form(&self) -> &RegistrationForm {
        &self.form
    }

    pub fn set_field(&mut self, field: RegistrationField, value: impl Into<String>) {
        self.form.set(field, value);
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn is_submitting(&self) -> bool {
        self.state.is_in_flight()
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    pub fn dismiss_feedback(&mut self) {
        self.feedback = None;
    }

    /// Error behind the latest failed or degraded attempt.
    pub fn last_error(&self) -> Option<&RegistrationError> {
        self.last_error.as_ref()
    }

    /// Run validate → persist → notify → complete.
    pub async fn submit(&mut self) -> SubmissionOutcome {
        match self.state {
            SubmissionState::Completed { degraded } => return completed(degraded),
            state if state.is_in_flight() => {
                warn!(?state, "registration submit ignored while in flight");
                return SubmissionOutcome::Pending;
            }
            _ => {}
        }

        self.feedback = None;
        self.last_error = None;

        self.transition(SubmissionState::Validating);
        let registration = match self.service.validate(&self.form) {
            Ok(registration) => registration,
            Err(err) => {
                warn!(error = %err, "registration rejected by validation");
                self.feedback = Some(err.feedback());
                return self.fail(FailureStage::Validation, err.into());
            }
        };

        self.transition(SubmissionState::Persisting);
        let record = match self.service.persist(registration).await {
            Ok(record) => record,
            Err(err) => {
                error!(error = %err, "registration could not be saved");
                self.feedback = Some(Feedback::error(RETRY_MESSAGE));
                return self.fail(FailureStage::Persistence, err.into());
            }
        };

        self.transition(SubmissionState::Notifying);
        let degraded = match self.service.notify(&record).await {
            Ok(_) => false,
            Err(err) => {
                warn!(
                    error = %err,
                    unit = %record.preferred_unit,
                    "registration saved but lead notification failed"
                );
                self.feedback = Some(Feedback::warning(NOTIFICATION_FAILED_MESSAGE));
                self.last_error = Some(err.into());
                true
            }
        };

        self.transition(SubmissionState::Completed { degraded });
        self.form = RegistrationForm::default();
        self.navigator.navigate(Route::Confirmation);
        completed(degraded)
    }

    fn fail(&mut self, stage: FailureStage, err: RegistrationError) -> SubmissionOutcome {
        self.last_error = Some(err);
        self.transition(SubmissionState::Idle);
        SubmissionOutcome::Failed(stage)
    }

    fn transition(&mut self, next: SubmissionState) {
        debug!(from = ?self.state, to = ?next, "registration state");
        self.state = next;
    }
}

fn completed(degraded: bool) -> SubmissionOutcome {
    if degraded {
        SubmissionOutcome::SavedButNotificationFailed
    } else {
        SubmissionOutcome::Succeeded
    }
}

use std::sync::Arc;

use tracing::{debug, error, warn};

use super::domain::{ContactField, ContactForm};
use super::sink::{InquiryError, InquirySink};
use crate::workflows::form::{
    FailureStage, Feedback, SubmissionOutcome, ValidationError, INQUIRY_RECEIVED_MESSAGE,
    RETRY_MESSAGE,
};

/// Registration states minus `Notifying`: a single call stands in for submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InquiryState {
    Idle,
    Validating,
    Submitting,
    Completed,
}

impl InquiryState {
    pub fn is_in_flight(self) -> bool {
        matches!(self, InquiryState::Validating | InquiryState::Submitting)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum InquiryFailure {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Delivery(#[from] InquiryError),
}

/// Form controller for the contact section. The section stays on the page
/// after a successful send, so `Completed` accepts a fresh inquiry.
pub struct InquirySession {
    sink: Arc<dyn InquirySink>,
    form: ContactForm,
    state: InquiryState,
    feedback: Option<Feedback>,
    last_error: Option<InquiryFailure>,
}

impl InquirySession {
    pub fn new(sink: Arc<dyn InquirySink>) -> Self {
        Self::with_form(sink, ContactForm::default())
    }

    pub fn with_form(sink: Arc<dyn InquirySink>, form: ContactForm) -> Self {
        Self {
            sink,
            form,
            state: InquiryState::Idle,
            feedback: None,
            last_error: None,
        }
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    pub fn set_field(&mut self, field: ContactField, value: impl Into<String>) {
        self.form.set(field, value);
    }

    pub fn state(&self) -> InquiryState {
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

    pub fn last_error(&self) -> Option<&InquiryFailure> {
        self.last_error.as_ref()
    }

    pub async fn submit(&mut self) -> SubmissionOutcome {
        if self.state.is_in_flight() {
            warn!(state = ?self.state, "inquiry submit ignored while in flight");
            return SubmissionOutcome::Pending;
        }

        self.feedback = None;
        self.last_error = None;

        self.transition(InquiryState::Validating);
        let inquiry = match self.form.validate() {
            Ok(inquiry) => inquiry,
            Err(err) => {
                warn!(error = %err, "inquiry rejected by validation");
                self.feedback = Some(err.feedback());
                return self.fail(FailureStage::Validation, err.into());
            }
        };

        self.transition(InquiryState::Submitting);
        if let Err(err) = self.sink.deliver(&inquiry).await {
            error!(error = %err, "contact inquiry could not be delivered");
            self.feedback = Some(Feedback::error(RETRY_MESSAGE));
            return self.fail(FailureStage::Delivery, err.into());
        }

        self.transition(InquiryState::Completed);
        self.form = ContactForm::default();
        self.feedback = Some(Feedback::success(INQUIRY_RECEIVED_MESSAGE));
        SubmissionOutcome::Succeeded
    }

    fn fail(&mut self, stage: FailureStage, err: InquiryFailure) -> SubmissionOutcome {
        self.last_error = Some(err);
        self.transition(InquiryState::Idle);
        SubmissionOutcome::Failed(stage)
    }

    fn transition(&mut self, next: InquiryState) {
        debug!(from = ?self.state, to = ?next, "inquiry state");
        self.state = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::form::Severity;
    use crate::workflows::inquiry::domain::ContactInquiry;
    use crate::workflows::inquiry::sink::SimulatedInquirySink;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Duration;

    #[derive(Default)]
    struct CapturingSink {
        delivered: Mutex<Vec<ContactInquiry>>,
    }

    #[async_trait]
    impl InquirySink for CapturingSink {
        async fn deliver(&self, inquiry: &ContactInquiry) -> Result<(), InquiryError> {
            self.delivered
                .lock()
                .expect("sink mutex poisoned")
                .push(inquiry.clone());
            Ok(())
        }
    }

    struct OfflineSink;

    #[async_trait]
    impl InquirySink for OfflineSink {
        async fn deliver(&self, _inquiry: &ContactInquiry) -> Result<(), InquiryError> {
            Err(InquiryError::Unavailable("offline".to_string()))
        }
    }

    fn filled(session: &mut InquirySession) {
        session.set_field(ContactField::Name, "Ada Lovelace");
        session.set_field(ContactField::Email, "ada@example.com");
        session.set_field(ContactField::Phone, "08011112222");
        session.set_field(ContactField::Message, "Is the BQ unit still available?");
    }

    #[tokio::test]
    async fn success_clears_form_and_thanks_visitor() {
        let sink = Arc::new(CapturingSink::default());
        let mut session = InquirySession::new(sink.clone());
        filled(&mut session);

        let outcome = session.submit().await;

        assert_eq!(outcome, SubmissionOutcome::Succeeded);
        assert_eq!(session.state(), InquiryState::Completed);
        assert_eq!(session.form(), &ContactForm::default());
        let feedback = session.feedback().expect("feedback shown");
        assert_eq!(feedback.severity, Severity::Success);
        assert_eq!(feedback.message, INQUIRY_RECEIVED_MESSAGE);

        let delivered = sink.delivered.lock().expect("sink mutex poisoned");
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].name, "Ada Lovelace");
    }

    #[tokio::test]
    async fn missing_message_never_reaches_sink() {
        let sink = Arc::new(CapturingSink::default());
        let mut session = InquirySession::new(sink.clone());
        filled(&mut session);
        session.set_field(ContactField::Message, "  ");

        let outcome = session.submit().await;

        assert_eq!(outcome, SubmissionOutcome::Failed(FailureStage::Validation));
        assert_eq!(session.state(), InquiryState::Idle);
        assert_eq!(session.form().name, "Ada Lovelace");
        assert_eq!(
            session.feedback().map(|f| f.severity),
            Some(Severity::Warning)
        );
        assert!(sink.delivered.lock().expect("sink mutex poisoned").is_empty());
    }

    #[tokio::test]
    async fn delivery_failure_retains_form() {
        let mut session = InquirySession::new(Arc::new(OfflineSink));
        filled(&mut session);

        let outcome = session.submit().await;

        assert_eq!(outcome, SubmissionOutcome::Failed(FailureStage::Delivery));
        assert_eq!(session.state(), InquiryState::Idle);
        assert_eq!(session.form().email, "ada@example.com");
        assert_eq!(session.feedback().map(|f| f.severity), Some(Severity::Error));
        assert!(matches!(
            session.last_error(),
            Some(InquiryFailure::Delivery(_))
        ));
    }

    #[tokio::test]
    async fn completed_session_accepts_another_inquiry() {
        let sink = Arc::new(CapturingSink::default());
        let mut session = InquirySession::new(sink.clone());
        filled(&mut session);
        assert_eq!(session.submit().await, SubmissionOutcome::Succeeded);

        filled(&mut session);
        assert_eq!(session.submit().await, SubmissionOutcome::Succeeded);
        assert_eq!(sink.delivered.lock().expect("sink mutex poisoned").len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn simulated_sink_waits_out_latency() {
        let latency = Duration::from_millis(1500);
        let mut session = InquirySession::new(Arc::new(SimulatedInquirySink::new(latency)));
        filled(&mut session);

        let started = tokio::time::Instant::now();
        let outcome = session.submit().await;

        assert_eq!(outcome, SubmissionOutcome::Succeeded);
        assert!(started.elapsed() >= latency);
    }

    #[tokio::test(start_paused = true)]
    async fn abandoned_submit_blocks_redispatch() {
        let mut session =
            InquirySession::new(Arc::new(SimulatedInquirySink::new(Duration::from_secs(60))));
        filled(&mut session);

        let abandoned = tokio::time::timeout(Duration::from_secs(1), session.submit()).await;
        assert!(abandoned.is_err());
        assert!(session.is_submitting());

        assert_eq!(session.submit().await, SubmissionOutcome::Pending);
    }
}

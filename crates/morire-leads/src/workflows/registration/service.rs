use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use super::domain::{RegistrationForm, RegistrationRecord, ValidRegistration};
use super::repository::{
    LeadNotifier, NotificationError, NotificationReceipt, RegistrationStore, StoreError,
};
use super::validation::validate_registration;
use crate::workflows::form::ValidationError;

/// Service composing validation, the record store, and the lead notifier.
///
/// Each stage is exposed separately so the session can move its state
/// machine between them: persistence short-circuits the attempt on failure,
/// notification is fire-and-log.
pub struct RegistrationService {
    store: Arc<dyn RegistrationStore>,
    notifier: Arc<dyn LeadNotifier>,
    recipient_label: String,
    clock: fn() -> DateTime<Utc>,
}

impl RegistrationService {
    pub fn new(
        store: Arc<dyn RegistrationStore>,
        notifier: Arc<dyn LeadNotifier>,
        recipient_label: impl Into<String>,
    ) -> Self {
        Self {
            store,
            notifier,
            recipient_label: recipient_label.into(),
            clock: Utc::now,
        }
    }

    /// Replace the source of `created_at` timestamps.
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    pub fn validate(&self, form: &RegistrationForm) -> Result<ValidRegistration, ValidationError> {
        validate_registration(form)
    }

    /// Write the registration; the returned record is the source of truth for success.
    pub async fn persist(
        &self,
        registration: ValidRegistration,
    ) -> Result<RegistrationRecord, StoreError> {
        let record = RegistrationRecord::new(registration, (self.clock)());
        self.store.insert(&record).await?;
        info!(
            unit = %record.preferred_unit,
            created_at = %record.created_at,
            "registration persisted"
        );
        Ok(record)
    }

    pub async fn notify(
        &self,
        record: &RegistrationRecord,
    ) -> Result<NotificationReceipt, NotificationError> {
        let notification = record.notification(&self.recipient_label);
        let receipt = self.notifier.send(&notification).await?;
        debug!(status = receipt.status, "lead notification delivered");
        Ok(receipt)
    }
}

/// Failure recorded by the latest registration attempt.
#[derive(Debug, thiserror::Error)]
pub enum RegistrationError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Persistence(#[from] StoreError),
    #[error(transparent)]
    Notification(#[from] NotificationError),
}

use async_trait::async_trait;
use serde::Serialize;

use super::domain::{LeadNotification, RegistrationRecord};

/// Insert-only storage for registrations so the session can be exercised in isolation.
#[async_trait]
pub trait RegistrationStore: Send + Sync {
    async fn insert(&self, record: &RegistrationRecord) -> Result<(), StoreError>;
}

/// Persistence failure. Terminal for the attempt: no notification, no navigation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record store unavailable: {0}")]
    Unavailable(String),
    #[error("record store rejected insert ({status}): {body}")]
    Rejected { status: u16, body: String },
}

/// Outbound staff alert hook (EmailJS or a log-only stand-in).
#[async_trait]
pub trait LeadNotifier: Send + Sync {
    async fn send(
        &self,
        notification: &LeadNotification,
    ) -> Result<NotificationReceipt, NotificationError>;
}

/// Acknowledgement returned by the delivery service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationReceipt {
    pub status: u16,
    pub text: String,
}

/// Notification failure. Never undoes or retries the persistence write.
#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("notification transport unavailable: {0}")]
    Transport(String),
    #[error("notification rejected ({status}): {body}")]
    Rejected { status: u16, body: String },
}

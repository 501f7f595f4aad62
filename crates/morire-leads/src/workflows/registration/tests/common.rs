use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::response::Response;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::workflows::navigation::RecordedNavigation;
use crate::workflows::registration::domain::{
    LeadNotification, RegistrationForm, RegistrationRecord,
};
use crate::workflows::registration::repository::{
    LeadNotifier, NotificationError, NotificationReceipt, RegistrationStore, StoreError,
};
use crate::workflows::registration::{RegistrationService, RegistrationSession};

pub(super) fn ada_form() -> RegistrationForm {
    RegistrationForm {
        full_name: "Ada Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        phone: "08011112222".to_string(),
        preferred_unit: "2 Bedroom Apartment".to_string(),
        message: String::new(),
    }
}

pub(super) fn fixed_clock() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 15, 9, 30, 0)
        .single()
        .expect("valid timestamp")
        + chrono::Duration::milliseconds(123)
}

#[derive(Default)]
pub(super) struct MemoryStore {
    records: Mutex<Vec<RegistrationRecord>>,
}

impl MemoryStore {
    pub(super) fn records(&self) -> Vec<RegistrationRecord> {
        self.records.lock().expect("store mutex poisoned").clone()
    }
}

#[async_trait]
impl RegistrationStore for MemoryStore {
    async fn insert(&self, record: &RegistrationRecord) -> Result<(), StoreError> {
        self.records
            .lock()
            .expect("store mutex poisoned")
            .push(record.clone());
        Ok(())
    }
}

/// Fails the first `failures` inserts, then accepts.
#[derive(Default)]
pub(super) struct FlakyStore {
    failures: usize,
    attempts: AtomicUsize,
    inner: MemoryStore,
}

impl FlakyStore {
    pub(super) fn failing(failures: usize) -> Self {
        Self {
            failures,
            ..Self::default()
        }
    }

    pub(super) fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    pub(super) fn records(&self) -> Vec<RegistrationRecord> {
        self.inner.records()
    }
}

#[async_trait]
impl RegistrationStore for FlakyStore {
    async fn insert(&self, record: &RegistrationRecord) -> Result<(), StoreError> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);
        if attempt < self.failures {
            return Err(StoreError::Unavailable("database offline".to_string()));
        }
        self.inner.insert(record).await
    }
}

/// Store whose insert never completes.
pub(super) struct HangingStore;

#[async_trait]
impl RegistrationStore for HangingStore {
    async fn insert(&self, _record: &RegistrationRecord) -> Result<(), StoreError> {
        std::future::pending::<()>().await;
        Ok(())
    }
}

#[derive(Default)]
pub(super) struct MemoryNotifier {
    sent: Mutex<Vec<LeadNotification>>,
}

impl MemoryNotifier {
    pub(super) fn sent(&self) -> Vec<LeadNotification> {
        self.sent.lock().expect("notifier mutex poisoned").clone()
    }
}

#[async_trait]
impl LeadNotifier for MemoryNotifier {
    async fn send(
        &self,
        notification: &LeadNotification,
    ) -> Result<NotificationReceipt, NotificationError> {
        self.sent
            .lock()
            .expect("notifier mutex poisoned")
            .push(notification.clone());
        Ok(NotificationReceipt {
            status: 200,
            text: "OK".to_string(),
        })
    }
}

#[derive(Default)]
pub(super) struct FailingNotifier {
    attempts: AtomicUsize,
}

impl FailingNotifier {
    pub(super) fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LeadNotifier for FailingNotifier {
    async fn send(
        &self,
        _notification: &LeadNotification,
    ) -> Result<NotificationReceipt, NotificationError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(NotificationError::Rejected {
            status: 412,
            body: "template not found".to_string(),
        })
    }
}

pub(super) fn service_with(
    store: Arc<dyn RegistrationStore>,
    notifier: Arc<dyn LeadNotifier>,
) -> Arc<RegistrationService> {
    Arc::new(RegistrationService::new(store, notifier, "Admin").with_clock(fixed_clock))
}

pub(super) fn session_with(
    store: Arc<dyn RegistrationStore>,
    notifier: Arc<dyn LeadNotifier>,
) -> (RegistrationSession, Arc<RecordedNavigation>) {
    let navigation = Arc::new(RecordedNavigation::default());
    let session = RegistrationSession::with_form(
        service_with(store, notifier),
        navigation.clone(),
        ada_form(),
    );
    (session, navigation)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 4096)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

use async_trait::async_trait;
use metrics_exporter_prometheus::PrometheusHandle;
use morire_leads::config::{AppConfig, DEFAULT_RECIPIENT_LABEL};
use morire_leads::error::AppError;
use morire_leads::workflows::registration::{
    EmailJsNotifier, LeadNotification, LeadNotifier, NotificationError, NotificationReceipt,
    RegistrationRecord, RegistrationService, RegistrationStore, StoreError, SupabaseStore,
};
use morire_leads::workflows::{Navigator, Route};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryRegistrationStore {
    records: Arc<Mutex<Vec<RegistrationRecord>>>,
}

#[async_trait]
impl RegistrationStore for InMemoryRegistrationStore {
    async fn insert(&self, record: &RegistrationRecord) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        guard.push(record.clone());
        Ok(())
    }
}

impl InMemoryRegistrationStore {
    pub(crate) fn records(&self) -> Vec<RegistrationRecord> {
        self.records.lock().expect("store mutex poisoned").clone()
    }
}

/// Notifier for setups without email delivery: the alert only reaches the log.
#[derive(Default, Clone)]
pub(crate) struct LogNotifier {
    sent: Arc<Mutex<Vec<LeadNotification>>>,
}

#[async_trait]
impl LeadNotifier for LogNotifier {
    async fn send(
        &self,
        notification: &LeadNotification,
    ) -> Result<NotificationReceipt, NotificationError> {
        info!(
            to = %notification.to_name,
            unit = %notification.unit,
            "lead notification logged instead of emailed"
        );
        self.sent
            .lock()
            .expect("notifier mutex poisoned")
            .push(notification.clone());
        Ok(NotificationReceipt {
            status: 200,
            text: "logged".to_string(),
        })
    }
}

impl LogNotifier {
    pub(crate) fn sent(&self) -> Vec<LeadNotification> {
        self.sent.lock().expect("notifier mutex poisoned").clone()
    }
}

/// Prints route changes for terminal sessions.
pub(crate) struct ConsoleNavigator;

impl Navigator for ConsoleNavigator {
    fn navigate(&self, route: Route) {
        println!("-> navigating to {}", route.path());
    }
}

/// Wire the hosted adapters when configured, falling back to in-memory and
/// log-only stand-ins otherwise.
pub(crate) fn build_registration_service(
    config: &AppConfig,
    in_memory: bool,
) -> Result<RegistrationService, AppError> {
    let store: Arc<dyn RegistrationStore> = match (&config.store, in_memory) {
        (Some(store_config), false) => {
            let store = SupabaseStore::new(store_config)?;
            info!(endpoint = store.endpoint(), "using hosted record store");
            Arc::new(store)
        }
        _ => {
            warn!("no record store in use; registrations are kept in memory only");
            Arc::new(InMemoryRegistrationStore::default())
        }
    };

    let notifier: Arc<dyn LeadNotifier> = match (&config.notifier, in_memory) {
        (Some(notifier_config), false) => Arc::new(EmailJsNotifier::new(notifier_config)?),
        _ => {
            warn!("email notifications disabled; lead alerts are logged only");
            Arc::new(LogNotifier::default())
        }
    };

    let recipient_label = config
        .notifier
        .as_ref()
        .map(|notifier| notifier.recipient_label.clone())
        .unwrap_or_else(|| DEFAULT_RECIPIENT_LABEL.to_string());

    Ok(RegistrationService::new(store, notifier, recipient_label))
}

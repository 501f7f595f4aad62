use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use morire_leads::catalog::UnitType;
use morire_leads::workflows::inquiry::{inquiry_router, SimulatedInquirySink};
use morire_leads::workflows::registration::{
    registration_router, LeadNotification, LeadNotifier, NotificationError, NotificationReceipt,
    RegistrationField, RegistrationRecord, RegistrationService, RegistrationSession,
    RegistrationStore, StoreError, SubmissionState,
};
use morire_leads::workflows::{
    ConfirmationView, FailureStage, RecordedNavigation, Route, Severity, SubmissionOutcome,
};

#[derive(Default)]
struct Ledger {
    records: Mutex<Vec<RegistrationRecord>>,
    alerts: Mutex<Vec<LeadNotification>>,
}

struct LedgerStore(Arc<Ledger>);

#[async_trait]
impl RegistrationStore for LedgerStore {
    async fn insert(&self, record: &RegistrationRecord) -> Result<(), StoreError> {
        self.0
            .records
            .lock()
            .expect("ledger mutex poisoned")
            .push(record.clone());
        Ok(())
    }
}

struct DownStore;

#[async_trait]
impl RegistrationStore for DownStore {
    async fn insert(&self, _record: &RegistrationRecord) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }
}

struct LedgerNotifier {
    ledger: Arc<Ledger>,
    reject: bool,
}

#[async_trait]
impl LeadNotifier for LedgerNotifier {
    async fn send(
        &self,
        notification: &LeadNotification,
    ) -> Result<NotificationReceipt, NotificationError> {
        if self.reject {
            return Err(NotificationError::Rejected {
                status: 403,
                body: "API calls are disabled for non-browser applications".to_string(),
            });
        }
        self.ledger
            .alerts
            .lock()
            .expect("ledger mutex poisoned")
            .push(notification.clone());
        Ok(NotificationReceipt {
            status: 200,
            text: "OK".to_string(),
        })
    }
}

fn service(ledger: &Arc<Ledger>, store_up: bool, notifier_up: bool) -> Arc<RegistrationService> {
    let store: Arc<dyn RegistrationStore> = if store_up {
        Arc::new(LedgerStore(ledger.clone()))
    } else {
        Arc::new(DownStore)
    };
    let notifier = Arc::new(LedgerNotifier {
        ledger: ledger.clone(),
        reject: !notifier_up,
    });
    Arc::new(RegistrationService::new(store, notifier, "Admin"))
}

fn fill_ada(session: &mut RegistrationSession) {
    session.set_field(RegistrationField::FullName, "Ada Lovelace");
    session.set_field(RegistrationField::Email, "ada@example.com");
    session.set_field(RegistrationField::Phone, "08011112222");
    session.set_field(RegistrationField::PreferredUnit, "2 Bedroom Apartment");
}

#[tokio::test(start_paused = true)]
async fn registration_hands_off_to_confirmation_then_home() {
    let ledger = Arc::new(Ledger::default());
    let navigation = Arc::new(RecordedNavigation::default());
    let mut session = RegistrationSession::new(service(&ledger, true, true), navigation.clone());
    fill_ada(&mut session);

    assert_eq!(session.submit().await, SubmissionOutcome::Succeeded);
    assert_eq!(session.state(), SubmissionState::Completed { degraded: false });
    assert!(session.form().is_blank());
    assert_eq!(navigation.last(), Some(Route::Confirmation));

    let records = ledger.records.lock().expect("ledger mutex poisoned").clone();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].preferred_unit, UnitType::TwoBedroom);
    let alerts = ledger.alerts.lock().expect("ledger mutex poisoned").clone();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].unit, "2 Bedroom Apartment");
    assert_eq!(alerts[0].message, "");

    let mut view = ConfirmationView::open(navigation.clone(), Duration::from_secs(4));
    assert!(view.wait_for_redirect().await);
    assert_eq!(navigation.routes(), vec![Route::Confirmation, Route::Home]);
}

#[tokio::test]
async fn notification_outage_still_confirms_with_warning() {
    let ledger = Arc::new(Ledger::default());
    let navigation = Arc::new(RecordedNavigation::default());
    let mut session = RegistrationSession::new(service(&ledger, true, false), navigation.clone());
    fill_ada(&mut session);

    assert_eq!(
        session.submit().await,
        SubmissionOutcome::SavedButNotificationFailed
    );
    assert_eq!(
        session.feedback().map(|feedback| feedback.severity),
        Some(Severity::Warning)
    );
    assert_eq!(
        ledger.records.lock().expect("ledger mutex poisoned").len(),
        1
    );
    assert_eq!(navigation.routes(), vec![Route::Confirmation]);
}

#[tokio::test]
async fn store_outage_keeps_visitor_on_form() {
    let ledger = Arc::new(Ledger::default());
    let navigation = Arc::new(RecordedNavigation::default());
    let mut session = RegistrationSession::new(service(&ledger, false, true), navigation.clone());
    fill_ada(&mut session);

    assert_eq!(
        session.submit().await,
        SubmissionOutcome::Failed(FailureStage::Persistence)
    );
    assert_eq!(session.state(), SubmissionState::Idle);
    assert_eq!(session.form().full_name, "Ada Lovelace");
    assert!(ledger.alerts.lock().expect("ledger mutex poisoned").is_empty());
    assert!(navigation.routes().is_empty());
}

#[tokio::test]
async fn routers_compose_into_one_application() {
    let ledger = Arc::new(Ledger::default());
    let app = registration_router(service(&ledger, true, true)).merge(inquiry_router(Arc::new(
        SimulatedInquirySink::new(Duration::ZERO),
    )));

    let registration = app
        .clone()
        .oneshot(
            Request::post("/api/v1/registrations")
                .header("content-type", "application/json")
                .body(Body::from(
                    r#"{"fullName":"Ada Lovelace","email":"ada@example.com","phone":"08011112222","preferredUnit":"3 Bedroom Apartment with BQ"}"#,
                ))
                .expect("request builds"),
        )
        .await
        .expect("router responds");
    assert_eq!(registration.status(), StatusCode::CREATED);

    let inquiry = app
        .oneshot(
            Request::post("/api/v1/inquiries")
                .header("content-type", "application/json")
                .body(Body::from(
                    r#"{"name":"Ada Lovelace","email":"ada@example.com","phone":"08011112222","message":"Viewing times?"}"#,
                ))
                .expect("request builds"),
        )
        .await
        .expect("router responds");
    assert_eq!(inquiry.status(), StatusCode::OK);

    let records = ledger.records.lock().expect("ledger mutex poisoned");
    assert_eq!(records[0].preferred_unit, UnitType::ThreeBedroomWithBq);
}

#[tokio::test]
async fn inquiry_route_treats_null_fields_as_missing() {
    let app = inquiry_router(Arc::new(SimulatedInquirySink::new(Duration::ZERO)));

    let response = app
        .oneshot(
            Request::post("/api/v1/inquiries")
                .header("content-type", "application/json")
                .body(Body::from(
                    r#"{"name":"Ada Lovelace","email":"ada@example.com","phone":null,"message":"Viewing times?"}"#,
                ))
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let bytes = axum::body::to_bytes(response.into_body(), 4096)
        .await
        .expect("read body");
    let body: serde_json::Value = serde_json::from_slice(&bytes).expect("json body");
    assert_eq!(body["missing_fields"], serde_json::json!(["phone"]));
    assert_eq!(body["feedback"]["severity"], "warning");
}

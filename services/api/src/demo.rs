use crate::infra::{
    build_registration_service, ConsoleNavigator, InMemoryRegistrationStore, LogNotifier,
};
use async_trait::async_trait;
use clap::Args;
use morire_leads::catalog::unit_listings;
use morire_leads::config::AppConfig;
use morire_leads::error::AppError;
use morire_leads::workflows::inquiry::{ContactField, InquirySession, SimulatedInquirySink};
use morire_leads::workflows::registration::{
    LeadNotification, LeadNotifier, NotificationError, NotificationReceipt, RegistrationField,
    RegistrationForm, RegistrationRecord, RegistrationService, RegistrationSession,
    RegistrationStore, StoreError,
};
use morire_leads::workflows::{ConfirmationView, RecordedNavigation, Route, SubmissionOutcome};
use std::sync::Arc;
use std::time::Duration;

#[derive(Args, Debug)]
pub(crate) struct RegisterArgs {
    #[arg(long)]
    pub(crate) full_name: String,
    #[arg(long)]
    pub(crate) email: String,
    #[arg(long)]
    pub(crate) phone: String,
    /// One of the labels printed by `units`
    #[arg(long)]
    pub(crate) unit: String,
    #[arg(long, default_value = "")]
    pub(crate) message: String,
    /// Keep the registration in memory and log the notification instead of sending it
    #[arg(long)]
    pub(crate) in_memory: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Simulated latency for the contact inquiry, in milliseconds
    #[arg(long, default_value_t = 0)]
    pub(crate) inquiry_latency_ms: u64,
}

pub(crate) fn run_units() {
    println!("Units open for registration");
    for listing in unit_listings() {
        println!("- {} ({})", listing.unit, listing.price);
        println!("  {}", listing.description);
    }
}

pub(crate) async fn run_register(args: RegisterArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = Arc::new(build_registration_service(&config, args.in_memory)?);
    let navigator = Arc::new(ConsoleNavigator);

    let mut session = RegistrationSession::new(service, navigator.clone());
    session.set_field(RegistrationField::FullName, args.full_name);
    session.set_field(RegistrationField::Email, args.email);
    session.set_field(RegistrationField::Phone, args.phone);
    session.set_field(RegistrationField::PreferredUnit, args.unit);
    session.set_field(RegistrationField::Message, args.message);

    let outcome = session.submit().await;
    if let Some(feedback) = session.feedback() {
        println!("[{:?}] {}", feedback.severity, feedback.message);
    }
    if !outcome.is_success() {
        if let Some(err) = session.last_error() {
            eprintln!("registration not completed: {err}");
        }
        return Ok(());
    }

    let mut view = ConfirmationView::open(navigator, config.site.confirmation_redirect);
    println!("{}", view.headline());
    println!("{}", view.message());
    println!(
        "Returning to the home page in {} seconds...",
        config.site.confirmation_redirect.as_secs()
    );
    view.wait_for_redirect().await;
    Ok(())
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    println!("Lead capture demo");

    for scenario in Scenario::ALL {
        let report = run_scenario(scenario).await;
        println!("\n{}", scenario.title());
        println!("- outcome: {}", report.outcome.label());
        if let Some(feedback) = &report.feedback {
            println!("- feedback: {feedback}");
        }
        println!(
            "- {} record(s) stored | {} alert(s) sent | redirect: {}",
            report.records,
            report.alerts,
            report.redirect.map(Route::path).unwrap_or("none")
        );
    }

    println!("\nContact inquiry");
    let sink = Arc::new(SimulatedInquirySink::new(Duration::from_millis(
        args.inquiry_latency_ms,
    )));
    let mut inquiry = InquirySession::new(sink);
    inquiry.set_field(ContactField::Name, "Ada Lovelace");
    inquiry.set_field(ContactField::Email, "ada@example.com");
    inquiry.set_field(ContactField::Phone, "08011112222");
    inquiry.set_field(ContactField::Message, "Are weekend viewings available?");
    let outcome = inquiry.submit().await;
    println!("- outcome: {}", outcome.label());
    if let Some(feedback) = inquiry.feedback() {
        println!("- feedback: {}", feedback.message);
    }

    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scenario {
    Registered,
    NotificationDown,
    MissingPhone,
    StoreDown,
}

impl Scenario {
    const ALL: [Scenario; 4] = [
        Scenario::Registered,
        Scenario::NotificationDown,
        Scenario::MissingPhone,
        Scenario::StoreDown,
    ];

    fn title(self) -> &'static str {
        match self {
            Scenario::Registered => "Registration with every service available",
            Scenario::NotificationDown => "Registration while email delivery is down",
            Scenario::MissingPhone => "Registration missing a phone number",
            Scenario::StoreDown => "Registration while the record store is down",
        }
    }

    fn form(self) -> RegistrationForm {
        RegistrationForm {
            full_name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: match self {
                Scenario::MissingPhone => String::new(),
                _ => "08011112222".to_string(),
            },
            preferred_unit: "2 Bedroom Apartment".to_string(),
            message: String::new(),
        }
    }
}

struct ScenarioReport {
    outcome: SubmissionOutcome,
    feedback: Option<String>,
    records: usize,
    alerts: usize,
    redirect: Option<Route>,
}

struct OfflineStore;

#[async_trait]
impl RegistrationStore for OfflineStore {
    async fn insert(&self, _record: &RegistrationRecord) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("demo store offline".to_string()))
    }
}

struct OfflineNotifier;

#[async_trait]
impl LeadNotifier for OfflineNotifier {
    async fn send(
        &self,
        _notification: &LeadNotification,
    ) -> Result<NotificationReceipt, NotificationError> {
        Err(NotificationError::Transport("demo mail relay offline".to_string()))
    }
}

async fn run_scenario(scenario: Scenario) -> ScenarioReport {
    let store = InMemoryRegistrationStore::default();
    let notifier = LogNotifier::default();

    let store_port: Arc<dyn RegistrationStore> = match scenario {
        Scenario::StoreDown => Arc::new(OfflineStore),
        _ => Arc::new(store.clone()),
    };
    let notifier_port: Arc<dyn LeadNotifier> = match scenario {
        Scenario::NotificationDown => Arc::new(OfflineNotifier),
        _ => Arc::new(notifier.clone()),
    };

    let service = Arc::new(RegistrationService::new(store_port, notifier_port, "Admin"));
    let navigation = Arc::new(RecordedNavigation::default());
    let mut session = RegistrationSession::with_form(service, navigation.clone(), scenario.form());
    let outcome = session.submit().await;

    ScenarioReport {
        outcome,
        feedback: session.feedback().map(|feedback| feedback.message.clone()),
        records: store.records().len(),
        alerts: notifier.sent().len(),
        redirect: navigation.last(),
    }
}

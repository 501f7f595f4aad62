//! Interest registration: validate the lead form, persist it to the record
//! store, alert staff on a best-effort basis, then hand off to the
//! confirmation view.

pub mod domain;
pub mod outbound;
pub mod repository;
pub mod router;
pub mod service;
pub mod session;
mod validation;

#[cfg(test)]
mod tests;

pub use domain::{
    LeadNotification, RegistrationField, RegistrationForm, RegistrationRecord, ValidRegistration,
};
pub use outbound::{EmailJsNotifier, SupabaseStore};
pub use repository::{
    LeadNotifier, NotificationError, NotificationReceipt, RegistrationStore, StoreError,
};
pub use router::registration_router;
pub use service::{RegistrationError, RegistrationService};
pub use session::{RegistrationSession, SubmissionState};
pub use validation::validate_registration;

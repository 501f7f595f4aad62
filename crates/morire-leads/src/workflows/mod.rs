pub mod confirmation;
pub mod form;
pub mod inquiry;
pub mod navigation;
pub mod registration;
mod response;

pub use confirmation::{confirmation_router, ConfirmationView, ScheduledRedirect};
pub use form::{FailureStage, Feedback, Severity, SubmissionOutcome, ValidationError};
pub use navigation::{Navigator, RecordedNavigation, Route};

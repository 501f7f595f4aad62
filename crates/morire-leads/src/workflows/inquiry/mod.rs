//! General contact inquiries from the landing page's contact section.

pub mod domain;
pub mod router;
pub mod session;
pub mod sink;

pub use domain::{ContactField, ContactForm, ContactInquiry};
pub use router::inquiry_router;
pub use session::{InquiryFailure, InquirySession, InquiryState};
pub use sink::{InquiryError, InquirySink, SimulatedInquirySink};

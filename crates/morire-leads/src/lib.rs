//! Lead capture for the Morire estate website: interest registrations that
//! are persisted and forwarded to staff, plus general contact inquiries.

pub mod catalog;
pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;

//! Feedback, outcome, and validation types shared by the visitor form sessions.

use serde::{Deserialize, Deserializer, Serialize};

pub const MISSING_FIELDS_MESSAGE: &str = "Please fill in all required fields";
pub const UNKNOWN_UNIT_MESSAGE: &str = "Please choose one of the listed unit types";
pub const RETRY_MESSAGE: &str = "Something went wrong. Please try again.";
pub const NOTIFICATION_FAILED_MESSAGE: &str = "Registration saved but email notification failed.";
pub const INQUIRY_RECEIVED_MESSAGE: &str = "Thank you for your interest! We'll contact you soon.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Success,
    Warning,
    Error,
}

/// Transient message surfaced to the visitor after a submit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Feedback {
    pub severity: Severity,
    pub message: String,
}

impl Feedback {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }
}

/// Form inputs sent as `null` read as empty, like absent ones.
pub(crate) fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Stage at which a submission attempt stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureStage {
    Validation,
    Persistence,
    Delivery,
}

/// Result of one submit, driving the feedback message and navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// An earlier attempt is still marked in flight; nothing was dispatched.
    Pending,
    Succeeded,
    SavedButNotificationFailed,
    Failed(FailureStage),
}

impl SubmissionOutcome {
    pub fn label(self) -> &'static str {
        match self {
            SubmissionOutcome::Pending => "pending",
            SubmissionOutcome::Succeeded => "succeeded",
            SubmissionOutcome::SavedButNotificationFailed => "saved_but_notification_failed",
            SubmissionOutcome::Failed(_) => "failed",
        }
    }

    /// True when the visitor's details were accepted, degraded or not.
    pub fn is_success(self) -> bool {
        matches!(
            self,
            SubmissionOutcome::Succeeded | SubmissionOutcome::SavedButNotificationFailed
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    #[error("unknown unit type '{0}'")]
    UnknownUnit(String),
}

impl ValidationError {
    pub fn feedback(&self) -> Feedback {
        match self {
            ValidationError::MissingFields(_) => Feedback::warning(MISSING_FIELDS_MESSAGE),
            ValidationError::UnknownUnit(_) => Feedback::warning(UNKNOWN_UNIT_MESSAGE),
        }
    }

    pub fn missing_fields(&self) -> &[&'static str] {
        match self {
            ValidationError::MissingFields(fields) => fields,
            ValidationError::UnknownUnit(_) => &[],
        }
    }
}

/// Names of the required fields whose value is empty or whitespace.
pub(crate) fn blank_fields<'a>(
    fields: impl IntoIterator<Item = (&'static str, &'a str)>,
) -> Vec<&'static str> {
    fields
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
}

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use super::form::{FailureStage, Feedback, SubmissionOutcome, ValidationError};
use super::navigation::Route;

/// JSON body shared by the form endpoints so clients render feedback and
/// follow redirects the same way for every form.
pub(crate) fn submission_response(
    outcome: SubmissionOutcome,
    success_status: StatusCode,
    feedback: Option<&Feedback>,
    redirect: Option<Route>,
    validation: Option<&ValidationError>,
) -> Response {
    let status = match outcome {
        SubmissionOutcome::Succeeded | SubmissionOutcome::SavedButNotificationFailed => {
            success_status
        }
        SubmissionOutcome::Failed(FailureStage::Validation) => StatusCode::UNPROCESSABLE_ENTITY,
        SubmissionOutcome::Failed(FailureStage::Persistence | FailureStage::Delivery) => {
            StatusCode::BAD_GATEWAY
        }
        SubmissionOutcome::Pending => StatusCode::CONFLICT,
    };

    let mut payload = json!({
        "outcome": outcome.label(),
        "feedback": feedback,
        "redirect_to": redirect.map(Route::path),
    });
    if let SubmissionOutcome::Failed(stage) = outcome {
        payload["failed_stage"] = json!(stage);
    }
    if let Some(err) = validation {
        payload["missing_fields"] = json!(err.missing_fields());
    }

    (status, Json(payload)).into_response()
}

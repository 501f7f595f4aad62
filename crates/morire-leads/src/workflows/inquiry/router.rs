use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::Response, routing::post, Json, Router};

use super::domain::ContactForm;
use super::session::{InquiryFailure, InquirySession};
use super::sink::InquirySink;
use crate::workflows::response::submission_response;

pub fn inquiry_router(sink: Arc<dyn InquirySink>) -> Router {
    Router::new()
        .route("/api/v1/inquiries", post(inquiry_handler))
        .with_state(sink)
}

pub(crate) async fn inquiry_handler(
    State(sink): State<Arc<dyn InquirySink>>,
    Json(form): Json<ContactForm>,
) -> Response {
    let mut session = InquirySession::with_form(sink, form);
    let outcome = session.submit().await;
    let validation = match session.last_error() {
        Some(InquiryFailure::Validation(err)) => Some(err),
        _ => None,
    };

    submission_response(
        outcome,
        StatusCode::OK,
        session.feedback(),
        None,
        validation,
    )
}

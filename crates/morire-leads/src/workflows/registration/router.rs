use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

use super::domain::RegistrationForm;
use super::service::{RegistrationError, RegistrationService};
use super::session::RegistrationSession;
use crate::catalog::unit_listings;
use crate::workflows::navigation::RecordedNavigation;
use crate::workflows::response::submission_response;

/// Router builder exposing the registration form and the unit catalog it selects from.
pub fn registration_router(service: Arc<RegistrationService>) -> Router {
    Router::new()
        .route("/api/v1/registrations", post(register_handler))
        .route("/api/v1/units", get(units_handler))
        .with_state(service)
}

/// Runs one registration session per request and relays its redirect.
pub(crate) async fn register_handler(
    State(service): State<Arc<RegistrationService>>,
    Json(form): Json<RegistrationForm>,
) -> Response {
    let navigation = Arc::new(RecordedNavigation::default());
    let mut session = RegistrationSession::with_form(service, navigation.clone(), form);

    let outcome = session.submit().await;
    let validation = match session.last_error() {
        Some(RegistrationError::Validation(err)) => Some(err),
        _ => None,
    };

    submission_response(
        outcome,
        StatusCode::CREATED,
        session.feedback(),
        navigation.last(),
        validation,
    )
}

pub(crate) async fn units_handler() -> Response {
    (StatusCode::OK, Json(unit_listings())).into_response()
}

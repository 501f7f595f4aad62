//! Thank-you view shown after a registration, with its auto-redirect home.

use std::sync::Arc;
use std::time::Duration;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::debug;

use super::navigation::{Navigator, Route};

pub const CONFIRMATION_HEADLINE: &str = "Thank You!";
pub const CONFIRMATION_MESSAGE: &str =
    "Your interest has been registered successfully. We'll be in touch with you shortly.";

/// Navigation scheduled on the tokio runtime. Aborted when dropped, so the
/// callback never outlives its owner.
pub struct ScheduledRedirect {
    handle: JoinHandle<()>,
    settled: Option<bool>,
}

impl ScheduledRedirect {
    /// Must be called from within a tokio runtime.
    pub fn schedule(navigator: Arc<dyn Navigator>, route: Route, delay: Duration) -> Self {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            debug!(route = route.path(), "scheduled redirect fired");
            navigator.navigate(route);
        });

        Self {
            handle,
            settled: None,
        }
    }

    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the redirect; `false` when it was cancelled before firing.
    pub async fn wait(&mut self) -> bool {
        if let Some(fired) = self.settled {
            return fired;
        }
        let fired = (&mut self.handle).await.is_ok();
        self.settled = Some(fired);
        fired
    }
}

impl Drop for ScheduledRedirect {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Visible lifetime of the confirmation page.
pub struct ConfirmationView {
    navigator: Arc<dyn Navigator>,
    redirect: ScheduledRedirect,
}

impl ConfirmationView {
    pub fn open(navigator: Arc<dyn Navigator>, redirect_after: Duration) -> Self {
        let redirect = ScheduledRedirect::schedule(navigator.clone(), Route::Home, redirect_after);
        Self {
            navigator,
            redirect,
        }
    }

    pub fn headline(&self) -> &'static str {
        CONFIRMATION_HEADLINE
    }

    pub fn message(&self) -> &'static str {
        CONFIRMATION_MESSAGE
    }

    /// Navigate away before the timer fires; the pending redirect is cancelled.
    /// No-op once the redirect has fired.
    pub fn leave(self, route: Route) {
        if self.redirect.is_finished() {
            debug!("confirmation left after redirect already fired");
            return;
        }
        self.redirect.cancel();
        self.navigator.navigate(route);
    }

    pub async fn wait_for_redirect(&mut self) -> bool {
        self.redirect.wait().await
    }
}

#[derive(Debug, Serialize)]
struct ConfirmationPayload {
    headline: &'static str,
    message: &'static str,
    redirect_to: &'static str,
    redirect_after_secs: u64,
}

/// Copy and redirect hint for clients rendering the confirmation page.
pub fn confirmation_router(redirect_after: Duration) -> Router {
    Router::new()
        .route("/api/v1/confirmation", get(confirmation_handler))
        .with_state(redirect_after)
}

async fn confirmation_handler(State(redirect_after): State<Duration>) -> Json<ConfirmationPayload> {
    Json(ConfirmationPayload {
        headline: CONFIRMATION_HEADLINE,
        message: CONFIRMATION_MESSAGE,
        redirect_to: Route::Home.path(),
        redirect_after_secs: redirect_after.as_secs(),
    })
}

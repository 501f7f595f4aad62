use std::sync::Mutex;

/// Client-side destinations the flows can hand off to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Confirmation,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Confirmation => "/thank-you",
        }
    }
}

/// Port through which a session requests a route change.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Navigator that only records requested routes, for callers that relay the
/// redirect to a remote client (HTTP responses, tests).
#[derive(Debug, Default)]
pub struct RecordedNavigation {
    routes: Mutex<Vec<Route>>,
}

impl RecordedNavigation {
    pub fn routes(&self) -> Vec<Route> {
        self.routes.lock().expect("navigation mutex poisoned").clone()
    }

    pub fn last(&self) -> Option<Route> {
        self.routes
            .lock()
            .expect("navigation mutex poisoned")
            .last()
            .copied()
    }
}

impl Navigator for RecordedNavigation {
    fn navigate(&self, route: Route) {
        self.routes
            .lock()
            .expect("navigation mutex poisoned")
            .push(route);
    }
}

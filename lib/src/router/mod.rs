// lib/src/router/mod.rs
pub mod dispatch;
pub mod guard;
pub mod navigator;
pub mod routes;

use std::sync::{Arc, Mutex};

use models::session::Session;

pub use dispatch::{dispatch, View};
pub use guard::{GuardOutcome, ProtectedRegion};
pub use navigator::{HistoryNavigator, Navigator};
pub use routes::Route;

use crate::session::SessionResolver;

/// What a route resolves to right now.
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Loading,
    /// Unauthenticated access to a protected route. Nothing is rendered.
    Nothing,
    Render { view: View, session: Option<Session> },
}

/// Guard and dispatch for one application instance.
pub struct Router {
    resolver: Arc<SessionResolver>,
    navigator: Arc<dyn Navigator>,
    region: Mutex<ProtectedRegion>,
}

impl Router {
    pub fn new(resolver: Arc<SessionResolver>, navigator: Arc<dyn Navigator>) -> Self {
        Router { resolver, navigator, region: Mutex::new(ProtectedRegion::new()) }
    }

    pub fn open(&self, route: Route) -> Screen {
        let snapshot = self.resolver.snapshot();
        if !route.is_protected() {
            return Screen::Render { view: View::Login, session: snapshot.session };
        }
        let outcome = match self.region.lock() {
            Ok(mut region) => region.evaluate(&snapshot, self.navigator.as_ref()),
            Err(poisoned) => poisoned.into_inner().evaluate(&snapshot, self.navigator.as_ref()),
        };
        match outcome {
            GuardOutcome::Loading => Screen::Loading,
            GuardOutcome::Redirected | GuardOutcome::Blocked => Screen::Nothing,
            GuardOutcome::Authorized(session) => {
                let view = dispatch(session.role, route);
                Screen::Render { view, session: Some(session) }
            }
        }
    }
}

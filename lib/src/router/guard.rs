// lib/src/router/guard.rs
use log::debug;
use models::session::Session;

use super::navigator::Navigator;
use super::routes::Route;
use crate::session::SessionSnapshot;

#[derive(Debug, Clone, PartialEq)]
pub enum GuardOutcome {
    /// Session not resolved yet. Show a loading indicator, decide nothing.
    Loading,
    /// Unauthenticated; navigation to `/login` was issued by this evaluation.
    Redirected,
    /// Unauthenticated; the redirect was already issued. Render nothing.
    Blocked,
    Authorized(Session),
}

/// Guard state for the protected part of the application.
///
/// The redirect to `/login` fires once per unauthenticated stretch. Seeing a
/// session again re-arms it.
#[derive(Debug, Default)]
pub struct ProtectedRegion {
    redirected: bool,
}

impl ProtectedRegion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn evaluate(&mut self, snapshot: &SessionSnapshot, navigator: &dyn Navigator) -> GuardOutcome {
        if snapshot.loading {
            return GuardOutcome::Loading;
        }
        match &snapshot.session {
            Some(session) => {
                self.redirected = false;
                GuardOutcome::Authorized(session.clone())
            }
            None if self.redirected => GuardOutcome::Blocked,
            None => {
                debug!("No session, redirecting to {}", Route::Login);
                self.redirected = true;
                navigator.navigate(Route::Login);
                GuardOutcome::Redirected
            }
        }
    }
}

// lib/src/router/navigator.rs
use std::sync::Mutex;

use log::debug;

use super::routes::Route;

/// Moves the application to another page.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Records every navigation in order. The console renders whatever the
/// latest entry points at.
#[derive(Debug, Default)]
pub struct HistoryNavigator {
    history: Mutex<Vec<Route>>,
}

impl HistoryNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<Route> {
        self.history.lock().ok().and_then(|h| h.last().copied())
    }

    pub fn history(&self) -> Vec<Route> {
        self.history.lock().map(|h| h.clone()).unwrap_or_default()
    }

    /// Number of times `route` was navigated to.
    pub fn visits(&self, route: Route) -> usize {
        self.history
            .lock()
            .map(|h| h.iter().filter(|r| **r == route).count())
            .unwrap_or(0)
    }
}

impl Navigator for HistoryNavigator {
    fn navigate(&self, route: Route) {
        debug!("Navigating to {}", route);
        if let Ok(mut history) = self.history.lock() {
            history.push(route);
        }
    }
}

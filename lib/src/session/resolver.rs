// lib/src/session/resolver.rs
//! Owns the process-wide identity.
//!
//! The resolver is the only writer of session state. Everything else reads
//! [`SessionSnapshot`] values, either on demand or through a `watch` receiver,
//! so `loading` and `session` are always observed together.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::Duration;
use log::{debug, error, info, warn};
use models::errors::HospitalResult;
use models::session::{Session, UserProfile};
use tokio::sync::watch;

use crate::config::{SESSION_TOKEN_KEY, SESSION_USER_KEY};
use crate::router::{Navigator, Route};
use crate::session::store::SessionStore;

#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub loading: bool,
    pub session: Option<Session>,
}

impl SessionSnapshot {
    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        SessionSnapshot { loading: true, session: None }
    }
}

pub struct SessionResolver {
    store: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
    ttl: Duration,
    initialized: AtomicBool,
    state: watch::Sender<SessionSnapshot>,
}

impl SessionResolver {
    pub fn new(store: Arc<dyn SessionStore>, navigator: Arc<dyn Navigator>, ttl: Duration) -> Self {
        SessionResolver {
            store,
            navigator,
            ttl,
            initialized: AtomicBool::new(false),
            state: watch::Sender::new(SessionSnapshot::default()),
        }
    }

    /// Rehydrates the persisted session. Only the first call does any work;
    /// later calls return the current snapshot.
    pub fn initialize(&self) -> SessionSnapshot {
        if self.initialized.swap(true, Ordering::SeqCst) {
            return self.snapshot();
        }
        let session = self.restore();
        match &session {
            Some(s) => info!("Restored session for {} ({})", s.display_name, s.role),
            None => debug!("No persisted session found"),
        }
        let snapshot = SessionSnapshot { loading: false, session };
        self.state.send_replace(snapshot.clone());
        snapshot
    }

    fn restore(&self) -> Option<Session> {
        let token = self.read_entry(SESSION_TOKEN_KEY)?;
        let user = self.read_entry(SESSION_USER_KEY)?;
        match serde_json::from_str::<UserProfile>(&user) {
            Ok(profile) => Some(Session::new(token, profile)),
            Err(e) => {
                error!("Failed to parse persisted user profile, clearing session: {}", e);
                self.clear_persisted();
                None
            }
        }
    }

    fn read_entry(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value,
            Err(e) => {
                error!("Could not read persisted '{}', clearing session: {}", key, e);
                self.clear_persisted();
                None
            }
        }
    }

    /// Persists `token` and `profile`, makes them the live session and moves
    /// to the dashboard. The token is not validated here.
    pub fn login(&self, token: &str, profile: UserProfile) -> HospitalResult<Session> {
        let serialized = serde_json::to_string(&profile)?;
        self.store.set(SESSION_TOKEN_KEY, token, self.ttl)?;
        if let Err(e) = self.store.set(SESSION_USER_KEY, &serialized, self.ttl) {
            error!("Could not persist the profile, discarding the token: {}", e);
            if let Err(remove_err) = self.store.remove(SESSION_TOKEN_KEY) {
                warn!("Failed to remove persisted '{}': {}", SESSION_TOKEN_KEY, remove_err);
            }
            return Err(e);
        }

        let session = Session::new(token, profile);
        info!("Logged in as {} ({})", session.display_name, session.role);
        self.initialized.store(true, Ordering::SeqCst);
        self.state.send_replace(SessionSnapshot { loading: false, session: Some(session.clone()) });
        self.navigator.navigate(Route::Dashboard);
        Ok(session)
    }

    /// Clears both persisted entries and moves to the login page.
    pub fn logout(&self) {
        self.clear_persisted();
        self.initialized.store(true, Ordering::SeqCst);
        let previous = self.state.send_replace(SessionSnapshot { loading: false, session: None });
        if let Some(s) = previous.session {
            info!("Logged out {}", s.display_name);
        }
        self.navigator.navigate(Route::Login);
    }

    fn clear_persisted(&self) {
        for key in [SESSION_TOKEN_KEY, SESSION_USER_KEY] {
            if let Err(e) = self.store.remove(key) {
                warn!("Failed to remove persisted '{}': {}", key, e);
            }
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.borrow().clone()
    }

    pub fn current_session(&self) -> Option<Session> {
        self.state.borrow().session.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.state.subscribe()
    }
}

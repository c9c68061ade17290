// lib/src/app.rs
//! The application context: one resolver, one navigator and one backend
//! stack per process, shared by the router and every view controller.

use std::sync::Arc;

use caching::Cache;
use models::errors::{HospitalError, HospitalResult};
use models::session::{Role, Session};

use crate::api::{ApiClient, HospitalBackend, SessionGuardedBackend};
use crate::config::ClientConfig;
use crate::refresh::RefreshCoordinator;
use crate::router::{HistoryNavigator, Route, Router, Screen};
use crate::session::{authenticate, FileSessionStore, SessionResolver, SessionSnapshot, SessionStore};

pub struct AppContext {
    config: ClientConfig,
    navigator: Arc<HistoryNavigator>,
    resolver: Arc<SessionResolver>,
    guarded: Arc<SessionGuardedBackend>,
    coordinator: Arc<RefreshCoordinator>,
    router: Router,
}

impl AppContext {
    /// Builds the production stack: file-backed session store, reqwest
    /// transport, session guard and read-through cache.
    pub fn new(config: ClientConfig) -> HospitalResult<Self> {
        let store: Arc<dyn SessionStore> = Arc::new(FileSessionStore::new(config.session_directory.clone()));
        let client = ApiClient::new(&config.api_base_url, config.request_timeout(), store.clone())?;
        Ok(Self::with_transport(config, store, Arc::new(client)))
    }

    /// Same wiring over an arbitrary transport.
    pub fn with_transport(
        config: ClientConfig,
        store: Arc<dyn SessionStore>,
        transport: Arc<dyn HospitalBackend>,
    ) -> Self {
        let navigator = Arc::new(HistoryNavigator::new());
        let resolver = Arc::new(SessionResolver::new(store, navigator.clone(), config.session_ttl()));
        let cache = Cache::new(config.cache_capacity);
        let guarded = Arc::new(SessionGuardedBackend::new(transport, resolver.clone()).clearing(cache.clone()));
        let coordinator = Arc::new(RefreshCoordinator::with_cache(guarded.clone(), cache));
        let router = Router::new(resolver.clone(), navigator.clone());
        AppContext { config, navigator, resolver, guarded, coordinator, router }
    }

    /// Rehydrates the persisted session. Call once at startup.
    pub fn start(&self) -> SessionSnapshot {
        self.resolver.initialize()
    }

    pub async fn login(&self, email: &str, password: &str) -> HospitalResult<Session> {
        let session = authenticate(&self.resolver, self.coordinator.as_ref(), email, password).await?;
        self.coordinator.invalidate_all();
        Ok(session)
    }

    /// Same teardown as a rejected request: logout plus an empty cache.
    pub fn logout(&self) {
        self.guarded.end_session();
    }

    pub fn open(&self, route: Route) -> Screen {
        self.router.open(route)
    }

    pub fn session(&self) -> Option<Session> {
        self.resolver.current_session()
    }

    /// The current session, or `Unauthorized` when nobody is logged in.
    pub fn require_session(&self) -> HospitalResult<Session> {
        self.session()
            .ok_or_else(|| HospitalError::Unauthorized("Not logged in. Run `medicare login` first.".into()))
    }

    /// The current session if its role is one of `allowed`.
    pub fn require_role(&self, allowed: &[Role]) -> HospitalResult<Session> {
        let session = self.require_session()?;
        if allowed.contains(&session.role) {
            Ok(session)
        } else {
            Err(HospitalError::Unauthorized(format!(
                "This action is not available to {}s",
                session.role
            )))
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn backend(&self) -> Arc<RefreshCoordinator> {
        self.coordinator.clone()
    }

    pub fn resolver(&self) -> Arc<SessionResolver> {
        self.resolver.clone()
    }

    pub fn navigator(&self) -> Arc<HistoryNavigator> {
        self.navigator.clone()
    }
}

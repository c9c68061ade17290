// lib/src/api/guarded.rs
use std::sync::Arc;

use async_trait::async_trait;
use caching::Cache;
use log::{info, warn};
use models::errors::HospitalResult;
use serde_json::Value;

use super::backend::{HospitalBackend, HttpMethod};
use super::endpoints::LOGIN;
use crate::session::SessionResolver;

/// Wraps a backend so that a 401/403 on any call except the login itself
/// ends the session.
pub struct SessionGuardedBackend {
    inner: Arc<dyn HospitalBackend>,
    resolver: Arc<SessionResolver>,
    cache: Option<Cache>,
}

impl SessionGuardedBackend {
    pub fn new(inner: Arc<dyn HospitalBackend>, resolver: Arc<SessionResolver>) -> Self {
        SessionGuardedBackend { inner, resolver, cache: None }
    }

    /// Also drops every entry of `cache` whenever the session ends.
    pub fn clearing(mut self, cache: Cache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Logs out and forgets the previous user's records.
    pub fn end_session(&self) {
        self.resolver.logout();
        if let Some(cache) = &self.cache {
            cache.invalidate_all();
            info!("Cleared cached records after logout");
        }
    }
}

#[async_trait]
impl HospitalBackend for SessionGuardedBackend {
    async fn request(&self, method: HttpMethod, path: &str, body: Option<Value>) -> HospitalResult<Value> {
        let result = self.inner.request(method, path, body).await;
        if let Err(e) = &result {
            if e.is_auth_failure() && path != LOGIN && self.resolver.current_session().is_some() {
                warn!("{} {} was rejected ({}), ending session", method, path, e);
                self.end_session();
            }
        }
        result
    }
}

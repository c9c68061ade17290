// lib/src/api/client.rs
//! reqwest transport for the hospital REST API.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use models::errors::{HospitalError, HospitalResult};
use reqwest::{Client, Request, StatusCode};
use serde_json::Value;

use super::backend::{HospitalBackend, HttpMethod};
use crate::config::SESSION_TOKEN_KEY;
use crate::session::SessionStore;

#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    store: Arc<dyn SessionStore>,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration, store: Arc<dyn SessionStore>) -> HospitalResult<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(ApiClient { http, base_url: base_url.trim_end_matches('/').to_string(), store })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// The bearer token is read from the session store for every request, so
    /// a login or logout takes effect on the next call.
    pub fn build_request(&self, method: HttpMethod, path: &str, body: Option<&Value>) -> HospitalResult<Request> {
        let mut builder = self.http.request(method.into(), self.url(path));
        match self.store.get(SESSION_TOKEN_KEY) {
            Ok(Some(token)) => builder = builder.bearer_auth(token),
            Ok(None) => {}
            Err(e) => warn!("Could not read session token, sending {} {} anonymously: {}", method, path, e),
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }
        Ok(builder.build()?)
    }
}

/// Extracts `message` from an error body, or an empty string.
pub fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_default()
}

pub(crate) fn classify_failure(status: StatusCode, body: &str) -> HospitalError {
    let message = error_message(body);
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => HospitalError::Unauthorized(message),
        _ => HospitalError::Backend { status: status.as_u16(), message },
    }
}

#[async_trait]
impl HospitalBackend for ApiClient {
    async fn request(&self, method: HttpMethod, path: &str, body: Option<Value>) -> HospitalResult<Value> {
        let request = self.build_request(method, path, body.as_ref())?;
        debug!("{} {}", method, request.url());

        let response = self.http.execute(request).await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            debug!("{} {} failed with {}", method, path, status);
            return Err(classify_failure(status, &text));
        }
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }
}

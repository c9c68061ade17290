// lib/src/api/backend.rs
use std::fmt;

use async_trait::async_trait;
use models::errors::HospitalResult;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Transport seam for the hospital REST API.
///
/// Paths are relative to the configured base URL (`/er/active`). A response
/// with an empty body yields `Value::Null`.
#[async_trait]
pub trait HospitalBackend: Send + Sync {
    async fn request(&self, method: HttpMethod, path: &str, body: Option<Value>) -> HospitalResult<Value>;
}

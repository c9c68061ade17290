// lib/src/api/testing.rs
//! In-process backend for tests. Unscripted reads answer with an empty list,
//! unscripted writes with `null`.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use models::errors::{HospitalError, HospitalResult};
use serde_json::Value;

use super::backend::{HospitalBackend, HttpMethod};

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: HttpMethod,
    pub path: String,
    pub body: Option<Value>,
}

#[derive(Debug, Default)]
pub struct FakeBackend {
    responses: Mutex<HashMap<(HttpMethod, String), HospitalResult<Value>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(self, method: HttpMethod, path: &str, value: Value) -> Self {
        self.set(method, path, Ok(value));
        self
    }

    pub fn with_error(self, method: HttpMethod, path: &str, error: HospitalError) -> Self {
        self.set(method, path, Err(error));
        self
    }

    pub fn set(&self, method: HttpMethod, path: &str, result: HospitalResult<Value>) {
        self.responses.lock().unwrap().insert((method, path.to_string()), result);
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, method: HttpMethod, path: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| c.method == method && c.path == path).count()
    }
}

#[async_trait]
impl HospitalBackend for FakeBackend {
    async fn request(&self, method: HttpMethod, path: &str, body: Option<Value>) -> HospitalResult<Value> {
        self.calls.lock().unwrap().push(RecordedCall { method, path: path.to_string(), body });
        match self.responses.lock().unwrap().get(&(method, path.to_string())) {
            Some(result) => result.clone(),
            None if method == HttpMethod::Get => Ok(Value::Array(Vec::new())),
            None => Ok(Value::Null),
        }
    }
}

// lib/src/views/state.rs
use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{debug, error, info, warn};
use models::errors::HospitalResult;

/// Why a list came back empty.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadIssue {
    pub what: String,
    pub message: String,
}

impl fmt::Display for LoadIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Could not load {}: {}", self.what, self.message)
    }
}

/// A fetched list. On failure `items` is empty and `issue` says why.
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded<T> {
    pub items: Vec<T>,
    pub issue: Option<LoadIssue>,
}

impl<T> Loaded<T> {
    pub fn ok(items: Vec<T>) -> Self {
        Loaded { items, issue: None }
    }

    pub fn failed(what: &str, message: String) -> Self {
        Loaded { items: Vec::new(), issue: Some(LoadIssue { what: what.to_string(), message }) }
    }

    pub fn map<U>(self, f: impl FnOnce(Vec<T>) -> Vec<U>) -> Loaded<U> {
        Loaded { items: f(self.items), issue: self.issue }
    }
}

impl<T> Default for Loaded<T> {
    fn default() -> Self {
        Loaded::ok(Vec::new())
    }
}

/// Awaits a list read. Failures are logged and turned into an empty list.
pub async fn load_list<T, F>(what: &str, fetch: F) -> Loaded<T>
where
    F: Future<Output = HospitalResult<Vec<T>>>,
{
    match fetch.await {
        Ok(items) => {
            debug!("Loaded {} {}", items.len(), what);
            Loaded::ok(items)
        }
        Err(e) => {
            error!("Failed to load {}: {}", what, e);
            Loaded::failed(what, e.to_string())
        }
    }
}

/// Outcome of a form submission or action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Failure(String),
}

impl Notice {
    /// Success with `success`, or failure carrying the backend's message
    /// (falling back to `fallback`).
    pub fn from_result<T>(result: &HospitalResult<T>, success: &str, fallback: &str) -> Notice {
        match result {
            Ok(_) => {
                info!("{}", success);
                Notice::Success(success.to_string())
            }
            Err(e) => {
                warn!("{}: {}", fallback, e);
                Notice::Failure(e.user_message(fallback))
            }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Notice::Success(_))
    }

    pub fn message(&self) -> &str {
        match self {
            Notice::Success(m) | Notice::Failure(m) => m,
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Liveness of a view. Clones share the flag.
#[derive(Debug, Clone)]
pub struct MountGuard {
    mounted: Arc<AtomicBool>,
}

impl MountGuard {
    pub fn new() -> Self {
        MountGuard { mounted: Arc::new(AtomicBool::new(true)) }
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::SeqCst)
    }

    pub fn unmount(&self) {
        self.mounted.store(false, Ordering::SeqCst);
    }

    /// Awaits `fut` and returns its output only if the view is still mounted.
    pub async fn run<F: Future>(&self, fut: F) -> Option<F::Output> {
        let output = fut.await;
        if self.is_mounted() {
            Some(output)
        } else {
            debug!("View unmounted, discarding late response");
            None
        }
    }
}

impl Default for MountGuard {
    fn default() -> Self {
        Self::new()
    }
}

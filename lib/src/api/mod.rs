// lib/src/api/mod.rs
pub mod backend;
pub mod client;
pub mod endpoints;
pub mod guarded;
#[cfg(test)]
pub mod testing;

pub use backend::{HospitalBackend, HttpMethod};
pub use client::{error_message, ApiClient};
pub use endpoints::HospitalApi;
pub use guarded::SessionGuardedBackend;

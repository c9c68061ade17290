// lib/src/refresh.rs
//! Read-through cache in front of the backend.
//!
//! Reads of known list resources are served from the cache until a mutation
//! invalidates them. Mutations never invalidate implicitly: every successful
//! write names the resources it affects via [`RefreshCoordinator::invalidate`].

use std::sync::Arc;

use async_trait::async_trait;
use caching::Cache;
use log::{debug, warn};
use models::errors::HospitalResult;
use serde_json::Value;

use crate::api::endpoints;
use crate::api::{HospitalBackend, HttpMethod};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    PatientAccounts,
    DoctorAccounts,
    Doctors,
    Appointments,
    ErCases,
    Beds,
    Admissions,
    Maintenance,
    Inventory,
    Feedback,
    AllInvoices,
    MyInvoices,
    MyPrescriptions,
}

impl Resource {
    pub const ALL: [Resource; 13] = [
        Resource::PatientAccounts,
        Resource::DoctorAccounts,
        Resource::Doctors,
        Resource::Appointments,
        Resource::ErCases,
        Resource::Beds,
        Resource::Admissions,
        Resource::Maintenance,
        Resource::Inventory,
        Resource::Feedback,
        Resource::AllInvoices,
        Resource::MyInvoices,
        Resource::MyPrescriptions,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Resource::PatientAccounts => endpoints::PATIENT_ACCOUNTS,
            Resource::DoctorAccounts => endpoints::DOCTOR_ACCOUNTS,
            Resource::Doctors => endpoints::DOCTORS,
            Resource::Appointments => endpoints::APPOINTMENTS,
            Resource::ErCases => endpoints::ER_ACTIVE,
            Resource::Beds => endpoints::BEDS,
            Resource::Admissions => endpoints::ACTIVE_ADMISSIONS,
            Resource::Maintenance => endpoints::MAINTENANCE,
            Resource::Inventory => endpoints::INVENTORY,
            Resource::Feedback => endpoints::FEEDBACK,
            Resource::AllInvoices => endpoints::ALL_INVOICES,
            Resource::MyInvoices => endpoints::MY_INVOICES,
            Resource::MyPrescriptions => endpoints::MY_PRESCRIPTIONS,
        }
    }

    pub fn from_path(path: &str) -> Option<Resource> {
        Resource::ALL.iter().copied().find(|r| r.path() == path)
    }
}

pub struct RefreshCoordinator {
    backend: Arc<dyn HospitalBackend>,
    cache: Cache,
}

impl RefreshCoordinator {
    pub fn new(backend: Arc<dyn HospitalBackend>, capacity: u64) -> Self {
        Self::with_cache(backend, Cache::new(capacity))
    }

    /// Caches into `cache`, which other layers may hold a handle to.
    pub fn with_cache(backend: Arc<dyn HospitalBackend>, cache: Cache) -> Self {
        RefreshCoordinator { backend, cache }
    }

    /// Marks `resources` stale; the next read goes to the backend.
    pub async fn invalidate(&self, resources: &[Resource]) {
        for resource in resources {
            debug!("Invalidating {}", resource.path());
            self.cache.invalidate(resource.path()).await;
        }
    }

    /// Drops everything, used when the session changes hands.
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }

    pub fn is_cached(&self, resource: Resource) -> bool {
        self.cache.contains(resource.path())
    }
}

#[async_trait]
impl HospitalBackend for RefreshCoordinator {
    async fn request(&self, method: HttpMethod, path: &str, body: Option<Value>) -> HospitalResult<Value> {
        let cacheable = method == HttpMethod::Get && Resource::from_path(path).is_some();
        if cacheable {
            if let Some(hit) = self.cache.get(path).await {
                debug!("Serving {} from cache", path);
                return Ok(hit);
            }
        }
        let value = self.backend.request(method, path, body).await?;
        if cacheable {
            if let Err(e) = self.cache.insert(path.to_string(), value.clone()).await {
                warn!("Could not cache {}: {}", path, e);
            }
        }
        Ok(value)
    }
}

// models/src/medical/prescription.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::appointment::DoctorRef;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Medicine {
    pub name: String,
    #[serde(default)]
    pub dosage: String,
    #[serde(default)]
    pub frequency: String,
    #[serde(default)]
    pub duration: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prescription {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub doctor: Option<DoctorRef>,
    #[serde(default)]
    pub patient: Option<serde_json::Value>,
    #[serde(default)]
    pub medicines: Vec<Medicine>,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Prescription {
    pub fn doctor_name(&self) -> &str {
        self.doctor.as_ref().and_then(DoctorRef::name).unwrap_or("Doctor")
    }
}

/// Body of `POST /records/prescriptions`.
#[derive(Debug, Clone, Serialize)]
pub struct NewPrescription {
    pub patient: String,
    pub doctor: String,
    pub medicines: Vec<Medicine>,
    pub notes: String,
}

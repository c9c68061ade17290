// models/src/medical/ward.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BedStatus {
    #[default]
    Available,
    Occupied,
    Cleaning,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bed {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub bed_number: String,
    #[serde(default)]
    pub ward_name: Option<String>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub status: BedStatus,
}

impl Bed {
    pub fn ward(&self) -> &str {
        self.ward_name.as_deref().unwrap_or("General")
    }
}

/// Active admission from `GET /inpatient/admissions/active`. `bed` is the bed id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Admission {
    #[serde(rename = "_id")]
    pub id: String,
    pub bed: String,
    #[serde(default)]
    pub patient: Option<serde_json::Value>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub admission_date: Option<DateTime<Utc>>,
}

impl Admission {
    /// Patient display name when the backend populated it.
    pub fn patient_name(&self) -> &str {
        self.patient
            .as_ref()
            .and_then(|p| p.get("name"))
            .and_then(|n| n.as_str())
            .unwrap_or("Unknown patient")
    }
}

/// Body of `POST /inpatient/admit`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdmitRequest {
    pub bed_id: String,
    pub patient_id: String,
    pub doctor_id: String,
    pub reason: String,
}

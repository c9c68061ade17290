// models/src/medical/appointment.rs
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
    /// Missing or unrecognized status; never counts as pending.
    #[default]
    #[serde(other)]
    Unknown,
}

impl AppointmentStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, AppointmentStatus::Pending)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "Pending",
            AppointmentStatus::Confirmed => "Confirmed",
            AppointmentStatus::Completed => "Completed",
            AppointmentStatus::Cancelled => "Cancelled",
            AppointmentStatus::Unknown => "Unknown",
        }
    }
}

impl std::str::FromStr for AppointmentStatus {
    type Err = crate::errors::HospitalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(AppointmentStatus::Pending),
            "confirmed" => Ok(AppointmentStatus::Confirmed),
            "completed" => Ok(AppointmentStatus::Completed),
            "cancelled" | "canceled" => Ok(AppointmentStatus::Cancelled),
            other => Err(crate::errors::HospitalError::InvalidData(format!(
                "unknown appointment status '{}'",
                other
            ))),
        }
    }
}

/// The backend either populates the doctor or leaves its id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DoctorRef {
    Populated(DoctorBrief),
    Id(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoctorBrief {
    #[serde(rename = "_id", default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub specialization: Option<String>,
}

impl DoctorRef {
    pub fn name(&self) -> Option<&str> {
        match self {
            DoctorRef::Populated(doc) => Some(doc.name.as_str()),
            DoctorRef::Id(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub patient_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doctor: Option<DoctorRef>,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub slot: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub status: AppointmentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_phone: Option<String>,
}

impl Appointment {
    pub fn doctor_name(&self) -> &str {
        self.doctor.as_ref().and_then(DoctorRef::name).unwrap_or("-")
    }

    pub fn day(&self) -> NaiveDate {
        self.date.date_naive()
    }
}

/// Body of `POST /appointments`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAppointment {
    pub doctor_id: String,
    pub date: NaiveDate,
    pub slot: String,
    pub patient_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_phone: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AppointmentStatusUpdate {
    pub status: AppointmentStatus,
}

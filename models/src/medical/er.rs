// models/src/medical/er.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Severity assigned at ER intake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TriageLevel {
    Red,
    Yellow,
    Green,
    /// Missing or unrecognized level.
    #[default]
    #[serde(other)]
    Unknown,
}

impl TriageLevel {
    /// Red=3, Yellow=2, Green=1; anything else sorts last.
    pub fn weight(&self) -> u8 {
        match self {
            TriageLevel::Red => 3,
            TriageLevel::Yellow => 2,
            TriageLevel::Green => 1,
            TriageLevel::Unknown => 0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TriageLevel::Red => "Red",
            TriageLevel::Yellow => "Yellow",
            TriageLevel::Green => "Green",
            TriageLevel::Unknown => "?",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ErStatus {
    Waiting,
    #[serde(rename = "In Treatment")]
    InTreatment,
    Discharged,
    Admitted,
    /// Missing or unrecognized status.
    #[default]
    #[serde(other)]
    Unknown,
}

impl ErStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErStatus::Waiting => "Waiting",
            ErStatus::InTreatment => "In Treatment",
            ErStatus::Discharged => "Discharged",
            ErStatus::Admitted => "Admitted",
            ErStatus::Unknown => "Unknown",
        }
    }

    /// Statuses a clinician may move a case to from this one.
    pub fn next_steps(&self) -> &'static [ErStatus] {
        match self {
            ErStatus::Waiting => &[ErStatus::InTreatment],
            ErStatus::InTreatment => &[ErStatus::Discharged, ErStatus::Admitted],
            _ => &[],
        }
    }
}

impl std::str::FromStr for ErStatus {
    type Err = crate::errors::HospitalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "waiting" => Ok(ErStatus::Waiting),
            "in treatment" | "in-treatment" | "treatment" => Ok(ErStatus::InTreatment),
            "discharged" => Ok(ErStatus::Discharged),
            "admitted" => Ok(ErStatus::Admitted),
            other => Err(crate::errors::HospitalError::InvalidData(format!("unknown ER status '{}'", other))),
        }
    }
}

/// An active emergency-room case from `GET /er/active`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErCase {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub patient_name: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub triage_level: TriageLevel,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub status: ErStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symptoms: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErStatusUpdate {
    pub status: ErStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unrecognized_or_missing_level_is_unknown() {
        let case: ErCase = serde_json::from_value(json!({
            "_id": "a", "patientName": "X", "triageLevel": "Blue",
            "status": "Waiting", "createdAt": "2024-03-01T10:00:00.000Z"
        }))
        .unwrap();
        assert_eq!(case.triage_level, TriageLevel::Unknown);
        assert_eq!(case.triage_level.weight(), 0);

        let case: ErCase = serde_json::from_value(json!({
            "_id": "b", "patientName": "Y", "createdAt": "2024-03-01T10:00:00Z"
        }))
        .unwrap();
        assert_eq!(case.triage_level, TriageLevel::Unknown);
        assert_eq!(case.status, ErStatus::Unknown);
    }

    #[test]
    fn null_level_and_status_decode_as_unknown() {
        let case: ErCase = serde_json::from_value(json!({
            "_id": "c", "patientName": "Z", "triageLevel": null, "status": null,
            "createdAt": "2024-03-01T10:00:00Z"
        }))
        .unwrap();
        assert_eq!(case.triage_level, TriageLevel::Unknown);
        assert_eq!(case.status, ErStatus::Unknown);
        assert!(case.status.next_steps().is_empty());
    }

    #[test]
    fn in_treatment_uses_spaced_wire_name() {
        let update = serde_json::to_value(ErStatusUpdate { status: ErStatus::InTreatment }).unwrap();
        assert_eq!(update, json!({ "status": "In Treatment" }));
        assert_eq!("in treatment".parse::<ErStatus>().unwrap(), ErStatus::InTreatment);
    }

    #[test]
    fn only_open_cases_have_next_steps() {
        assert_eq!(ErStatus::Waiting.next_steps(), &[ErStatus::InTreatment]);
        assert!(ErStatus::Discharged.next_steps().is_empty());
    }
}

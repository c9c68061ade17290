// models/src/medical/feedback.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum FeedbackStatus {
    #[default]
    New,
    Investigating,
    Resolved,
    #[serde(other)]
    Unknown,
}

impl std::str::FromStr for FeedbackStatus {
    type Err = crate::errors::HospitalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "new" => Ok(FeedbackStatus::New),
            "investigating" => Ok(FeedbackStatus::Investigating),
            "resolved" => Ok(FeedbackStatus::Resolved),
            other => Err(crate::errors::HospitalError::InvalidData(format!(
                "unknown feedback status '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: String, // Complaint, Suggestion, Compliment
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub rating: u8,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub status: FeedbackStatus,
    #[serde(default)]
    pub admin_response: Option<String>,
    #[serde(default)]
    pub patient: Option<serde_json::Value>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Feedback {
    /// True when the entry was submitted by `user_id`. The backend sends the
    /// author either populated (`{ _id, name }`) or as a bare id.
    pub fn is_from(&self, user_id: &str) -> bool {
        match &self.patient {
            Some(serde_json::Value::String(id)) => id == user_id,
            Some(obj) => obj.get("_id").and_then(|v| v.as_str()) == Some(user_id),
            None => false,
        }
    }
}

/// Body of `POST /feedback`.
#[derive(Debug, Clone, Serialize)]
pub struct NewFeedback {
    #[serde(rename = "type")]
    pub kind: String,
    pub department: String,
    pub message: String,
    pub rating: u8,
}

/// Body of `PUT /feedback/:id/resolve`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackResolution {
    pub admin_response: String,
    pub status: FeedbackStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn author_matches_populated_or_bare_id() {
        let populated: Feedback = serde_json::from_value(json!({
            "_id": "f1", "type": "Complaint", "message": "Cold food", "rating": 2,
            "status": "New", "patient": { "_id": "p1", "name": "Ada" }
        }))
        .unwrap();
        let bare: Feedback = serde_json::from_value(json!({ "_id": "f2", "patient": "p2" })).unwrap();

        assert!(populated.is_from("p1"));
        assert!(!populated.is_from("p2"));
        assert!(bare.is_from("p2"));
        assert_eq!(bare.status, FeedbackStatus::New);
    }

    #[test]
    fn unknown_status_does_not_fail_the_record() {
        let fb: Feedback = serde_json::from_value(json!({ "_id": "f3", "status": "Escalated" })).unwrap();
        assert_eq!(fb.status, FeedbackStatus::Unknown);
    }
}

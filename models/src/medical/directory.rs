// models/src/medical/directory.rs
//! People the console lists: registered patients and the doctor directory.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::Role;

/// A user account as listed by `GET /auth/patients` and `GET /auth/doctors`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSummary {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Body of `POST /auth/register`.
#[derive(Debug, Clone, Serialize)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub specialization: String,
    #[serde(default)]
    pub available_slots: Vec<String>,
    #[serde(default)]
    pub fees: Option<f64>,
}

/// Body of `POST /doctors` and `PUT /doctors/:id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorForm {
    pub name: String,
    pub specialization: String,
    pub available_slots: Vec<String>,
}

impl DoctorForm {
    /// Builds the form from a comma separated slot list, dropping blanks.
    pub fn with_slot_list(name: &str, specialization: &str, slots: &str) -> Self {
        DoctorForm {
            name: name.trim().to_string(),
            specialization: specialization.trim().to_string(),
            available_slots: slots
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_list_is_split_and_trimmed() {
        let form = DoctorForm::with_slot_list(" Dr. Yang ", "Cardiology", "09:00 AM, ,10:00 AM ,");
        assert_eq!(form.name, "Dr. Yang");
        assert_eq!(form.available_slots, vec!["09:00 AM", "10:00 AM"]);
    }
}

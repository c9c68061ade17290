// models/src/medical/maintenance.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TicketPriority {
    High,
    Medium,
    Low,
    #[default]
    #[serde(other)]
    Unknown,
}

impl TicketPriority {
    pub fn weight(&self) -> u8 {
        match self {
            TicketPriority::High => 3,
            TicketPriority::Medium => 2,
            TicketPriority::Low => 1,
            TicketPriority::Unknown => 0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TicketPriority::High => "High",
            TicketPriority::Medium => "Medium",
            TicketPriority::Low => "Low",
            TicketPriority::Unknown => "?",
        }
    }
}

impl std::str::FromStr for TicketPriority {
    type Err = crate::errors::HospitalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(TicketPriority::High),
            "medium" => Ok(TicketPriority::Medium),
            "low" => Ok(TicketPriority::Low),
            other => Err(crate::errors::HospitalError::InvalidData(format!("unknown priority '{}'", other))),
        }
    }
}

/// A facilities ticket from `GET /maintenance`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceTicket {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub priority: TicketPriority,
    #[serde(default)]
    pub issue_type: String, // Repair, Cleaning, Safety
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub item: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bed: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

impl MaintenanceTicket {
    pub fn is_resolved(&self) -> bool {
        self.status == "Resolved"
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTicket {
    pub department: String,
    pub item: String,
    pub issue_type: String,
    pub priority: TicketPriority,
    pub description: String,
    /// Empty when the ticket is not tied to a bed.
    pub bed_id: String,
}

impl Default for NewTicket {
    fn default() -> Self {
        NewTicket {
            department: "General".to_string(),
            item: String::new(),
            issue_type: "Repair".to_string(),
            priority: TicketPriority::Medium,
            description: String::new(),
            bed_id: String::new(),
        }
    }
}

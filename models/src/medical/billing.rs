// models/src/medical/billing.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum InvoiceStatus {
    Paid,
    #[default]
    Unpaid,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceLine {
    pub description: String,
    pub cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub patient: Option<serde_json::Value>,
    #[serde(default)]
    pub items: Vec<InvoiceLine>,
    #[serde(default)]
    pub total_amount: f64,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub status: InvoiceStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Invoice {
    pub fn is_paid(&self) -> bool {
        self.status == InvoiceStatus::Paid
    }

    /// Last six characters of the id, as printed on receipts.
    pub fn short_id(&self) -> &str {
        let start = self.id.len().saturating_sub(6);
        self.id.get(start..).unwrap_or(&self.id)
    }

    pub fn patient_name(&self) -> &str {
        self.patient
            .as_ref()
            .and_then(|p| p.get("name"))
            .and_then(|n| n.as_str())
            .unwrap_or("-")
    }
}

/// Body of `POST /records/invoices`. `patient` is the patient id.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInvoice {
    pub patient: String,
    pub items: Vec<InvoiceLine>,
    pub total_amount: f64,
    pub status: InvoiceStatus,
}

impl NewInvoice {
    pub fn new(patient: impl Into<String>, items: Vec<InvoiceLine>) -> Self {
        let total_amount = items.iter().map(|i| i.cost).sum();
        NewInvoice { patient: patient.into(), items, total_amount, status: InvoiceStatus::Unpaid }
    }
}

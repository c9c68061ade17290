// models/src/medical/inventory.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub quantity: i64,
    #[serde(default)]
    pub unit_price: f64,
    #[serde(default)]
    pub expiry_date: Option<DateTime<Utc>>,
}

impl InventoryItem {
    pub fn is_out_of_stock(&self) -> bool {
        self.quantity <= 0
    }

    pub fn is_low(&self, threshold: i64) -> bool {
        self.quantity < threshold
    }

    /// Case-insensitive match on name or SKU.
    pub fn matches(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.name.to_lowercase().contains(&needle) || self.sku.to_lowercase().contains(&needle)
    }
}

/// Body of `POST /inventory`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInventoryItem {
    pub name: String,
    pub sku: String,
    pub category: String,
    pub quantity: i64,
    pub unit_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdjustmentKind {
    Add,
    Remove,
}

/// Body of `POST /inventory/:id/adjust`.
#[derive(Debug, Clone, Serialize)]
pub struct StockAdjustment {
    pub adjustment: i64,
    #[serde(rename = "type")]
    pub kind: AdjustmentKind,
}

// lib/src/views/inventory.rs
use std::collections::BTreeSet;

use models::medical::{AdjustmentKind, InventoryItem, NewInventoryItem, StockAdjustment};

use super::state::{load_list, Loaded, Notice};
use crate::api::HospitalApi;
use crate::ordering::order_inventory_by_quantity;
use crate::refresh::{RefreshCoordinator, Resource};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StockSummary {
    pub total_items: usize,
    pub low_stock: usize,
    pub total_value: f64,
}

pub fn stock_summary(items: &[InventoryItem], low_stock_threshold: i64) -> StockSummary {
    StockSummary {
        total_items: items.len(),
        low_stock: items.iter().filter(|i| i.is_low(low_stock_threshold)).count(),
        total_value: items.iter().map(|i| i.quantity as f64 * i.unit_price).sum(),
    }
}

/// Doctor view: lowest stock first.
pub async fn load_stock_check<B: HospitalApi + ?Sized>(api: &B) -> Loaded<InventoryItem> {
    load_list("inventory", api.inventory()).await.map(order_inventory_by_quantity)
}

/// Admin view: backend order.
pub async fn load_inventory<B: HospitalApi + ?Sized>(api: &B) -> Loaded<InventoryItem> {
    load_list("inventory", api.inventory()).await
}

/// Items matching `search` (name or SKU) in `category`, or every category when `None`.
pub fn filter_inventory<'a>(items: &'a [InventoryItem], search: &str, category: Option<&str>) -> Vec<&'a InventoryItem> {
    items
        .iter()
        .filter(|i| i.matches(search.trim()) && category.map_or(true, |c| i.category == c))
        .collect()
}

pub fn categories(items: &[InventoryItem]) -> Vec<String> {
    items.iter().map(|i| i.category.clone()).collect::<BTreeSet<_>>().into_iter().collect()
}

pub async fn add_item(coordinator: &RefreshCoordinator, item: NewInventoryItem) -> Notice {
    if item.name.trim().is_empty() || item.sku.trim().is_empty() {
        return Notice::Failure("Name and SKU are required".into());
    }
    let result = coordinator.add_inventory_item(&item).await;
    if result.is_ok() {
        coordinator.invalidate(&[Resource::Inventory]).await;
    }
    Notice::from_result(&result, "Item Added Successfully", "Failed to add item")
}

pub async fn adjust_stock(coordinator: &RefreshCoordinator, id: &str, amount: i64, kind: AdjustmentKind) -> Notice {
    if amount <= 0 {
        return Notice::Failure("Enter a valid amount".into());
    }
    let result = coordinator.adjust_stock(id, &StockAdjustment { adjustment: amount, kind }).await;
    if result.is_ok() {
        coordinator.invalidate(&[Resource::Inventory]).await;
    }
    Notice::from_result(&result, "Stock updated!", "Update failed")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::endpoints::INVENTORY;
    use crate::api::testing::FakeBackend;
    use crate::api::HttpMethod;
    use models::errors::HospitalError;
    use serde_json::json;
    use std::sync::Arc;

    fn stock() -> FakeBackend {
        FakeBackend::new().with_response(
            HttpMethod::Get,
            INVENTORY,
            json!([
                { "_id": "i1", "name": "Amoxicillin", "sku": "AMX-500", "category": "Medicine", "quantity": 40, "unitPrice": 2.5 },
                { "_id": "i2", "name": "Gauze", "sku": "GZ-1", "category": "Supplies", "quantity": 3, "unitPrice": 1.0 },
                { "_id": "i3", "name": "Ibuprofen", "sku": "IBU-200", "category": "Medicine", "quantity": 12, "unitPrice": 0.5 }
            ]),
        )
    }

    #[tokio::test]
    async fn stock_check_lists_low_stock_first() {
        let loaded = load_stock_check(&stock()).await;
        let ids: Vec<_> = loaded.items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["i2", "i3", "i1"]);
    }

    #[tokio::test]
    async fn summary_and_filters() {
        let items = load_inventory(&stock()).await.items;
        let summary = stock_summary(&items, 20);
        assert_eq!(summary.total_items, 3);
        assert_eq!(summary.low_stock, 2);
        assert!((summary.total_value - 109.0).abs() < 1e-9);

        assert_eq!(categories(&items), vec!["Medicine", "Supplies"]);
        assert_eq!(filter_inventory(&items, "ibu", None).len(), 1);
        assert_eq!(filter_inventory(&items, "", Some("Medicine")).len(), 2);
        assert_eq!(filter_inventory(&items, "gz", Some("Medicine")).len(), 0);
    }

    #[tokio::test]
    async fn adjustment_needs_a_positive_amount() {
        let fake = Arc::new(stock());
        let coordinator = RefreshCoordinator::new(fake.clone(), 8);
        assert_eq!(
            adjust_stock(&coordinator, "i2", 0, AdjustmentKind::Add).await,
            Notice::Failure("Enter a valid amount".into())
        );

        assert!(adjust_stock(&coordinator, "i2", 10, AdjustmentKind::Remove).await.is_success());
        let call = fake.calls().pop().unwrap();
        assert_eq!(call.path, "/inventory/i2/adjust");
        assert_eq!(call.body, Some(json!({ "adjustment": 10, "type": "remove" })));
    }

    #[tokio::test]
    async fn failed_adjustment_reports_backend_message() {
        let fake = Arc::new(stock().with_error(
            HttpMethod::Post,
            "/inventory/i2/adjust",
            HospitalError::Backend { status: 400, message: "Insufficient stock".into() },
        ));
        let coordinator = RefreshCoordinator::new(fake, 8);
        assert_eq!(
            adjust_stock(&coordinator, "i2", 99, AdjustmentKind::Remove).await,
            Notice::Failure("Insufficient stock".into())
        );
    }
}

use crate::item::{InventoryItem, ItemStatus};
use serde::Serialize;
use thrift_shared::money::round2;

impl ItemStatus {
    /// Allowed lifecycle moves: inventory to listed to sold to returned,
    /// with relisting from returned and delisting back to inventory.
    pub fn can_transition_to(&self, to: ItemStatus) -> bool {
        matches!(
            (self, to),
            (ItemStatus::Inventory, ItemStatus::Listed)
                | (ItemStatus::Listed, ItemStatus::Sold)
                | (ItemStatus::Listed, ItemStatus::Inventory)
                | (ItemStatus::Sold, ItemStatus::Returned)
                | (ItemStatus::Returned, ItemStatus::Listed)
        )
    }
}

/// Roll-up figures for a set of inventory items, shown under item listings.
#[derive(Debug, Clone, Serialize)]
pub struct InventorySummary {
    pub total_items: usize,
    pub total_cost: f64,
    pub total_suggested_value: f64,
    pub potential_profit: f64,
}

impl InventorySummary {
    pub fn from_items(items: &[InventoryItem]) -> Self {
        let total_cost: f64 = items.iter().map(|item| item.cost).sum();
        let total_suggested_value: f64 = items
            .iter()
            .map(|item| item.suggested_price.unwrap_or(0.0))
            .sum();
        Self {
            total_items: items.len(),
            total_cost: round2(total_cost),
            total_suggested_value: round2(total_suggested_value),
            potential_profit: round2(total_suggested_value - total_cost),
        }
    }
}

use crate::item::{InventoryItem, ItemStatus};
use async_trait::async_trait;
use uuid::Uuid;

/// Filters for inventory listings.
#[derive(Debug, Clone, Default)]
pub struct ItemFilter {
    pub status: Option<ItemStatus>,
    pub category: Option<String>,
}

/// Repository trait for inventory item access
#[async_trait]
pub trait ItemRepository: Send + Sync {
    async fn insert_item(
        &self,
        item: &InventoryItem,
    ) -> Result<Uuid, Box<dyn std::error::Error + Send + Sync>>;

    async fn get_item_by_sku(
        &self,
        sku: &str,
    ) -> Result<Option<InventoryItem>, Box<dyn std::error::Error + Send + Sync>>;

    async fn list_items(
        &self,
        filter: &ItemFilter,
    ) -> Result<Vec<InventoryItem>, Box<dyn std::error::Error + Send + Sync>>;

    /// Persist the current state of a previously-inserted item.
    async fn update_item(
        &self,
        item: &InventoryItem,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

pub mod inventory;
pub mod item;
pub mod repository;

pub use inventory::InventorySummary;
pub use item::{Condition, InventoryItem, ItemError, ItemStatus, SaleRecord};
pub use repository::{ItemFilter, ItemRepository};

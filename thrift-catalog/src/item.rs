use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Physical condition grades used across listings and pricing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Condition {
    New,
    NewWithTags,
    NewWithoutTags,
    Excellent,
    VeryGood,
    Good,
    Fair,
    Poor,
}

impl Condition {
    /// The label shown to buyers ("Very Good", "New with Tags", ...).
    pub fn label(&self) -> &'static str {
        match self {
            Condition::New => "New",
            Condition::NewWithTags => "New with Tags",
            Condition::NewWithoutTags => "New without Tags",
            Condition::Excellent => "Excellent",
            Condition::VeryGood => "Very Good",
            Condition::Good => "Good",
            Condition::Fair => "Fair",
            Condition::Poor => "Poor",
        }
    }

    /// eBay numeric condition ID used in bulk-upload exports.
    pub fn ebay_condition_id(&self) -> &'static str {
        match self {
            Condition::New | Condition::NewWithTags => "1000",
            Condition::NewWithoutTags => "1500",
            Condition::Excellent => "2000",
            Condition::VeryGood => "2500",
            Condition::Good => "3000",
            Condition::Fair => "4000",
            Condition::Poor => "5000",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Condition {
    type Err = LabelParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "new" => Ok(Condition::New),
            "new with tags" | "nwt" => Ok(Condition::NewWithTags),
            "new without tags" | "nwot" => Ok(Condition::NewWithoutTags),
            "excellent" => Ok(Condition::Excellent),
            "very good" => Ok(Condition::VeryGood),
            "good" => Ok(Condition::Good),
            "fair" => Ok(Condition::Fair),
            "poor" => Ok(Condition::Poor),
            other => Err(LabelParseError(other.to_string())),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unrecognized label: {0}")]
pub struct LabelParseError(String);

/// Where an item sits in its resale lifecycle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemStatus {
    Inventory,
    Listed,
    Sold,
    Returned,
}

impl ItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Inventory => "inventory",
            ItemStatus::Listed => "listed",
            ItemStatus::Sold => "sold",
            ItemStatus::Returned => "returned",
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemStatus {
    type Err = LabelParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "inventory" => Ok(ItemStatus::Inventory),
            "listed" => Ok(ItemStatus::Listed),
            "sold" => Ok(ItemStatus::Sold),
            "returned" => Ok(ItemStatus::Returned),
            other => Err(LabelParseError(other.to_string())),
        }
    }
}

/// Fees and profit captured when a sale is recorded. Computed by the fee
/// model at sale time and stored on the item for reporting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SaleRecord {
    pub sold_price: f64,
    pub listing_fee: f64,
    pub final_value_fee: f64,
    pub processing_fee: f64,
    pub total_fees: f64,
    pub gross_profit: f64,
    pub net_profit: f64,
    pub roi_percentage: f64,
}

/// One sourced item being tracked from acquisition through sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: Uuid,
    pub sku: String,

    pub category: String,
    pub brand: String,
    pub name: String,
    pub size: Option<String>,
    pub color: Option<String>,
    pub condition: Condition,

    /// Acquisition cost in dollars.
    pub cost: f64,

    pub suggested_price: Option<f64>,
    pub listed_price: Option<f64>,
    pub sold_price: Option<f64>,

    pub listing_fee: Option<f64>,
    pub final_value_fee: Option<f64>,
    pub processing_fee: Option<f64>,
    pub total_fees: Option<f64>,

    pub gross_profit: Option<f64>,
    pub net_profit: Option<f64>,
    pub roi_percentage: Option<f64>,

    pub status: ItemStatus,

    pub photo_paths: Vec<String>,
    pub processed_photos: Vec<String>,

    pub ebay_listing_id: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub listed_at: Option<DateTime<Utc>>,
    pub sold_at: Option<DateTime<Utc>>,
}

impl InventoryItem {
    pub fn new(
        sku: String,
        category: String,
        brand: String,
        name: String,
        cost: f64,
        condition: Condition,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            sku,
            category,
            brand,
            name,
            size: None,
            color: None,
            condition,
            cost,
            suggested_price: None,
            listed_price: None,
            sold_price: None,
            listing_fee: None,
            final_value_fee: None,
            processing_fee: None,
            total_fees: None,
            gross_profit: None,
            net_profit: None,
            roi_percentage: None,
            status: ItemStatus::Inventory,
            photo_paths: Vec::new(),
            processed_photos: Vec::new(),
            ebay_listing_id: None,
            created_at: now,
            updated_at: now,
            listed_at: None,
            sold_at: None,
        }
    }

    /// "{brand} {name}", the base display title and default search term.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.brand, self.name)
    }

    /// Record that the item went live at the given price.
    pub fn mark_listed(&mut self, price: f64) -> Result<(), ItemError> {
        self.transition(ItemStatus::Listed)?;
        self.listed_price = Some(price);
        self.listed_at = Some(Utc::now());
        Ok(())
    }

    /// Record a completed sale with its fee/profit breakdown.
    pub fn record_sale(&mut self, sale: SaleRecord) -> Result<(), ItemError> {
        self.transition(ItemStatus::Sold)?;
        self.sold_price = Some(sale.sold_price);
        self.listing_fee = Some(sale.listing_fee);
        self.final_value_fee = Some(sale.final_value_fee);
        self.processing_fee = Some(sale.processing_fee);
        self.total_fees = Some(sale.total_fees);
        self.gross_profit = Some(sale.gross_profit);
        self.net_profit = Some(sale.net_profit);
        self.roi_percentage = Some(sale.roi_percentage);
        self.sold_at = Some(Utc::now());
        Ok(())
    }

    /// Mark a sold item as returned by the buyer.
    pub fn mark_returned(&mut self) -> Result<(), ItemError> {
        self.transition(ItemStatus::Returned)
    }

    fn transition(&mut self, to: ItemStatus) -> Result<(), ItemError> {
        if !self.status.can_transition_to(to) {
            return Err(ItemError::InvalidTransition {
                from: self.status.to_string(),
                to: to.to_string(),
            });
        }
        self.status = to;
        self.touch();
        Ok(())
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ItemError {
    #[error("Item not found: {0}")]
    NotFound(String),

    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_item() -> InventoryItem {
        InventoryItem::new(
            "25-0001".to_string(),
            "Clothing".to_string(),
            "Patagonia".to_string(),
            "Better Sweater".to_string(),
            8.50,
            Condition::Good,
        )
    }

    #[test]
    fn test_condition_round_trip() {
        for label in [
            "New",
            "New with Tags",
            "New without Tags",
            "Excellent",
            "Very Good",
            "Good",
            "Fair",
            "Poor",
        ] {
            let condition: Condition = label.parse().unwrap();
            assert_eq!(condition.label(), label);
        }
        assert!("Mint".parse::<Condition>().is_err());
    }

    #[test]
    fn test_ebay_condition_ids() {
        assert_eq!(Condition::NewWithTags.ebay_condition_id(), "1000");
        assert_eq!(Condition::NewWithoutTags.ebay_condition_id(), "1500");
        assert_eq!(Condition::Poor.ebay_condition_id(), "5000");
    }

    #[test]
    fn test_sale_lifecycle() {
        let mut item = sample_item();
        item.mark_listed(24.99).unwrap();
        assert_eq!(item.status, ItemStatus::Listed);
        assert!(item.listed_at.is_some());

        item.record_sale(SaleRecord {
            sold_price: 24.99,
            listing_fee: 0.0,
            final_value_fee: 2.50,
            processing_fee: 1.02,
            total_fees: 3.52,
            gross_profit: 16.49,
            net_profit: 12.97,
            roi_percentage: 152.6,
        })
        .unwrap();
        assert_eq!(item.status, ItemStatus::Sold);
        assert_eq!(item.sold_price, Some(24.99));
        assert_eq!(item.net_profit, Some(12.97));
    }

    #[test]
    fn test_cannot_sell_from_inventory() {
        let mut item = sample_item();
        let result = item.record_sale(SaleRecord {
            sold_price: 10.0,
            listing_fee: 0.0,
            final_value_fee: 1.0,
            processing_fee: 0.59,
            total_fees: 1.59,
            gross_profit: 1.5,
            net_profit: -0.09,
            roi_percentage: -1.1,
        });
        assert!(result.is_err());
        assert_eq!(item.status, ItemStatus::Inventory);
    }
}

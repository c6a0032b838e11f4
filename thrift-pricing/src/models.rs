use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// State of a comparable listing at scrape time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ListingStatus {
    Active,
    Sold,
    Ended,
}

impl ListingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingStatus::Active => "active",
            ListingStatus::Sold => "sold",
            ListingStatus::Ended => "ended",
        }
    }
}

impl fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ListingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" => Ok(ListingStatus::Active),
            "sold" => Ok(ListingStatus::Sold),
            "ended" => Ok(ListingStatus::Ended),
            other => Err(format!("unknown listing status: {}", other)),
        }
    }
}

/// One market price sample used to estimate fair value for an item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comparable {
    pub id: Uuid,

    pub search_term: String,
    pub category: String,
    pub brand: Option<String>,
    /// Free text; comparables arrive from external research and may carry
    /// condition labels outside our own grading scale.
    pub condition: Option<String>,

    pub title: String,
    pub price: f64,
    pub shipping_cost: Option<f64>,
    /// `price + shipping_cost`.
    pub total_price: f64,

    pub platform: String,
    pub listing_url: Option<String>,
    pub listing_status: ListingStatus,

    pub scraped_at: DateTime<Utc>,
}

impl Comparable {
    pub fn new(
        search_term: String,
        category: String,
        title: String,
        price: f64,
        shipping_cost: Option<f64>,
        platform: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            search_term,
            category,
            brand: None,
            condition: None,
            title,
            price,
            shipping_cost,
            total_price: price + shipping_cost.unwrap_or(0.0),
            platform,
            listing_url: None,
            listing_status: ListingStatus::Active,
            scraped_at: Utc::now(),
        }
    }
}

/// Where a market sample came from. The synthetic variant exists so pricing
/// analysis never blocks on missing research data; strategy selection
/// branches on the variant, never on a numeric sentinel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum MarketSample {
    Real(Vec<Comparable>),
    Synthetic(Vec<Comparable>),
}

impl MarketSample {
    pub fn comparables(&self) -> &[Comparable] {
        match self {
            MarketSample::Real(comps) | MarketSample::Synthetic(comps) => comps,
        }
    }

    pub fn is_synthetic(&self) -> bool {
        matches!(self, MarketSample::Synthetic(_))
    }

    pub fn source_label(&self) -> &'static str {
        match self {
            MarketSample::Real(_) => "real",
            MarketSample::Synthetic(_) => "synthetic",
        }
    }
}

/// Reduced price statistics over a comparable set.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
    pub average: f64,
    pub median: f64,
}

impl PriceRange {
    pub fn zero() -> Self {
        Self {
            min: 0.0,
            max: 0.0,
            average: 0.0,
            median: 0.0,
        }
    }
}

/// Named pricing strategies, from safest to most optimistic.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Strategy {
    Conservative,
    Competitive,
    Aggressive,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [
        Strategy::Conservative,
        Strategy::Competitive,
        Strategy::Aggressive,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Strategy::Conservative => "Conservative",
            Strategy::Competitive => "Competitive",
            Strategy::Aggressive => "Aggressive",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The three suggested price points for an item.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PricingSuggestion {
    pub conservative: f64,
    pub competitive: f64,
    pub aggressive: f64,
}

impl PricingSuggestion {
    pub fn get(&self, strategy: Strategy) -> f64 {
        match strategy {
            Strategy::Conservative => self.conservative,
            Strategy::Competitive => self.competitive,
            Strategy::Aggressive => self.aggressive,
        }
    }
}

/// Where the suggestions sit relative to the market average.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MarketPosition {
    pub below_market: f64,
    pub at_market: f64,
    pub above_market: f64,
}

impl MarketPosition {
    pub fn zero() -> Self {
        Self {
            below_market: 0.0,
            at_market: 0.0,
            above_market: 0.0,
        }
    }
}

/// Marketplace fees at a given sale price.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FeeBreakdown {
    pub listing_fee: f64,
    pub final_value_fee: f64,
    pub processing_fee: f64,
    pub total_fees: f64,
}

/// Profit after fees at a given sale price.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ProfitBreakdown {
    pub gross_profit: f64,
    pub net_profit: f64,
    pub roi_percentage: f64,
}

/// Fees and profit evaluated at one suggested price point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfitScenario {
    pub strategy: Strategy,
    pub price: f64,
    pub fees: FeeBreakdown,
    pub profit: ProfitBreakdown,
}

/// A comparable rendered for report output.
#[derive(Debug, Clone, Serialize)]
pub struct RecentSale {
    pub title: String,
    pub price: f64,
    pub total_price: f64,
    pub platform: String,
    pub status: ListingStatus,
    pub scraped_date: String,
}

/// Market slice of a pricing report.
#[derive(Debug, Clone, Serialize)]
pub struct MarketData {
    pub total_comparables: usize,
    pub source: String,
    pub price_range: PriceRange,
    pub recent_sales: Vec<RecentSale>,
}

/// Item fields echoed into a pricing report.
#[derive(Debug, Clone, Serialize)]
pub struct ItemSnapshot {
    pub brand: String,
    pub name: String,
    pub category: String,
    pub condition: String,
    pub cost: f64,
}

/// Full output of one pricing analysis run.
#[derive(Debug, Clone, Serialize)]
pub struct PricingAnalysis {
    pub sku: String,
    pub item: ItemSnapshot,
    pub market: MarketData,
    pub suggested_prices: PricingSuggestion,
    pub market_position: MarketPosition,
    pub condition_adjustment: String,
    pub scenarios: Vec<ProfitScenario>,
    pub recommendations: Vec<String>,
}

/// Fee figures at the break-even point.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct BreakEvenFees {
    pub fixed_fees: f64,
    pub variable_rate_percentage: f64,
    pub estimated_fees_at_break_even: f64,
}

/// Minimum-price analysis for an item.
#[derive(Debug, Clone, Serialize)]
pub struct BreakEvenAnalysis {
    pub sku: String,
    pub item_cost: f64,
    pub break_even_price: f64,
    pub break_even_with_margin: f64,
    pub fee_breakdown: BreakEvenFees,
    pub recommendation: String,
}

/// How urgently an adjustment should be acted on.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Urgency {
    Medium,
    High,
}

/// The kind of adjustment being suggested for a stale listing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdjustmentKind {
    PriceReduction,
    AggressiveReduction,
    MarketAdjustment,
}

impl AdjustmentKind {
    pub fn label(&self) -> &'static str {
        match self {
            AdjustmentKind::PriceReduction => "Price reduction",
            AdjustmentKind::AggressiveReduction => "Aggressive reduction",
            AdjustmentKind::MarketAdjustment => "Market adjustment",
        }
    }
}

/// One suggested price change for a listed item.
#[derive(Debug, Clone, Serialize)]
pub struct PriceAdjustment {
    pub kind: AdjustmentKind,
    pub current_price: f64,
    pub suggested_price: f64,
    pub reason: String,
    pub urgency: Urgency,
}

/// Output of the price-adjustment suggester.
#[derive(Debug, Clone, Serialize)]
pub struct AdjustmentReport {
    pub sku: String,
    pub current_price: f64,
    pub days_listed: u32,
    pub suggestions: Vec<PriceAdjustment>,
    pub market_context: PriceRange,
}

/// Externally-researched comparable data being imported into the store.
#[derive(Debug, Clone, Deserialize)]
pub struct ResearchFinding {
    pub title: String,
    pub price: f64,
    #[serde(default)]
    pub shipping_cost: Option<f64>,
    #[serde(default = "default_platform")]
    pub platform: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(default)]
    pub listing_url: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

fn default_platform() -> String {
    "ebay".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_price_includes_shipping() {
        let comp = Comparable::new(
            "patagonia better sweater".to_string(),
            "Clothing".to_string(),
            "Patagonia Better Sweater M".to_string(),
            42.00,
            Some(8.50),
            "ebay".to_string(),
        );
        assert_eq!(comp.total_price, 50.50);

        let free_ship = Comparable::new(
            "levi 501".to_string(),
            "Clothing".to_string(),
            "Levi's 501".to_string(),
            28.99,
            None,
            "ebay".to_string(),
        );
        assert_eq!(free_ship.total_price, 28.99);
    }

    #[test]
    fn test_sample_source_label() {
        let real = MarketSample::Real(vec![]);
        let synthetic = MarketSample::Synthetic(vec![]);
        assert_eq!(real.source_label(), "real");
        assert_eq!(synthetic.source_label(), "synthetic");
        assert!(synthetic.is_synthetic());
    }

    #[test]
    fn test_research_finding_defaults() {
        let json = r#"{"title": "Nike Hoodie L", "price": 22.5}"#;
        let finding: ResearchFinding = serde_json::from_str(json).unwrap();
        assert_eq!(finding.platform, "ebay");
        assert!(finding.shipping_cost.is_none());
    }
}

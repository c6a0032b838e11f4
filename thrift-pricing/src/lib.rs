pub mod analyzer;
pub mod comparables;
pub mod fees;
pub mod models;
pub mod recommend;
pub mod stats;
pub mod strategy;

pub use analyzer::PricingAnalyzer;
pub use comparables::{ComparableAccessor, ComparableRepository};
pub use fees::FeeSchedule;
pub use models::{
    Comparable, ListingStatus, MarketSample, PriceRange, PricingSuggestion, ProfitScenario,
    Strategy,
};

#[derive(Debug, thiserror::Error)]
pub enum PricingError {
    #[error("Comparable store error: {0}")]
    Store(String),

    #[error("Invalid pricing input: {0}")]
    Invalid(String),
}

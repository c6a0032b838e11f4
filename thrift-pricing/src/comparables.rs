use crate::models::{Comparable, ListingStatus, MarketSample};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use rand::Rng;
use std::sync::Arc;
use thrift_catalog::InventoryItem;
use thrift_core::search::ComparableQuery;
use thrift_shared::money::round2;
use tracing::debug;
use uuid::Uuid;

/// Repository trait for market comparable access
#[async_trait]
pub trait ComparableRepository: Send + Sync {
    async fn save_comparable(
        &self,
        comparable: &Comparable,
    ) -> Result<Uuid, Box<dyn std::error::Error + Send + Sync>>;

    /// Substring-contains match against stored search terms, newest first,
    /// capped at `limit` rows.
    async fn find_by_term(
        &self,
        term: &str,
        limit: u32,
    ) -> Result<Vec<Comparable>, Box<dyn std::error::Error + Send + Sync>>;
}

/// Fetches comparable samples for an item, falling back to synthetic data
/// when the store has nothing, so pricing analysis never blocks on missing
/// research.
pub struct ComparableAccessor {
    repo: Arc<dyn ComparableRepository>,
}

impl ComparableAccessor {
    pub fn new(repo: Arc<dyn ComparableRepository>) -> Self {
        Self { repo }
    }

    /// Walk the search-term ladder, accumulating matches per rung without
    /// deduplication. An empty combined result switches to the synthetic
    /// generator; the returned sample is never empty.
    pub async fn fetch<R: Rng + Send>(
        &self,
        item: &InventoryItem,
        limit_per_term: u32,
        rng: &mut R,
    ) -> Result<MarketSample, Box<dyn std::error::Error + Send + Sync>> {
        let query = ComparableQuery::new(&item.brand, &item.name, &item.category, limit_per_term);

        let mut comparables = Vec::new();
        for term in query.terms() {
            let matches = self.repo.find_by_term(&term, limit_per_term).await?;
            comparables.extend(matches);
        }

        if comparables.is_empty() {
            debug!(sku = %item.sku, "no stored comparables, generating synthetic sample");
            Ok(MarketSample::Synthetic(synthetic_comparables(item, rng)))
        } else {
            debug!(sku = %item.sku, count = comparables.len(), "using stored comparables");
            Ok(MarketSample::Real(comparables))
        }
    }
}

/// Number of comparables in every synthetic sample.
pub const SYNTHETIC_SAMPLE_SIZE: usize = 7;

/// Cost-multiplier range per category for synthetic base prices.
const CATEGORY_PRICE_RANGES: [(&str, f64, f64); 5] = [
    ("clothing", 4.0, 8.0),
    ("electronics", 2.0, 5.0),
    ("home & garden", 3.0, 6.0),
    ("sports & outdoors", 3.5, 7.0),
    ("collectibles", 5.0, 12.0),
];

const TITLE_VARIANTS: [&str; 4] = ["Size M", "Great Condition", "Vintage", "Rare Find"];
const CONDITION_VARIANTS: [&str; 4] = ["New", "Excellent", "Very Good", "Good"];

/// Generate a plausible market sample from the item's cost alone.
///
/// One base multiplier is drawn from the category's range, then each of the
/// 7 comparables varies around that base. Intentionally non-deterministic in
/// production; tests pass a seeded RNG.
pub fn synthetic_comparables(item: &InventoryItem, rng: &mut impl Rng) -> Vec<Comparable> {
    let (low, high) = category_price_range(&item.category);
    let base_price = item.cost * rng.gen_range(low..high);
    let search_term = item.display_name();

    (0..SYNTHETIC_SAMPLE_SIZE)
        .map(|_| {
            let price = round2(base_price * rng.gen_range(0.8..1.4));
            let condition = CONDITION_VARIANTS[rng.gen_range(0..CONDITION_VARIANTS.len())];
            let variant = TITLE_VARIANTS[rng.gen_range(0..TITLE_VARIANTS.len())];
            let status = if rng.gen_bool(0.5) {
                ListingStatus::Sold
            } else {
                ListingStatus::Active
            };
            let age_seconds = (rng.gen_range(1.0..30.0) * 86_400.0) as i64;

            Comparable {
                id: Uuid::new_v4(),
                search_term: search_term.clone(),
                category: item.category.clone(),
                brand: Some(item.brand.clone()),
                condition: Some(condition.to_string()),
                title: format!("{} - {}", search_term, variant),
                price,
                shipping_cost: Some(0.0),
                total_price: price,
                platform: "ebay".to_string(),
                listing_url: None,
                listing_status: status,
                scraped_at: Utc::now() - Duration::seconds(age_seconds),
            }
        })
        .collect()
}

/// Case-insensitive substring match in both directions; unmatched categories
/// use the clothing range.
fn category_price_range(category: &str) -> (f64, f64) {
    let key = category.to_lowercase();
    CATEGORY_PRICE_RANGES
        .iter()
        .find(|(name, _, _)| key.contains(name) || name.contains(key.as_str()))
        .map(|(_, low, high)| (*low, *high))
        .unwrap_or((CATEGORY_PRICE_RANGES[0].1, CATEGORY_PRICE_RANGES[0].2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use thrift_catalog::Condition;

    fn sample_item(category: &str, cost: f64) -> InventoryItem {
        InventoryItem::new(
            "25-0001".to_string(),
            category.to_string(),
            "Patagonia".to_string(),
            "Better Sweater".to_string(),
            cost,
            Condition::Good,
        )
    }

    #[test]
    fn test_synthetic_sample_size_and_positivity() {
        let item = sample_item("Clothing", 3.75);
        let mut rng = StdRng::seed_from_u64(7);
        let comps = synthetic_comparables(&item, &mut rng);
        assert_eq!(comps.len(), SYNTHETIC_SAMPLE_SIZE);
        for comp in &comps {
            assert!(comp.total_price > 0.0);
            assert!(comp.scraped_at < Utc::now());
            assert_eq!(comp.platform, "ebay");
        }
    }

    #[test]
    fn test_synthetic_prices_within_category_envelope() {
        let item = sample_item("Clothing", 10.0);
        let mut rng = StdRng::seed_from_u64(42);
        let comps = synthetic_comparables(&item, &mut rng);
        // base in cost*(4..8), variation in (0.8..1.4)
        for comp in &comps {
            assert!(comp.price >= 10.0 * 4.0 * 0.8 - 0.01);
            assert!(comp.price <= 10.0 * 8.0 * 1.4 + 0.01);
        }
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let item = sample_item("Electronics", 20.0);
        let a = synthetic_comparables(&item, &mut StdRng::seed_from_u64(99));
        let b = synthetic_comparables(&item, &mut StdRng::seed_from_u64(99));
        let prices_a: Vec<f64> = a.iter().map(|c| c.price).collect();
        let prices_b: Vec<f64> = b.iter().map(|c| c.price).collect();
        assert_eq!(prices_a, prices_b);
    }

    #[test]
    fn test_unknown_category_uses_clothing_range() {
        assert_eq!(category_price_range("Musical Instruments"), (4.0, 8.0));
        assert_eq!(category_price_range("Collectibles & Art"), (5.0, 12.0));
        assert_eq!(category_price_range("sports"), (3.5, 7.0));
    }
}

use crate::comparables::{ComparableAccessor, ComparableRepository};
use crate::fees::FeeSchedule;
use crate::models::{
    AdjustmentReport, BreakEvenAnalysis, Comparable, ItemSnapshot, MarketData, PricingAnalysis,
    RecentSale, ResearchFinding,
};
use crate::recommend::{pricing_recommendations, suggest_adjustments};
use crate::stats::summarize;
use crate::strategy::suggest_prices;
use crate::PricingError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::str::FromStr;
use std::sync::Arc;
use thrift_catalog::InventoryItem;
use tracing::{info, warn};

/// Comparables fetched per search term in a full analysis.
const ANALYSIS_LIMIT_PER_TERM: u32 = 20;
/// Smaller sample for adjustment checks on an already-listed item.
const ADJUSTMENT_LIMIT_PER_TERM: u32 = 10;
/// Comparables echoed into the report.
const RECENT_SALES_SHOWN: usize = 10;

/// Orchestrates one pricing analysis: fetch comparables, reduce to
/// statistics, derive price points, evaluate fees, generate guidance.
pub struct PricingAnalyzer {
    accessor: ComparableAccessor,
    repo: Arc<dyn ComparableRepository>,
    fees: FeeSchedule,
}

impl PricingAnalyzer {
    pub fn new(repo: Arc<dyn ComparableRepository>, fees: FeeSchedule) -> Self {
        Self {
            accessor: ComparableAccessor::new(repo.clone()),
            repo,
            fees,
        }
    }

    pub fn fee_schedule(&self) -> &FeeSchedule {
        &self.fees
    }

    /// Analyze pricing for an item using entropy-seeded randomness for any
    /// synthetic fallback.
    pub async fn analyze(&self, item: &InventoryItem) -> Result<PricingAnalysis, PricingError> {
        self.analyze_with(item, &mut StdRng::from_entropy()).await
    }

    /// Analysis with a caller-supplied random source (tests seed this).
    pub async fn analyze_with<R: Rng + Send>(
        &self,
        item: &InventoryItem,
        rng: &mut R,
    ) -> Result<PricingAnalysis, PricingError> {
        let sample = self
            .accessor
            .fetch(item, ANALYSIS_LIMIT_PER_TERM, rng)
            .await
            .map_err(|e| PricingError::Store(e.to_string()))?;

        let prices: Vec<f64> = sample
            .comparables()
            .iter()
            .map(|comp| comp.total_price)
            .collect();
        let range = summarize(&prices);

        let outcome = suggest_prices(
            item.cost,
            item.condition,
            &item.category,
            Some(&range),
            self.fees.minimum_margin,
        );

        let scenarios: Vec<_> = crate::models::Strategy::ALL
            .iter()
            .map(|strategy| {
                self.fees
                    .evaluate(*strategy, outcome.suggested.get(*strategy), item.cost)
            })
            .collect();

        let recommendations = pricing_recommendations(
            item,
            &outcome.suggested,
            &outcome.market_position,
            &scenarios,
        );

        info!(
            sku = %item.sku,
            source = sample.source_label(),
            comparables = sample.comparables().len(),
            competitive = outcome.suggested.competitive,
            "pricing analysis complete"
        );

        Ok(PricingAnalysis {
            sku: item.sku.clone(),
            item: ItemSnapshot {
                brand: item.brand.clone(),
                name: item.name.clone(),
                category: item.category.clone(),
                condition: item.condition.to_string(),
                cost: item.cost,
            },
            market: market_data(sample.comparables(), sample.source_label(), range),
            suggested_prices: outcome.suggested,
            market_position: outcome.market_position,
            condition_adjustment: outcome.condition_adjustment,
            scenarios,
            recommendations,
        })
    }

    /// Minimum-price analysis; pure fee arithmetic, no market data needed.
    pub fn break_even(&self, item: &InventoryItem) -> BreakEvenAnalysis {
        self.fees.break_even(&item.sku, item.cost)
    }

    /// Price-change suggestions for a listed item. `days_listed` comes from
    /// the caller; elapsed-time tracking belongs to the listing state owner.
    pub async fn suggest_adjustments(
        &self,
        item: &InventoryItem,
        listed_price: f64,
        days_listed: u32,
    ) -> Result<AdjustmentReport, PricingError> {
        self.suggest_adjustments_with(item, listed_price, days_listed, &mut StdRng::from_entropy())
            .await
    }

    pub async fn suggest_adjustments_with<R: Rng + Send>(
        &self,
        item: &InventoryItem,
        listed_price: f64,
        days_listed: u32,
        rng: &mut R,
    ) -> Result<AdjustmentReport, PricingError> {
        let sample = self
            .accessor
            .fetch(item, ADJUSTMENT_LIMIT_PER_TERM, rng)
            .await
            .map_err(|e| PricingError::Store(e.to_string()))?;

        let prices: Vec<f64> = sample
            .comparables()
            .iter()
            .map(|comp| comp.total_price)
            .collect();
        let market = summarize(&prices);

        Ok(AdjustmentReport {
            sku: item.sku.clone(),
            current_price: listed_price,
            days_listed,
            suggestions: suggest_adjustments(listed_price, days_listed, &market),
            market_context: market,
        })
    }

    /// Direct comparable lookup for reporting surfaces.
    pub async fn find_comparables(
        &self,
        term: &str,
        limit: u32,
    ) -> Result<Vec<Comparable>, PricingError> {
        self.repo
            .find_by_term(term, limit)
            .await
            .map_err(|e| PricingError::Store(e.to_string()))
    }

    /// Persist externally-researched comparables for later lookups. Rows
    /// that fail to save are skipped; the count of stored rows is returned.
    pub async fn record_research(
        &self,
        search_term: &str,
        category: &str,
        findings: &[ResearchFinding],
    ) -> Result<usize, PricingError> {
        let mut stored = 0;
        for finding in findings {
            let mut comparable = Comparable::new(
                search_term.to_string(),
                category.to_string(),
                finding.title.clone(),
                finding.price,
                finding.shipping_cost,
                finding.platform.clone(),
            );
            comparable.brand = finding.brand.clone();
            comparable.condition = finding.condition.clone();
            comparable.listing_url = finding.listing_url.clone();
            if let Some(status) = finding.status.as_deref() {
                match crate::models::ListingStatus::from_str(status) {
                    Ok(parsed) => comparable.listing_status = parsed,
                    Err(err) => warn!(title = %finding.title, %err, "keeping default status"),
                }
            }

            match self.repo.save_comparable(&comparable).await {
                Ok(_) => stored += 1,
                Err(err) => warn!(title = %finding.title, %err, "failed to store comparable"),
            }
        }
        Ok(stored)
    }
}

fn market_data(comparables: &[Comparable], source: &str, range: crate::models::PriceRange) -> MarketData {
    MarketData {
        total_comparables: comparables.len(),
        source: source.to_string(),
        price_range: range,
        recent_sales: comparables
            .iter()
            .take(RECENT_SALES_SHOWN)
            .map(|comp| RecentSale {
                title: comp.title.clone(),
                price: comp.price,
                total_price: comp.total_price,
                platform: comp.platform.clone(),
                status: comp.listing_status,
                scraped_date: comp.scraped_at.format("%Y-%m-%d").to_string(),
            })
            .collect(),
    }
}

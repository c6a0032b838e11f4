use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use thrift_catalog::{Condition, InventoryItem};
use thrift_pricing::models::{AdjustmentKind, Comparable};
use thrift_pricing::{ComparableRepository, FeeSchedule, PricingAnalyzer};
use tokio::sync::Mutex;
use uuid::Uuid;

/// In-memory comparable store mirroring the substring-contains lookup the
/// SQL implementation performs.
#[derive(Default)]
struct MemoryComparables {
    rows: Mutex<Vec<Comparable>>,
}

#[async_trait]
impl ComparableRepository for MemoryComparables {
    async fn save_comparable(
        &self,
        comparable: &Comparable,
    ) -> Result<Uuid, Box<dyn std::error::Error + Send + Sync>> {
        self.rows.lock().await.push(comparable.clone());
        Ok(comparable.id)
    }

    async fn find_by_term(
        &self,
        term: &str,
        limit: u32,
    ) -> Result<Vec<Comparable>, Box<dyn std::error::Error + Send + Sync>> {
        let rows = self.rows.lock().await;
        Ok(rows
            .iter()
            .filter(|row| row.search_term.contains(term))
            .take(limit as usize)
            .cloned()
            .collect())
    }
}

fn item(sku: &str, category: &str, condition: Condition, cost: f64) -> InventoryItem {
    InventoryItem::new(
        sku.to_string(),
        category.to_string(),
        "Patagonia".to_string(),
        "Better Sweater".to_string(),
        cost,
        condition,
    )
}

fn analyzer() -> PricingAnalyzer {
    PricingAnalyzer::new(Arc::new(MemoryComparables::default()), FeeSchedule::default())
}

#[tokio::test]
async fn synthetic_fallback_respects_margin_floor() {
    let analyzer = analyzer();
    let subject = item("25-0001", "clothing", Condition::Good, 5.0);

    let report = analyzer
        .analyze_with(&subject, &mut StdRng::seed_from_u64(11))
        .await
        .unwrap();

    assert_eq!(report.market.source, "synthetic");
    assert_eq!(report.market.total_comparables, 7);

    for price in [
        report.suggested_prices.conservative,
        report.suggested_prices.competitive,
        report.suggested_prices.aggressive,
    ] {
        assert!(price >= 7.50, "price {} fell under the margin floor", price);
    }

    assert_eq!(report.condition_adjustment, "-30%");
    assert_eq!(report.scenarios.len(), 3);
    assert!(!report.recommendations.is_empty());
}

#[tokio::test]
async fn fair_condition_never_beats_good() {
    // Same seed both runs, so market data is identical and only the
    // condition multiplier differs (0.6 vs 0.7).
    let analyzer = analyzer();
    let good = item("25-0001", "clothing", Condition::Good, 5.0);
    let fair = item("25-0001", "clothing", Condition::Fair, 5.0);

    let good_report = analyzer
        .analyze_with(&good, &mut StdRng::seed_from_u64(23))
        .await
        .unwrap();
    let fair_report = analyzer
        .analyze_with(&fair, &mut StdRng::seed_from_u64(23))
        .await
        .unwrap();

    assert!(fair_report.suggested_prices.conservative <= good_report.suggested_prices.conservative);
    assert!(fair_report.suggested_prices.competitive <= good_report.suggested_prices.competitive);
    assert!(fair_report.suggested_prices.aggressive <= good_report.suggested_prices.aggressive);
}

#[tokio::test]
async fn stored_comparables_mark_sample_as_real() {
    let repo = Arc::new(MemoryComparables::default());
    let analyzer = PricingAnalyzer::new(repo.clone(), FeeSchedule::default());

    for price in [28.0, 32.0, 35.0, 41.0] {
        let comp = Comparable::new(
            "Patagonia Better Sweater".to_string(),
            "Clothing".to_string(),
            format!("Patagonia Better Sweater M {}", price),
            price,
            None,
            "ebay".to_string(),
        );
        repo.save_comparable(&comp).await.unwrap();
    }

    let subject = item("25-0001", "Clothing", Condition::Good, 5.0);
    let report = analyzer
        .analyze_with(&subject, &mut StdRng::seed_from_u64(3))
        .await
        .unwrap();

    assert_eq!(report.market.source, "real");
    // the full-term rung and the brand/name rungs each match the same rows:
    // accumulation does not deduplicate
    assert!(report.market.total_comparables >= 4);
    assert!(report.market.price_range.average > 0.0);
}

#[tokio::test]
async fn zero_cost_item_never_panics() {
    let analyzer = analyzer();
    let freebie = item("25-0002", "clothing", Condition::Good, 0.0);

    let report = analyzer
        .analyze_with(&freebie, &mut StdRng::seed_from_u64(5))
        .await
        .unwrap();

    for scenario in &report.scenarios {
        assert_eq!(scenario.profit.roi_percentage, 0.0);
    }
}

#[tokio::test]
async fn break_even_matches_reference_numbers() {
    let analyzer = analyzer();
    let subject = item("25-0003", "clothing", Condition::Good, 10.0);

    let report = analyzer.break_even(&subject);
    assert_eq!(report.break_even_price, 11.83);
    assert_eq!(report.break_even_with_margin, 12.42);
}

#[tokio::test]
async fn adjustment_report_carries_market_context() {
    let analyzer = analyzer();
    let subject = item("25-0004", "clothing", Condition::Good, 5.0);

    let report = analyzer
        .suggest_adjustments_with(&subject, 99.0, 75, &mut StdRng::seed_from_u64(17))
        .await
        .unwrap();

    assert_eq!(report.days_listed, 75);
    assert!(report.market_context.average > 0.0);

    let time_based: Vec<_> = report
        .suggestions
        .iter()
        .filter(|s| s.kind != AdjustmentKind::MarketAdjustment)
        .collect();
    assert_eq!(time_based.len(), 1);
    assert_eq!(time_based[0].kind, AdjustmentKind::AggressiveReduction);
}

#[tokio::test]
async fn research_import_feeds_later_lookups() {
    let repo = Arc::new(MemoryComparables::default());
    let analyzer = PricingAnalyzer::new(repo.clone(), FeeSchedule::default());

    let findings: Vec<thrift_pricing::models::ResearchFinding> = serde_json::from_str(
        r#"[
            {"title": "Patagonia Better Sweater L Navy", "price": 45.99, "status": "sold"},
            {"title": "Patagonia Better Sweater S Gray", "price": 38.50, "shipping_cost": 6.0}
        ]"#,
    )
    .unwrap();

    let stored = analyzer
        .record_research("Patagonia Better Sweater", "Clothing", &findings)
        .await
        .unwrap();
    assert_eq!(stored, 2);

    let rows = repo.find_by_term("Patagonia", 10).await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].total_price, 44.50);
}

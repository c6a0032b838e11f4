use crate::models::{
    AdjustmentKind, MarketPosition, PriceAdjustment, PriceRange, PricingSuggestion,
    ProfitScenario, Urgency,
};
use thrift_catalog::{Condition, InventoryItem};
use thrift_shared::money::{format_usd, round2};

/// Generate actionable pricing guidance from an analysis run.
///
/// Deterministic: the same scenarios always produce the same lines, in the
/// same order: best-ROI callout, margin warning, market framing, category
/// tips, condition tip.
pub fn pricing_recommendations(
    item: &InventoryItem,
    suggested: &PricingSuggestion,
    position: &MarketPosition,
    scenarios: &[ProfitScenario],
) -> Vec<String> {
    let mut recommendations = Vec::new();

    if let Some(best) = scenarios.iter().max_by(|a, b| {
        a.profit
            .roi_percentage
            .partial_cmp(&b.profit.roi_percentage)
            .unwrap_or(std::cmp::Ordering::Equal)
    }) {
        recommendations.push(format!(
            "Best ROI: {} pricing at {} ({}% ROI)",
            best.strategy,
            format_usd(best.price),
            best.profit.roi_percentage
        ));
    }

    // Margin check compares net profit to the item's cost basis, not to
    // zero: a sale that merely breaks even still ties up sourcing capital.
    let low_margin = scenarios
        .iter()
        .filter(|scenario| scenario.profit.net_profit < item.cost)
        .count();
    if low_margin > 0 {
        recommendations.push(format!(
            "Warning: {} pricing strategies show low profit margins",
            low_margin
        ));
    }

    if position.at_market > 0.0 {
        let competitive = suggested.competitive;
        if competitive < position.at_market * 0.9 {
            recommendations.push(
                "Competitive price is below market average - good for quick sales".to_string(),
            );
        } else if competitive > position.at_market * 1.1 {
            recommendations.push(
                "Competitive price is above market average - may take longer to sell".to_string(),
            );
        }
    }

    recommendations.extend(category_tips(&item.category).iter().map(|s| s.to_string()));

    match item.condition {
        Condition::Fair | Condition::Poor => recommendations.push(
            "Include detailed photos of flaws to justify pricing and avoid returns".to_string(),
        ),
        Condition::New | Condition::Excellent => recommendations.push(
            "Highlight the excellent condition in title and description for premium pricing"
                .to_string(),
        ),
        _ => {}
    }

    recommendations
}

/// Category-specific pricing tips. Exact lowercase-key lookup; anything
/// outside the table gets the generic pair.
pub fn category_tips(category: &str) -> &'static [&'static str] {
    match category.to_lowercase().as_str() {
        "clothing" => &[
            "Consider brand recognition - designer brands can command higher prices",
            "Size matters - popular sizes (M, L) typically sell for more",
            "Check for seasonal demand (coats in fall, swimwear in spring)",
        ],
        "electronics" => &[
            "Working condition is critical - test all functions before pricing",
            "Check current market prices as tech depreciates quickly",
            "Include all original accessories to maximize value",
        ],
        "home" => &[
            "Vintage and antique items may have collector value",
            "Unique or handmade items can command premium pricing",
            "Large items: factor shipping costs into the final price",
        ],
        "books" => &[
            "First editions and rare books have higher value",
            "Textbooks have seasonal demand (back-to-school)",
            "Check condition carefully - book collectors are picky",
        ],
        "toys" => &[
            "Vintage toys from the 70s-90s can be very valuable",
            "Original packaging significantly increases value",
            "Complete sets with all pieces sell for more",
        ],
        _ => &[
            "Research similar items to understand market value",
            "Unique or rare items can command higher prices",
        ],
    }
}

/// Staleness thresholds for listed items, in days.
const STALE_AFTER_DAYS: u32 = 30;
const VERY_STALE_AFTER_DAYS: u32 = 60;

/// Suggest price changes for a listed item that has not sold.
///
/// The two staleness thresholds are mutually exclusive: past 60 days only
/// the aggressive reduction fires. The market-average check is independent
/// and can add a second suggestion.
pub fn suggest_adjustments(
    listed_price: f64,
    days_listed: u32,
    market: &PriceRange,
) -> Vec<PriceAdjustment> {
    let mut suggestions = Vec::new();

    if days_listed > VERY_STALE_AFTER_DAYS {
        suggestions.push(PriceAdjustment {
            kind: AdjustmentKind::AggressiveReduction,
            current_price: listed_price,
            suggested_price: round2(listed_price * 0.8),
            reason: "Listed for over 60 days - consider a significant price reduction or auction format"
                .to_string(),
            urgency: Urgency::High,
        });
    } else if days_listed > STALE_AFTER_DAYS {
        suggestions.push(PriceAdjustment {
            kind: AdjustmentKind::PriceReduction,
            current_price: listed_price,
            suggested_price: round2(listed_price * 0.9),
            reason: "Listed for over 30 days - consider a 10% price reduction".to_string(),
            urgency: Urgency::Medium,
        });
    }

    if market.average > 0.0 && listed_price > market.average * 1.2 {
        let over_pct = ((listed_price / market.average - 1.0) * 100.0).round() as i64;
        suggestions.push(PriceAdjustment {
            kind: AdjustmentKind::MarketAdjustment,
            current_price: listed_price,
            suggested_price: round2(market.average),
            reason: format!("Current price is {}% above market average", over_pct),
            urgency: Urgency::Medium,
        });
    }

    suggestions
}

use crate::models::{MarketPosition, PriceRange, PricingSuggestion};
use thrift_catalog::Condition;
use thrift_shared::money::round2;

/// Fixed cost multipliers used when no market data is available at all
/// (callers that bypass the synthetic fallback). Conservative, competitive,
/// aggressive.
const CATEGORY_MULTIPLIERS: [(&str, [f64; 3]); 5] = [
    ("clothing", [4.0, 5.0, 6.0]),
    ("electronics", [2.0, 3.0, 4.0]),
    ("home & garden", [3.0, 4.0, 5.0]),
    ("sports & outdoors", [3.5, 4.5, 6.0]),
    ("collectibles", [4.0, 6.0, 8.0]),
];

/// Price multiplier for an item's condition grade.
pub fn condition_multiplier(condition: Condition) -> f64 {
    match condition {
        Condition::New | Condition::NewWithTags | Condition::NewWithoutTags => 1.0,
        Condition::Excellent => 0.9,
        Condition::VeryGood => 0.8,
        Condition::Good => 0.7,
        Condition::Fair => 0.6,
        Condition::Poor => 0.5,
    }
}

/// Condition multiplier for free-text labels on externally-sourced data.
/// Labels outside our grading scale price like "Good".
pub fn condition_multiplier_for_label(label: &str) -> f64 {
    label
        .parse::<Condition>()
        .map(condition_multiplier)
        .unwrap_or(0.7)
}

/// Suggested prices plus their market framing.
#[derive(Debug, Clone)]
pub struct StrategyOutcome {
    pub suggested: PricingSuggestion,
    pub market_position: MarketPosition,
    pub condition_adjustment: String,
}

/// Derive the three price points for an item.
///
/// `market` is `Some` whenever a comparable sample (real or synthetic)
/// exists; `None` selects the category-multiplier variant. Both variants
/// then share the condition adjustment, the margin floor
/// (`cost * minimum_margin`), and 2-decimal rounding.
pub fn suggest_prices(
    cost: f64,
    condition: Condition,
    category: &str,
    market: Option<&PriceRange>,
    minimum_margin: f64,
) -> StrategyOutcome {
    let [conservative, competitive, aggressive] = match market {
        Some(range) => market_strategy(cost, range),
        None => category_strategy(cost, category),
    };

    let multiplier = condition_multiplier(condition);
    let floor = cost * minimum_margin;
    let adjust = |price: f64| round2((price * multiplier).max(floor));

    let market_position = match market {
        Some(range) if range.average > 0.0 => MarketPosition {
            below_market: round2(range.average * 0.8),
            at_market: round2(range.average),
            above_market: round2(range.average * 1.2),
        },
        _ => MarketPosition::zero(),
    };

    StrategyOutcome {
        suggested: PricingSuggestion {
            conservative: adjust(conservative),
            competitive: adjust(competitive),
            aggressive: adjust(aggressive),
        },
        market_position,
        condition_adjustment: condition_adjustment_label(multiplier),
    }
}

/// Market-based variant: anchor on average and median, cap by the observed
/// maximum.
pub fn market_strategy(cost: f64, range: &PriceRange) -> [f64; 3] {
    let conservative = (cost * 2.0).max(range.average * 0.8);
    let competitive = if range.median > cost * 1.5 {
        range.median
    } else {
        cost * 2.0
    };
    let aggressive = (range.average * 1.2).min(range.max * 0.9);
    [conservative, competitive, aggressive]
}

/// Category-multiplier variant for callers with no sample at all.
pub fn category_strategy(cost: f64, category: &str) -> [f64; 3] {
    let multipliers = category_multipliers(category);
    [
        cost * multipliers[0],
        cost * multipliers[1],
        cost * multipliers[2],
    ]
}

/// Case-insensitive substring match in both directions; unmatched categories
/// price like clothing.
fn category_multipliers(category: &str) -> [f64; 3] {
    let key = category.to_lowercase();
    CATEGORY_MULTIPLIERS
        .iter()
        .find(|(name, _)| key.contains(name) || name.contains(key.as_str()))
        .map(|(_, multipliers)| *multipliers)
        .unwrap_or(CATEGORY_MULTIPLIERS[0].1)
}

fn condition_adjustment_label(multiplier: f64) -> String {
    if multiplier == 1.0 {
        "None".to_string()
    } else {
        format!("{}%", ((multiplier - 1.0) * 100.0).round() as i64)
    }
}

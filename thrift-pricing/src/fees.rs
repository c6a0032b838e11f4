use crate::models::{
    BreakEvenAnalysis, BreakEvenFees, FeeBreakdown, ProfitBreakdown, ProfitScenario, Strategy,
};
use serde::Deserialize;
use thrift_catalog::SaleRecord;
use thrift_shared::money::{format_usd, round1, round2};

/// Marketplace fee rates and pricing guardrails.
///
/// Loaded from configuration and passed in wherever fees are computed, so a
/// rate change never requires touching pricing code.
#[derive(Debug, Clone, Deserialize)]
pub struct FeeSchedule {
    /// Flat insertion fee per listing. Basic listings are free.
    #[serde(default)]
    pub listing_fee: f64,
    /// Marketplace cut of the sale price (final value fee).
    pub final_value_rate: f64,
    /// Payment processing percentage.
    pub processing_rate: f64,
    /// Payment processing fixed fee per transaction.
    pub processing_fixed: f64,
    /// Suggested prices never drop below `cost * minimum_margin`.
    pub minimum_margin: f64,
    /// Safety buffer multiplied onto the break-even price.
    pub break_even_buffer: f64,
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            listing_fee: 0.00,
            final_value_rate: 0.10,
            processing_rate: 0.029,
            processing_fixed: 0.30,
            minimum_margin: 1.5,
            break_even_buffer: 1.05,
        }
    }
}

impl FeeSchedule {
    /// Combined percentage taken off the top of every sale.
    pub fn variable_rate(&self) -> f64 {
        self.final_value_rate + self.processing_rate
    }

    /// Evaluate fees and profit at one price point.
    ///
    /// `roi_percentage` is 0 when `cost` is 0; the division is never taken.
    pub fn evaluate(&self, strategy: Strategy, price: f64, cost: f64) -> ProfitScenario {
        let final_value_fee = price * self.final_value_rate;
        let processing_fee = price * self.processing_rate + self.processing_fixed;
        let total_fees = self.listing_fee + final_value_fee + processing_fee;

        let gross_profit = price - cost;
        let net_profit = gross_profit - total_fees;
        let roi_percentage = if cost > 0.0 {
            net_profit / cost * 100.0
        } else {
            0.0
        };

        ProfitScenario {
            strategy,
            price,
            fees: FeeBreakdown {
                listing_fee: round2(self.listing_fee),
                final_value_fee: round2(final_value_fee),
                processing_fee: round2(processing_fee),
                total_fees: round2(total_fees),
            },
            profit: ProfitBreakdown {
                gross_profit: round2(gross_profit),
                net_profit: round2(net_profit),
                roi_percentage: round1(roi_percentage),
            },
        }
    }

    /// Build the fee/profit record stored on an item when its sale closes.
    pub fn sale_record(&self, price: f64, cost: f64) -> SaleRecord {
        let scenario = self.evaluate(Strategy::Competitive, price, cost);
        SaleRecord {
            sold_price: round2(price),
            listing_fee: scenario.fees.listing_fee,
            final_value_fee: scenario.fees.final_value_fee,
            processing_fee: scenario.fees.processing_fee,
            total_fees: scenario.fees.total_fees,
            gross_profit: scenario.profit.gross_profit,
            net_profit: scenario.profit.net_profit,
            roi_percentage: scenario.profit.roi_percentage,
        }
    }

    /// Minimum sale price at which net profit is exactly zero:
    /// `(cost + fixed fees) / (1 - variable rate)`.
    pub fn break_even(&self, sku: &str, cost: f64) -> BreakEvenAnalysis {
        let fixed_fees = self.listing_fee + self.processing_fixed;
        let variable_rate = self.variable_rate();

        let break_even_price = (cost + fixed_fees) / (1.0 - variable_rate);
        let break_even_with_margin = break_even_price * self.break_even_buffer;

        BreakEvenAnalysis {
            sku: sku.to_string(),
            item_cost: cost,
            break_even_price: round2(break_even_price),
            break_even_with_margin: round2(break_even_with_margin),
            fee_breakdown: BreakEvenFees {
                fixed_fees: round2(fixed_fees),
                variable_rate_percentage: round1(variable_rate * 100.0),
                estimated_fees_at_break_even: round2(break_even_price * variable_rate + fixed_fees),
            },
            recommendation: format!(
                "Minimum listing price: {}",
                format_usd(round2(break_even_with_margin))
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fee_arithmetic_is_exact() {
        let schedule = FeeSchedule::default();
        let scenario = schedule.evaluate(Strategy::Competitive, 20.0, 5.0);

        assert_eq!(scenario.fees.listing_fee, 0.0);
        assert_eq!(scenario.fees.final_value_fee, 2.0);
        // 20 * 0.029 + 0.30 = 0.88
        assert_eq!(scenario.fees.processing_fee, 0.88);
        assert_eq!(scenario.fees.total_fees, 2.88);

        assert_eq!(scenario.profit.gross_profit, 15.0);
        assert_eq!(scenario.profit.net_profit, 12.12);
        // 12.12 / 5 * 100 = 242.4
        assert_eq!(scenario.profit.roi_percentage, 242.4);
    }

    #[test]
    fn test_net_profit_identity() {
        let schedule = FeeSchedule::default();
        for price in [7.5, 12.34, 49.99, 100.0] {
            let cost = 4.0;
            let scenario = schedule.evaluate(Strategy::Aggressive, price, cost);
            let expected = price - cost - (price * 0.10 + price * 0.029 + 0.30);
            assert!((scenario.profit.net_profit - round2(expected)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_zero_cost_roi_is_zero() {
        let schedule = FeeSchedule::default();
        let scenario = schedule.evaluate(Strategy::Conservative, 15.0, 0.0);
        assert_eq!(scenario.profit.roi_percentage, 0.0);
    }

    #[test]
    fn test_break_even_for_ten_dollars() {
        let schedule = FeeSchedule::default();
        let analysis = schedule.break_even("25-0001", 10.0);

        // (10 + 0.30) / (1 - 0.129) = 11.826...
        assert_eq!(analysis.break_even_price, 11.83);
        assert_eq!(analysis.break_even_with_margin, 12.42);
        assert_eq!(analysis.fee_breakdown.fixed_fees, 0.30);
        assert_eq!(analysis.fee_breakdown.variable_rate_percentage, 12.9);
        // 11.826... * 0.129 + 0.30 = 1.8256... -> 1.83
        assert_eq!(analysis.fee_breakdown.estimated_fees_at_break_even, 1.83);
        assert!(analysis.recommendation.contains("$12.42"));
    }

    #[test]
    fn test_sale_record_matches_scenario() {
        let schedule = FeeSchedule::default();
        let record = schedule.sale_record(24.99, 8.5);
        assert_eq!(record.sold_price, 24.99);
        assert_eq!(record.final_value_fee, 2.5);
        // 24.99 * 0.029 + 0.30 = 1.02471
        assert_eq!(record.processing_fee, 1.02);
        assert_eq!(record.gross_profit, 16.49);
    }
}

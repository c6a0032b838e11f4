use crate::cli::PricingCommands;
use crate::commands::{repo_err, require_item};
use crate::output::{bullet, kv, section, urgency_marker};
use crate::AppContext;
use thrift_catalog::repository::ItemRepository;
use thrift_shared::money::format_usd;

pub async fn run(command: PricingCommands, ctx: &AppContext) -> anyhow::Result<()> {
    match command {
        PricingCommands::Analyze { sku, save } => {
            let mut item = require_item(ctx, &sku).await?;
            let analysis = ctx.analyzer.analyze(&item).await?;

            section(&format!(
                "Pricing analysis: {} {}",
                analysis.item.brand, analysis.item.name
            ));
            kv("Category", &analysis.item.category);
            kv("Condition", &analysis.item.condition);
            kv("Cost", format_usd(analysis.item.cost));

            section(&format!(
                "Market data ({} comparables, {})",
                analysis.market.total_comparables, analysis.market.source
            ));
            kv(
                "Range",
                format!(
                    "{} - {}",
                    format_usd(analysis.market.price_range.min),
                    format_usd(analysis.market.price_range.max)
                ),
            );
            kv("Average", format_usd(analysis.market.price_range.average));
            kv("Median", format_usd(analysis.market.price_range.median));

            section("Suggested pricing");
            kv(
                "Conservative",
                format_usd(analysis.suggested_prices.conservative),
            );
            kv(
                "Competitive",
                format_usd(analysis.suggested_prices.competitive),
            );
            kv(
                "Aggressive",
                format_usd(analysis.suggested_prices.aggressive),
            );
            kv("Condition adjustment", &analysis.condition_adjustment);

            section("Profit scenarios");
            for scenario in &analysis.scenarios {
                println!(
                    "  {:<13} {} -> {} profit ({}% ROI)",
                    scenario.strategy,
                    format_usd(scenario.price),
                    format_usd(scenario.profit.net_profit),
                    scenario.profit.roi_percentage
                );
            }

            section("Recommendations");
            for recommendation in &analysis.recommendations {
                bullet(recommendation);
            }

            if save {
                item.suggested_price = Some(analysis.suggested_prices.competitive);
                item.touch();
                ctx.items.update_item(&item).await.map_err(repo_err)?;
                println!(
                    "\nStored suggested price {} on {}",
                    format_usd(analysis.suggested_prices.competitive),
                    item.sku
                );
            }
            Ok(())
        }

        PricingCommands::Breakeven { sku } => {
            let item = require_item(ctx, &sku).await?;
            let analysis = ctx.analyzer.break_even(&item);

            section(&format!("Break-even analysis: {}", analysis.sku));
            kv("Item cost", format_usd(analysis.item_cost));
            kv("Break-even price", format_usd(analysis.break_even_price));
            kv(
                "Recommended minimum",
                format_usd(analysis.break_even_with_margin),
            );

            section("Fee breakdown at break-even");
            kv("Fixed fees", format_usd(analysis.fee_breakdown.fixed_fees));
            kv(
                "Variable rate",
                format!("{}%", analysis.fee_breakdown.variable_rate_percentage),
            );
            kv(
                "Estimated fees",
                format_usd(analysis.fee_breakdown.estimated_fees_at_break_even),
            );

            println!("\n{}", analysis.recommendation);
            Ok(())
        }

        PricingCommands::Adjust { sku, days_listed } => {
            let item = require_item(ctx, &sku).await?;
            let Some(listed_price) = item.listed_price else {
                println!("Item not yet listed - no adjustments needed");
                return Ok(());
            };

            let report = ctx
                .analyzer
                .suggest_adjustments(&item, listed_price, days_listed)
                .await?;

            section(&format!("Price adjustment analysis: {}", report.sku));
            kv("Current price", format_usd(report.current_price));
            kv("Days listed", report.days_listed);

            if report.suggestions.is_empty() {
                println!("\nNo price adjustments recommended at this time");
            } else {
                section("Suggestions");
                for suggestion in &report.suggestions {
                    println!(
                        "  {} {}: {} -> {}",
                        urgency_marker(suggestion.urgency),
                        suggestion.kind.label(),
                        format_usd(suggestion.current_price),
                        format_usd(suggestion.suggested_price)
                    );
                    println!("      {}", suggestion.reason);
                }
            }

            section("Market context");
            kv(
                "Range",
                format!(
                    "{} - {}",
                    format_usd(report.market_context.min),
                    format_usd(report.market_context.max)
                ),
            );
            kv("Average", format_usd(report.market_context.average));
            Ok(())
        }
    }
}

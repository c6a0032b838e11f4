use crate::cli::PipelineCommands;
use crate::commands::{repo_err, require_item};
use crate::output::{bullet, kv, section};
use crate::AppContext;
use chrono::Utc;
use std::path::Path;
use thrift_catalog::repository::{ItemFilter, ItemRepository};
use thrift_catalog::InventoryItem;
use thrift_listing::export::{export_ebay_csv, ExportOptions};
use thrift_listing::{generator, photos, ListingOptions, ListingStyle};
use thrift_shared::money::format_usd;

#[derive(Default)]
struct PipelineOutcome {
    completed: Vec<&'static str>,
    skipped: Vec<&'static str>,
    errors: Vec<String>,
}

struct StepFlags {
    skip_photos: bool,
    skip_ai: bool,
    skip_pricing: bool,
    style: ListingStyle,
}

pub async fn run(command: PipelineCommands, ctx: &AppContext) -> anyhow::Result<()> {
    match command {
        PipelineCommands::Run {
            sku,
            skip_photos,
            skip_ai,
            skip_pricing,
            export,
            style,
        } => {
            let style: ListingStyle = style.parse().map_err(anyhow::Error::msg)?;
            let mut item = require_item(ctx, &sku).await?;
            println!("Starting pipeline for {}", item.sku);

            let flags = StepFlags {
                skip_photos,
                skip_ai,
                skip_pricing,
                style,
            };
            let mut outcome = PipelineOutcome::default();
            run_item_steps(ctx, &mut item, &flags, &mut outcome).await;

            if export {
                let timestamp = Utc::now().format("%Y%m%d_%H%M%S");
                let path = Path::new(&ctx.config.export.drafts_dir)
                    .join(format!("{}_pipeline_{}.csv", item.sku, timestamp));
                match ctx.items.list_items(&ItemFilter::default()).await {
                    Ok(items) => match export_ebay_csv(&items, &path, &ExportOptions::default()) {
                        Ok(report) => {
                            println!("  Exported {} items to {}", report.count, path.display());
                            outcome.completed.push("csv_export");
                        }
                        Err(err) => outcome.errors.push(format!("CSV export: {}", err)),
                    },
                    Err(err) => outcome.errors.push(format!("CSV export: {}", err)),
                }
            }

            print_summary(&item.sku, &outcome);
            Ok(())
        }

        PipelineCommands::Batch {
            input_dir,
            skip_photos,
            skip_ai,
            skip_pricing,
            style,
        } => {
            let style: ListingStyle = style.parse().map_err(anyhow::Error::msg)?;
            let input_dir = input_dir.unwrap_or_else(|| ctx.config.photos.input_dir.clone());
            let scan = photos::scan_directory(Path::new(&input_dir))?;

            // Only SKUs that exist in inventory are processed; stray photos
            // are reported, not fatal.
            let mut known = Vec::new();
            for sku in scan.by_sku.keys() {
                if let Some(item) = ctx.items.get_item_by_sku(sku).await.map_err(repo_err)? {
                    known.push(item);
                }
            }

            if known.is_empty() {
                println!("No inventory SKUs found in {}", input_dir);
                return Ok(());
            }

            println!(
                "Batch pipeline: {} of {} scanned SKUs are in inventory",
                known.len(),
                scan.by_sku.len()
            );

            let flags = StepFlags {
                skip_photos,
                skip_ai,
                skip_pricing,
                style,
            };
            let mut succeeded = 0usize;
            let mut failed = 0usize;

            for mut item in known {
                println!("\nProcessing {}", item.sku);
                let mut outcome = PipelineOutcome::default();
                run_item_steps(ctx, &mut item, &flags, &mut outcome).await;
                if outcome.errors.is_empty() {
                    succeeded += 1;
                } else {
                    failed += 1;
                    for error in &outcome.errors {
                        println!("  failed: {}", error);
                    }
                }
            }

            section("Batch complete");
            kv("Succeeded", succeeded);
            kv("Failed", failed);
            Ok(())
        }
    }
}

async fn run_item_steps(
    ctx: &AppContext,
    item: &mut InventoryItem,
    flags: &StepFlags,
    outcome: &mut PipelineOutcome,
) {
    // Step 1: photo planning
    if flags.skip_photos {
        outcome.skipped.push("photo_plan");
    } else {
        let input_dir = ctx.config.photos.input_dir.clone();
        match photos::find_item_photos(&item.sku, Path::new(&input_dir)) {
            Ok(found) if found.is_empty() => {
                println!("  No photos found for {} - skipping photo plan", item.sku);
                outcome.skipped.push("photo_plan");
            }
            Ok(found) => {
                let plan = photos::plan_processing(
                    &item.sku,
                    &found,
                    Path::new(&ctx.config.photos.output_dir),
                );
                println!(
                    "  Photos: {} sources, {} planned outputs",
                    found.len(),
                    plan.outputs.len() * photos::OUTPUT_VARIANTS.len()
                );
                outcome.completed.push("photo_plan");
            }
            Err(err) => outcome.errors.push(format!("Photo plan: {}", err)),
        }
    }

    // Step 2: listing content
    let opts = ListingOptions {
        style: flags.style,
        ..Default::default()
    };
    let content = if flags.skip_ai {
        generator::template_content(item, &opts)
    } else {
        ctx.generator.generate(item, &opts).await
    };
    println!(
        "  Content: {} title, {} chars",
        content.generated_by.as_str(),
        content.title.chars().count()
    );
    outcome.completed.push("listing_content");

    // Step 3: pricing analysis, storing the competitive price
    if flags.skip_pricing {
        outcome.skipped.push("pricing_analysis");
    } else {
        match ctx.analyzer.analyze(item).await {
            Ok(analysis) => {
                item.suggested_price = Some(analysis.suggested_prices.competitive);
                item.touch();
                match ctx.items.update_item(item).await {
                    Ok(()) => {
                        println!(
                            "  Pricing: competitive {} stored",
                            format_usd(analysis.suggested_prices.competitive)
                        );
                        outcome.completed.push("pricing_analysis");
                    }
                    Err(err) => outcome.errors.push(format!("Pricing save: {}", err)),
                }
            }
            Err(err) => outcome.errors.push(format!("Pricing analysis: {}", err)),
        }
    }
}

fn print_summary(sku: &str, outcome: &PipelineOutcome) {
    section(&format!("Pipeline complete: {}", sku));
    kv("Steps completed", outcome.completed.len());
    for step in &outcome.completed {
        bullet(step);
    }
    if !outcome.skipped.is_empty() {
        kv("Steps skipped", outcome.skipped.len());
        for step in &outcome.skipped {
            bullet(step);
        }
    }
    if outcome.errors.is_empty() {
        println!("\nPipeline completed successfully - item ready for listing");
    } else {
        kv("Errors", outcome.errors.len());
        for error in &outcome.errors {
            bullet(error);
        }
        println!("\nPipeline completed with errors - review the item manually");
    }
}

use crate::cli::PhotoCommands;
use crate::commands::{repo_err, require_item};
use crate::output::{bullet, kv, section};
use crate::AppContext;
use std::path::Path;
use thrift_catalog::repository::ItemRepository;
use thrift_listing::photos;

pub async fn run(command: PhotoCommands, ctx: &AppContext) -> anyhow::Result<()> {
    match command {
        PhotoCommands::Plan { sku, input_dir } => {
            let item = require_item(ctx, &sku).await?;
            let input_dir = input_dir.unwrap_or_else(|| ctx.config.photos.input_dir.clone());
            let found = photos::find_item_photos(&item.sku, Path::new(&input_dir))?;

            if found.is_empty() {
                println!("No photos found for {} in {}", item.sku, input_dir);
                return Ok(());
            }

            let plan = photos::plan_processing(
                &item.sku,
                &found,
                Path::new(&ctx.config.photos.output_dir),
            );

            section(&format!("Photo plan for {}", plan.sku));
            kv("Source photos", plan.outputs.len());
            kv("Output directory", plan.output_dir.display());
            for output in &plan.outputs {
                println!(
                    "  {} -> {}",
                    output.source.display(),
                    output.variants.join(", ")
                );
            }
            Ok(())
        }

        PhotoCommands::Batch { input_dir } => {
            let input_dir = input_dir.unwrap_or_else(|| ctx.config.photos.input_dir.clone());
            let scan = photos::scan_directory(Path::new(&input_dir))?;

            section(&format!("Photo scan: {}", input_dir));
            kv("Total photos", scan.total_photos);
            kv("Matched SKUs", scan.by_sku.len());
            kv("Unmatched photos", scan.unmatched);

            for (sku, photos) in &scan.by_sku {
                let known = ctx
                    .items
                    .get_item_by_sku(sku)
                    .await
                    .map_err(repo_err)?
                    .is_some();
                let marker = if known { "" } else { " (not in inventory)" };
                println!("  {}: {} photos{}", sku, photos.len(), marker);
            }
            Ok(())
        }

        PhotoCommands::Guide { category } => {
            let guide = photos::shot_checklist(&category);

            section(&format!("Photo guide: {}", guide.category));
            for (index, shot) in guide.shots.iter().enumerate() {
                println!("  {}. {}", index + 1, shot);
            }

            section("General tips");
            for tip in &guide.general_tips {
                bullet(tip);
            }
            Ok(())
        }
    }
}

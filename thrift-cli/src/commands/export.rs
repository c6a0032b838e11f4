use crate::cli::ExportCommands;
use crate::commands::repo_err;
use crate::AppContext;
use std::path::{Path, PathBuf};
use thrift_catalog::repository::{ItemFilter, ItemRepository};
use thrift_listing::export::{export_ebay_csv, export_json, ExportOptions};

pub async fn run(command: ExportCommands, ctx: &AppContext) -> anyhow::Result<()> {
    let items = ctx
        .items
        .list_items(&ItemFilter::default())
        .await
        .map_err(repo_err)?;

    match command {
        ExportCommands::EbayCsv {
            output,
            include_sold,
            category,
        } => {
            let path = output
                .map(PathBuf::from)
                .unwrap_or_else(|| default_path(ctx, "ebay_export.csv"));
            let opts = ExportOptions {
                include_sold,
                category,
            };
            let report = export_ebay_csv(&items, &path, &opts)?;
            println!(
                "Exported {} items to {}",
                report.count,
                report.path.display()
            );
            Ok(())
        }

        ExportCommands::Json {
            output,
            include_sold,
            automation,
        } => {
            let path = output
                .map(PathBuf::from)
                .unwrap_or_else(|| default_path(ctx, "inventory_export.json"));
            let opts = ExportOptions {
                include_sold,
                category: None,
            };
            let report = export_json(&items, &path, &opts, automation)?;
            println!(
                "Exported {} items to {}",
                report.count,
                report.path.display()
            );
            Ok(())
        }
    }
}

fn default_path(ctx: &AppContext, file_name: &str) -> PathBuf {
    Path::new(&ctx.config.export.drafts_dir).join(file_name)
}

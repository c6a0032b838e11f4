use crate::cli::ItemCommands;
use crate::commands::{repo_err, require_item};
use crate::output::{self, ellipsize, kv, section};
use crate::AppContext;
use tabled::Tabled;
use thrift_catalog::repository::{ItemFilter, ItemRepository};
use thrift_catalog::{Condition, InventorySummary, InventoryItem};
use thrift_shared::money::{format_usd, format_usd_opt};

#[derive(Tabled)]
struct ItemRow {
    #[tabled(rename = "SKU")]
    sku: String,
    #[tabled(rename = "Brand")]
    brand: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Condition")]
    condition: String,
    #[tabled(rename = "Cost")]
    cost: String,
    #[tabled(rename = "Suggested")]
    suggested: String,
    #[tabled(rename = "Listed")]
    listed: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl ItemRow {
    fn from_item(item: &InventoryItem) -> Self {
        Self {
            sku: item.sku.clone(),
            brand: item.brand.clone(),
            name: ellipsize(&item.name, 23),
            category: item.category.clone(),
            condition: item.condition.to_string(),
            cost: format_usd(item.cost),
            suggested: format_usd_opt(item.suggested_price),
            listed: format_usd_opt(item.listed_price),
            status: item.status.to_string(),
        }
    }
}

pub async fn run(command: ItemCommands, ctx: &AppContext) -> anyhow::Result<()> {
    match command {
        ItemCommands::Add {
            sku,
            category,
            brand,
            name,
            cost,
            size,
            color,
            condition,
        } => {
            let normalized = thrift_core::sku::normalize(&sku)?;
            let condition: Condition = condition.parse()?;

            let mut item = InventoryItem::new(normalized, category, brand, name, cost, condition);
            item.size = size;
            item.color = color;

            ctx.items.insert_item(&item).await.map_err(repo_err)?;
            println!("Added item '{}' with SKU {}", item.display_name(), item.sku);
            Ok(())
        }

        ItemCommands::List {
            status,
            category,
            limit,
        } => {
            let filter = ItemFilter {
                status: status
                    .as_deref()
                    .map(|s| s.parse::<thrift_catalog::ItemStatus>())
                    .transpose()?,
                category,
            };
            let mut items = ctx.items.list_items(&filter).await.map_err(repo_err)?;

            if items.is_empty() {
                println!("No items found matching criteria");
                return Ok(());
            }
            items.truncate(limit);

            let rows: Vec<ItemRow> = items.iter().map(ItemRow::from_item).collect();
            output::table(&rows);

            let summary = InventorySummary::from_items(&items);
            section("Summary");
            kv("Total items", summary.total_items);
            kv("Total cost", format_usd(summary.total_cost));
            kv(
                "Total suggested value",
                format_usd(summary.total_suggested_value),
            );
            kv("Potential profit", format_usd(summary.potential_profit));
            Ok(())
        }

        ItemCommands::Show { sku } => {
            let item = require_item(ctx, &sku).await?;
            section(&item.display_name());
            kv("SKU", &item.sku);
            kv("Category", &item.category);
            kv("Condition", item.condition);
            kv("Size", item.size.as_deref().unwrap_or("-"));
            kv("Color", item.color.as_deref().unwrap_or("-"));
            kv("Status", item.status);
            kv("Cost", format_usd(item.cost));
            kv("Suggested price", format_usd_opt(item.suggested_price));
            kv("Listed price", format_usd_opt(item.listed_price));
            kv("Sold price", format_usd_opt(item.sold_price));
            if item.sold_price.is_some() {
                kv("Total fees", format_usd_opt(item.total_fees));
                kv("Net profit", format_usd_opt(item.net_profit));
                if let Some(roi) = item.roi_percentage {
                    kv("ROI", format!("{}%", roi));
                }
            }
            kv("Photos", item.photo_paths.len());
            kv("Created", item.created_at.format("%Y-%m-%d"));
            Ok(())
        }

        ItemCommands::MarkListed { sku, price } => {
            let mut item = require_item(ctx, &sku).await?;
            item.mark_listed(price)?;
            ctx.items.update_item(&item).await.map_err(repo_err)?;
            println!("{} listed at {}", item.sku, format_usd(price));
            Ok(())
        }

        ItemCommands::MarkSold { sku, price } => {
            let mut item = require_item(ctx, &sku).await?;
            let sale = ctx.analyzer.fee_schedule().sale_record(price, item.cost);
            item.record_sale(sale)?;
            ctx.items.update_item(&item).await.map_err(repo_err)?;

            println!("{} sold at {}", item.sku, format_usd(price));
            kv("Total fees", format_usd(sale.total_fees));
            kv("Net profit", format_usd(sale.net_profit));
            kv("ROI", format!("{}%", sale.roi_percentage));
            Ok(())
        }
    }
}

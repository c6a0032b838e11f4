use crate::cli::CompsCommands;
use crate::output::{self, kv, section};
use crate::AppContext;
use tabled::Tabled;
use thrift_pricing::models::{Comparable, ListingStatus, ResearchFinding};
use thrift_shared::money::format_usd;

#[derive(Tabled)]
struct ComparableRow {
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Total")]
    total: String,
    #[tabled(rename = "Platform")]
    platform: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Scraped")]
    scraped: String,
}

pub async fn run(command: CompsCommands, ctx: &AppContext) -> anyhow::Result<()> {
    match command {
        CompsCommands::Add {
            search_term,
            category,
            title,
            price,
            shipping,
            platform,
            brand,
            condition,
            url,
            status,
        } => {
            let mut comparable =
                Comparable::new(search_term, category, title, price, shipping, platform);
            comparable.brand = brand;
            comparable.condition = condition;
            comparable.listing_url = url;
            comparable.listing_status = status
                .parse::<ListingStatus>()
                .map_err(anyhow::Error::msg)?;

            let finding = ResearchFinding {
                title: comparable.title.clone(),
                price: comparable.price,
                shipping_cost: comparable.shipping_cost,
                platform: comparable.platform.clone(),
                brand: comparable.brand.clone(),
                condition: comparable.condition.clone(),
                listing_url: comparable.listing_url.clone(),
                status: Some(comparable.listing_status.to_string()),
            };
            let stored = ctx
                .analyzer
                .record_research(&comparable.search_term, &comparable.category, &[finding])
                .await?;

            println!(
                "Stored {} comparable for '{}'",
                stored, comparable.search_term
            );
            Ok(())
        }

        CompsCommands::Import {
            file,
            search_term,
            category,
        } => {
            let raw = std::fs::read_to_string(&file)?;
            let findings: Vec<ResearchFinding> = serde_json::from_str(&raw)?;
            let total = findings.len();

            let stored = ctx
                .analyzer
                .record_research(&search_term, &category, &findings)
                .await?;

            println!(
                "Imported {}/{} comparables for '{}'",
                stored, total, search_term
            );
            Ok(())
        }

        CompsCommands::Show { term, limit } => {
            let comparables = ctx.analyzer.find_comparables(&term, limit).await?;

            if comparables.is_empty() {
                println!("No stored comparables match '{}'", term);
                return Ok(());
            }

            section(&format!("Comparables matching '{}'", term));
            let rows: Vec<ComparableRow> = comparables
                .iter()
                .map(|comp| ComparableRow {
                    title: output::ellipsize(&comp.title, 40),
                    price: format_usd(comp.price),
                    total: format_usd(comp.total_price),
                    platform: comp.platform.clone(),
                    status: comp.listing_status.to_string(),
                    scraped: comp.scraped_at.format("%Y-%m-%d").to_string(),
                })
                .collect();
            output::table(&rows);

            let prices: Vec<f64> = comparables.iter().map(|c| c.total_price).collect();
            let range = thrift_pricing::stats::summarize(&prices);
            section("Price range");
            kv(
                "Range",
                format!("{} - {}", format_usd(range.min), format_usd(range.max)),
            );
            kv("Average", format_usd(range.average));
            kv("Median", format_usd(range.median));
            Ok(())
        }
    }
}

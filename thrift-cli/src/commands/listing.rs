use crate::cli::ListingCommands;
use crate::commands::require_item;
use crate::output::{bullet, kv, section, strip_html};
use crate::AppContext;
use thrift_listing::title::analyze_title;
use thrift_listing::{generator, ListingOptions, ListingStyle};

pub async fn run(command: ListingCommands, ctx: &AppContext) -> anyhow::Result<()> {
    match command {
        ListingCommands::Describe {
            sku,
            style,
            no_ai,
            no_keywords,
        } => {
            let item = require_item(ctx, &sku).await?;
            let style: ListingStyle = style.parse().map_err(anyhow::Error::msg)?;
            let opts = ListingOptions {
                style,
                include_keywords: !no_keywords,
                ..Default::default()
            };

            let content = if no_ai {
                generator::template_content(&item, &opts)
            } else {
                ctx.generator.generate(&item, &opts).await
            };

            section(&format!(
                "Generated content ({})",
                content.generated_by.as_str()
            ));
            kv(
                "Title",
                format!("{} ({} chars)", content.title, content.title.chars().count()),
            );
            println!("\n{}", strip_html(&content.description));
            Ok(())
        }

        ListingCommands::Keywords { sku, count } => {
            let item = require_item(ctx, &sku).await?;
            let keywords = ctx.generator.keywords(&item, count).await;

            section(&format!("Suggested keywords for {}", item.sku));
            for (index, keyword) in keywords.iter().enumerate() {
                println!("  {:2}. {}", index + 1, keyword);
            }
            Ok(())
        }

        ListingCommands::AnalyzeTitle { title } => {
            let analysis = analyze_title(&title);

            section("Title analysis");
            kv(
                "Length",
                format!(
                    "{}/{} {}",
                    analysis.length,
                    analysis.max_length,
                    if analysis.length_ok { "ok" } else { "too long" }
                ),
            );
            kv("Word count", analysis.word_count);
            kv("Brand mentioned", analysis.has_brand);
            kv("Size included", analysis.has_size);
            kv("Color mentioned", analysis.has_color);
            kv("Condition stated", analysis.has_condition);

            if analysis.suggestions.is_empty() {
                println!("\nTitle looks well optimized");
            } else {
                section("Suggestions");
                for suggestion in &analysis.suggestions {
                    bullet(suggestion);
                }
            }
            Ok(())
        }
    }
}

use crate::keywords;
use crate::models::{ContentSource, ListingContent, ListingOptions, ListingStyle};
use std::sync::Arc;
use thrift_catalog::InventoryItem;
use thrift_core::completion::{CompletionRequest, TextCompletion};
use tracing::warn;

/// Generates listing titles, descriptions, and keywords for inventory items.
///
/// An AI backend is optional: when absent or failing, generation falls
/// through to the deterministic template path and tags the output source
/// accordingly.
pub struct ListingGenerator {
    completion: Option<Arc<dyn TextCompletion>>,
}

impl ListingGenerator {
    pub fn new(completion: Option<Arc<dyn TextCompletion>>) -> Self {
        Self { completion }
    }

    pub fn template_only() -> Self {
        Self { completion: None }
    }

    /// Generate title and description for an item.
    pub async fn generate(&self, item: &InventoryItem, opts: &ListingOptions) -> ListingContent {
        if let Some(backend) = &self.completion {
            match self.generate_ai(backend.as_ref(), item, opts).await {
                Ok(content) => return content,
                Err(err) => {
                    warn!(sku = %item.sku, %err, "AI generation failed, using template content");
                }
            }
        }
        template_content(item, opts)
    }

    /// Suggest search keywords for an item.
    pub async fn keywords(&self, item: &InventoryItem, count: usize) -> Vec<String> {
        if let Some(backend) = &self.completion {
            let request =
                CompletionRequest::new(keywords::keyword_prompt(item, count), 100, 0.3);
            match backend.complete(request).await {
                Ok(text) => {
                    let parsed = keywords::parse_keyword_response(&text);
                    if !parsed.is_empty() {
                        return parsed.into_iter().take(count).collect();
                    }
                }
                Err(err) => {
                    warn!(sku = %item.sku, %err, "AI keyword generation failed, using templates");
                }
            }
        }
        keywords::template_keywords(item, count)
    }

    async fn generate_ai(
        &self,
        backend: &dyn TextCompletion,
        item: &InventoryItem,
        opts: &ListingOptions,
    ) -> Result<ListingContent, Box<dyn std::error::Error + Send + Sync>> {
        let title = backend
            .complete(CompletionRequest::new(
                title_prompt(item, opts.max_title_length),
                50,
                0.3,
            ))
            .await?;

        let description = backend
            .complete(CompletionRequest::new(
                description_prompt(item, opts.style, opts.include_keywords),
                500,
                0.4,
            ))
            .await?;

        Ok(ListingContent {
            title: truncate_title(&title, opts.max_title_length),
            description,
            generated_by: ContentSource::Ai,
            style: opts.style,
        })
    }
}

/// Deterministic content used when no AI backend is available.
pub fn template_content(item: &InventoryItem, opts: &ListingOptions) -> ListingContent {
    ListingContent {
        title: template_title(item, opts.max_title_length),
        description: template_description(item, opts.style),
        generated_by: ContentSource::Template,
        style: opts.style,
    }
}

/// Brand, name, size, color, condition, joined and truncated.
pub fn template_title(item: &InventoryItem, max_length: usize) -> String {
    let mut parts = vec![item.brand.clone(), item.name.clone()];
    if let Some(size) = &item.size {
        parts.push(format!("Size {}", size));
    }
    if let Some(color) = &item.color {
        parts.push(color.clone());
    }
    parts.push(item.condition.to_string());
    truncate_title(&parts.join(" "), max_length)
}

/// Character-count truncation, safe on multi-byte input.
pub fn truncate_title(title: &str, max_length: usize) -> String {
    if title.chars().count() <= max_length {
        title.to_string()
    } else {
        title.chars().take(max_length).collect()
    }
}

fn template_description(item: &InventoryItem, style: ListingStyle) -> String {
    let size_line = item
        .size
        .as_deref()
        .map(|size| format!("<p>Size: {}</p>\n", size))
        .unwrap_or_default();
    let color_line = item
        .color
        .as_deref()
        .map(|color| format!("<p>Color: {}</p>\n", color))
        .unwrap_or_default();

    if style == ListingStyle::Minimalist {
        return format!(
            "<div>\n\
             <p><strong>{brand} {name}</strong></p>\n\
             <p>Condition: {condition}</p>\n\
             {size_line}{color_line}\
             <p>Fast shipping within 1 business day.</p>\n\
             <p>30-day returns accepted.</p>\n\
             </div>",
            brand = item.brand,
            name = item.name,
            condition = item.condition,
            size_line = size_line,
            color_line = color_line,
        );
    }

    let size_item = item
        .size
        .as_deref()
        .map(|size| format!("<li>Size: {}</li>\n", size))
        .unwrap_or_default();
    let color_item = item
        .color
        .as_deref()
        .map(|color| format!("<li>Color: {}</li>\n", color))
        .unwrap_or_default();

    format!(
        "<div>\n\
         <h3>{brand} {name}</h3>\n\
         <p>Great find from our thrift collection! This <strong>{brand} {name}</strong> \
         is in <strong>{condition}</strong> condition and ready for a new home.</p>\n\
         <p><strong>Details:</strong></p>\n\
         <ul>\n\
         <li>Brand: {brand}</li>\n\
         <li>Item: {name}</li>\n\
         <li>Condition: {condition}</li>\n\
         {size_item}{color_item}\
         </ul>\n\
         <p>Please review photos carefully as they are part of the description. \
         Items are gently used thrift finds and may show normal wear consistent with age and use.</p>\n\
         <p><strong>Shipping &amp; Returns:</strong></p>\n\
         <ul>\n\
         <li>Fast shipping within 1 business day</li>\n\
         <li>30-day returns accepted</li>\n\
         <li>Careful packaging to ensure safe delivery</li>\n\
         </ul>\n\
         <p>Questions? Please feel free to message us - we're happy to help!</p>\n\
         </div>",
        brand = item.brand,
        name = item.name,
        condition = item.condition,
        size_item = size_item,
        color_item = color_item,
    )
}

fn title_prompt(item: &InventoryItem, max_length: usize) -> String {
    format!(
        "Create an optimized eBay listing title for this item:\n\n\
         Brand: {brand}\n\
         Item: {name}\n\
         Category: {category}\n\
         Size: {size}\n\
         Color: {color}\n\
         Condition: {condition}\n\n\
         Requirements:\n\
         - Maximum {max_length} characters\n\
         - Include brand name prominently\n\
         - Use eBay-friendly keywords for searchability\n\
         - Include size and color if available\n\
         - Professional tone\n\
         - No promotional language like \"LOOK!\" or \"WOW!\"\n\n\
         Return only the title, nothing else.",
        brand = item.brand,
        name = item.name,
        category = item.category,
        size = item.size.as_deref().unwrap_or("N/A"),
        color = item.color.as_deref().unwrap_or("N/A"),
        condition = item.condition,
        max_length = max_length,
    )
}

fn description_prompt(item: &InventoryItem, style: ListingStyle, include_keywords: bool) -> String {
    let keyword_line = if include_keywords {
        "Include relevant search keywords naturally"
    } else {
        "Focus on description without keyword stuffing"
    };

    format!(
        "Create an eBay listing description for this thrift store find:\n\n\
         Brand: {brand}\n\
         Item: {name}\n\
         Category: {category}\n\
         Size: {size}\n\
         Color: {color}\n\
         Condition: {condition}\n\n\
         Style: {style}\n\n\
         Requirements:\n\
         - Write in HTML format for eBay listings\n\
         - Include condition details and what to expect\n\
         - Mention fast shipping and return policy\n\
         - {keyword_line}\n\
         - Encourage buyers to ask questions\n\
         - Professional but approachable tone\n\
         - 150-300 words",
        brand = item.brand,
        name = item.name,
        category = item.category,
        size = item.size.as_deref().unwrap_or("Not specified"),
        color = item.color.as_deref().unwrap_or("See photos"),
        condition = item.condition,
        style = style.instruction(),
        keyword_line = keyword_line,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use thrift_catalog::Condition;

    fn sample_item() -> InventoryItem {
        let mut item = InventoryItem::new(
            "25-0001".to_string(),
            "Clothing".to_string(),
            "Patagonia".to_string(),
            "Better Sweater Fleece Jacket".to_string(),
            8.50,
            Condition::Good,
        );
        item.size = Some("M".to_string());
        item.color = Some("Navy".to_string());
        item
    }

    struct FailingBackend;

    #[async_trait]
    impl TextCompletion for FailingBackend {
        async fn complete(
            &self,
            _request: CompletionRequest,
        ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
            Err("backend unavailable".into())
        }
    }

    struct CannedBackend;

    #[async_trait]
    impl TextCompletion for CannedBackend {
        async fn complete(
            &self,
            request: CompletionRequest,
        ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
            if request.max_tokens == 50 {
                Ok("Patagonia Better Sweater Fleece Jacket Mens M Navy".to_string())
            } else {
                Ok("<div>Generated description</div>".to_string())
            }
        }
    }

    #[test]
    fn test_template_title_order_and_truncation() {
        let item = sample_item();
        let title = template_title(&item, 80);
        assert_eq!(
            title,
            "Patagonia Better Sweater Fleece Jacket Size M Navy Good"
        );

        let short = template_title(&item, 20);
        assert_eq!(short.chars().count(), 20);
        assert!(short.starts_with("Patagonia"));
    }

    #[test]
    fn test_minimalist_description_skips_marketing_copy() {
        let item = sample_item();
        let opts = ListingOptions {
            style: ListingStyle::Minimalist,
            ..Default::default()
        };
        let content = template_content(&item, &opts);
        assert!(content.description.contains("Condition: Good"));
        assert!(!content.description.contains("Great find"));
        assert_eq!(content.generated_by, ContentSource::Template);
    }

    #[test]
    fn test_standard_description_lists_details() {
        let item = sample_item();
        let content = template_content(&item, &ListingOptions::default());
        assert!(content.description.contains("<li>Size: M</li>"));
        assert!(content.description.contains("<li>Color: Navy</li>"));
        assert!(content.description.contains("30-day returns"));
    }

    #[tokio::test]
    async fn test_failed_backend_falls_back_to_template() {
        let generator = ListingGenerator::new(Some(Arc::new(FailingBackend)));
        let content = generator
            .generate(&sample_item(), &ListingOptions::default())
            .await;
        assert_eq!(content.generated_by, ContentSource::Template);
        assert!(content.title.contains("Patagonia"));
    }

    #[tokio::test]
    async fn test_working_backend_is_used() {
        let generator = ListingGenerator::new(Some(Arc::new(CannedBackend)));
        let content = generator
            .generate(&sample_item(), &ListingOptions::default())
            .await;
        assert_eq!(content.generated_by, ContentSource::Ai);
        assert_eq!(
            content.title,
            "Patagonia Better Sweater Fleece Jacket Mens M Navy"
        );
        assert_eq!(content.description, "<div>Generated description</div>");
    }

    #[test]
    fn test_prompts_carry_item_fields() {
        let item = sample_item();
        let prompt = title_prompt(&item, 80);
        assert!(prompt.contains("Brand: Patagonia"));
        assert!(prompt.contains("Maximum 80 characters"));

        let prompt = description_prompt(&item, ListingStyle::Casual, false);
        assert!(prompt.contains("Friendly and conversational"));
        assert!(prompt.contains("without keyword stuffing"));
    }
}

use thrift_catalog::InventoryItem;

/// Extra keywords appended per category on the template path.
fn category_extras(category: &str) -> &'static [&'static str] {
    match category.to_lowercase().as_str() {
        "clothing" => &["fashion", "style", "apparel", "wear"],
        "electronics" => &["tech", "gadget", "device"],
        "home" => &["decor", "household", "interior"],
        "books" => &["literature", "reading", "educational"],
        "toys" => &["play", "kids", "children", "fun"],
        _ => &[],
    }
}

/// Deterministic keyword suggestions built from item fields, with
/// order-preserving dedup and a hard cap at `count`.
pub fn template_keywords(item: &InventoryItem, count: usize) -> Vec<String> {
    let mut keywords = vec![
        item.brand.to_lowercase(),
        item.name.to_lowercase(),
        item.category.to_lowercase(),
        item.condition.to_string().to_lowercase(),
    ];

    if let Some(size) = &item.size {
        keywords.push(size.to_lowercase());
        keywords.push(format!("size {}", size.to_lowercase()));
    }
    if let Some(color) = &item.color {
        keywords.push(color.to_lowercase());
    }

    keywords.extend(
        category_extras(&item.category)
            .iter()
            .map(|extra| extra.to_string()),
    );

    dedup_preserving_order(keywords)
        .into_iter()
        .take(count)
        .collect()
}

/// Prompt for the AI keyword path.
pub fn keyword_prompt(item: &InventoryItem, count: usize) -> String {
    format!(
        "Generate {count} relevant eBay search keywords for this item:\n\n\
         Brand: {brand}\n\
         Item: {name}\n\
         Category: {category}\n\
         Size: {size}\n\
         Color: {color}\n\n\
         Requirements:\n\
         - Focus on what buyers would search for\n\
         - Include brand, item type, and key attributes\n\
         - Mix specific and general terms\n\
         - No duplicate or overly similar keywords\n\
         - Return as a comma-separated list\n\n\
         Example: vintage, authentic, designer, size medium, navy blue, cotton",
        count = count,
        brand = item.brand,
        name = item.name,
        category = item.category,
        size = item.size.as_deref().unwrap_or("N/A"),
        color = item.color.as_deref().unwrap_or("N/A"),
    )
}

/// Parse a keyword response. Handles both comma-separated lists and
/// numbered lists ("1. vintage\n2. cotton").
pub fn parse_keyword_response(text: &str) -> Vec<String> {
    let trimmed = text.trim();
    let keywords: Vec<String> = if trimmed.starts_with("1.") {
        trimmed
            .lines()
            .filter_map(|line| line.split_once(". ").map(|(_, rest)| rest.trim().to_string()))
            .filter(|keyword| !keyword.is_empty())
            .collect()
    } else {
        trimmed
            .split(',')
            .map(|keyword| keyword.trim().to_string())
            .filter(|keyword| !keyword.is_empty())
            .collect()
    };
    dedup_preserving_order(keywords)
}

fn dedup_preserving_order(keywords: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    keywords
        .into_iter()
        .filter(|keyword| seen.insert(keyword.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use thrift_catalog::Condition;

    fn sample_item() -> InventoryItem {
        let mut item = InventoryItem::new(
            "25-0001".to_string(),
            "Clothing".to_string(),
            "Nike".to_string(),
            "Hoodie".to_string(),
            6.0,
            Condition::Good,
        );
        item.size = Some("L".to_string());
        item.color = Some("Black".to_string());
        item
    }

    #[test]
    fn test_template_keywords_order_and_extras() {
        let keywords = template_keywords(&sample_item(), 10);
        assert_eq!(
            keywords,
            vec![
                "nike", "hoodie", "clothing", "good", "l", "size l", "black", "fashion", "style",
                "apparel",
            ]
        );
    }

    #[test]
    fn test_template_keywords_dedup() {
        let mut item = sample_item();
        item.name = "Nike".to_string(); // brand repeated in name
        let keywords = template_keywords(&item, 10);
        assert_eq!(keywords.iter().filter(|k| *k == "nike").count(), 1);
    }

    #[test]
    fn test_unknown_category_has_no_extras() {
        let mut item = sample_item();
        item.category = "Jewelry".to_string();
        let keywords = template_keywords(&item, 20);
        assert!(!keywords.contains(&"fashion".to_string()));
    }

    #[test]
    fn test_parse_comma_separated() {
        let parsed = parse_keyword_response("vintage, cotton , navy blue,, designer");
        assert_eq!(parsed, vec!["vintage", "cotton", "navy blue", "designer"]);
    }

    #[test]
    fn test_parse_numbered_list() {
        let parsed = parse_keyword_response("1. vintage\n2. cotton\n3. navy blue");
        assert_eq!(parsed, vec!["vintage", "cotton", "navy blue"]);
    }
}

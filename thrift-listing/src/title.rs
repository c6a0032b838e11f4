use crate::models::TitleAnalysis;

/// eBay's title length ceiling.
pub const MAX_TITLE_LENGTH: usize = 80;

const COMMON_BRANDS: [&str; 8] = [
    "nike",
    "adidas",
    "apple",
    "samsung",
    "levi",
    "patagonia",
    "north face",
    "carhartt",
];

const SIZE_WORDS: [&str; 9] = [
    "size", "small", "medium", "large", "xl", "xs", "s", "m", "l",
];

const COLOR_WORDS: [&str; 9] = [
    "black", "white", "red", "blue", "green", "yellow", "pink", "gray", "brown",
];

const CONDITION_WORDS: [&str; 6] = ["new", "excellent", "good", "fair", "used", "vintage"];

/// Check a listing title against eBay search optimization heuristics.
pub fn analyze_title(title: &str) -> TitleAnalysis {
    let lower = title.to_lowercase();
    let words: Vec<&str> = lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .collect();

    let length = title.chars().count();
    let length_ok = length <= MAX_TITLE_LENGTH;
    let has_brand = COMMON_BRANDS.iter().any(|brand| lower.contains(brand));
    // Single-letter size tokens must stand alone; substring matching would
    // hit on nearly every title.
    let has_size = words.iter().any(|word| SIZE_WORDS.contains(word));
    let has_color = words.iter().any(|word| COLOR_WORDS.contains(word));
    let has_condition = words.iter().any(|word| CONDITION_WORDS.contains(word));

    let mut suggestions = Vec::new();
    if !length_ok {
        suggestions.push(format!(
            "Title too long by {} characters",
            length - MAX_TITLE_LENGTH
        ));
    }
    if !has_brand {
        suggestions.push("Consider including brand name for better searchability".to_string());
    }
    if length < 50 {
        suggestions.push("Title could be longer to include more keywords".to_string());
    }

    TitleAnalysis {
        length,
        max_length: MAX_TITLE_LENGTH,
        length_ok,
        word_count: words.len(),
        has_brand,
        has_size,
        has_color,
        has_condition,
        suggestions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_formed_title() {
        let analysis =
            analyze_title("Patagonia Better Sweater Fleece Jacket Mens Size M Navy Blue Excellent");
        assert!(analysis.length_ok);
        assert!(analysis.has_brand);
        assert!(analysis.has_size);
        assert!(analysis.has_color);
        assert!(analysis.has_condition);
        assert!(analysis.suggestions.is_empty());
    }

    #[test]
    fn test_size_requires_standalone_token() {
        let analysis = analyze_title("Patagonia fleece jacket navy excellent condition zip");
        assert!(!analysis.has_size, "letters inside words must not count as sizes");

        let with_size = analyze_title("Patagonia fleece jacket M navy excellent condition");
        assert!(with_size.has_size);
    }

    #[test]
    fn test_too_long_title_is_flagged() {
        let long_title = "Vintage ".repeat(15);
        let analysis = analyze_title(long_title.trim());
        assert!(!analysis.length_ok);
        assert!(analysis.suggestions[0].contains("Title too long by"));
    }

    #[test]
    fn test_short_title_suggestions() {
        let analysis = analyze_title("Old lamp");
        assert!(!analysis.has_brand);
        assert!(analysis
            .suggestions
            .iter()
            .any(|s| s.contains("brand name")));
        assert!(analysis
            .suggestions
            .iter()
            .any(|s| s.contains("could be longer")));
    }
}

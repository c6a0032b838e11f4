use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Voice used for generated descriptions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ListingStyle {
    Professional,
    Casual,
    Enthusiastic,
    Minimalist,
}

impl ListingStyle {
    /// Instruction text injected into generation prompts.
    pub fn instruction(&self) -> &'static str {
        match self {
            ListingStyle::Professional => {
                "Professional and detailed, highlighting quality and value"
            }
            ListingStyle::Casual => "Friendly and conversational, like talking to a friend",
            ListingStyle::Enthusiastic => "Excited and energetic, emphasizing the great find",
            ListingStyle::Minimalist => "Clean and concise, focusing on key details only",
        }
    }
}

impl fmt::Display for ListingStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ListingStyle::Professional => "professional",
            ListingStyle::Casual => "casual",
            ListingStyle::Enthusiastic => "enthusiastic",
            ListingStyle::Minimalist => "minimalist",
        };
        f.write_str(name)
    }
}

impl FromStr for ListingStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "professional" => Ok(ListingStyle::Professional),
            "casual" => Ok(ListingStyle::Casual),
            "enthusiastic" => Ok(ListingStyle::Enthusiastic),
            "minimalist" => Ok(ListingStyle::Minimalist),
            other => Err(format!("unknown listing style: {}", other)),
        }
    }
}

/// How a piece of content was produced.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContentSource {
    Ai,
    Template,
}

impl ContentSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentSource::Ai => "ai",
            ContentSource::Template => "template",
        }
    }
}

/// Generated title and description for one item.
#[derive(Debug, Clone, Serialize)]
pub struct ListingContent {
    pub title: String,
    pub description: String,
    pub generated_by: ContentSource,
    pub style: ListingStyle,
}

/// Knobs for content generation.
#[derive(Debug, Clone)]
pub struct ListingOptions {
    pub style: ListingStyle,
    pub include_keywords: bool,
    pub max_title_length: usize,
}

impl Default for ListingOptions {
    fn default() -> Self {
        Self {
            style: ListingStyle::Professional,
            include_keywords: true,
            max_title_length: 80,
        }
    }
}

/// Optimization check results for a listing title.
#[derive(Debug, Clone, Serialize)]
pub struct TitleAnalysis {
    pub length: usize,
    pub max_length: usize,
    pub length_ok: bool,
    pub word_count: usize,
    pub has_brand: bool,
    pub has_size: bool,
    pub has_color: bool,
    pub has_condition: bool,
    pub suggestions: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_parsing() {
        assert_eq!(
            "Enthusiastic".parse::<ListingStyle>().unwrap(),
            ListingStyle::Enthusiastic
        );
        assert!("breathless".parse::<ListingStyle>().is_err());
    }

    #[test]
    fn test_default_options() {
        let opts = ListingOptions::default();
        assert_eq!(opts.style, ListingStyle::Professional);
        assert_eq!(opts.max_title_length, 80);
        assert!(opts.include_keywords);
    }
}

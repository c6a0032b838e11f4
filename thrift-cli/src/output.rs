//! Human-readable output helpers for command results.

use tabled::{Table, Tabled};
use thrift_pricing::models::Urgency;

/// Print a titled section divider.
pub fn section(title: &str) {
    println!("\n{}", title);
    println!("{}", "-".repeat(title.len()));
}

/// Print an aligned label/value line.
pub fn kv(label: &str, value: impl std::fmt::Display) {
    println!("  {:<22} {}", format!("{}:", label), value);
}

/// Print a bulleted line.
pub fn bullet(text: impl std::fmt::Display) {
    println!("  - {}", text);
}

/// Render rows as a table, or a placeholder when empty.
pub fn table<T: Tabled>(rows: &[T]) {
    if rows.is_empty() {
        println!("(no results)");
    } else {
        println!("{}", Table::new(rows));
    }
}

/// Marker shown next to adjustment suggestions.
pub fn urgency_marker(urgency: Urgency) -> &'static str {
    match urgency {
        Urgency::High => "[HIGH]",
        Urgency::Medium => "[MEDIUM]",
    }
}

/// Shorten a string for table display.
pub fn ellipsize(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}

/// Strip HTML tags for terminal display of generated descriptions.
pub fn strip_html(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    // collapse blank lines left behind by block tags
    let lines: Vec<&str> = out
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_html() {
        let html = "<div>\n<p><strong>Nike Hoodie</strong></p>\n<p>Condition: Good</p>\n</div>";
        assert_eq!(strip_html(html), "Nike Hoodie\nCondition: Good");
    }

    #[test]
    fn test_ellipsize() {
        assert_eq!(ellipsize("short", 10), "short");
        assert_eq!(ellipsize("a much longer string", 10), "a much ...");
    }
}

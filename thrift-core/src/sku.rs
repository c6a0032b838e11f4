use crate::{CoreError, CoreResult};

/// Validate a SKU for storage: non-empty, uppercase alphanumerics plus
/// `-`/`_`, at most 32 characters. Returns the normalized (uppercased) form.
pub fn normalize(raw: &str) -> CoreResult<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("SKU must not be empty".to_string()));
    }
    if trimmed.len() > 32 {
        return Err(CoreError::Validation(format!(
            "SKU too long ({} chars, max 32)",
            trimmed.len()
        )));
    }
    let normalized: String = trimmed.to_uppercase();
    if !normalized
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(CoreError::Validation(format!(
            "SKU '{}' contains invalid characters",
            trimmed
        )));
    }
    Ok(normalized)
}

/// Extract a SKU from a photo filename.
///
/// Recognized patterns, tried in order:
/// - `25-0001` (two digits, dash, four digits)
/// - `ABC-123` (2-3 letters, dash, 3-5 digits)
/// - `SKU_123` / `SKU-ABC` (explicit prefix)
/// - `ABC123_front.jpg` (leading token of 6+ alphanumerics before `_`)
pub fn extract_from_filename(filename: &str) -> Option<String> {
    let upper = filename.to_uppercase();

    if let Some(found) = find_digit_pair_code(&upper) {
        return Some(found);
    }
    if let Some(found) = find_letter_prefix_code(&upper) {
        return Some(found);
    }
    if let Some(found) = find_explicit_prefix(&upper) {
        return Some(found);
    }
    find_leading_token(&upper)
}

/// `\d{2}-\d{4}` anywhere in the name.
fn find_digit_pair_code(upper: &str) -> Option<String> {
    let bytes = upper.as_bytes();
    for start in 0..bytes.len().saturating_sub(6) {
        let window = &bytes[start..start + 7];
        let ok = window[0].is_ascii_digit()
            && window[1].is_ascii_digit()
            && window[2] == b'-'
            && window[3..7].iter().all(|b| b.is_ascii_digit());
        // Must not be part of a longer digit run on either side.
        let left_clear = start == 0 || !bytes[start - 1].is_ascii_digit();
        let right_clear = start + 7 >= bytes.len() || !bytes[start + 7].is_ascii_digit();
        if ok && left_clear && right_clear {
            return Some(upper[start..start + 7].to_string());
        }
    }
    None
}

/// `[A-Z]{2,3}-\d{3,5}` anywhere in the name.
fn find_letter_prefix_code(upper: &str) -> Option<String> {
    let bytes = upper.as_bytes();
    for start in 0..bytes.len() {
        if !bytes[start].is_ascii_uppercase() {
            continue;
        }
        if start > 0 && bytes[start - 1].is_ascii_uppercase() {
            continue;
        }
        let letters = bytes[start..]
            .iter()
            .take_while(|b| b.is_ascii_uppercase())
            .count();
        if !(2..=3).contains(&letters) {
            continue;
        }
        let dash = start + letters;
        if bytes.get(dash) != Some(&b'-') {
            continue;
        }
        let digits = bytes[dash + 1..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        if (3..=5).contains(&digits) {
            return Some(upper[start..dash + 1 + digits].to_string());
        }
    }
    None
}

/// `SKU_...` / `SKU-...` explicit prefix; the code is the full `SKU` token.
fn find_explicit_prefix(upper: &str) -> Option<String> {
    let idx = upper.find("SKU")?;
    let rest = &upper[idx + 3..];
    let rest = rest.strip_prefix(['_', '-']).unwrap_or(rest);
    let code: String = rest
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect();
    if code.is_empty() {
        None
    } else {
        Some(format!("SKU-{}", code))
    }
}

/// Leading token of at least 6 alphanumerics terminated by `_`.
fn find_leading_token(upper: &str) -> Option<String> {
    let (token, _) = upper.split_once('_')?;
    if token.len() >= 6 && token.chars().all(|c| c.is_ascii_alphanumeric()) {
        Some(token.to_string())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_uppercases() {
        assert_eq!(normalize("ab-123").unwrap(), "AB-123");
        assert_eq!(normalize("  25-0001 ").unwrap(), "25-0001");
    }

    #[test]
    fn test_normalize_rejects_bad_input() {
        assert!(normalize("").is_err());
        assert!(normalize("has space").is_err());
        assert!(normalize(&"X".repeat(40)).is_err());
    }

    #[test]
    fn test_extract_digit_pair() {
        assert_eq!(
            extract_from_filename("25-0001_front.jpg"),
            Some("25-0001".to_string())
        );
        assert_eq!(
            extract_from_filename("photos/item 25-0001 (2).png"),
            Some("25-0001".to_string())
        );
    }

    #[test]
    fn test_extract_letter_prefix() {
        assert_eq!(
            extract_from_filename("abc-123_back.jpg"),
            Some("ABC-123".to_string())
        );
    }

    #[test]
    fn test_extract_explicit_prefix() {
        assert_eq!(
            extract_from_filename("sku_777 side.jpg"),
            Some("SKU-777".to_string())
        );
    }

    #[test]
    fn test_extract_leading_token() {
        assert_eq!(
            extract_from_filename("JACKET01_main.jpg"),
            Some("JACKET01".to_string())
        );
        assert_eq!(extract_from_filename("img_0001.jpg"), None);
    }
}

/// Round a dollar amount to 2 decimal places.
///
/// All monetary outputs cross this before being stored or shown; internal
/// arithmetic stays unrounded so strategy math matches the fee model exactly.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Round a percentage to 1 decimal place (used for ROI figures).
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Format a dollar amount for human-readable output.
pub fn format_usd(value: f64) -> String {
    format!("${:.2}", value)
}

/// Format an optional dollar amount, showing "-" when absent.
pub fn format_usd_opt(value: Option<f64>) -> String {
    value.map(format_usd).unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(11.826636), 11.83);
        assert_eq!(round2(12.417968), 12.42);
        assert_eq!(round2(10.0), 10.0);
        assert_eq!(round2(0.005), 0.01);
    }

    #[test]
    fn test_round1() {
        assert_eq!(round1(87.25), 87.3);
        assert_eq!(round1(0.0), 0.0);
    }

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(7.5), "$7.50");
        assert_eq!(format_usd_opt(None), "-");
        assert_eq!(format_usd_opt(Some(12.0)), "$12.00");
    }
}

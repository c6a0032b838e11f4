use crate::models::PriceRange;
use thrift_shared::money::round2;

/// Reduce a set of comparable prices to min/max/mean/median.
///
/// Mean and median are rounded to 2 decimals; an empty input yields the
/// all-zero range. No outlier rejection and no weighting: every sample
/// counts the same, duplicates included.
pub fn summarize(prices: &[f64]) -> PriceRange {
    if prices.is_empty() {
        return PriceRange::zero();
    }

    let mut sorted = prices.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let min = sorted[0];
    let max = sorted[sorted.len() - 1];
    let average = sorted.iter().sum::<f64>() / sorted.len() as f64;

    PriceRange {
        min,
        max,
        average: round2(average),
        median: round2(median_of_sorted(&sorted)),
    }
}

fn median_of_sorted(sorted: &[f64]) -> f64 {
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted[mid]
    } else {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_is_all_zero() {
        let range = summarize(&[]);
        assert_eq!(range, PriceRange::zero());
    }

    #[test]
    fn test_three_values() {
        let range = summarize(&[10.0, 20.0, 30.0]);
        assert_eq!(range.min, 10.0);
        assert_eq!(range.max, 30.0);
        assert_eq!(range.average, 20.0);
        assert_eq!(range.median, 20.0);
    }

    #[test]
    fn test_even_count_median_averages_middles() {
        let range = summarize(&[10.0, 20.0, 30.0, 100.0]);
        assert_eq!(range.median, 25.0);
        assert_eq!(range.average, 40.0);
    }

    #[test]
    fn test_unsorted_input() {
        let range = summarize(&[30.0, 10.0, 20.0]);
        assert_eq!(range.min, 10.0);
        assert_eq!(range.max, 30.0);
        assert_eq!(range.median, 20.0);
    }

    #[test]
    fn test_duplicates_are_counted() {
        let range = summarize(&[10.0, 10.0, 40.0]);
        assert_eq!(range.average, 20.0);
        assert_eq!(range.median, 10.0);
    }
}

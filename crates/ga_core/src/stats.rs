//! Small numeric helpers shared by the aggregation pipelines.

/// Median of `values`; the mean of the two middle values for even lengths.
///
/// Non-finite values are ignored. Returns `None` when nothing is left.
pub fn median(values: &[f64]) -> Option<f64> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(|a, b| a.total_cmp(b));

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Round half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Integer success percentage, truncated; 0 when there were no attempts.
pub fn success_pct(successful: u32, attempted: u32) -> u32 {
    if attempted == 0 {
        0
    } else {
        (successful as f64 / attempted as f64 * 100.0) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_median() {
        assert_eq!(median(&[]), None);
        assert_eq!(median(&[3.0]), Some(3.0));
        assert_eq!(median(&[5.0, 1.0, 3.0]), Some(3.0));
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
        assert_eq!(median(&[f64::NAN, 2.0]), Some(2.0));
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(0.12345, 3), 0.123);
        assert_eq!(round_to(0.1236, 3), 0.124);
        assert_eq!(round_to(2.0, 3), 2.0);
    }

    #[test]
    fn test_success_pct_truncates() {
        assert_eq!(success_pct(2, 3), 66);
        assert_eq!(success_pct(0, 0), 0);
        assert_eq!(success_pct(5, 5), 100);
    }
}

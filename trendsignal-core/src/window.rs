//! Windowing helpers shared by every indicator.
//!
//! Indicators call these instead of repeating their own length guards, so
//! the "too short → fallback" decision is made the same way everywhere.

/// True when `series` holds at least `n` points.
pub fn require_min_length<T>(series: &[T], n: usize) -> bool {
    series.len() >= n
}

/// Last element of `series`, or `default` when it is empty.
pub fn last_or_default(series: &[f64], default: f64) -> f64 {
    series.last().copied().unwrap_or(default)
}

/// The trailing `n` points of `series` (the whole series when shorter).
pub fn trailing(series: &[f64], n: usize) -> &[f64] {
    &series[series.len().saturating_sub(n)..]
}

/// Largest power of two not above the largest magnitude in `values`, or 1.0
/// when that magnitude is zero, subnormal, or not finite.
///
/// Dividing by a power of two is exact, so sums taken over scaled values
/// round exactly like the unscaled sums would, but stay finite for any
/// finite input.
pub(crate) fn magnitude_scale(values: &[f64]) -> f64 {
    let max = values.iter().fold(0.0_f64, |m, v| m.max(v.abs()));
    if !max.is_finite() || max < f64::MIN_POSITIVE {
        return 1.0;
    }
    f64::from_bits(max.to_bits() & EXPONENT_BITS)
}

const EXPONENT_BITS: u64 = 0x7FF0_0000_0000_0000;

/// Arithmetic mean. Callers guarantee a non-empty slice.
pub(crate) fn mean(values: &[f64]) -> f64 {
    let scale = magnitude_scale(values);
    values.iter().map(|v| v / scale).sum::<f64>() / values.len() as f64 * scale
}

/// Minimum and maximum of a non-empty slice.
pub(crate) fn min_max(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn min_length_boundaries() {
        assert!(require_min_length(&[1.0, 2.0], 2));
        assert!(!require_min_length(&[1.0], 2));
        assert!(require_min_length::<f64>(&[], 0));
    }

    #[test]
    fn last_or_default_empty() {
        assert_eq!(last_or_default(&[], 0.0), 0.0);
        assert_eq!(last_or_default(&[3.0, 7.0], 0.0), 7.0);
    }

    #[test]
    fn trailing_clamps_to_series() {
        let s = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(trailing(&s, 2), &[3.0, 4.0]);
        assert_eq!(trailing(&s, 10), &s[..]);
        assert!(trailing(&s, 0).is_empty());
    }

    #[test]
    fn magnitude_scale_is_power_of_two_below_max() {
        assert_eq!(magnitude_scale(&[3.0, -5.0, 1.0]), 4.0);
        assert_eq!(magnitude_scale(&[8.0]), 8.0);
        assert_eq!(magnitude_scale(&[0.3]), 0.25);
        assert_eq!(magnitude_scale(&[0.0, 0.0]), 1.0);
        assert_eq!(magnitude_scale(&[]), 1.0);
        assert_eq!(magnitude_scale(&[f64::MAX]), 2.0_f64.powi(1023));
    }

    #[test]
    fn mean_of_huge_values_stays_finite() {
        let m = mean(&[f64::MAX; 20]);
        assert!(m.is_finite());
        assert!((m / f64::MAX - 1.0).abs() < 1e-12);
        assert_eq!(mean(&[0.0, f64::MAX]), f64::MAX / 2.0);
    }

    #[test]
    fn mean_unchanged_on_ordinary_values() {
        let values = [44.0, 44.34, 44.09, 43.61, 44.33];
        let plain = values.iter().sum::<f64>() / values.len() as f64;
        assert_eq!(mean(&values), plain);
    }

    #[test]
    fn min_max_of_window() {
        assert_eq!(min_max(&[3.0, -1.0, 8.0]), (-1.0, 8.0));
    }
}

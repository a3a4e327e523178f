//! Whole-series reductions that skip missing values

use ndarray::ArrayView1;

/// Minimum ignoring `NaN`; all-missing or empty series give `NaN`.
pub fn nan_min(series: ArrayView1<'_, f64>) -> f64 {
    series
        .iter()
        .copied()
        .filter(|v| !v.is_nan())
        .reduce(f64::min)
        .unwrap_or(f64::NAN)
}

/// Maximum ignoring `NaN`; all-missing or empty series give `NaN`.
pub fn nan_max(series: ArrayView1<'_, f64>) -> f64 {
    series
        .iter()
        .copied()
        .filter(|v| !v.is_nan())
        .reduce(f64::max)
        .unwrap_or(f64::NAN)
}

/// Quantile with linear interpolation between order statistics, ignoring `NaN`.
///
/// For `n` valid values the quantile sits at fractional rank `q * (n - 1)`,
/// the convention used by numpy's default `linear` method. `q` is expected in
/// `[0, 1]`; callers validate it. Empty or all-missing series give `NaN`.
///
/// # Example
/// ```
/// use hazard_indices_core::stats::nan_quantile;
/// use ndarray::array;
///
/// let q = nan_quantile(array![4.0, 1.0, f64::NAN, 3.0, 2.0].view(), 0.5);
/// assert_eq!(q, 2.5);
/// ```
pub fn nan_quantile(series: ArrayView1<'_, f64>, q: f64) -> f64 {
    let mut sorted: Vec<f64> = series.iter().copied().filter(|v| !v.is_nan()).collect();
    if sorted.is_empty() {
        return f64::NAN;
    }
    sorted.sort_unstable_by(f64::total_cmp);

    let pos = q * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let frac = pos - lower as f64;

    if lower == upper {
        sorted[lower]
    } else {
        sorted[lower] + (sorted[upper] - sorted[lower]) * frac
    }
}

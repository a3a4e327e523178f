//! Trailing rolling-window kernels over a single series
//!
//! All kernels follow the same convention: the window ending at step `i`
//! covers steps `i + 1 - window ..= i`, the first `window - 1` steps are
//! missing (`NaN`), and a missing value anywhere inside a window makes that
//! window missing.

use ndarray::{s, Array1, ArrayView1};

/// Trailing rolling sum.
///
/// A window longer than the series yields an all-missing result. A zero
/// window also yields all-missing; the array layer rejects it before calling.
///
/// # Example
/// ```
/// use hazard_indices_core::stats::rolling_sum;
/// use ndarray::array;
///
/// let sums = rolling_sum(array![1.0, 2.0, 3.0, 4.0].view(), 2);
/// assert!(sums[0].is_nan());
/// assert_eq!(sums[3], 7.0);
/// ```
pub fn rolling_sum(series: ArrayView1<'_, f64>, window: usize) -> Array1<f64> {
    let n = series.len();
    let mut result = Array1::from_elem(n, f64::NAN);
    if window == 0 {
        return result;
    }

    for i in (window - 1)..n {
        // NaN propagates through the sum
        result[i] = series.slice(s![i + 1 - window..=i]).sum();
    }

    result
}

/// Trailing rolling mean (rolling sum divided by the window length).
pub fn rolling_mean(series: ArrayView1<'_, f64>, window: usize) -> Array1<f64> {
    let mut result = rolling_sum(series, window);
    let divisor = window as f64;
    result.mapv_inplace(|v| v / divisor);
    result
}

/// Shift a series forward by `periods` steps.
///
/// Step `i` of the result holds step `i - periods` of the input; the first
/// `periods` steps are missing.
pub fn shift_forward(series: ArrayView1<'_, f64>, periods: usize) -> Array1<f64> {
    let n = series.len();
    let mut result = Array1::from_elem(n, f64::NAN);
    if periods < n {
        result
            .slice_mut(s![periods..])
            .assign(&series.slice(s![..n - periods]));
    }
    result
}

//! Series statistics used by the hazard indices
//!
//! The kernels work on one series (`ArrayView1`) so they apply equally to a
//! station record and to a single grid point's lane of a gridded array. The
//! lane helpers below lift them over an N-dimensional array along one axis,
//! evaluating lanes in parallel.

mod reduce;
mod rolling;

pub use reduce::{nan_max, nan_min, nan_quantile};
pub use rolling::{rolling_mean, rolling_sum, shift_forward};

use ndarray::{Array1, ArrayD, ArrayView1, Axis, RemoveAxis, Zip};

/// Apply a series-to-series kernel to every lane along `axis`.
///
/// The kernel must return a series of the same length as its input.
pub(crate) fn map_lanes<F>(values: &ArrayD<f64>, axis: Axis, kernel: F) -> ArrayD<f64>
where
    F: Fn(ArrayView1<'_, f64>) -> Array1<f64> + Sync + Send,
{
    let mut out = ArrayD::from_elem(values.raw_dim(), f64::NAN);
    Zip::from(out.lanes_mut(axis))
        .and(values.lanes(axis))
        .par_for_each(|mut out_lane, lane| out_lane.assign(&kernel(lane)));
    out
}

/// Reduce every lane along `axis` to a scalar, removing that axis.
pub(crate) fn reduce_lanes<F>(values: &ArrayD<f64>, axis: Axis, reducer: F) -> ArrayD<f64>
where
    F: Fn(ArrayView1<'_, f64>) -> f64 + Sync + Send,
{
    let mut out = ArrayD::from_elem(values.raw_dim().remove_axis(axis), f64::NAN);
    Zip::from(&mut out)
        .and(values.lanes(axis))
        .par_for_each(|slot, lane| *slot = reducer(lane));
    out
}

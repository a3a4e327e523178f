//! Labeled N-dimensional arrays
//!
//! A [`DataArray`] pairs an `f64` array with one name per axis and optional
//! date coordinates, so the index calculations can address "the time axis" by
//! name whatever the layout of the caller's data (`time`, `time × lat × lon`,
//! `lat × lon × time`, ...). Missing values are `NaN` throughout.

use crate::core_types::climatology::ClimatologySlice;
use crate::error::IndexError;
use crate::stats;
use chrono::NaiveDate;
use ndarray::{Array1, ArrayD, ArrayViewD, Axis, Slice};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Default name of the time dimension
pub const DEFAULT_TIME_DIM: &str = "time";

/// Numeric array with named dimensions and optional date coordinates
///
/// # Example
/// ```
/// use hazard_indices_core::DataArray;
/// use ndarray::Array3;
///
/// // 40 days over a 2 × 3 grid
/// let values = Array3::<f64>::zeros((40, 2, 3)).into_dyn();
/// let precip = DataArray::new(values, ["time", "lat", "lon"]).unwrap();
///
/// assert_eq!(precip.len_of("time").unwrap(), 40);
/// assert!(precip.len_of("depth").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDataArray")]
pub struct DataArray {
    /// Raw values, one axis per entry of `dims`
    values: ArrayD<f64>,

    /// Dimension names in axis order
    dims: Vec<String>,

    /// Date labels keyed by dimension name
    coords: FxHashMap<String, Vec<NaiveDate>>,
}

impl DataArray {
    /// Wrap an array with one name per axis.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::RankMismatch`] if the number of names differs from
    /// the array rank and [`IndexError::DuplicateDimension`] if a name repeats.
    pub fn new<I, S>(values: ArrayD<f64>, dims: I) -> Result<Self, IndexError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let dims: Vec<String> = dims.into_iter().map(Into::into).collect();
        if dims.len() != values.ndim() {
            return Err(IndexError::RankMismatch {
                ndim: values.ndim(),
                names: dims.len(),
            });
        }
        for (i, dim) in dims.iter().enumerate() {
            if dims[..i].contains(dim) {
                return Err(IndexError::DuplicateDimension(dim.clone()));
            }
        }

        Ok(Self {
            values,
            dims,
            coords: FxHashMap::default(),
        })
    }

    /// One-dimensional series on the default `"time"` dimension.
    pub fn time_series(values: Vec<f64>) -> Self {
        Self {
            values: Array1::from(values).into_dyn(),
            dims: vec![DEFAULT_TIME_DIM.to_string()],
            coords: FxHashMap::default(),
        }
    }

    /// Daily series on `"time"` with a date coordinate starting at `start`.
    pub fn daily(start: NaiveDate, values: Vec<f64>) -> Self {
        let labels: Vec<NaiveDate> = start.iter_days().take(values.len()).collect();
        let mut series = Self::time_series(values);
        series.coords.insert(DEFAULT_TIME_DIM.to_string(), labels);
        series
    }

    /// Attach date labels to a dimension, replacing any existing coordinate.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::UnknownDimension`] if `dim` is not on the array and
    /// [`IndexError::CoordinateLength`] if the label count differs from the
    /// dimension length.
    pub fn with_coord(mut self, dim: &str, labels: Vec<NaiveDate>) -> Result<Self, IndexError> {
        let expected = self.len_of(dim)?;
        if labels.len() != expected {
            return Err(IndexError::CoordinateLength {
                dim: dim.to_string(),
                expected,
                actual: labels.len(),
            });
        }
        self.coords.insert(dim.to_string(), labels);
        Ok(self)
    }

    /// Dimension names in axis order
    pub fn dims(&self) -> &[String] {
        &self.dims
    }

    /// Array shape in axis order
    pub fn shape(&self) -> &[usize] {
        self.values.shape()
    }

    /// Borrow the raw values
    pub fn values(&self) -> &ArrayD<f64> {
        &self.values
    }

    /// Take ownership of the raw values
    pub fn into_values(self) -> ArrayD<f64> {
        self.values
    }

    /// Date labels of a dimension, if it has any
    pub fn coord(&self, dim: &str) -> Option<&[NaiveDate]> {
        self.coords.get(dim).map(Vec::as_slice)
    }

    /// Axis index of a named dimension.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::UnknownDimension`] if `dim` is not on the array.
    pub fn axis(&self, dim: &str) -> Result<Axis, IndexError> {
        self.dims
            .iter()
            .position(|d| d == dim)
            .map(Axis)
            .ok_or_else(|| IndexError::UnknownDimension {
                dim: dim.to_string(),
                available: self.dims.clone(),
            })
    }

    /// Length along a named dimension.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::UnknownDimension`] if `dim` is not on the array.
    pub fn len_of(&self, dim: &str) -> Result<usize, IndexError> {
        Ok(self.values.len_of(self.axis(dim)?))
    }

    /// Apply a function to every value, keeping dims and coordinates.
    ///
    /// Handy for unit conversion before computing an index, e.g. Kelvin to
    /// Celsius or m/s to km/h.
    pub fn map<F>(&self, f: F) -> Self
    where
        F: Fn(f64) -> f64,
    {
        self.with_values(self.values.mapv(f))
    }

    /// Values of `self` viewed in the axis order of `reference`.
    ///
    /// Dimensions are matched by name, so an input stored as
    /// `lat × lon × time` lines up with a `time × lat × lon` reference.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::Misaligned`] naming `input` when the two arrays
    /// do not carry the same dimension names with the same lengths.
    pub fn aligned_to(
        &self,
        reference: &DataArray,
        input: &'static str,
    ) -> Result<ArrayViewD<'_, f64>, IndexError> {
        let misaligned = || IndexError::Misaligned {
            input,
            expected: (reference.dims.clone(), reference.shape().to_vec()),
            actual: (self.dims.clone(), self.shape().to_vec()),
        };
        if self.dims.len() != reference.dims.len() {
            return Err(misaligned());
        }

        let mut order = Vec::with_capacity(reference.dims.len());
        for (dim, &len) in reference.dims.iter().zip(reference.shape()) {
            let axis = self
                .dims
                .iter()
                .position(|d| d == dim)
                .ok_or_else(misaligned)?;
            if self.values.len_of(Axis(axis)) != len {
                return Err(misaligned());
            }
            order.push(axis);
        }

        Ok(self.values.view().permuted_axes(order))
    }

    /// Select part of a dimension (label range or positional range).
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::UnknownDimension`] if `dim` is not on the array and
    /// [`IndexError::MissingCoordinate`] for a date range on a dimension
    /// without date labels.
    pub fn select(&self, dim: &str, slice: &ClimatologySlice) -> Result<Self, IndexError> {
        let axis = self.axis(dim)?;
        let range = slice.resolve(self, dim)?;

        let values = self
            .values
            .slice_axis(axis, Slice::from(range.clone()))
            .to_owned();
        let mut coords = self.coords.clone();
        if let Some(labels) = coords.get_mut(dim) {
            *labels = labels[range].to_vec();
        }

        Ok(Self {
            values,
            dims: self.dims.clone(),
            coords,
        })
    }

    /// Trailing rolling sum along `dim`; the first `window - 1` steps are missing.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::UnknownDimension`] for an unknown `dim` and
    /// [`IndexError::InvalidWindow`] for a zero window.
    pub fn rolling_sum(&self, dim: &str, window: usize) -> Result<Self, IndexError> {
        let axis = self.axis(dim)?;
        check_window(window)?;
        Ok(self.with_values(stats::map_lanes(&self.values, axis, |lane| {
            stats::rolling_sum(lane, window)
        })))
    }

    /// Trailing rolling mean along `dim`; the first `window - 1` steps are missing.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::UnknownDimension`] for an unknown `dim` and
    /// [`IndexError::InvalidWindow`] for a zero window.
    pub fn rolling_mean(&self, dim: &str, window: usize) -> Result<Self, IndexError> {
        let axis = self.axis(dim)?;
        check_window(window)?;
        Ok(self.with_values(stats::map_lanes(&self.values, axis, |lane| {
            stats::rolling_mean(lane, window)
        })))
    }

    /// Shift values forward along `dim`, filling the leading steps with `NaN`.
    ///
    /// Coordinates stay where they are, so step `i` now carries the value
    /// that was at step `i - periods`.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::UnknownDimension`] for an unknown `dim`.
    pub fn shift(&self, dim: &str, periods: usize) -> Result<Self, IndexError> {
        let axis = self.axis(dim)?;
        Ok(self.with_values(stats::map_lanes(&self.values, axis, |lane| {
            stats::shift_forward(lane, periods)
        })))
    }

    /// Minimum along `dim`, skipping missing values. The dimension is removed.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::UnknownDimension`] for an unknown `dim`.
    pub fn min(&self, dim: &str) -> Result<Self, IndexError> {
        let axis = self.axis(dim)?;
        Ok(self.reduced(axis, stats::reduce_lanes(&self.values, axis, stats::nan_min)))
    }

    /// Maximum along `dim`, skipping missing values. The dimension is removed.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::UnknownDimension`] for an unknown `dim`.
    pub fn max(&self, dim: &str) -> Result<Self, IndexError> {
        let axis = self.axis(dim)?;
        Ok(self.reduced(axis, stats::reduce_lanes(&self.values, axis, stats::nan_max)))
    }

    /// Linear-interpolated quantile along `dim`, skipping missing values.
    /// The dimension is removed.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::UnknownDimension`] for an unknown `dim` and
    /// [`IndexError::InvalidQuantile`] if `q` lies outside `[0, 1]`.
    pub fn quantile(&self, q: f64, dim: &str) -> Result<Self, IndexError> {
        let axis = self.axis(dim)?;
        check_quantile(q)?;
        Ok(self.reduced(
            axis,
            stats::reduce_lanes(&self.values, axis, |lane| stats::nan_quantile(lane, q)),
        ))
    }

    /// New array with the same dims and coordinates but different values.
    pub(crate) fn with_values(&self, values: ArrayD<f64>) -> Self {
        debug_assert_eq!(values.shape(), self.shape());
        Self {
            values,
            dims: self.dims.clone(),
            coords: self.coords.clone(),
        }
    }

    /// New array with `axis` reduced away (its name and coordinate dropped).
    pub(crate) fn reduced(&self, axis: Axis, values: ArrayD<f64>) -> Self {
        let removed = &self.dims[axis.index()];
        let dims = self
            .dims
            .iter()
            .filter(|d| *d != removed)
            .cloned()
            .collect();
        let coords = self
            .coords
            .iter()
            .filter(|(d, _)| *d != removed)
            .map(|(d, labels)| (d.clone(), labels.clone()))
            .collect();

        Self {
            values,
            dims,
            coords,
        }
    }
}

/// Serialized form of [`DataArray`], checked by [`DataArray::new`] and
/// [`DataArray::with_coord`] before use.
#[derive(Deserialize)]
struct RawDataArray {
    values: ArrayD<f64>,
    dims: Vec<String>,
    #[serde(default)]
    coords: FxHashMap<String, Vec<NaiveDate>>,
}

impl TryFrom<RawDataArray> for DataArray {
    type Error = IndexError;

    fn try_from(raw: RawDataArray) -> Result<Self, Self::Error> {
        let mut array = DataArray::new(raw.values, raw.dims)?;
        for (dim, labels) in raw.coords {
            array = array.with_coord(&dim, labels)?;
        }
        Ok(array)
    }
}

/// Reject zero-length rolling windows.
pub(crate) fn check_window(window: usize) -> Result<(), IndexError> {
    if window == 0 {
        Err(IndexError::InvalidWindow(window))
    } else {
        Ok(())
    }
}

/// Reject quantiles outside `[0, 1]` (including `NaN`).
pub(crate) fn check_quantile(q: f64) -> Result<(), IndexError> {
    if (0.0..=1.0).contains(&q) {
        Ok(())
    } else {
        Err(IndexError::InvalidQuantile(q))
    }
}

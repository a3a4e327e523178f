//! Baseline period selection for percentile thresholds

use crate::core_types::data_array::DataArray;
use crate::error::IndexError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Portion of the time axis used as the climatological baseline
///
/// Ranges that select nothing are not an error: the threshold computed over
/// them is missing and so is every index value that depends on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClimatologySlice {
    /// Inclusive date range resolved against the dimension's date coordinate
    Dates {
        /// First day of the baseline
        start: NaiveDate,
        /// Last day of the baseline
        end: NaiveDate,
    },
    /// Half-open positional range `[start, end)`, clamped to the series length
    Steps {
        /// First step of the baseline
        start: usize,
        /// One past the last step of the baseline
        end: usize,
    },
}

impl ClimatologySlice {
    /// Inclusive date range
    pub fn dates(start: NaiveDate, end: NaiveDate) -> Self {
        ClimatologySlice::Dates { start, end }
    }

    /// Whole calendar years, 1 January of `first` to 31 December of `last`.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::InvalidYear`] if either year is outside the range
    /// `chrono` can represent.
    ///
    /// # Example
    /// ```
    /// use hazard_indices_core::ClimatologySlice;
    ///
    /// let baseline = ClimatologySlice::years(1981, 2010).unwrap();
    /// assert!(matches!(baseline, ClimatologySlice::Dates { .. }));
    /// ```
    pub fn years(first: i32, last: i32) -> Result<Self, IndexError> {
        let start = NaiveDate::from_ymd_opt(first, 1, 1).ok_or(IndexError::InvalidYear(first))?;
        let end = NaiveDate::from_ymd_opt(last, 12, 31).ok_or(IndexError::InvalidYear(last))?;
        Ok(ClimatologySlice::Dates { start, end })
    }

    /// Positional range of time steps
    pub fn steps(range: Range<usize>) -> Self {
        ClimatologySlice::Steps {
            start: range.start,
            end: range.end,
        }
    }

    /// Resolve to a positional range along `dim` of `array`.
    ///
    /// Date bounds need not exist in the coordinate: the range covers every
    /// label within `[start, end]`, assuming labels increase along the axis.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::UnknownDimension`] if `dim` is not on the array and
    /// [`IndexError::MissingCoordinate`] for a date range when `dim` carries no
    /// date labels.
    pub fn resolve(&self, array: &DataArray, dim: &str) -> Result<Range<usize>, IndexError> {
        let len = array.len_of(dim)?;
        match *self {
            ClimatologySlice::Dates { start, end } => {
                let labels = array
                    .coord(dim)
                    .ok_or_else(|| IndexError::MissingCoordinate(dim.to_string()))?;
                let first = labels.partition_point(|d| *d < start);
                let last = labels.partition_point(|d| *d <= end);
                Ok(first..last.max(first))
            }
            ClimatologySlice::Steps { start, end } => {
                let first = start.min(len);
                Ok(first..end.clamp(first, len))
            }
        }
    }
}

//! Error type shared by the array layer and the index calculations
//!
//! Only structural problems are errors (unknown dimensions, misaligned inputs,
//! invalid window or quantile parameters). Numerical degeneracies such as
//! constant precipitation or an empty climatology stay in the data as `NaN`.

use std::fmt;

/// Errors that can occur while building arrays or computing indices
#[derive(Debug, Clone, PartialEq)]
pub enum IndexError {
    /// Requested dimension is not present on the array
    UnknownDimension {
        /// Dimension that was asked for
        dim: String,
        /// Dimensions the array actually has
        available: Vec<String>,
    },
    /// Same dimension name given for two axes
    DuplicateDimension(String),
    /// Number of dimension names differs from the array rank
    RankMismatch {
        /// Number of axes of the array
        ndim: usize,
        /// Number of names supplied
        names: usize,
    },
    /// An input does not share dims and shape with the reference input
    Misaligned {
        /// Name of the offending input (e.g. `"rh"`)
        input: &'static str,
        /// Dims and shape of the reference input
        expected: (Vec<String>, Vec<usize>),
        /// Dims and shape of the offending input
        actual: (Vec<String>, Vec<usize>),
    },
    /// Coordinate length differs from the dimension length
    CoordinateLength {
        /// Dimension the coordinate belongs to
        dim: String,
        /// Length of the dimension
        expected: usize,
        /// Length of the supplied coordinate
        actual: usize,
    },
    /// Date-based selection on a dimension without a date coordinate
    MissingCoordinate(String),
    /// Rolling window of length zero
    InvalidWindow(usize),
    /// Quantile outside `[0, 1]`
    InvalidQuantile(f64),
    /// Calendar year that cannot be represented
    InvalidYear(i32),
}

impl fmt::Display for IndexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexError::UnknownDimension { dim, available } => {
                write!(f, "Unknown dimension '{dim}' (available: {available:?})")
            }
            IndexError::DuplicateDimension(dim) => write!(f, "Duplicate dimension '{dim}'"),
            IndexError::RankMismatch { ndim, names } => {
                write!(f, "Array has {ndim} axes but {names} dimension names were given")
            }
            IndexError::Misaligned {
                input,
                expected,
                actual,
            } => write!(
                f,
                "Input '{input}' is misaligned: expected dims {:?} with shape {:?}, got {:?} with shape {:?}",
                expected.0, expected.1, actual.0, actual.1
            ),
            IndexError::CoordinateLength {
                dim,
                expected,
                actual,
            } => write!(
                f,
                "Coordinate for '{dim}' has {actual} labels but the dimension has length {expected}"
            ),
            IndexError::MissingCoordinate(dim) => {
                write!(f, "Dimension '{dim}' has no date coordinate to select on")
            }
            IndexError::InvalidWindow(window) => {
                write!(f, "Rolling window must be at least 1, got {window}")
            }
            IndexError::InvalidQuantile(q) => {
                write!(f, "Quantile must lie within [0, 1], got {q}")
            }
            IndexError::InvalidYear(year) => write!(f, "Year {year} is out of range"),
        }
    }
}

impl std::error::Error for IndexError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_embed_payload() {
        let err = IndexError::UnknownDimension {
            dim: "t".to_string(),
            available: vec!["time".to_string()],
        };
        assert!(err.to_string().contains("'t'"));
        assert!(err.to_string().contains("time"));

        assert!(IndexError::InvalidQuantile(1.5).to_string().contains("1.5"));
        assert!(IndexError::InvalidWindow(0).to_string().contains('0'));
    }
}

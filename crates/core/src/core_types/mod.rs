//! Core types: labeled arrays, baseline selection and physical units

#[allow(clippy::module_name_repetitions)]
pub mod climatology;
#[allow(clippy::module_name_repetitions)]
pub mod data_array;
pub mod units;

pub use climatology::ClimatologySlice;
pub use data_array::{DataArray, DEFAULT_TIME_DIM};
pub use units::*;

//! Climate Hazard Indices Core Library
//!
//! Computes two scalar climate-hazard indices from gridded or time-series
//! meteorological fields:
//!
//! - the `McArthur` Forest Fire Danger Index (FFDI), following Dowdy (2018),
//!   with the drought factor estimated from 20-day accumulated rainfall
//! - the Excess Heat Factor (EHF) of Nairn & Fawcett (2015)
//!
//! Inputs are [`DataArray`]s: `f64` arrays with named dimensions, so a station
//! record (`time`) and a gridded field (`time × lat × lon`, in any axis order)
//! go through the same calls. Each series along the time dimension is
//! processed independently. Missing values are `NaN`, and rolling-window
//! warm-up steps come back as `NaN`.
//!
//! ## Example
//!
//! ```
//! use hazard_indices_core::{excess_heat_factor, DataArray};
//!
//! let temp = DataArray::time_series(vec![25.0; 60]);
//! let ehf = excess_heat_factor(&temp, None, "time").unwrap();
//!
//! // Constant temperature: no excess heat once the windows are full
//! assert!(ehf.values()[[10]].is_nan());
//! assert_eq!(ehf.values()[[45]], 0.0);
//! ```

// Core types and utilities
pub mod core_types;
pub mod error;
pub mod stats;

// Index calculations
pub mod indices;

// Re-export core types
pub use core_types::{ClimatologySlice, DataArray, DEFAULT_TIME_DIM};
pub use error::IndexError;

// Re-export index entry points
pub use indices::{
    classify_fire_danger, classify_heatwave_severity, drought_factor, excess_heat_components,
    excess_heat_factor, excess_heat_factor_with, ffdi, ffdi_with, mcarthur_ffdi,
    severity_threshold, EhfConfig, ExcessHeatComponents, FfdiConfig, FireDangerRating,
    HeatwaveSeverity,
};

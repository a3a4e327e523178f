//! Hazard index calculations
//!
//! - [`ffdi`]: `McArthur` Forest Fire Danger Index (Dowdy 2018)
//! - [`ehf`]: Excess Heat Factor (Nairn & Fawcett 2015)
//! - [`rating`]: fire danger rating categories for FFDI values
//! - [`heatwave`]: heatwave severity classes for EHF values

#[allow(clippy::module_name_repetitions)]
pub mod ehf;
#[allow(clippy::module_name_repetitions)]
pub mod ffdi;
#[allow(clippy::module_name_repetitions)]
pub mod heatwave;
pub mod rating;

pub use ehf::{
    excess_heat_components, excess_heat_factor, excess_heat_factor_with, EhfConfig,
    ExcessHeatComponents,
};
pub use ffdi::{drought_factor, ffdi, ffdi_with, mcarthur_ffdi, FfdiConfig};
pub use heatwave::{classify_heatwave_severity, severity_threshold, HeatwaveSeverity};
pub use rating::{classify_fire_danger, ffdi_ranges, FireDangerRating};

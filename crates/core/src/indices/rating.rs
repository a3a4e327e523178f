//! Fire danger rating categories for FFDI values

use crate::core_types::data_array::DataArray;
use ndarray::ArrayD;
use serde::{Deserialize, Serialize};
use std::fmt;

/// FFDI (Forest Fire Danger Index) threshold constants based on Australian Bureau of Meteorology standards.
///
/// Note: Rust `Range` types use **inclusive lower bound and exclusive upper bound** [a, b).
///
/// Reference: Australian Bureau of Meteorology and `McArthur` (1967) FFDI classification.
pub mod ffdi_ranges {
    use std::ops::{Range, RangeFrom};

    /// "Low" fire danger rating range `[0.0, 5.0)`
    pub const LOW: Range<f64> = 0.0..5.0;

    /// "Moderate" fire danger rating range `[5.0, 12.0)`
    pub const MODERATE: Range<f64> = 5.0..12.0;

    /// "High" fire danger rating range `[12.0, 24.0)`
    pub const HIGH: Range<f64> = 12.0..24.0;

    /// "Very High" fire danger rating range `[24.0, 50.0)`
    pub const VERY_HIGH: Range<f64> = 24.0..50.0;

    /// "Severe" fire danger rating range `[50.0, 100.0)`
    pub const SEVERE: Range<f64> = 50.0..100.0;

    /// "Extreme" fire danger rating range `[100.0, 150.0)`
    pub const EXTREME: Range<f64> = 100.0..150.0;

    /// "Catastrophic" (Code Red) fire danger rating `[150.0, ∞)`
    pub const CATASTROPHIC: RangeFrom<f64> = 150.0..;
}

/// Fire danger rating category
///
/// # Fire Danger Ratings
///
/// - **0-5**: Low (controlled burning possible)
/// - **5-12**: Moderate (heightened awareness)
/// - **12-24**: High (avoid fire-prone activities)
/// - **24-50**: Very High (prepare to evacuate)
/// - **50-100**: Severe (serious fire danger)
/// - **100-150**: Extreme (catastrophic conditions likely)
/// - **150+**: Catastrophic (Code Red - leave high-risk areas)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FireDangerRating {
    Low,
    Moderate,
    High,
    VeryHigh,
    Severe,
    Extreme,
    Catastrophic,
}

impl FireDangerRating {
    /// Rating for an FFDI value; `None` for missing or negative values.
    ///
    /// # Example
    /// ```
    /// use hazard_indices_core::FireDangerRating;
    ///
    /// assert_eq!(FireDangerRating::from_ffdi(30.0), Some(FireDangerRating::VeryHigh));
    /// assert_eq!(FireDangerRating::from_ffdi(f64::NAN), None);
    /// ```
    pub fn from_ffdi(ffdi: f64) -> Option<Self> {
        match ffdi {
            _ if ffdi_ranges::LOW.contains(&ffdi) => Some(FireDangerRating::Low),
            _ if ffdi_ranges::MODERATE.contains(&ffdi) => Some(FireDangerRating::Moderate),
            _ if ffdi_ranges::HIGH.contains(&ffdi) => Some(FireDangerRating::High),
            _ if ffdi_ranges::VERY_HIGH.contains(&ffdi) => Some(FireDangerRating::VeryHigh),
            _ if ffdi_ranges::SEVERE.contains(&ffdi) => Some(FireDangerRating::Severe),
            _ if ffdi_ranges::EXTREME.contains(&ffdi) => Some(FireDangerRating::Extreme),
            _ if ffdi_ranges::CATASTROPHIC.contains(&ffdi) => Some(FireDangerRating::Catastrophic),
            _ => None,
        }
    }

    /// Display label as used in public warnings
    pub fn label(self) -> &'static str {
        match self {
            FireDangerRating::Low => "Low",
            FireDangerRating::Moderate => "Moderate",
            FireDangerRating::High => "High",
            FireDangerRating::VeryHigh => "Very High",
            FireDangerRating::Severe => "Severe",
            FireDangerRating::Extreme => "Extreme",
            FireDangerRating::Catastrophic => "CATASTROPHIC",
        }
    }
}

impl fmt::Display for FireDangerRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Rate every value of an FFDI array.
pub fn classify_fire_danger(ffdi: &DataArray) -> ArrayD<Option<FireDangerRating>> {
    ffdi.values().mapv(FireDangerRating::from_ffdi)
}

//! Heatwave severity classes from Excess Heat Factor series
//!
//! Nairn & Fawcett (2015) grade positive EHF against `EHF85`, the 85th
//! percentile of all positive EHF values at a location:
//!
//! - **Low intensity**: `0 < EHF <= EHF85`
//! - **Severe**: `EHF85 < EHF <= 3 × EHF85`
//! - **Extreme**: `EHF > 3 × EHF85`

use crate::core_types::data_array::DataArray;
use crate::error::IndexError;
use crate::stats;
use ndarray::{Array1, ArrayD, ArrayView1, Zip};
use serde::{Deserialize, Serialize};

/// Percentile of positive EHF separating low-intensity from severe heatwaves
pub const SEVERITY_QUANTILE: f64 = 0.85;

/// Multiple of `EHF85` above which a heatwave is extreme
pub const EXTREME_MULTIPLIER: f64 = 3.0;

/// Heatwave severity of a single day
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HeatwaveSeverity {
    /// EHF not positive
    NoHeatwave,
    /// Positive EHF up to the severity threshold
    LowIntensity,
    /// Above the severity threshold, up to three times it
    Severe,
    /// More than three times the severity threshold
    Extreme,
}

impl HeatwaveSeverity {
    /// Classify one EHF value against its location's severity threshold.
    ///
    /// Missing EHF gives `None`, as does a positive EHF with a missing
    /// threshold.
    ///
    /// # Example
    /// ```
    /// use hazard_indices_core::HeatwaveSeverity;
    ///
    /// assert_eq!(HeatwaveSeverity::from_ehf(25.0, 10.0), Some(HeatwaveSeverity::Severe));
    /// assert_eq!(HeatwaveSeverity::from_ehf(-2.0, 10.0), Some(HeatwaveSeverity::NoHeatwave));
    /// ```
    pub fn from_ehf(ehf: f64, ehf85: f64) -> Option<Self> {
        if ehf.is_nan() {
            None
        } else if ehf <= 0.0 {
            Some(HeatwaveSeverity::NoHeatwave)
        } else if ehf85.is_nan() {
            None
        } else if ehf <= ehf85 {
            Some(HeatwaveSeverity::LowIntensity)
        } else if ehf <= EXTREME_MULTIPLIER * ehf85 {
            Some(HeatwaveSeverity::Severe)
        } else {
            Some(HeatwaveSeverity::Extreme)
        }
    }
}

/// 85th percentile of the positive values of one series.
fn positive_quantile(series: ArrayView1<'_, f64>) -> f64 {
    let positive: Array1<f64> = series.iter().copied().filter(|v| *v > 0.0).collect();
    stats::nan_quantile(positive.view(), SEVERITY_QUANTILE)
}

/// Severity threshold `EHF85` of every series; the time dimension is removed.
///
/// Series without any positive EHF get a missing threshold.
///
/// # Errors
///
/// Returns [`IndexError::UnknownDimension`] if `time_dim` is not on `ehf`.
pub fn severity_threshold(ehf: &DataArray, time_dim: &str) -> Result<DataArray, IndexError> {
    let axis = ehf.axis(time_dim)?;
    let values = stats::reduce_lanes(ehf.values(), axis, positive_quantile);
    Ok(ehf.reduced(axis, values))
}

/// Classify every value of an EHF array against its series' `EHF85`.
///
/// # Errors
///
/// Returns [`IndexError::UnknownDimension`] if `time_dim` is not on `ehf`.
pub fn classify_heatwave_severity(
    ehf: &DataArray,
    time_dim: &str,
) -> Result<ArrayD<Option<HeatwaveSeverity>>, IndexError> {
    let axis = ehf.axis(time_dim)?;
    let threshold = severity_threshold(ehf, time_dim)?;

    let mut classes = ArrayD::from_elem(ehf.values().raw_dim(), None);
    Zip::from(classes.lanes_mut(axis))
        .and(ehf.values().lanes(axis))
        .and(threshold.values())
        .par_for_each(|mut out, lane, &ehf85| {
            Zip::from(&mut out)
                .and(&lane)
                .for_each(|class, &value| *class = HeatwaveSeverity::from_ehf(value, ehf85));
        });

    Ok(classes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_from_ehf_grades() {
        assert_eq!(HeatwaveSeverity::from_ehf(f64::NAN, 10.0), None);
        assert_eq!(HeatwaveSeverity::from_ehf(0.0, 10.0), Some(HeatwaveSeverity::NoHeatwave));
        assert_eq!(HeatwaveSeverity::from_ehf(10.0, 10.0), Some(HeatwaveSeverity::LowIntensity));
        assert_eq!(HeatwaveSeverity::from_ehf(30.0, 10.0), Some(HeatwaveSeverity::Severe));
        assert_eq!(HeatwaveSeverity::from_ehf(30.1, 10.0), Some(HeatwaveSeverity::Extreme));
        assert_eq!(HeatwaveSeverity::from_ehf(5.0, f64::NAN), None);
        assert_eq!(HeatwaveSeverity::from_ehf(-5.0, f64::NAN), Some(HeatwaveSeverity::NoHeatwave));
    }

    #[test]
    fn test_threshold_ignores_non_positive() {
        let ehf = DataArray::time_series(vec![f64::NAN, -4.0, 0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
        let threshold = severity_threshold(&ehf, "time").unwrap();
        // Positive values 1..=5: rank 0.85 * 4 = 3.4 → 4.4
        let t = threshold.values().iter().next().copied().unwrap();
        assert!((t - 4.4).abs() < 1e-12, "threshold was {t}");
        assert!(threshold.dims().is_empty());
    }

    #[test]
    fn test_classify_gridded() {
        // (x, time) layout with the time axis last
        let values = array![[f64::NAN, -1.0, 1.0, 2.0, 10.0], [0.0, 0.0, 0.0, 0.0, 0.0]].into_dyn();
        let ehf = DataArray::new(values, ["x", "time"]).unwrap();
        let classes = classify_heatwave_severity(&ehf, "time").unwrap();

        assert_eq!(classes[[0, 0]], None);
        assert_eq!(classes[[0, 1]], Some(HeatwaveSeverity::NoHeatwave));
        assert_eq!(classes[[0, 2]], Some(HeatwaveSeverity::LowIntensity));
        // Positive 1, 2, 10: EHF85 = 2 + 0.7 × 8 = 7.6
        assert_eq!(classes[[0, 3]], Some(HeatwaveSeverity::LowIntensity));
        assert_eq!(classes[[0, 4]], Some(HeatwaveSeverity::Severe));
        assert!(classes
            .slice(ndarray::s![1, ..])
            .iter()
            .all(|c| *c == Some(HeatwaveSeverity::NoHeatwave)));
    }
}

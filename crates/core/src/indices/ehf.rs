//! Excess Heat Factor (Nairn & Fawcett 2015)
//!
//! ```text
//! EHF      = EHI_sig × max(1, EHI_accl)
//! EHI_sig  = (T_i + T_i-1 + T_i-2) / 3 - T_95
//! EHI_accl = (T_i + T_i-1 + T_i-2) / 3 - (T_i-3 + ... + T_i-32) / 30
//! ```
//!
//! `T_95` is the 95th percentile of daily mean temperature over a
//! climatological baseline. The 30-day acclimatisation window ends on the
//! day before the 3-day window starts, so the 30-day mean is shifted forward
//! by the length of the 3-day window.
//!
//! # Reference
//!
//! Nairn, J.R.; Fawcett, R.J.B. "The Excess Heat Factor: A Metric for Heatwave
//! Intensity and Its Use in Classifying Heatwave Severity". Int. J. Environ.
//! Res. Public Health 2015, 12, 227-253. doi: 10.3390/ijerph120100227

use crate::core_types::climatology::ClimatologySlice;
use crate::core_types::data_array::{check_quantile, check_window, DataArray, DEFAULT_TIME_DIM};
use crate::error::IndexError;
use ndarray::Zip;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Percentile of the baseline defining excess heat
pub const DEFAULT_THRESHOLD_QUANTILE: f64 = 0.95;

/// Length of the significance ("heatwave") window in days
pub const DEFAULT_SIGNIFICANCE_WINDOW: usize = 3;

/// Length of the acclimatisation window in days
pub const DEFAULT_ACCLIMATISATION_WINDOW: usize = 30;

/// Minimum applied to the acclimatisation index
pub const DEFAULT_ACCLIMATISATION_FLOOR: f64 = 1.0;

/// Settings for the Excess Heat Factor calculation
///
/// # Example
/// ```
/// use hazard_indices_core::{ClimatologySlice, EhfConfig};
///
/// let config = EhfConfig {
///     climatology: Some(ClimatologySlice::years(1981, 2010).unwrap()),
///     ..EhfConfig::default()
/// };
/// assert_eq!(config.threshold_quantile, 0.95);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EhfConfig {
    /// Name of the time dimension
    pub time_dim: String,

    /// Baseline period for the threshold percentile (`None` = full series)
    pub climatology: Option<ClimatologySlice>,

    /// Quantile of the baseline used as the excess heat threshold
    pub threshold_quantile: f64,

    /// Length of the short (significance) window; also the shift applied to
    /// the acclimatisation mean
    pub significance_window: usize,

    /// Length of the acclimatisation window
    pub acclimatisation_window: usize,

    /// Lower bound applied to the acclimatisation index
    pub acclimatisation_floor: f64,
}

impl Default for EhfConfig {
    fn default() -> Self {
        EhfConfig {
            time_dim: DEFAULT_TIME_DIM.to_string(),
            climatology: None,
            threshold_quantile: DEFAULT_THRESHOLD_QUANTILE,
            significance_window: DEFAULT_SIGNIFICANCE_WINDOW,
            acclimatisation_window: DEFAULT_ACCLIMATISATION_WINDOW,
            acclimatisation_floor: DEFAULT_ACCLIMATISATION_FLOOR,
        }
    }
}

/// Intermediate products of the EHF calculation
#[derive(Debug, Clone, PartialEq)]
pub struct ExcessHeatComponents {
    /// Threshold temperature of each series (time dimension removed)
    pub threshold: DataArray,

    /// Significance index `EHI_sig`
    pub significance: DataArray,

    /// Acclimatisation index `EHI_accl`, already floored
    pub acclimatisation: DataArray,
}

impl ExcessHeatComponents {
    /// Combine the sub-indices into the Excess Heat Factor.
    pub fn factor(&self) -> DataArray {
        let values = Zip::from(self.significance.values())
            .and(self.acclimatisation.values())
            .par_map_collect(|&sig, &accl| sig * accl);
        self.significance.with_values(values)
    }
}

/// Apply the acclimatisation floor; missing values stay missing.
#[inline]
pub fn floor_acclimatisation(index: f64, floor: f64) -> f64 {
    if index.is_nan() {
        index
    } else {
        index.max(floor)
    }
}

/// Point-wise EHF from the short-window mean, the preceding long-window mean
/// and the threshold temperature.
///
/// # Example
/// ```
/// use hazard_indices_core::indices::ehf::excess_heat_factor_point;
///
/// // 3 °C above threshold and 5 °C above the preceding month
/// assert_eq!(excess_heat_factor_point(33.0, 28.0, 30.0, 1.0), 15.0);
/// // Acclimatised: the acclimatisation term is floored at 1
/// assert_eq!(excess_heat_factor_point(33.0, 32.5, 30.0, 1.0), 3.0);
/// ```
#[inline]
pub fn excess_heat_factor_point(short_mean: f64, prior_long_mean: f64, threshold: f64, floor: f64) -> f64 {
    let significance = short_mean - threshold;
    let acclimatisation = floor_acclimatisation(short_mean - prior_long_mean, floor);
    significance * acclimatisation
}

/// Compute the threshold and the two sub-indices.
///
/// # Errors
///
/// Returns [`IndexError::UnknownDimension`] if the time dimension is not on
/// `temp`, [`IndexError::MissingCoordinate`] for a date-based climatology on
/// an array without date labels, [`IndexError::InvalidWindow`] for a zero
/// window and [`IndexError::InvalidQuantile`] for a threshold quantile outside
/// `[0, 1]`.
pub fn excess_heat_components(
    temp: &DataArray,
    config: &EhfConfig,
) -> Result<ExcessHeatComponents, IndexError> {
    let dim = config.time_dim.as_str();
    let axis = temp.axis(dim)?;
    check_window(config.significance_window)?;
    check_window(config.acclimatisation_window)?;
    check_quantile(config.threshold_quantile)?;

    debug!(
        shape = ?temp.shape(),
        time_dim = dim,
        climatology = ?config.climatology,
        "Computing Excess Heat Factor"
    );

    let threshold = match &config.climatology {
        Some(slice) => temp.select(dim, slice)?,
        None => temp.clone(),
    }
    .quantile(config.threshold_quantile, dim)?;

    if !temp.values().is_empty() && threshold.values().iter().all(|t| t.is_nan()) {
        warn!(
            climatology = ?config.climatology,
            "Excess heat threshold undefined (empty or all-missing baseline)"
        );
    }

    let short_mean = temp.rolling_mean(dim, config.significance_window)?;
    let long_mean = temp
        .rolling_mean(dim, config.acclimatisation_window)?
        .shift(dim, config.significance_window)?;

    let mut significance = short_mean.values().clone();
    Zip::from(significance.lanes_mut(axis))
        .and(threshold.values())
        .par_for_each(|mut lane, &t95| lane.mapv_inplace(|mean| mean - t95));

    let floor = config.acclimatisation_floor;
    let acclimatisation = Zip::from(short_mean.values())
        .and(long_mean.values())
        .par_map_collect(|&short, &long| floor_acclimatisation(short - long, floor));

    Ok(ExcessHeatComponents {
        threshold,
        significance: temp.with_values(significance),
        acclimatisation: temp.with_values(acclimatisation),
    })
}

/// Excess Heat Factor with default settings.
///
/// `climatology_slice` restricts the period defining the 95th percentile
/// threshold; `None` uses the full series. The first 32 steps of every series
/// are missing (30-day window plus the 3-step shift).
///
/// # Errors
///
/// See [`excess_heat_components`].
///
/// # Example
/// ```
/// use hazard_indices_core::{excess_heat_factor, DataArray};
///
/// // Mild month followed by a hot spell
/// let mut temps = vec![20.0; 60];
/// temps[50..53].copy_from_slice(&[38.0, 40.0, 39.0]);
/// let temp = DataArray::time_series(temps);
///
/// let ehf = excess_heat_factor(&temp, None, "time").unwrap();
/// assert!(ehf.values()[[31]].is_nan());
/// assert!(ehf.values()[[52]] > 0.0);
/// ```
pub fn excess_heat_factor(
    temp: &DataArray,
    climatology_slice: Option<&ClimatologySlice>,
    time_dim: &str,
) -> Result<DataArray, IndexError> {
    let config = EhfConfig {
        time_dim: time_dim.to_string(),
        climatology: climatology_slice.copied(),
        ..EhfConfig::default()
    };
    excess_heat_factor_with(temp, &config)
}

/// Excess Heat Factor with explicit settings.
///
/// The result has the dims and coordinates of `temp`.
///
/// # Errors
///
/// See [`excess_heat_components`].
pub fn excess_heat_factor_with(temp: &DataArray, config: &EhfConfig) -> Result<DataArray, IndexError> {
    Ok(excess_heat_components(temp, config)?.factor())
}

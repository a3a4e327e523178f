//! `McArthur` Forest Fire Danger Index from daily weather series
//!
//! Dowdy (2018) formulation, with the drought factor estimated from 20-day
//! accumulated rainfall rescaled onto `[0, 10]`:
//!
//! ```text
//! p20  = 20-day trailing sum of precipitation
//! D    = -10 × (p20 - min(p20)) / (max(p20) - min(p20)) + 10
//! FFDI = D^0.987 × exp(0.0338×T - 0.0345×H + 0.0234×W + 0.243147)
//! ```
//!
//! Where:
//! - **T** = daily maximum temperature (°C)
//! - **H** = relative humidity (%)
//! - **W** = daily maximum wind speed (km/h)
//! - min/max are taken over the whole time axis of each series (not rolling)
//!
//! # Reference
//!
//! Dowdy, A. J. (2018). "Climatological Variability of Fire Weather in
//! Australia". Journal of Applied Meteorology and Climatology 57.2, 221-234.
//! doi: 10.1175/JAMC-D-17-0167.1

use crate::core_types::data_array::{check_window, DataArray, DEFAULT_TIME_DIM};
use crate::core_types::units::{Celsius, KilometersPerHour, Millimeters, Percent};
use crate::error::IndexError;
use crate::stats;
use ndarray::{Array1, ArrayD, ArrayView1, Zip};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Exponent applied to the drought factor
pub const DROUGHT_EXPONENT: f64 = 0.987;

/// Temperature coefficient (per °C)
pub const TEMPERATURE_COEFFICIENT: f64 = 0.0338;

/// Humidity coefficient (per %, subtracted)
pub const HUMIDITY_COEFFICIENT: f64 = 0.0345;

/// Wind coefficient (per km/h)
pub const WIND_COEFFICIENT: f64 = 0.0234;

/// Constant term of the exponent
pub const EXPONENT_INTERCEPT: f64 = 0.243147;

/// Upper end of the drought factor scale
pub const MAX_DROUGHT_FACTOR: f64 = 10.0;

/// Rainfall accumulation period in time steps (days)
pub const DEFAULT_ACCUMULATION_WINDOW: usize = 20;

/// Settings for the FFDI calculation
///
/// # Example
/// ```
/// use hazard_indices_core::FfdiConfig;
///
/// let config = FfdiConfig {
///     time_dim: "valid_time".to_string(),
///     ..FfdiConfig::default()
/// };
/// assert_eq!(config.accumulation_window, 20);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FfdiConfig {
    /// Name of the time dimension
    pub time_dim: String,

    /// Length of the trailing rainfall accumulation window
    pub accumulation_window: usize,
}

impl Default for FfdiConfig {
    fn default() -> Self {
        FfdiConfig {
            time_dim: DEFAULT_TIME_DIM.to_string(),
            accumulation_window: DEFAULT_ACCUMULATION_WINDOW,
        }
    }
}

/// Rescale accumulated rainfall onto the 0-10 drought factor scale.
///
/// `min` maps to 10 (driest) and `max` maps to 0 (wettest). When
/// `max == min` the result is `0/0 = NaN`; this is left unguarded.
#[inline]
pub fn scaled_drought_factor(accumulated: Millimeters, min: Millimeters, max: Millimeters) -> f64 {
    -MAX_DROUGHT_FACTOR * ((*accumulated - *min) / (*max - *min)) + MAX_DROUGHT_FACTOR
}

/// Point-wise FFDI from a drought factor and the day's weather.
///
/// # Example
/// ```
/// use hazard_indices_core::indices::ffdi::mcarthur_ffdi;
/// use hazard_indices_core::core_types::units::{Celsius, KilometersPerHour, Percent};
///
/// // Hot, dry and windy with a maximal drought factor
/// let ffdi = mcarthur_ffdi(10.0, Celsius::new(40.0), Percent::new(10.0), KilometersPerHour::new(50.0));
/// assert!(ffdi > 50.0);
/// ```
#[inline]
pub fn mcarthur_ffdi(
    drought_factor: f64,
    temperature: Celsius,
    humidity: Percent,
    wind_speed: KilometersPerHour,
) -> f64 {
    let exponent = TEMPERATURE_COEFFICIENT * *temperature - HUMIDITY_COEFFICIENT * *humidity
        + WIND_COEFFICIENT * *wind_speed
        + EXPONENT_INTERCEPT;
    drought_factor.powf(DROUGHT_EXPONENT) * exponent.exp()
}

/// Drought factor of one precipitation series.
fn drought_factor_series(precip: ArrayView1<'_, f64>, window: usize) -> Array1<f64> {
    let accumulated = stats::rolling_sum(precip, window);
    let min = Millimeters::new(stats::nan_min(accumulated.view()));
    let max = Millimeters::new(stats::nan_max(accumulated.view()));
    accumulated.mapv(|p| scaled_drought_factor(Millimeters::new(p), min, max))
}

/// Drought factor `D` of every series along the time dimension.
///
/// The first `accumulation_window - 1` steps are missing, as is every step of
/// a series whose accumulated rainfall never varies.
///
/// # Errors
///
/// Returns [`IndexError::UnknownDimension`] if the time dimension is not on
/// `precip` and [`IndexError::InvalidWindow`] for a zero window.
pub fn drought_factor(precip: &DataArray, config: &FfdiConfig) -> Result<DataArray, IndexError> {
    let axis = precip.axis(&config.time_dim)?;
    check_window(config.accumulation_window)?;

    let window = config.accumulation_window;
    let values = stats::map_lanes(precip.values(), axis, |lane| {
        drought_factor_series(lane, window)
    });

    let time_len = precip.values().len_of(axis);
    if time_len >= window {
        let undefined = values
            .lanes(axis)
            .into_iter()
            .filter(|lane| lane.iter().all(|v| v.is_nan()))
            .count();
        if undefined > 0 {
            warn!(
                undefined,
                "Drought factor undefined for {} series (accumulated rainfall constant or missing)",
                undefined
            );
        }
    }

    Ok(precip.with_values(values))
}

/// Forest Fire Danger Index with the default settings on a named time dimension.
///
/// `precip` is daily precipitation (mm), `rh` relative humidity (%), `tmax`
/// daily maximum temperature (°C) and `wmax` daily maximum wind speed (km/h).
/// Units are not checked or converted.
///
/// # Errors
///
/// See [`ffdi_with`].
///
/// # Example
/// ```
/// use hazard_indices_core::{ffdi, DataArray};
///
/// // One wet day early on, then three dry weeks
/// let mut rain = vec![0.0; 40];
/// rain[5] = 30.0;
/// let precip = DataArray::time_series(rain);
/// let rh = DataArray::time_series(vec![20.0; 40]);
/// let tmax = DataArray::time_series(vec![35.0; 40]);
/// let wmax = DataArray::time_series(vec![40.0; 40]);
///
/// let index = ffdi(&precip, &rh, &tmax, &wmax, "time").unwrap();
/// assert!(index.values()[[0]].is_nan()); // warm-up
/// assert!(index.values()[[39]] > 50.0); // driest accumulation: Severe
/// ```
pub fn ffdi(
    precip: &DataArray,
    rh: &DataArray,
    tmax: &DataArray,
    wmax: &DataArray,
    time_dim: &str,
) -> Result<DataArray, IndexError> {
    let config = FfdiConfig {
        time_dim: time_dim.to_string(),
        ..FfdiConfig::default()
    };
    ffdi_with(precip, rh, tmax, wmax, &config)
}

/// Forest Fire Danger Index with explicit settings.
///
/// The result has the dims and coordinates of `precip`. Steps inside the
/// accumulation warm-up, and every step of a series with constant
/// accumulated rainfall, are missing.
///
/// # Errors
///
/// Returns [`IndexError::Misaligned`] if `rh`, `tmax` or `wmax` do not carry
/// the dimension names and lengths of `precip` (axis order may differ), [`IndexError::UnknownDimension`] if the time
/// dimension is not on the inputs and [`IndexError::InvalidWindow`] for a
/// zero accumulation window.
pub fn ffdi_with(
    precip: &DataArray,
    rh: &DataArray,
    tmax: &DataArray,
    wmax: &DataArray,
    config: &FfdiConfig,
) -> Result<DataArray, IndexError> {
    let rh_values = rh.aligned_to(precip, "rh")?;
    let tmax_values = tmax.aligned_to(precip, "tmax")?;
    let wmax_values = wmax.aligned_to(precip, "wmax")?;

    debug!(
        shape = ?precip.shape(),
        time_dim = %config.time_dim,
        window = config.accumulation_window,
        "Computing FFDI"
    );

    let drought = drought_factor(precip, config)?;

    let mut values = ArrayD::from_elem(precip.values().raw_dim(), f64::NAN);
    Zip::from(&mut values)
        .and(drought.values())
        .and(&tmax_values)
        .and(&rh_values)
        .and(&wmax_values)
        .par_for_each(|out, &d, &t, &h, &w| {
            *out = mcarthur_ffdi(
                d,
                Celsius::new(t),
                Percent::new(h),
                KilometersPerHour::new(w),
            );
        });

    Ok(precip.with_values(values))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_scaled_drought_factor_bounds() {
        let min = Millimeters::new(5.0);
        let max = Millimeters::new(105.0);
        assert_eq!(scaled_drought_factor(min, min, max), 10.0);
        assert_eq!(scaled_drought_factor(max, min, max), 0.0);
        assert_relative_eq!(scaled_drought_factor(Millimeters::new(55.0), min, max), 5.0);
    }

    #[test]
    fn test_scaled_drought_factor_constant_rain() {
        let p = Millimeters::new(12.0);
        assert!(scaled_drought_factor(p, p, p).is_nan());
    }

    #[test]
    fn test_mcarthur_ffdi_reference_value() {
        // D=5, T=30°C, H=30%, W=30 km/h:
        // 5^0.987 × exp(1.014 - 1.035 + 0.702 + 0.243147) = 4.8998 × 2.5197 ≈ 12.35
        let ffdi = mcarthur_ffdi(
            5.0,
            Celsius::new(30.0),
            Percent::new(30.0),
            KilometersPerHour::new(30.0),
        );
        let expected = 5.0_f64.powf(0.987) * 0.924147_f64.exp();
        assert_relative_eq!(ffdi, expected, epsilon = 1e-12);
        assert!(ffdi > 12.0 && ffdi < 12.7, "FFDI was {ffdi}");
    }

    #[test]
    fn test_zero_drought_gives_zero() {
        let ffdi = mcarthur_ffdi(
            0.0,
            Celsius::new(45.0),
            Percent::new(5.0),
            KilometersPerHour::new(80.0),
        );
        assert_eq!(ffdi, 0.0);
    }

    #[test]
    fn test_drought_factor_series_inverts_rainfall() {
        // 25 dry days then 5 wet ones: accumulation rises at the end
        let mut rain = vec![0.0; 25];
        rain.extend([10.0; 5]);
        let d = drought_factor_series(Array1::from(rain).view(), 20);

        assert!(d[18].is_nan());
        assert_eq!(d[19], 10.0);
        assert_eq!(d[29], 0.0);
        assert!(d[27] > d[28]);
    }

    #[test]
    fn test_misaligned_inputs_rejected() {
        let precip = DataArray::time_series(vec![0.0; 30]);
        let short = DataArray::time_series(vec![0.0; 29]);
        let err = ffdi(&precip, &precip, &short, &precip, "time").unwrap_err();
        assert!(matches!(err, IndexError::Misaligned { input: "tmax", .. }));
    }

    #[test]
    fn test_unknown_time_dim_rejected() {
        let series = DataArray::time_series(vec![0.0; 30]);
        let err = ffdi(&series, &series, &series, &series, "t").unwrap_err();
        assert!(matches!(err, IndexError::UnknownDimension { .. }));
    }
}

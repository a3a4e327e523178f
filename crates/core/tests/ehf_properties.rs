//! Behavioural checks for the Excess Heat Factor and heatwave severity
mod common;

use approx::assert_relative_eq;
use chrono::NaiveDate;
use hazard_indices_core::{
    classify_heatwave_severity, excess_heat_components, excess_heat_factor,
    excess_heat_factor_with, ClimatologySlice, DataArray, EhfConfig, HeatwaveSeverity, IndexError,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Equal values, treating missing as equal to missing
fn assert_same(a: &DataArray, b: &DataArray) {
    assert_eq!(a.shape(), b.shape());
    for (x, y) in a.values().iter().zip(b.values().iter()) {
        assert!(x == y || (x.is_nan() && y.is_nan()), "{x} != {y}");
    }
}

/// Three years of daily mean temperature from 2000-01-01 with a seasonal cycle
fn three_summers(rng: &mut StdRng) -> DataArray {
    let values = (0..1096_u32)
        .map(|day| {
            let phase = f64::from(day) / 365.25 * std::f64::consts::TAU;
            22.0 + 6.0 * phase.cos() + rng.random_range(-3.0..3.0)
        })
        .collect();
    DataArray::daily(date(2000, 1, 1), values)
}

#[test]
fn test_constant_temperature_has_no_excess_heat() {
    let temp = DataArray::time_series(vec![25.0; 60]);
    let ehf = excess_heat_factor(&temp, None, "time").unwrap();

    for i in 0..32 {
        assert!(ehf.values()[[i]].is_nan(), "step {i} should be in warm-up");
    }
    for i in 32..60 {
        assert_eq!(ehf.values()[[i]], 0.0);
    }
}

#[test]
fn test_slow_warming_is_floored() {
    // Gradual warming: EHI_accl = 0.165 everywhere, below the floor of 1
    let temp = DataArray::time_series((0..100_u32).map(|i| 20.0 + 0.01 * f64::from(i)).collect());
    let parts = excess_heat_components(&temp, &EhfConfig::default()).unwrap();
    let ehf = parts.factor();

    for i in 32..100 {
        assert_eq!(parts.acclimatisation.values()[[i]], 1.0);
        assert_relative_eq!(ehf.values()[[i]], parts.significance.values()[[i]], epsilon = 1e-12);
    }
}

#[test]
fn test_hot_spell_after_mild_month() {
    let mut temps = vec![20.0; 60];
    temps[50..53].copy_from_slice(&[38.0, 40.0, 39.0]);
    let temp = DataArray::time_series(temps);

    let ehf = excess_heat_factor(&temp, None, "time").unwrap();
    // 57 days at 20 and three hot days: T95 at rank 56.05 = 20 + 0.05 × 18
    let t95 = 20.9;
    assert_relative_eq!(ehf.values()[[49]], 20.0 - t95, epsilon = 1e-9);
    // sig = 39 - 20.9, accl = 39 - 20
    assert_relative_eq!(ehf.values()[[52]], (39.0 - t95) * 19.0, epsilon = 1e-9);

    let severity = classify_heatwave_severity(&ehf, "time").unwrap();
    assert_eq!(severity[[10]], None);
    assert_eq!(severity[[49]], Some(HeatwaveSeverity::NoHeatwave));
    assert!(severity[[52]] >= Some(HeatwaveSeverity::LowIntensity));
}

#[test]
fn test_year_baseline_matches_step_baseline() {
    let mut rng = StdRng::seed_from_u64(2015);
    let temp = three_summers(&mut rng);

    let by_year = excess_heat_factor(&temp, Some(&ClimatologySlice::years(2000, 2000).unwrap()), "time")
        .unwrap();
    let by_step = excess_heat_factor(&temp, Some(&ClimatologySlice::steps(0..366)), "time").unwrap();

    assert_same(&by_year, &by_step);
}

#[test]
fn test_threshold_comes_from_baseline_only() {
    let mut rng = StdRng::seed_from_u64(11);
    let temp = three_summers(&mut rng);
    let config = EhfConfig {
        climatology: Some(ClimatologySlice::dates(date(2001, 1, 1), date(2001, 12, 31))),
        ..EhfConfig::default()
    };
    let parts = excess_heat_components(&temp, &config).unwrap();

    // 2000 is a leap year: 2001 covers steps 366..731
    let baseline: Vec<f64> = temp.values().iter().skip(366).take(365).copied().collect();
    let expected = DataArray::time_series(baseline).quantile(0.95, "time").unwrap();
    let t95 = parts.threshold.values().iter().next().copied().unwrap();
    assert_eq!(t95, expected.values().iter().next().copied().unwrap());

    let full = excess_heat_components(&temp, &EhfConfig::default()).unwrap();
    assert_same(&parts.acclimatisation, &full.acclimatisation);
}

#[test]
fn test_baseline_outside_record_gives_missing_index() {
    let mut rng = StdRng::seed_from_u64(5);
    let temp = three_summers(&mut rng);

    let ehf = excess_heat_factor(&temp, Some(&ClimatologySlice::years(1961, 1990).unwrap()), "time")
        .unwrap();
    assert!(ehf.values().iter().all(|v| v.is_nan()));
}

#[test]
fn test_date_baseline_needs_dates() {
    let temp = DataArray::time_series(vec![25.0; 60]);
    let err = excess_heat_factor(&temp, Some(&ClimatologySlice::years(2000, 2000).unwrap()), "time")
        .unwrap_err();
    assert_eq!(err, IndexError::MissingCoordinate("time".to_string()));
}

#[test]
fn test_unknown_time_dim() {
    let temp = DataArray::time_series(vec![25.0; 60]);
    let err = excess_heat_factor(&temp, None, "day").unwrap_err();
    assert!(matches!(err, IndexError::UnknownDimension { dim, .. } if dim == "day"));
}

#[test]
fn test_missing_day_propagates() {
    let mut temps: Vec<f64> = (0..80_u32).map(|i| 18.0 + f64::from(i % 9)).collect();
    temps[60] = f64::NAN;
    let temp = DataArray::time_series(temps);
    let ehf = excess_heat_factor(&temp, None, "time").unwrap();

    assert!(ehf.values()[[59]].is_finite());
    // Inside the 3-day window on days 60..=62
    for i in 60..63 {
        assert!(ehf.values()[[i]].is_nan(), "step {i}");
    }
    // Inside the shifted 30-day window on days 63..=92
    for i in 63..80 {
        assert!(ehf.values()[[i]].is_nan(), "step {i}");
    }
}

#[test]
fn test_custom_windows() {
    let temp = DataArray::time_series((0..40_u32).map(|i| f64::from(i % 6) + 20.0).collect());
    let config = EhfConfig {
        significance_window: 2,
        acclimatisation_window: 10,
        ..EhfConfig::default()
    };
    let ehf = excess_heat_factor_with(&temp, &config).unwrap();

    // 10-step mean shifted by 2: first defined at step 11
    assert!(ehf.values()[[10]].is_nan());
    assert!(ehf.values()[[11]].is_finite());
}

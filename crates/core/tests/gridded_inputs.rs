//! Gridded inputs give the same answer as each grid point on its own
mod common;

use hazard_indices_core::{
    classify_heatwave_severity, excess_heat_factor, ffdi, DataArray, HeatwaveSeverity,
};
use ndarray::{s, Array3, ArrayD, Axis};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const DAYS: usize = 90;
const LAT: usize = 3;
const LON: usize = 2;

fn random_grid(rng: &mut StdRng, low: f64, high: f64) -> Array3<f64> {
    Array3::from_shape_fn((DAYS, LAT, LON), |_| rng.random_range(low..high))
}

fn rain_grid(rng: &mut StdRng) -> Array3<f64> {
    Array3::from_shape_fn((DAYS, LAT, LON), |_| {
        if rng.random_bool(0.5) {
            0.0
        } else {
            rng.random_range(0.1..25.0)
        }
    })
}

fn gridded(values: &Array3<f64>) -> DataArray {
    DataArray::new(values.clone().into_dyn(), ["time", "lat", "lon"]).unwrap()
}

fn point(values: &Array3<f64>, lat: usize, lon: usize) -> DataArray {
    DataArray::time_series(values.slice(s![.., lat, lon]).to_vec())
}

/// Equal up to summation order; missing matches missing
fn close(a: f64, b: f64) -> bool {
    (a.is_nan() && b.is_nan()) || (a - b).abs() <= 1e-9 * a.abs().max(1.0)
}

fn assert_same_series(grid: &ArrayD<f64>, lat: usize, lon: usize, series: &DataArray) {
    let lane = grid.slice(s![.., lat, lon]);
    for (t, (g, p)) in lane.iter().zip(series.values().iter()).enumerate() {
        assert!(
            close(*g, *p),
            "({lat}, {lon}) step {t}: grid {g} vs point {p}"
        );
    }
}

#[test]
fn test_ffdi_grid_matches_points() {
    let mut rng = StdRng::seed_from_u64(42);
    let precip = rain_grid(&mut rng);
    let rh = random_grid(&mut rng, 5.0, 90.0);
    let tmax = random_grid(&mut rng, 15.0, 45.0);
    let wmax = random_grid(&mut rng, 0.0, 60.0);

    let grid = ffdi(&gridded(&precip), &gridded(&rh), &gridded(&tmax), &gridded(&wmax), "time").unwrap();
    assert_eq!(grid.dims(), ["time", "lat", "lon"]);
    assert_eq!(grid.shape(), [DAYS, LAT, LON]);

    for lat in 0..LAT {
        for lon in 0..LON {
            let single = ffdi(
                &point(&precip, lat, lon),
                &point(&rh, lat, lon),
                &point(&tmax, lat, lon),
                &point(&wmax, lat, lon),
                "time",
            )
            .unwrap();
            assert_same_series(grid.values(), lat, lon, &single);
        }
    }
}

#[test]
fn test_ffdi_inputs_in_any_axis_order() {
    let mut rng = StdRng::seed_from_u64(17);
    let precip = rain_grid(&mut rng);
    let rh = random_grid(&mut rng, 5.0, 90.0);
    let tmax = random_grid(&mut rng, 15.0, 45.0);
    let wmax = random_grid(&mut rng, 0.0, 60.0);

    let reference =
        ffdi(&gridded(&precip), &gridded(&rh), &gridded(&tmax), &gridded(&wmax), "time").unwrap();

    // rh as (lon, time, lat), tmax as a strided (lat, lon, time) view copied as-is
    let rh_moved = DataArray::new(
        rh.clone().permuted_axes([2, 0, 1]).as_standard_layout().to_owned().into_dyn(),
        ["lon", "time", "lat"],
    )
    .unwrap();
    let tmax_moved = DataArray::new(
        tmax.clone().permuted_axes([1, 2, 0]).into_dyn(),
        ["lat", "lon", "time"],
    )
    .unwrap();

    let index = ffdi(&gridded(&precip), &rh_moved, &tmax_moved, &gridded(&wmax), "time").unwrap();
    assert_eq!(index.dims(), ["time", "lat", "lon"]);
    for (a, b) in index.values().iter().zip(reference.values().iter()) {
        assert!(close(*a, *b), "{a} vs {b}");
    }

    // Same names, wrong length on one of them
    let short = DataArray::new(
        rh.slice(s![..DAYS - 1, .., ..]).permuted_axes([2, 0, 1]).to_owned().into_dyn(),
        ["lon", "time", "lat"],
    )
    .unwrap();
    assert!(ffdi(&gridded(&precip), &short, &gridded(&tmax), &gridded(&wmax), "time").is_err());
}

#[test]
fn test_ehf_grid_matches_points() {
    let mut rng = StdRng::seed_from_u64(1);
    let temp = random_grid(&mut rng, 12.0, 38.0);

    let grid = excess_heat_factor(&gridded(&temp), None, "time").unwrap();
    for lat in 0..LAT {
        for lon in 0..LON {
            let single = excess_heat_factor(&point(&temp, lat, lon), None, "time").unwrap();
            assert_same_series(grid.values(), lat, lon, &single);
        }
    }
}

#[test]
fn test_time_axis_last() {
    let mut rng = StdRng::seed_from_u64(8);
    let temp = random_grid(&mut rng, 12.0, 38.0);

    // (lat, lon, time) layout of the same data
    let permuted = temp.clone().permuted_axes([1, 2, 0]).as_standard_layout().to_owned();
    let moved = DataArray::new(permuted.into_dyn(), ["lat", "lon", "time"]).unwrap();

    let reference = excess_heat_factor(&gridded(&temp), None, "time").unwrap();
    let ehf = excess_heat_factor(&moved, None, "time").unwrap();
    assert_eq!(ehf.dims(), ["lat", "lon", "time"]);

    let realigned = ehf.values().view().permuted_axes(vec![2, 0, 1]);
    for (a, b) in realigned.iter().zip(reference.values().iter()) {
        assert!(close(*a, *b), "{a} vs {b}");
    }
}

#[test]
fn test_severity_per_grid_point() {
    // One cell with a heatwave, one without any positive EHF
    let mut temp = Array3::from_elem((DAYS, 1, 2), 20.0);
    temp.slice_mut(s![70..75, 0, 0]).fill(41.0);
    let ehf = excess_heat_factor(
        &DataArray::new(temp.into_dyn(), ["time", "lat", "lon"]).unwrap(),
        None,
        "time",
    )
    .unwrap();

    let severity = classify_heatwave_severity(&ehf, "time").unwrap();
    let hot = severity.index_axis(Axis(2), 0);
    let calm = severity.index_axis(Axis(2), 1);

    assert!(hot
        .iter()
        .any(|c| matches!(c, Some(HeatwaveSeverity::Severe | HeatwaveSeverity::Extreme))));
    assert!(calm
        .iter()
        .skip(32)
        .all(|c| *c == Some(HeatwaveSeverity::NoHeatwave)));
}

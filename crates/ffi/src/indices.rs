use hazard_indices_core::{
    excess_heat_factor, ffdi, ClimatologySlice, DataArray, FireDangerRating, DEFAULT_TIME_DIM,
};

use crate::error::{DefaultHazardError, HazardErrorCode};
use crate::helpers::{check_len, read_series, track_result, write_series};

/// Fire danger rating as seen from C.
///
/// `Unrated` is returned for missing (`NaN`) or negative FFDI values.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HazardFireDangerRating {
    /// Missing or negative FFDI.
    Unrated = 0,
    /// FFDI `[0, 5)`.
    Low = 1,
    /// FFDI `[5, 12)`.
    Moderate = 2,
    /// FFDI `[12, 24)`.
    High = 3,
    /// FFDI `[24, 50)`.
    VeryHigh = 4,
    /// FFDI `[50, 100)`.
    Severe = 5,
    /// FFDI `[100, 150)`.
    Extreme = 6,
    /// FFDI 150 and above.
    Catastrophic = 7,
}

impl From<Option<FireDangerRating>> for HazardFireDangerRating {
    fn from(rating: Option<FireDangerRating>) -> Self {
        match rating {
            None => HazardFireDangerRating::Unrated,
            Some(FireDangerRating::Low) => HazardFireDangerRating::Low,
            Some(FireDangerRating::Moderate) => HazardFireDangerRating::Moderate,
            Some(FireDangerRating::High) => HazardFireDangerRating::High,
            Some(FireDangerRating::VeryHigh) => HazardFireDangerRating::VeryHigh,
            Some(FireDangerRating::Severe) => HazardFireDangerRating::Severe,
            Some(FireDangerRating::Extreme) => HazardFireDangerRating::Extreme,
            Some(FireDangerRating::Catastrophic) => HazardFireDangerRating::Catastrophic,
        }
    }
}

/// Positional baseline from the C arguments; `clim_end == 0` selects the whole series.
fn climatology_from_steps(
    clim_start: usize,
    clim_end: usize,
    len: usize,
) -> Result<Option<ClimatologySlice>, DefaultHazardError> {
    if clim_end == 0 {
        return Ok(None);
    }
    if clim_start >= clim_end || clim_end > len {
        return Err(DefaultHazardError::invalid_parameter(format!(
            "Climatology range [{clim_start}, {clim_end}) must be non-empty and within a series of length {len}"
        )));
    }
    Ok(Some(ClimatologySlice::steps(clim_start..clim_end)))
}

unsafe fn ffdi_into(
    precip: *const f64,
    rh: *const f64,
    tmax: *const f64,
    wmax: *const f64,
    len: usize,
    out: *mut f64,
) -> Result<(), DefaultHazardError> {
    check_len(len)?;
    if out.is_null() {
        return Err(DefaultHazardError::null_pointer("out"));
    }

    let (precip, rh, tmax, wmax) = unsafe {
        (
            DataArray::time_series(read_series(precip, len, "precip")?),
            DataArray::time_series(read_series(rh, len, "rh")?),
            DataArray::time_series(read_series(tmax, len, "tmax")?),
            DataArray::time_series(read_series(wmax, len, "wmax")?),
        )
    };

    let index = ffdi(&precip, &rh, &tmax, &wmax, DEFAULT_TIME_DIM)?;
    unsafe { write_series(out, len, index.values()) };
    Ok(())
}

unsafe fn excess_heat_factor_into(
    temp: *const f64,
    len: usize,
    clim_start: usize,
    clim_end: usize,
    out: *mut f64,
) -> Result<(), DefaultHazardError> {
    check_len(len)?;
    if out.is_null() {
        return Err(DefaultHazardError::null_pointer("out"));
    }
    let climatology = climatology_from_steps(clim_start, clim_end, len)?;

    let temp = DataArray::time_series(unsafe { read_series(temp, len, "temp")? });
    let ehf = excess_heat_factor(&temp, climatology.as_ref(), DEFAULT_TIME_DIM)?;
    unsafe { write_series(out, len, ehf.values()) };
    Ok(())
}

/// Compute the daily Forest Fire Danger Index for one location.
///
/// Parameters
/// - `precip`: daily precipitation (mm), `len` values
/// - `rh`: relative humidity (%), `len` values
/// - `tmax`: maximum temperature (°C), `len` values
/// - `wmax`: maximum wind speed (km/h), `len` values
/// - `len`: number of days; must be positive
/// - `out`: caller-allocated buffer of `len` values receiving the index
///
/// The first 19 days, and every day of a series whose 20-day rainfall never
/// changes, are written as `NaN`.
///
/// Returns
/// - `Ok` (0) on success
/// - `NullPointer` if any pointer is null
/// - `InvalidLength` if `len` is zero or too large
///
/// # Safety
///
/// - Every input pointer must be valid for `len` reads of `f64`.
/// - `out` must be valid for `len` writes of `f64` and must not overlap the inputs.
///
/// Example (C)
/// ```c
/// double out[365];
/// if (hazard_ffdi(precip, rh, tmax, wmax, 365, out) != Ok) {
///     fprintf(stderr, "%s\n", hazard_get_last_error());
/// }
/// ```
#[no_mangle]
pub unsafe extern "C" fn hazard_ffdi(
    precip: *const f64,
    rh: *const f64,
    tmax: *const f64,
    wmax: *const f64,
    len: usize,
    out: *mut f64,
) -> HazardErrorCode {
    track_result(unsafe { ffdi_into(precip, rh, tmax, wmax, len, out) })
}

/// Compute the daily Excess Heat Factor for one location.
///
/// Parameters
/// - `temp`: daily mean temperature (°C), `len` values
/// - `len`: number of days; must be positive
/// - `clim_start`, `clim_end`: baseline steps `[clim_start, clim_end)` for the
///   95th percentile threshold; `clim_end == 0` uses the whole series
/// - `out`: caller-allocated buffer of `len` values receiving the index
///
/// The first 32 days are written as `NaN`.
///
/// Returns
/// - `Ok` (0) on success
/// - `NullPointer` if any pointer is null
/// - `InvalidLength` if `len` is zero or too large
/// - `InvalidParameter` if the baseline range is empty or extends past `len`
///
/// # Safety
///
/// - `temp` must be valid for `len` reads of `f64`.
/// - `out` must be valid for `len` writes of `f64` and must not overlap `temp`.
#[no_mangle]
pub unsafe extern "C" fn hazard_excess_heat_factor(
    temp: *const f64,
    len: usize,
    clim_start: usize,
    clim_end: usize,
    out: *mut f64,
) -> HazardErrorCode {
    track_result(unsafe { excess_heat_factor_into(temp, len, clim_start, clim_end, out) })
}

/// Fire danger rating of a single FFDI value.
#[no_mangle]
pub extern "C" fn hazard_fire_danger_rating(ffdi: f64) -> HazardFireDangerRating {
    FireDangerRating::from_ffdi(ffdi).into()
}

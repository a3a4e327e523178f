//! C interface to the hazard index calculations.
//!
//! Every function works on one location at a time: caller-owned `f64`
//! buffers of equal length in, a caller-owned buffer of the same length out.
//! Missing values travel as `NaN` in both directions. Failures return a
//! non-zero [`HazardErrorCode`]; the message is available from
//! [`hazard_get_last_error`] on the same thread.

pub mod error;
mod helpers;
pub mod indices;

pub use error::{hazard_get_last_error, hazard_get_last_error_code, HazardErrorCode};
pub use indices::{
    hazard_excess_heat_factor, hazard_ffdi, hazard_fire_danger_rating, HazardFireDangerRating,
};

use crate::error::{with_last_error_mut, DefaultHazardError, HazardError, HazardErrorCode};
use std::ffi::CString;
use std::mem::size_of;

/// Set the thread-local error message and code.
/// Accepts any type implementing `HazardError` trait.
pub(crate) fn set_last_error(error: &impl HazardError) {
    with_last_error_mut(|(cstring, code)| {
        *cstring = CString::new(error.msg()).ok();
        *code = error.code();
    });
}

/// Track an error by setting it in thread-local storage and returning its code.
#[inline]
pub(crate) fn track_error(error: &impl HazardError) -> HazardErrorCode {
    set_last_error(error);
    error.code()
}

/// Clear the thread-local error message and code.
/// Called on successful operations.
pub(crate) fn clear_last_error() {
    with_last_error_mut(|(cstring, code)| {
        *cstring = None;
        *code = HazardErrorCode::Ok;
    });
}

/// Record the outcome of an operation and return the code for the caller.
pub(crate) fn track_result(result: Result<(), DefaultHazardError>) -> HazardErrorCode {
    match result {
        Ok(()) => {
            clear_last_error();
            HazardErrorCode::Ok
        }
        Err(error) => track_error(&error),
    }
}

/// Reject lengths that are zero or too large for a slice of `f64`.
pub(crate) fn check_len(len: usize) -> Result<(), DefaultHazardError> {
    if len == 0 {
        return Err(DefaultHazardError::invalid_length(len, "must be positive"));
    }
    if len > isize::MAX.unsigned_abs() / size_of::<f64>() {
        return Err(DefaultHazardError::invalid_length(len, "exceeds addressable memory"));
    }
    Ok(())
}

/// Copy a caller-owned input buffer.
///
/// # Safety
/// `ptr` must be null or point to `len` readable `f64` values; `len` must
/// already have passed [`check_len`].
pub(crate) unsafe fn read_series(
    ptr: *const f64,
    len: usize,
    param_name: &str,
) -> Result<Vec<f64>, DefaultHazardError> {
    if ptr.is_null() {
        return Err(DefaultHazardError::null_pointer(param_name));
    }
    // SAFETY: non-null and valid for `len` reads per the caller contract
    Ok(unsafe { std::slice::from_raw_parts(ptr, len) }.to_vec())
}

/// Write a result series into a caller-owned output buffer.
///
/// # Safety
/// `out` must be non-null and point to `len` writable `f64` values that do
/// not overlap any input buffer.
pub(crate) unsafe fn write_series<'a>(
    out: *mut f64,
    len: usize,
    values: impl IntoIterator<Item = &'a f64>,
) {
    // SAFETY: valid for `len` writes per the caller contract
    let out = unsafe { std::slice::from_raw_parts_mut(out, len) };
    for (slot, value) in out.iter_mut().zip(values) {
        *slot = *value;
    }
}

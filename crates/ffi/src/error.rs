use hazard_indices_core::IndexError;
use std::cell::RefCell;
use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;

/// Common interface for errors crossing the FFI boundary.
///
/// - `code()` - Error code returned to the caller
/// - `msg()` - Message available through `hazard_get_last_error`
pub(crate) trait HazardError {
    /// Returns the error code to be returned across the FFI boundary.
    fn code(&self) -> HazardErrorCode;

    /// Returns the human-readable error message.
    fn msg(&self) -> &str;
}

/// Default implementation of `HazardError` for the argument checks done at
/// the boundary and for errors coming back from the core crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DefaultHazardError {
    code: HazardErrorCode,
    msg: String,
}

impl DefaultHazardError {
    /// Create error for null pointer passed where non-null required.
    ///
    /// # Arguments
    /// * `param_name` - The name of the parameter that was null (e.g., `"precip"`, `"out"`)
    pub fn null_pointer(param_name: &str) -> Self {
        Self {
            code: HazardErrorCode::NullPointer,
            msg: format!("Parameter '{param_name}' cannot be null"),
        }
    }

    /// Create error for a series length that cannot be used.
    ///
    /// # Arguments
    /// * `len` - The length passed by the caller
    /// * `constraint` - Description of the constraint (e.g., `"must be positive"`)
    pub fn invalid_length(len: usize, constraint: &str) -> Self {
        Self {
            code: HazardErrorCode::InvalidLength,
            msg: format!("Series length {constraint}, got {len}"),
        }
    }

    /// Create error for invalid parameter.
    ///
    /// # Arguments
    /// * `message` - Description of the error
    pub fn invalid_parameter(message: String) -> Self {
        Self {
            code: HazardErrorCode::InvalidParameter,
            msg: message,
        }
    }
}

impl HazardError for DefaultHazardError {
    fn code(&self) -> HazardErrorCode {
        self.code
    }

    fn msg(&self) -> &str {
        &self.msg
    }
}

impl From<IndexError> for DefaultHazardError {
    fn from(error: IndexError) -> Self {
        Self::invalid_parameter(error.to_string())
    }
}

/// FFI error codes returned by hazard index functions.
/// Follows standard C convention: 0 = success, non-zero = error.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HazardErrorCode {
    /// Operation completed successfully.
    Ok = 0,

    /// Invalid pointer: null pointer passed where non-null required.
    NullPointer = 1,

    /// Series length is zero or too large to address.
    InvalidLength = 2,

    /// Invalid parameter passed to function (e.g. a climatology range outside the series).
    InvalidParameter = 3,
}

thread_local! {
    /// Thread-local storage for the most recent FFI error (C string, error code).
    /// The `CString` is kept here so the pointer handed out stays valid.
    static LAST_ERROR: RefCell<(Option<CString>, HazardErrorCode)> = const { RefCell::new((None, HazardErrorCode::Ok)) };
}

/// Internal helper to read `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error<F, R>(f: F) -> R
where
    F: FnOnce(&(Option<CString>, HazardErrorCode)) -> R,
{
    LAST_ERROR.with_borrow(f)
}

/// Internal helper to mutate `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut (Option<CString>, HazardErrorCode)) -> R,
{
    LAST_ERROR.with_borrow_mut(f)
}

/// Retrieve the most recent FFI error message as a null-terminated C string.
///
/// Returns:
/// - A borrowed pointer to the error message if the last call on this thread failed.
/// - `null` if the last call succeeded or no call has been made yet.
///
/// # Thread Safety
/// Error state is stored per-thread, so each thread sees only its own errors.
///
/// # Lifetime
/// The returned pointer is valid until the next `hazard_*` call on this thread.
///
/// **DO NOT FREE THIS POINTER** - it is managed internally.
///
/// Example:
/// ```c
/// HazardErrorCode err = hazard_ffdi(precip, rh, tmax, wmax, len, out);
/// if (err != Ok) {
///     const char* error = hazard_get_last_error();
///     if (error) {
///         fprintf(stderr, "FFDI failed: %s\n", error);
///     }
/// }
/// ```
#[no_mangle]
pub extern "C" fn hazard_get_last_error() -> *const c_char {
    with_last_error(|(cstring, _code)| cstring.as_ref().map_or(ptr::null(), |cs| cs.as_ptr()))
}

/// Retrieve the most recent FFI error code.
///
/// Returns `Ok` (0) if the last call on this thread succeeded, otherwise the
/// code it returned.
#[no_mangle]
pub extern "C" fn hazard_get_last_error_code() -> HazardErrorCode {
    with_last_error(|(_cstring, code)| *code)
}

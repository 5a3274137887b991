//! Conversions shared by the bindings
//!
//! Hint, attribute and shape ids come straight from `glfw::ffi`.

use std::ffi::{c_char, CStr, CString};
use std::os::raw::c_int;

use glfw::ffi;

use super::error::{PlatformError, PlatformResult};

pub const fn to_bool(value: c_int) -> bool {
    value != ffi::FALSE
}

pub const fn from_bool(value: bool) -> c_int {
    if value {
        ffi::TRUE
    } else {
        ffi::FALSE
    }
}

/// Negative native sizes only appear on error; report them as zero.
pub fn to_u32(value: c_int) -> u32 {
    u32::try_from(value).unwrap_or(0)
}

pub fn to_c_int(value: u32, what: &str) -> PlatformResult<c_int> {
    c_int::try_from(value)
        .map_err(|_| PlatformError::InvalidArgument(format!("{what} {value} is out of range")))
}

pub fn to_c_string(value: &str) -> PlatformResult<CString> {
    Ok(CString::new(value)?)
}

/// Copy a library-owned string. Null becomes `None`.
///
/// # Safety
///
/// `raw` must be null or point to a NUL-terminated string that stays valid
/// for the duration of the call.
pub unsafe fn string_from_ptr(raw: *const c_char) -> Option<String> {
    if raw.is_null() {
        None
    } else {
        Some(CStr::from_ptr(raw).to_string_lossy().into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bool_conversion() {
        assert!(to_bool(ffi::TRUE));
        assert!(!to_bool(ffi::FALSE));
        assert!(to_bool(2));
        assert_eq!(from_bool(true), ffi::TRUE);
        assert_eq!(from_bool(false), ffi::FALSE);
    }

    #[test]
    fn test_negative_sizes_clamp_to_zero() {
        assert_eq!(to_u32(-5), 0);
        assert_eq!(to_u32(640), 640);
    }

    #[test]
    fn test_oversized_dimension_rejected() {
        assert!(to_c_int(u32::MAX, "width").is_err());
        assert_eq!(to_c_int(480, "height").unwrap(), 480);
    }

    #[test]
    fn test_string_from_null_is_none() {
        assert_eq!(unsafe { string_from_ptr(std::ptr::null()) }, None);
        let owned = CString::new("Gamepad").unwrap();
        assert_eq!(
            unsafe { string_from_ptr(owned.as_ptr()) }.as_deref(),
            Some("Gamepad")
        );
    }
}

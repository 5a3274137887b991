//! Platform errors
//!
//! The native library reports failures through a thread-local "last error"
//! slot. Factories read that slot when a call returns null and carry its text
//! in the returned error.

use std::ffi::{c_char, CStr, NulError};
use std::ptr;

use glfw::ffi;
use thiserror::Error;

/// Native windowing errors
#[derive(Error, Debug)]
pub enum PlatformError {
    /// The video subsystem could not be started
    #[error("Video subsystem initialization failed: {0}")]
    InitializationFailed(String),

    /// A native constructor returned null
    #[error("Creation failed: {0}")]
    CreationFailed(String),

    /// An operation was attempted through a null wrapper
    #[error("Null {0} handle")]
    NullHandle(&'static str),

    /// A query was made while no video subsystem reference is held
    #[error("Video subsystem is not initialized")]
    NotInitialized,

    /// A string passed to the native library contained an interior NUL
    #[error("Invalid string: {0}")]
    InvalidString(#[from] NulError),

    /// A value is outside what the native library accepts
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The requested joystick slot is empty
    #[error("Joystick {0} is not connected")]
    JoystickUnavailable(i32),

    /// The monitor reported no current video mode
    #[error("Monitor has no video mode")]
    NoVideoMode,

    /// Error reported by the native library
    #[error("Native error {code:#x}: {description}")]
    Native {
        /// Native error code
        code: i32,
        /// Human readable description from the library
        description: String,
    },
}

/// Result alias for platform operations
pub type PlatformResult<T> = Result<T, PlatformError>;

/// Take the pending native error, if any.
///
/// Reading the error clears it, so each failure is reported once.
pub fn last_error() -> Option<PlatformError> {
    let mut description: *const c_char = ptr::null();
    let code = unsafe { ffi::glfwGetError(&mut description) };
    if code == 0 {
        return None;
    }

    let description = if description.is_null() {
        String::from("unknown error")
    } else {
        unsafe { CStr::from_ptr(description) }
            .to_string_lossy()
            .into_owned()
    };

    Some(PlatformError::Native { code, description })
}

/// The pending native error as text, for wrapping in a higher level variant.
pub(crate) fn last_error_message() -> String {
    match last_error() {
        Some(PlatformError::Native { description, .. }) => description,
        Some(other) => other.to_string(),
        None => String::from("no error reported"),
    }
}

/// The pending native error, or a placeholder when the library reported none.
pub(crate) fn native_error() -> PlatformError {
    last_error().unwrap_or_else(|| PlatformError::Native {
        code: 0,
        description: String::from("no error reported"),
    })
}

/// Turn a pending native error into `Err`.
///
/// Used after native calls that report failure only through the error slot.
pub(crate) fn check_native() -> PlatformResult<()> {
    last_error().map_or(Ok(()), Err)
}

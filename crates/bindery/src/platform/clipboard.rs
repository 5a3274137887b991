//! System clipboard

use std::ptr;

use glfw::ffi;

use super::error::{check_native, last_error, PlatformError, PlatformResult};
use super::sys;
use super::video::VideoGuard;

/// Access to the system clipboard.
///
/// Holds a video subsystem reference for as long as it lives.
#[derive(Debug)]
pub struct Clipboard {
    _video: VideoGuard,
}

impl Clipboard {
    /// Open the clipboard, starting the video subsystem if needed
    pub fn open() -> PlatformResult<Self> {
        Ok(Self {
            _video: VideoGuard::acquire()?,
        })
    }

    /// Current clipboard text, or `None` when the clipboard holds no text
    pub fn text(&self) -> PlatformResult<Option<String>> {
        let raw = unsafe { ffi::glfwGetClipboardString(ptr::null_mut()) };
        if let Some(text) = unsafe { sys::string_from_ptr(raw) } {
            return Ok(Some(text));
        }

        match last_error() {
            Some(PlatformError::Native { code, .. }) if code == ffi::FORMAT_UNAVAILABLE => Ok(None),
            Some(err) => Err(err),
            None => Ok(None),
        }
    }

    /// Replace the clipboard contents with `text`
    pub fn set_text(&self, text: &str) -> PlatformResult<()> {
        let c_text = sys::to_c_string(text)?;
        unsafe { ffi::glfwSetClipboardString(ptr::null_mut(), c_text.as_ptr()) };
        check_native()
    }

    /// Is there non-empty text on the clipboard?
    pub fn has_text(&self) -> PlatformResult<bool> {
        Ok(self.text()?.is_some_and(|text| !text.is_empty()))
    }
}

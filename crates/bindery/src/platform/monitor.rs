//! Monitors
//!
//! Monitors belong to the native library, so every [`Monitor`] is a
//! non-owning view. A view must not be used after the video subsystem has
//! been terminated or the monitor has been disconnected.

use std::ops::Deref;
use std::os::raw::c_int;
use std::slice;

use glfw::ffi;
use log::{error, warn};

use super::error::{check_native, last_error_message, native_error, PlatformError, PlatformResult};
use super::sys;
use super::video::ensure_initialized;
use crate::resource::SharedResource;

/// Resolution and color depth of a monitor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoMode {
    /// Width in screen coordinates
    pub width: u32,
    /// Height in screen coordinates
    pub height: u32,
    /// Bits of red
    pub red_bits: u32,
    /// Bits of green
    pub green_bits: u32,
    /// Bits of blue
    pub blue_bits: u32,
    /// Refresh rate in Hz
    pub refresh_rate: u32,
}

/// Non-owning reference to a connected monitor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Monitor(SharedResource<ffi::GLFWmonitor>);

impl Deref for Monitor {
    type Target = SharedResource<ffi::GLFWmonitor>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Monitor {
    /// The null monitor
    pub const fn null() -> Self {
        Self(SharedResource::null())
    }

    pub(crate) fn from_raw(raw: *mut ffi::GLFWmonitor) -> Self {
        Self(SharedResource::non_owning(raw))
    }

    /// The user's preferred monitor, or the null monitor if none is connected.
    pub fn primary() -> PlatformResult<Self> {
        ensure_initialized()?;
        Ok(Self::from_raw(unsafe { ffi::glfwGetPrimaryMonitor() }))
    }

    /// Every connected monitor.
    ///
    /// Enumeration failures are logged and produce an empty list.
    pub fn all() -> Vec<Self> {
        if ensure_initialized().is_err() {
            warn!("Monitor enumeration requested before video initialization");
            return Vec::new();
        }

        let mut count: c_int = 0;
        let list = unsafe { ffi::glfwGetMonitors(&mut count) };
        if list.is_null() {
            if count != 0 {
                error!("Monitor enumeration failed: {}", last_error_message());
            }
            return Vec::new();
        }

        let len = usize::try_from(count).unwrap_or(0);
        unsafe { slice::from_raw_parts(list, len) }
            .iter()
            .map(|&raw| Self::from_raw(raw))
            .collect()
    }

    fn handle(&self) -> PlatformResult<*mut ffi::GLFWmonitor> {
        let raw = self.raw();
        if raw.is_null() {
            Err(PlatformError::NullHandle("monitor"))
        } else {
            Ok(raw)
        }
    }

    /// Human readable monitor name
    pub fn name(&self) -> PlatformResult<String> {
        let raw = self.handle()?;
        unsafe { sys::string_from_ptr(ffi::glfwGetMonitorName(raw)) }
            .ok_or_else(native_error)
    }

    /// Position of the monitor's viewport on the virtual desktop
    pub fn position(&self) -> PlatformResult<(i32, i32)> {
        let raw = self.handle()?;
        let (mut x, mut y) = (0, 0);
        unsafe { ffi::glfwGetMonitorPos(raw, &mut x, &mut y) };
        check_native()?;
        Ok((x, y))
    }

    /// Ratio between current DPI and the platform default
    pub fn content_scale(&self) -> PlatformResult<(f32, f32)> {
        let raw = self.handle()?;
        let (mut x, mut y) = (0.0, 0.0);
        unsafe { ffi::glfwGetMonitorContentScale(raw, &mut x, &mut y) };
        check_native()?;
        Ok((x, y))
    }

    /// Current video mode
    pub fn video_mode(&self) -> PlatformResult<VideoMode> {
        let raw = self.handle()?;
        let mode = unsafe { ffi::glfwGetVideoMode(raw) };
        if mode.is_null() {
            return Err(PlatformError::NoVideoMode);
        }

        let mode = unsafe { &*mode };
        Ok(VideoMode {
            width: sys::to_u32(mode.width),
            height: sys::to_u32(mode.height),
            red_bits: sys::to_u32(mode.redBits),
            green_bits: sys::to_u32(mode.greenBits),
            blue_bits: sys::to_u32(mode.blueBits),
            refresh_rate: sys::to_u32(mode.refreshRate),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_monitor_queries_fail() {
        let monitor = Monitor::null();
        assert!(monitor.is_null());
        assert!(matches!(monitor.name(), Err(PlatformError::NullHandle("monitor"))));
        assert!(matches!(monitor.video_mode(), Err(PlatformError::NullHandle(_))));
    }

    #[test]
    fn test_default_monitor_is_null() {
        assert_eq!(Monitor::default(), Monitor::null());
    }
}

//! Cursors
//!
//! Cursors are owned: the last [`Cursor`] clone destroys the native cursor and
//! releases its video subsystem reference.

use std::ops::Deref;

use glfw::ffi;
use image::RgbaImage;
use log::{debug, error};

use super::error::{last_error_message, PlatformError, PlatformResult};
use super::sys;
use super::video::VideoGuard;
use crate::resource::SharedResource;

/// System cursor shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CursorShape {
    /// Regular arrow
    Arrow,
    /// Text input I-beam
    IBeam,
    /// Crosshair
    Crosshair,
    /// Pointing hand
    Hand,
    /// Horizontal resize arrows
    HorizontalResize,
    /// Vertical resize arrows
    VerticalResize,
}

impl CursorShape {
    pub(crate) const fn native(self) -> std::os::raw::c_int {
        match self {
            Self::Arrow => ffi::ARROW_CURSOR,
            Self::IBeam => ffi::IBEAM_CURSOR,
            Self::Crosshair => ffi::CROSSHAIR_CURSOR,
            Self::Hand => ffi::HAND_CURSOR,
            Self::HorizontalResize => ffi::HRESIZE_CURSOR,
            Self::VerticalResize => ffi::VRESIZE_CURSOR,
        }
    }
}

/// Shared owner of a native cursor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cursor(SharedResource<ffi::GLFWcursor>);

impl Deref for Cursor {
    type Target = SharedResource<ffi::GLFWcursor>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Cursor {
    /// The null cursor. Setting it on a window restores the default arrow.
    pub const fn null() -> Self {
        Self(SharedResource::null())
    }

    /// Create one of the system cursors
    pub fn standard(shape: CursorShape) -> PlatformResult<Self> {
        let video = VideoGuard::acquire()?;
        let raw = unsafe { ffi::glfwCreateStandardCursor(shape.native()) };
        Self::owning(raw, video)
    }

    /// Create a cursor from RGBA pixels with the hot spot at (`hot_x`, `hot_y`)
    pub fn from_image(image: &RgbaImage, hot_x: u32, hot_y: u32) -> PlatformResult<Self> {
        let video = VideoGuard::acquire()?;
        let native = ffi::GLFWimage {
            width: sys::to_c_int(image.width(), "cursor width")?,
            height: sys::to_c_int(image.height(), "cursor height")?,
            pixels: image.as_raw().as_ptr() as _,
        };
        let raw = unsafe {
            ffi::glfwCreateCursor(
                &native,
                sys::to_c_int(hot_x, "hot spot x")?,
                sys::to_c_int(hot_y, "hot spot y")?,
            )
        };
        Self::owning(raw, video)
    }

    fn owning(raw: *mut ffi::GLFWcursor, video: VideoGuard) -> PlatformResult<Self> {
        if raw.is_null() {
            let message = last_error_message();
            error!("Cursor creation failed: {message}");
            return Err(PlatformError::CreationFailed(message));
        }

        debug!("Created cursor {raw:?}");
        Ok(Self(SharedResource::new(raw, move |cursor| {
            unsafe { ffi::glfwDestroyCursor(cursor) };
            debug!("Destroyed cursor {cursor:?}");
            drop(video);
        })))
    }
}

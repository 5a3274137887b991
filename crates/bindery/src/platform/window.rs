//! Windows
//!
//! [`Window`] is a shared owner of a native window. Cloning it shares the same
//! window; the last clone destroys it and then releases its reference to the
//! video subsystem.
//!
//! Every window created here is tracked per thread by a weak reference.
//! [`Window::current_context`] upgrades that reference, so a lookup either
//! shares a live window or yields the null window, never a destroyed handle.
//!
//! Every method checks for the null window first and returns
//! [`PlatformError::NullHandle`] instead of passing null to the library.
//! Setters report failures the library records in its error slot; that slot
//! is global, so an error left pending by an unrelated earlier call surfaces
//! on the next checked call.

use std::cell::RefCell;
use std::collections::HashMap;
use std::ops::Deref;
use std::os::raw::c_int;
use std::ptr;

use glfw::ffi;
use image::RgbaImage;
use log::{debug, error};

use super::cursor::Cursor;
use super::error::{check_native, last_error_message, PlatformError, PlatformResult};
use super::flags::WindowFlags;
use super::monitor::Monitor;
use super::sys;
use super::video::VideoGuard;
use crate::config::WindowConfig;
use crate::resource::{SharedResource, WeakResource};

/// Size of the window frame around the content area, in screen coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Borders {
    /// Title bar side
    pub top: u32,
    /// Left edge
    pub left: u32,
    /// Bottom edge
    pub bottom: u32,
    /// Right edge
    pub right: u32,
}

/// Shared owner of a native window
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Window(SharedResource<ffi::GLFWwindow>);

impl Deref for Window {
    type Target = SharedResource<ffi::GLFWwindow>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

thread_local! {
    static LIVE_WINDOWS: RefCell<HashMap<*mut ffi::GLFWwindow, WeakResource<ffi::GLFWwindow>>> =
        RefCell::new(HashMap::new());
}

fn track(window: &SharedResource<ffi::GLFWwindow>) {
    LIVE_WINDOWS.with(|live| {
        live.borrow_mut().insert(window.raw(), window.downgrade());
    });
}

fn untrack(raw: *mut ffi::GLFWwindow) {
    // The table is already gone when the last window drops during thread exit.
    let _ = LIVE_WINDOWS.try_with(|live| live.borrow_mut().remove(&raw));
}

fn tracked(raw: *mut ffi::GLFWwindow) -> SharedResource<ffi::GLFWwindow> {
    if raw.is_null() {
        return SharedResource::null();
    }
    LIVE_WINDOWS.with(|live| {
        live.borrow()
            .get(&raw)
            .map_or_else(SharedResource::null, WeakResource::upgrade)
    })
}

/// Generates `is_*` queries, one per window flag.
macro_rules! flag_queries {
    ($($(#[$meta:meta])* $name:ident => $flag:ident;)*) => {
        $(
            $(#[$meta])*
            pub fn $name(&self) -> PlatformResult<bool> {
                Ok(self.flags()?.contains(WindowFlags::$flag))
            }
        )*
    };
}

impl Window {
    /// Title used when none is given
    pub const DEFAULT_TITLE: &'static str = "UNNAMED WINDOW";
    /// Width used when none is given
    pub const DEFAULT_WIDTH: u32 = 640;
    /// Height used when none is given
    pub const DEFAULT_HEIGHT: u32 = 480;
    /// Flags used when none are given
    pub const DEFAULT_FLAGS: WindowFlags = WindowFlags::empty();

    /// The null window
    pub const fn null() -> Self {
        Self(SharedResource::null())
    }

    /// Create a window.
    ///
    /// Starts the video subsystem if this is its first user. `FULLSCREEN`
    /// places the window on the primary monitor at the requested size.
    pub fn create(title: &str, width: u32, height: u32, flags: WindowFlags) -> PlatformResult<Self> {
        let video = VideoGuard::acquire()?;
        let c_title = sys::to_c_string(title)?;
        let c_width = sys::to_c_int(width, "width")?;
        let c_height = sys::to_c_int(height, "height")?;

        unsafe {
            ffi::glfwDefaultWindowHints();
            for (hint, value) in flags.creation_hints() {
                ffi::glfwWindowHint(hint, value);
            }
        }

        let monitor = if flags.contains(WindowFlags::FULLSCREEN) {
            unsafe { ffi::glfwGetPrimaryMonitor() }
        } else {
            ptr::null_mut()
        };

        let raw = unsafe {
            ffi::glfwCreateWindow(c_width, c_height, c_title.as_ptr(), monitor, ptr::null_mut())
        };
        if raw.is_null() {
            let message = last_error_message();
            error!("Failed to create window '{title}': {message}");
            return Err(PlatformError::CreationFailed(message));
        }

        debug!("Created window {raw:?} '{title}' ({width}x{height}, {flags:?})");
        let window = Self::owning(raw, video);

        if flags.contains(WindowFlags::MINIMIZED) {
            window.minimize()?;
        }

        Ok(window)
    }

    /// Create a window with the default title, size and flags
    pub fn with_defaults() -> PlatformResult<Self> {
        Self::create(
            Self::DEFAULT_TITLE,
            Self::DEFAULT_WIDTH,
            Self::DEFAULT_HEIGHT,
            Self::DEFAULT_FLAGS,
        )
    }

    /// Create a window from a loaded configuration
    pub fn from_config(config: &WindowConfig) -> PlatformResult<Self> {
        let window = Self::create(&config.title, config.width, config.height, config.flags)?;

        if let Some((x, y)) = config.position {
            window.set_position(x, y)?;
        }
        if let Some(opacity) = config.opacity {
            window.set_opacity(opacity)?;
        }

        Ok(window)
    }

    /// Window whose context is current on this thread.
    ///
    /// The result shares ownership with the window's other clones. Returns the
    /// null window when no context is current, or when the current context
    /// belongs to a window not created through [`Window`].
    pub fn current_context() -> Self {
        if VideoGuard::active_count() == 0 {
            return Self::null();
        }
        Self(tracked(unsafe { ffi::glfwGetCurrentContext() }))
    }

    fn owning(raw: *mut ffi::GLFWwindow, video: VideoGuard) -> Self {
        let shared = SharedResource::new(raw, move |window| {
            untrack(window);
            Self::destroy(window);
            drop(video);
        });
        track(&shared);
        Self(shared)
    }

    /// Default deleter for owned windows.
    fn destroy(window: *mut ffi::GLFWwindow) {
        if window.is_null() {
            return;
        }
        unsafe { ffi::glfwDestroyWindow(window) };
        debug!("Destroyed window {window:?}");
    }

    fn handle(&self) -> PlatformResult<*mut ffi::GLFWwindow> {
        let raw = self.raw();
        if raw.is_null() {
            Err(PlatformError::NullHandle("window"))
        } else {
            Ok(raw)
        }
    }

    fn set_attribute(&self, attribute: c_int, value: bool) -> PlatformResult<()> {
        let raw = self.handle()?;
        unsafe { ffi::glfwSetWindowAttrib(raw, attribute, sys::from_bool(value)) };
        check_native()
    }

    // ---- state queries ----

    /// Current state of the window as a flag set
    pub fn flags(&self) -> PlatformResult<WindowFlags> {
        let raw = self.handle()?;
        let fullscreen = unsafe { !ffi::glfwGetWindowMonitor(raw).is_null() };
        Ok(WindowFlags::from_attributes(
            |attribute| unsafe { ffi::glfwGetWindowAttrib(raw, attribute) },
            fullscreen,
        ))
    }

    flag_queries! {
        /// Is the window on a monitor in fullscreen mode?
        is_fullscreen => FULLSCREEN;
        /// Is the window hidden?
        is_hidden => HIDDEN;
        /// Is the window missing its decorations?
        is_borderless => BORDERLESS;
        /// Can the user resize the window?
        is_resizable => RESIZABLE;
        /// Is the window iconified?
        is_minimized => MINIMIZED;
        /// Is the window maximized?
        is_maximized => MAXIMIZED;
        /// Does the window hold keyboard focus?
        is_input_focus => INPUT_FOCUS;
        /// Is the cursor over the content area?
        is_mouse_focus => MOUSE_FOCUS;
        /// Does the window float above others?
        is_always_on_top => ALWAYS_ON_TOP;
        /// Is the framebuffer transparent?
        is_transparent => TRANSPARENT;
        /// Does the window have an OpenGL context?
        is_opengl => OPENGL;
    }

    /// Will the window take focus when shown?
    pub fn is_focusable(&self) -> PlatformResult<bool> {
        Ok(!self.flags()?.contains(WindowFlags::NOT_FOCUSABLE))
    }

    /// Content area size in screen coordinates
    pub fn size(&self) -> PlatformResult<(u32, u32)> {
        let raw = self.handle()?;
        let (mut width, mut height) = (0, 0);
        unsafe { ffi::glfwGetWindowSize(raw, &mut width, &mut height) };
        check_native()?;
        Ok((sys::to_u32(width), sys::to_u32(height)))
    }

    /// Content area width
    pub fn width(&self) -> PlatformResult<u32> {
        self.size().map(|(width, _)| width)
    }

    /// Content area height
    pub fn height(&self) -> PlatformResult<u32> {
        self.size().map(|(_, height)| height)
    }

    /// Framebuffer size in pixels
    pub fn framebuffer_size(&self) -> PlatformResult<(u32, u32)> {
        let raw = self.handle()?;
        let (mut width, mut height) = (0, 0);
        unsafe { ffi::glfwGetFramebufferSize(raw, &mut width, &mut height) };
        check_native()?;
        Ok((sys::to_u32(width), sys::to_u32(height)))
    }

    /// Position of the content area's top-left corner
    pub fn position(&self) -> PlatformResult<(i32, i32)> {
        let raw = self.handle()?;
        let (mut x, mut y) = (0, 0);
        unsafe { ffi::glfwGetWindowPos(raw, &mut x, &mut y) };
        check_native()?;
        Ok((x, y))
    }

    /// Size of the frame around the content area
    pub fn borders_size(&self) -> PlatformResult<Borders> {
        let raw = self.handle()?;
        let (mut left, mut top, mut right, mut bottom) = (0, 0, 0, 0);
        unsafe { ffi::glfwGetWindowFrameSize(raw, &mut left, &mut top, &mut right, &mut bottom) };
        check_native()?;
        Ok(Borders {
            top: sys::to_u32(top),
            left: sys::to_u32(left),
            bottom: sys::to_u32(bottom),
            right: sys::to_u32(right),
        })
    }

    /// Ratio between current DPI and the platform default
    pub fn content_scale(&self) -> PlatformResult<(f32, f32)> {
        let raw = self.handle()?;
        let (mut x, mut y) = (0.0, 0.0);
        unsafe { ffi::glfwGetWindowContentScale(raw, &mut x, &mut y) };
        check_native()?;
        Ok((x, y))
    }

    /// Opacity between 0.0 (transparent) and 1.0 (opaque)
    pub fn opacity(&self) -> PlatformResult<f32> {
        let raw = self.handle()?;
        let opacity = unsafe { ffi::glfwGetWindowOpacity(raw) };
        check_native()?;
        Ok(opacity)
    }

    /// Has closing been requested?
    pub fn should_close(&self) -> PlatformResult<bool> {
        let raw = self.handle()?;
        Ok(sys::to_bool(unsafe { ffi::glfwWindowShouldClose(raw) }))
    }

    /// Monitor the window is fullscreen on, or the null monitor when windowed
    pub fn monitor(&self) -> PlatformResult<Monitor> {
        let raw = self.handle()?;
        Ok(Monitor::from_raw(unsafe { ffi::glfwGetWindowMonitor(raw) }))
    }

    // ---- commands ----

    /// Make the window visible
    pub fn show(&self) -> PlatformResult<()> {
        let raw = self.handle()?;
        unsafe { ffi::glfwShowWindow(raw) };
        check_native()
    }

    /// Hide the window
    pub fn hide(&self) -> PlatformResult<()> {
        let raw = self.handle()?;
        unsafe { ffi::glfwHideWindow(raw) };
        check_native()
    }

    /// Iconify the window
    pub fn minimize(&self) -> PlatformResult<()> {
        let raw = self.handle()?;
        unsafe { ffi::glfwIconifyWindow(raw) };
        check_native()
    }

    /// Maximize the window
    pub fn maximize(&self) -> PlatformResult<()> {
        let raw = self.handle()?;
        unsafe { ffi::glfwMaximizeWindow(raw) };
        check_native()
    }

    /// Undo minimize or maximize
    pub fn restore(&self) -> PlatformResult<()> {
        let raw = self.handle()?;
        unsafe { ffi::glfwRestoreWindow(raw) };
        check_native()
    }

    /// Bring the window to front and give it input focus
    pub fn raise(&self) -> PlatformResult<()> {
        let raw = self.handle()?;
        unsafe { ffi::glfwFocusWindow(raw) };
        check_native()
    }

    /// Ask the user's attention without stealing focus
    pub fn flash(&self) -> PlatformResult<()> {
        let raw = self.handle()?;
        unsafe { ffi::glfwRequestWindowAttention(raw) };
        check_native()
    }

    /// Change the title
    pub fn set_title(&self, title: &str) -> PlatformResult<()> {
        let raw = self.handle()?;
        let c_title = sys::to_c_string(title)?;
        unsafe { ffi::glfwSetWindowTitle(raw, c_title.as_ptr()) };
        check_native()
    }

    /// Resize the content area
    pub fn set_size(&self, width: u32, height: u32) -> PlatformResult<()> {
        let raw = self.handle()?;
        let width = sys::to_c_int(width, "width")?;
        let height = sys::to_c_int(height, "height")?;
        unsafe { ffi::glfwSetWindowSize(raw, width, height) };
        check_native()
    }

    /// Move the content area's top-left corner
    pub fn set_position(&self, x: i32, y: i32) -> PlatformResult<()> {
        let raw = self.handle()?;
        unsafe { ffi::glfwSetWindowPos(raw, x, y) };
        check_native()
    }

    /// Constrain the content area size. `None` leaves that bound open.
    pub fn set_size_limits(
        &self,
        minimum: Option<(u32, u32)>,
        maximum: Option<(u32, u32)>,
    ) -> PlatformResult<()> {
        let raw = self.handle()?;
        let bound = |limit: Option<(u32, u32)>| -> PlatformResult<(c_int, c_int)> {
            match limit {
                Some((width, height)) => Ok((
                    sys::to_c_int(width, "width limit")?,
                    sys::to_c_int(height, "height limit")?,
                )),
                None => Ok((ffi::DONT_CARE, ffi::DONT_CARE)),
            }
        };
        let (min_width, min_height) = bound(minimum)?;
        let (max_width, max_height) = bound(maximum)?;
        unsafe { ffi::glfwSetWindowSizeLimits(raw, min_width, min_height, max_width, max_height) };
        check_native()
    }

    /// Lock the content area to `numerator:denominator`, or unlock with `None`
    pub fn set_aspect_ratio(&self, ratio: Option<(u32, u32)>) -> PlatformResult<()> {
        let raw = self.handle()?;
        let (numerator, denominator) = match ratio {
            Some((numerator, denominator)) => (
                sys::to_c_int(numerator, "aspect numerator")?,
                sys::to_c_int(denominator, "aspect denominator")?,
            ),
            None => (ffi::DONT_CARE, ffi::DONT_CARE),
        };
        unsafe { ffi::glfwSetWindowAspectRatio(raw, numerator, denominator) };
        check_native()
    }

    /// Set opacity, clamped to 0.0..=1.0
    pub fn set_opacity(&self, opacity: f32) -> PlatformResult<()> {
        let raw = self.handle()?;
        unsafe { ffi::glfwSetWindowOpacity(raw, opacity.clamp(0.0, 1.0)) };
        check_native()
    }

    /// Allow or forbid user resizing
    pub fn set_resizable(&self, resizable: bool) -> PlatformResult<()> {
        self.set_attribute(ffi::RESIZABLE, resizable)
    }

    /// Add or remove decorations
    pub fn set_bordered(&self, bordered: bool) -> PlatformResult<()> {
        self.set_attribute(ffi::DECORATED, bordered)
    }

    /// Float above other windows
    pub fn set_always_on_top(&self, on_top: bool) -> PlatformResult<()> {
        self.set_attribute(ffi::FLOATING, on_top)
    }

    /// Whether showing the window gives it focus
    pub fn set_focusable(&self, focusable: bool) -> PlatformResult<()> {
        self.set_attribute(ffi::FOCUS_ON_SHOW, focusable)
    }

    /// Raise or clear the close request
    pub fn set_should_close(&self, should_close: bool) -> PlatformResult<()> {
        let raw = self.handle()?;
        unsafe { ffi::glfwSetWindowShouldClose(raw, sys::from_bool(should_close)) };
        Ok(())
    }

    /// Go fullscreen on `monitor` at its current video mode
    pub fn set_fullscreen(&self, monitor: &Monitor) -> PlatformResult<()> {
        let raw = self.handle()?;
        let mode = monitor.video_mode()?;
        unsafe {
            ffi::glfwSetWindowMonitor(
                raw,
                monitor.raw(),
                0,
                0,
                sys::to_c_int(mode.width, "mode width")?,
                sys::to_c_int(mode.height, "mode height")?,
                sys::to_c_int(mode.refresh_rate, "refresh rate")?,
            );
        }
        check_native()
    }

    /// Leave fullscreen, placing the content area at the given rectangle
    pub fn set_windowed(&self, x: i32, y: i32, width: u32, height: u32) -> PlatformResult<()> {
        let raw = self.handle()?;
        let width = sys::to_c_int(width, "width")?;
        let height = sys::to_c_int(height, "height")?;
        unsafe { ffi::glfwSetWindowMonitor(raw, ptr::null_mut(), x, y, width, height, ffi::DONT_CARE) };
        check_native()
    }

    /// Replace the window icon with RGBA pixels
    pub fn set_icon(&self, icon: &RgbaImage) -> PlatformResult<()> {
        let raw = self.handle()?;
        let native = ffi::GLFWimage {
            width: sys::to_c_int(icon.width(), "icon width")?,
            height: sys::to_c_int(icon.height(), "icon height")?,
            pixels: icon.as_raw().as_ptr() as _,
        };
        unsafe { ffi::glfwSetWindowIcon(raw, 1, &native) };
        check_native()
    }

    /// Revert to the platform default icon
    pub fn clear_icon(&self) -> PlatformResult<()> {
        let raw = self.handle()?;
        unsafe { ffi::glfwSetWindowIcon(raw, 0, ptr::null()) };
        check_native()
    }

    /// Use `cursor` over the content area; the null cursor restores the arrow.
    ///
    /// The window does not keep `cursor` alive; hold on to it while in use.
    pub fn set_cursor(&self, cursor: &Cursor) -> PlatformResult<()> {
        let raw = self.handle()?;
        unsafe { ffi::glfwSetCursor(raw, cursor.raw()) };
        check_native()
    }

    /// Make this window's context current on the calling thread
    pub fn make_context_current(&self) -> PlatformResult<()> {
        let raw = self.handle()?;
        unsafe { ffi::glfwMakeContextCurrent(raw) };
        check_native()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(Window::DEFAULT_TITLE, "UNNAMED WINDOW");
        assert_eq!((Window::DEFAULT_WIDTH, Window::DEFAULT_HEIGHT), (640, 480));
        assert!(Window::DEFAULT_FLAGS.is_empty());
    }

    #[test]
    fn test_null_window_is_falsy() {
        let window = Window::null();
        assert!(window.is_null());
        assert!(*window == ptr::null_mut());
        assert_eq!(window, Window::default());
    }

    #[test]
    fn test_null_window_operations_fail_without_native_calls() {
        let window = Window::null();
        assert!(matches!(window.size(), Err(PlatformError::NullHandle("window"))));
        assert!(matches!(window.flags(), Err(PlatformError::NullHandle(_))));
        assert!(matches!(window.is_resizable(), Err(PlatformError::NullHandle(_))));
        assert!(matches!(window.show(), Err(PlatformError::NullHandle(_))));
        assert!(matches!(window.set_title("x"), Err(PlatformError::NullHandle(_))));
        assert!(matches!(window.set_cursor(&Cursor::null()), Err(PlatformError::NullHandle(_))));
    }

    #[test]
    fn test_tracked_window_upgrades_only_while_alive() {
        let raw = ptr::NonNull::<ffi::GLFWwindow>::dangling().as_ptr();
        let owner = SharedResource::new(raw, untrack);
        track(&owner);

        let found = tracked(raw);
        assert_eq!(found, owner);
        assert_eq!(owner.use_count(), 2);
        drop(found);

        drop(owner);
        assert!(tracked(raw).is_null());
        assert!(tracked(ptr::null_mut()).is_null());
    }

    #[test]
    fn test_untracked_window_is_not_found() {
        let raw = ptr::NonNull::<ffi::GLFWwindow>::dangling().as_ptr();
        assert!(tracked(raw).is_null());
    }

    #[test]
    fn test_current_context_without_video_is_null() {
        if VideoGuard::active_count() == 0 {
            assert!(Window::current_context().is_null());
        }
    }

    #[test]
    fn test_clone_of_null_window_stays_null() {
        let window = Window::null();
        let copy = window.clone();
        assert_eq!(copy.use_count(), 0);
        assert!(copy.is_null());
    }
}

//! Native windowing bindings
//!
//! Thin wrappers over the GLFW C API. Each wrapper method forwards to a single
//! native call and converts its result into a [`PlatformResult`].
//!
//! # Ownership
//!
//! | Type | Held as | Released by |
//! |---|---|---|
//! | [`Window`] | owning or non-owning [`SharedResource`](crate::resource::SharedResource) | `glfwDestroyWindow` |
//! | [`Cursor`] | owning `SharedResource` | `glfwDestroyCursor` |
//! | [`Monitor`] | non-owning `SharedResource` | the library |
//! | [`Clipboard`], [`Joystick`] | plain value holding a [`VideoGuard`] | nothing to free |
//!
//! Every owning wrapper keeps a [`VideoGuard`], so the library stays
//! initialized exactly as long as something needs it.

pub mod clipboard;
pub mod cursor;
pub mod error;
pub mod flags;
pub mod joystick;
pub mod monitor;
pub(crate) mod sys;
pub mod video;
pub mod window;

use glfw::ffi;

pub use clipboard::Clipboard;
pub use cursor::{Cursor, CursorShape};
pub use error::{last_error, PlatformError, PlatformResult};
pub use flags::WindowFlags;
pub use joystick::{Joystick, MAX_JOYSTICKS};
pub use monitor::{Monitor, VideoMode};
pub use video::{SubsystemCounter, VideoGuard};
pub use window::{Borders, Window};

/// Process pending window system events.
///
/// Fails with [`PlatformError::NotInitialized`] when nothing holds the video
/// subsystem.
pub fn poll_events() -> PlatformResult<()> {
    video::ensure_initialized()?;
    unsafe { ffi::glfwPollEvents() };
    Ok(())
}

/// Seconds elapsed since the video subsystem was initialized
pub fn time() -> PlatformResult<f64> {
    video::ensure_initialized()?;
    Ok(unsafe { ffi::glfwGetTime() })
}

//! # Bindery
//!
//! Shared-ownership wrappers for native windowing handles.
//!
//! ## Features
//!
//! - **`SharedResource<T>`**: reference-counted owner of a raw native handle with
//!   a pluggable deleter, or a non-owning view of one
//! - **Window bindings**: windows, monitors, cursors, clipboard and joysticks
//!   over the GLFW C API, each a one-call forwarder returning `Result`
//! - **Subsystem lifetime**: the native library is initialized by the first
//!   owner and terminated with the last
//! - **Configuration**: window settings loaded from TOML or RON
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bindery::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     bindery::foundation::logging::init();
//!
//!     let window = Window::create("Hello", 800, 600, WindowFlags::RESIZABLE)?;
//!     let view = window.clone(); // shares the same native window
//!
//!     while !window.should_close()? {
//!         poll_events()?;
//!     }
//!
//!     drop(view);
//!     Ok(()) // last owner dropped: window destroyed, library terminated
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod foundation;
pub mod platform;
pub mod resource;

/// Common imports for crate users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, WindowConfig},
        platform::{
            poll_events, Clipboard, Cursor, CursorShape, Joystick, Monitor, PlatformError,
            PlatformResult, VideoGuard, Window, WindowFlags,
        },
        resource::{SharedResource, WeakResource},
    };
}

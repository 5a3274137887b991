//! Window state flags
//!
//! A single bit set describes both how a window should be created and the
//! state it is currently in. The native library spreads the same information
//! over separate hints and attributes; this module translates between the two.

use std::os::raw::c_int;

use bitflags::bitflags;
use glfw::ffi;
use serde::{Deserialize, Serialize};

use super::sys;

bitflags! {
    /// Window creation options and live state.
    ///
    /// Serializes as a `|`-separated list of names, e.g. `"RESIZABLE | HIDDEN"`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct WindowFlags: u32 {
        /// Covers a monitor instead of floating on the desktop
        const FULLSCREEN = 1 << 0;
        /// Not shown
        const HIDDEN = 1 << 1;
        /// No title bar or frame
        const BORDERLESS = 1 << 2;
        /// User may resize the window
        const RESIZABLE = 1 << 3;
        /// Iconified
        const MINIMIZED = 1 << 4;
        /// Maximized
        const MAXIMIZED = 1 << 5;
        /// Holds keyboard focus
        const INPUT_FOCUS = 1 << 6;
        /// Cursor is over the content area
        const MOUSE_FOCUS = 1 << 7;
        /// Stays above other windows
        const ALWAYS_ON_TOP = 1 << 8;
        /// Framebuffer has an alpha channel composited with the desktop
        const TRANSPARENT = 1 << 9;
        /// Does not take focus when shown
        const NOT_FOCUSABLE = 1 << 10;
        /// Has an OpenGL context
        const OPENGL = 1 << 11;
        /// Created without a client API, for Vulkan surfaces
        const VULKAN = 1 << 12;
    }
}

impl Default for WindowFlags {
    fn default() -> Self {
        Self::empty()
    }
}

impl WindowFlags {
    /// Native window hints to apply before creating a window with these flags.
    ///
    /// `FULLSCREEN` and `MINIMIZED` have no hint: they are applied by choosing
    /// a monitor at creation and iconifying afterwards. Focus state flags are
    /// ignored.
    pub fn creation_hints(self) -> Vec<(c_int, c_int)> {
        let focusable = !self.contains(Self::NOT_FOCUSABLE);
        let client_api = if self.contains(Self::OPENGL) && !self.contains(Self::VULKAN) {
            ffi::OPENGL_API
        } else {
            ffi::NO_API
        };

        vec![
            (ffi::VISIBLE, sys::from_bool(!self.contains(Self::HIDDEN))),
            (ffi::DECORATED, sys::from_bool(!self.contains(Self::BORDERLESS))),
            (ffi::RESIZABLE, sys::from_bool(self.contains(Self::RESIZABLE))),
            (ffi::FLOATING, sys::from_bool(self.contains(Self::ALWAYS_ON_TOP))),
            (ffi::MAXIMIZED, sys::from_bool(self.contains(Self::MAXIMIZED))),
            (
                ffi::TRANSPARENT_FRAMEBUFFER,
                sys::from_bool(self.contains(Self::TRANSPARENT)),
            ),
            (ffi::FOCUSED, sys::from_bool(focusable)),
            (ffi::FOCUS_ON_SHOW, sys::from_bool(focusable)),
            (ffi::CLIENT_API, client_api),
        ]
    }

    /// Rebuild the flag set from native attribute queries.
    ///
    /// `attribute` is called with attribute ids and returns their native
    /// value. `VULKAN` is never reported since "no client API" does not imply
    /// Vulkan use.
    pub fn from_attributes<F>(attribute: F, fullscreen: bool) -> Self
    where
        F: Fn(c_int) -> c_int,
    {
        let set = |id| sys::to_bool(attribute(id));
        let mut flags = Self::empty();

        flags.set(Self::FULLSCREEN, fullscreen);
        flags.set(Self::HIDDEN, !set(ffi::VISIBLE));
        flags.set(Self::BORDERLESS, !set(ffi::DECORATED));
        flags.set(Self::RESIZABLE, set(ffi::RESIZABLE));
        flags.set(Self::MINIMIZED, set(ffi::ICONIFIED));
        flags.set(Self::MAXIMIZED, set(ffi::MAXIMIZED));
        flags.set(Self::INPUT_FOCUS, set(ffi::FOCUSED));
        flags.set(Self::MOUSE_FOCUS, set(ffi::HOVERED));
        flags.set(Self::ALWAYS_ON_TOP, set(ffi::FLOATING));
        flags.set(Self::TRANSPARENT, set(ffi::TRANSPARENT_FRAMEBUFFER));
        flags.set(Self::NOT_FOCUSABLE, !set(ffi::FOCUS_ON_SHOW));
        flags.set(Self::OPENGL, attribute(ffi::CLIENT_API) != ffi::NO_API);

        flags
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn hint(flags: WindowFlags, id: c_int) -> c_int {
        flags
            .creation_hints()
            .into_iter()
            .find(|(hint, _)| *hint == id)
            .map(|(_, value)| value)
            .expect("hint present")
    }

    #[test]
    fn test_default_hints_show_decorated_window() {
        let flags = WindowFlags::default();
        assert_eq!(hint(flags, ffi::VISIBLE), ffi::TRUE);
        assert_eq!(hint(flags, ffi::DECORATED), ffi::TRUE);
        assert_eq!(hint(flags, ffi::RESIZABLE), ffi::FALSE);
        assert_eq!(hint(flags, ffi::FOCUSED), ffi::TRUE);
        assert_eq!(hint(flags, ffi::CLIENT_API), ffi::NO_API);
    }

    #[test]
    fn test_hidden_borderless_hints() {
        let flags = WindowFlags::HIDDEN | WindowFlags::BORDERLESS | WindowFlags::NOT_FOCUSABLE;
        assert_eq!(hint(flags, ffi::VISIBLE), ffi::FALSE);
        assert_eq!(hint(flags, ffi::DECORATED), ffi::FALSE);
        assert_eq!(hint(flags, ffi::FOCUSED), ffi::FALSE);
        assert_eq!(hint(flags, ffi::FOCUS_ON_SHOW), ffi::FALSE);
    }

    #[test]
    fn test_vulkan_overrides_opengl() {
        let flags = WindowFlags::OPENGL | WindowFlags::VULKAN;
        assert_eq!(hint(flags, ffi::CLIENT_API), ffi::NO_API);
        assert_eq!(hint(WindowFlags::OPENGL, ffi::CLIENT_API), ffi::OPENGL_API);
    }

    #[test]
    fn test_hints_round_trip_through_attributes() {
        let requested = WindowFlags::RESIZABLE
            | WindowFlags::BORDERLESS
            | WindowFlags::ALWAYS_ON_TOP
            | WindowFlags::TRANSPARENT
            | WindowFlags::OPENGL;

        // Attributes not set by a hint read as false. FOCUSED is live state
        // once the window exists, so it is left out.
        let attributes: HashMap<c_int, c_int> = requested
            .creation_hints()
            .into_iter()
            .filter(|(id, _)| *id != ffi::FOCUSED)
            .collect();
        let observed =
            WindowFlags::from_attributes(|id| attributes.get(&id).copied().unwrap_or(0), false);

        assert_eq!(observed, requested);
    }

    #[test]
    fn test_attributes_report_live_state() {
        let attributes: HashMap<c_int, c_int> = [
            (ffi::VISIBLE, ffi::TRUE),
            (ffi::DECORATED, ffi::TRUE),
            (ffi::FOCUS_ON_SHOW, ffi::TRUE),
            (ffi::ICONIFIED, ffi::TRUE),
            (ffi::FOCUSED, ffi::TRUE),
            (ffi::HOVERED, ffi::TRUE),
        ]
        .into_iter()
        .collect();

        let flags = WindowFlags::from_attributes(|id| attributes.get(&id).copied().unwrap_or(0), true);
        assert_eq!(
            flags,
            WindowFlags::FULLSCREEN
                | WindowFlags::MINIMIZED
                | WindowFlags::INPUT_FOCUS
                | WindowFlags::MOUSE_FOCUS
        );
    }

    #[test]
    fn test_flags_parse_from_names() {
        let flags: WindowFlags = bitflags::parser::from_str("RESIZABLE | HIDDEN").unwrap();
        assert_eq!(flags, WindowFlags::RESIZABLE | WindowFlags::HIDDEN);
    }
}

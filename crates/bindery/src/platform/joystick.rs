//! Joysticks
//!
//! Joysticks are addressed by slot number rather than by pointer, so a
//! [`Joystick`] just remembers its slot and keeps the video subsystem alive.

use std::os::raw::c_int;
use std::slice;

use glfw::ffi;
use log::debug;

use super::error::{PlatformError, PlatformResult};
use super::sys;
use super::video::VideoGuard;

/// Number of joystick slots the library tracks
pub const MAX_JOYSTICKS: i32 = ffi::JOYSTICK_LAST + 1;

/// A connected joystick or gamepad
#[derive(Debug)]
pub struct Joystick {
    id: c_int,
    _video: VideoGuard,
}

fn check_slot(id: i32) -> PlatformResult<c_int> {
    if (0..MAX_JOYSTICKS).contains(&id) {
        Ok(id)
    } else {
        Err(PlatformError::InvalidArgument(format!(
            "joystick slot {id} is outside 0..{MAX_JOYSTICKS}"
        )))
    }
}

fn slot_present(id: c_int) -> bool {
    sys::to_bool(unsafe { ffi::glfwJoystickPresent(id) })
}

impl Joystick {
    /// Slots that currently have a joystick attached
    pub fn connected() -> PlatformResult<Vec<i32>> {
        let _video = VideoGuard::acquire()?;
        Ok((0..MAX_JOYSTICKS).filter(|&id| slot_present(id)).collect())
    }

    /// Open the joystick in slot `id`
    pub fn open(id: i32) -> PlatformResult<Self> {
        let id = check_slot(id)?;
        let video = VideoGuard::acquire()?;
        if !slot_present(id) {
            return Err(PlatformError::JoystickUnavailable(id));
        }

        debug!("Opened joystick {id}");
        Ok(Self { id, _video: video })
    }

    /// Slot number
    pub const fn id(&self) -> i32 {
        self.id
    }

    /// Is the joystick still attached?
    pub fn is_present(&self) -> bool {
        slot_present(self.id)
    }

    /// Does the joystick have a gamepad mapping?
    pub fn is_gamepad(&self) -> bool {
        sys::to_bool(unsafe { ffi::glfwJoystickIsGamepad(self.id) })
    }

    /// Device name, `None` once disconnected
    pub fn name(&self) -> Option<String> {
        unsafe { sys::string_from_ptr(ffi::glfwGetJoystickName(self.id)) }
    }

    /// SDL-compatible device GUID, `None` once disconnected
    pub fn guid(&self) -> Option<String> {
        unsafe { sys::string_from_ptr(ffi::glfwGetJoystickGUID(self.id)) }
    }

    /// Axis positions in -1.0..=1.0; empty once disconnected
    pub fn axes(&self) -> Vec<f32> {
        let mut count: c_int = 0;
        let raw = unsafe { ffi::glfwGetJoystickAxes(self.id, &mut count) };
        if raw.is_null() {
            return Vec::new();
        }
        let len = usize::try_from(count).unwrap_or(0);
        unsafe { slice::from_raw_parts(raw, len) }.to_vec()
    }

    /// Button states, `true` when pressed; empty once disconnected
    pub fn buttons(&self) -> Vec<bool> {
        let mut count: c_int = 0;
        let raw = unsafe { ffi::glfwGetJoystickButtons(self.id, &mut count) };
        if raw.is_null() {
            return Vec::new();
        }
        let len = usize::try_from(count).unwrap_or(0);
        unsafe { slice::from_raw_parts(raw, len) }
            .iter()
            .map(|&state| c_int::from(state) == ffi::PRESS)
            .collect()
    }
}

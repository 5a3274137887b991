//! Video subsystem reference counting
//!
//! The native library must be initialized before any window, cursor or
//! clipboard call and terminated once nothing uses it anymore. Each owning
//! wrapper holds a [`VideoGuard`]; the first guard initializes the library and
//! the last one to drop terminates it.

use std::marker::PhantomData;
use std::sync::{Mutex, MutexGuard, PoisonError};

use glfw::ffi;
use log::{debug, warn};

use super::error::{last_error_message, PlatformError, PlatformResult};
use super::sys;

/// Counts users of a global subsystem with paired init/quit calls.
///
/// Init runs on the 0 → 1 transition and quit on the 1 → 0 transition. A
/// failed init leaves the count untouched.
#[derive(Debug, Default)]
pub struct SubsystemCounter {
    count: Mutex<usize>,
}

impl SubsystemCounter {
    /// Create a counter with no users
    pub const fn new() -> Self {
        Self {
            count: Mutex::new(0),
        }
    }

    /// Register a user, running `init` if this is the first one.
    pub fn acquire<F, E>(&self, init: F) -> Result<(), E>
    where
        F: FnOnce() -> Result<(), E>,
    {
        let mut count = self.lock();
        if *count == 0 {
            init()?;
        }
        *count += 1;
        Ok(())
    }

    /// Unregister a user, running `quit` if it was the last one.
    pub fn release<F>(&self, quit: F)
    where
        F: FnOnce(),
    {
        let mut count = self.lock();
        match *count {
            0 => warn!("Subsystem released more times than acquired"),
            1 => {
                *count = 0;
                quit();
            }
            _ => *count -= 1,
        }
    }

    /// Current number of users
    pub fn count(&self) -> usize {
        *self.lock()
    }

    fn lock(&self) -> MutexGuard<'_, usize> {
        self.count.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

static VIDEO: SubsystemCounter = SubsystemCounter::new();

/// One reference to the initialized video subsystem.
///
/// Not `Clone`: acquire another guard instead, so every guard maps to exactly
/// one release.
#[derive(Debug)]
pub struct VideoGuard {
    // Native init/terminate must stay on the creating thread.
    _not_send: PhantomData<*const ()>,
}

impl VideoGuard {
    /// Take a reference to the video subsystem, initializing it if needed.
    pub fn acquire() -> PlatformResult<Self> {
        VIDEO.acquire(|| {
            if sys::to_bool(unsafe { ffi::glfwInit() }) {
                debug!("Video subsystem initialized");
                Ok(())
            } else {
                Err(PlatformError::InitializationFailed(last_error_message()))
            }
        })?;

        Ok(Self {
            _not_send: PhantomData,
        })
    }

    /// Number of guards currently alive
    pub fn active_count() -> usize {
        VIDEO.count()
    }
}

impl Drop for VideoGuard {
    fn drop(&mut self) {
        VIDEO.release(|| {
            unsafe { ffi::glfwTerminate() };
            debug!("Video subsystem terminated");
        });
    }
}

/// Fail with [`PlatformError::NotInitialized`] unless a guard is alive.
pub(crate) fn ensure_initialized() -> PlatformResult<()> {
    if VideoGuard::active_count() == 0 {
        Err(PlatformError::NotInitialized)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_init_and_quit_run_once() {
        let counter = SubsystemCounter::new();
        let inits = Cell::new(0);
        let quits = Cell::new(0);
        let init = || -> Result<(), ()> {
            inits.set(inits.get() + 1);
            Ok(())
        };

        counter.acquire(init).unwrap();
        counter.acquire(init).unwrap();
        counter.acquire(init).unwrap();
        assert_eq!(inits.get(), 1);
        assert_eq!(counter.count(), 3);

        counter.release(|| quits.set(quits.get() + 1));
        counter.release(|| quits.set(quits.get() + 1));
        assert_eq!(quits.get(), 0);
        counter.release(|| quits.set(quits.get() + 1));
        assert_eq!(quits.get(), 1);
        assert_eq!(counter.count(), 0);
    }

    #[test]
    fn test_failed_init_is_not_counted() {
        let counter = SubsystemCounter::new();
        let result = counter.acquire(|| Err("no display"));
        assert_eq!(result, Err("no display"));
        assert_eq!(counter.count(), 0);

        let attempts = Cell::new(0);
        counter
            .acquire(|| -> Result<(), ()> {
                attempts.set(attempts.get() + 1);
                Ok(())
            })
            .unwrap();
        assert_eq!(attempts.get(), 1);
        assert_eq!(counter.count(), 1);
    }

    #[test]
    fn test_unbalanced_release_is_ignored() {
        let counter = SubsystemCounter::new();
        let quits = Cell::new(0);
        counter.release(|| quits.set(quits.get() + 1));
        assert_eq!(quits.get(), 0);
        assert_eq!(counter.count(), 0);
    }

    #[test]
    fn test_reinit_after_full_release() {
        let counter = SubsystemCounter::new();
        let inits = Cell::new(0);
        for _ in 0..2 {
            counter
                .acquire(|| -> Result<(), ()> {
                    inits.set(inits.get() + 1);
                    Ok(())
                })
                .unwrap();
            counter.release(|| {});
        }
        assert_eq!(inits.get(), 2);
    }
}

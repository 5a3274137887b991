//! Shared ownership of native handles
//!
//! `SharedResource<T>` is the lifetime wrapper every platform type is built on.
//! It pairs a raw `*mut T` owned by a native library with the cleanup callback
//! that releases it, and reference counts the pair so that cloning a wrapper
//! shares the handle instead of duplicating it.
//!
//! # Ownership modes
//!
//! - **Owning**: built with a real deleter (`SharedResource::new`). The deleter
//!   runs exactly once, when the last clone is dropped.
//! - **Non-owning**: built with [`SharedResource::null_deleter`] (or the
//!   [`SharedResource::non_owning`] shorthand). Used for handles whose lifetime
//!   belongs to the native library, such as a monitor.
//! - **Null**: no handle at all. Falsy, compares equal to a null pointer, and is
//!   always safe to drop.
//!
//! [`SharedResource::downgrade`] gives a [`WeakResource`] that observes a
//! handle without keeping it alive.
//!
//! A deleter is never called with a null pointer. Constructing a wrapper from a
//! null handle yields the null wrapper and discards the deleter unrun.
//!
//! # Example
//!
//! ```rust
//! use bindery::resource::SharedResource;
//! use std::ptr;
//!
//! let raw = Box::into_raw(Box::new(42_i32));
//! let owner = SharedResource::new(raw, |p| drop(unsafe { Box::from_raw(p) }));
//! let copy = owner.clone();
//!
//! assert!(owner.is_valid());
//! assert_eq!(owner, copy);
//! assert_eq!(owner.use_count(), 2);
//! assert!(SharedResource::<i32>::null() == ptr::null_mut());
//! ```

use std::fmt;
use std::ptr;
use std::sync::{Arc, Weak};

/// Cleanup callback invoked with the handle once the last owner drops.
pub type Deleter<T> = Box<dyn FnOnce(*mut T)>;

/// The reference-counted cell: one live handle and the callback that frees it.
struct Owned<T> {
    handle: *mut T,
    deleter: Option<Deleter<T>>,
}

impl<T> Drop for Owned<T> {
    fn drop(&mut self) {
        if self.handle.is_null() {
            return;
        }
        if let Some(deleter) = self.deleter.take() {
            deleter(self.handle);
        }
    }
}

/// Reference-counted owner of at most one native handle.
///
/// Cloning increments the shared count and both clones observe the same
/// handle. The stored deleter is invoked once the final clone goes away.
///
/// Not `Send` or `Sync`: native windowing handles are bound to the thread
/// that created them.
pub struct SharedResource<T> {
    inner: Option<Arc<Owned<T>>>,
}

impl<T> SharedResource<T> {
    /// Wrap `handle` under shared ownership.
    ///
    /// `deleter` is called with `handle` when the last clone of the returned
    /// wrapper is dropped. A null `handle` produces the null wrapper and the
    /// deleter is dropped without being called.
    #[allow(clippy::arc_with_non_send_sync)]
    pub fn new<D>(handle: *mut T, deleter: D) -> Self
    where
        D: FnOnce(*mut T) + 'static,
    {
        if handle.is_null() {
            return Self::null();
        }

        Self {
            inner: Some(Arc::new(Owned {
                handle,
                deleter: Some(Box::new(deleter)),
            })),
        }
    }

    /// Wrap `handle` without taking ownership of it.
    ///
    /// Dropping every clone of the result leaves the native resource alone.
    /// Equivalent to `new(handle, SharedResource::null_deleter)` without
    /// storing a callback.
    #[allow(clippy::arc_with_non_send_sync)]
    pub fn non_owning(handle: *mut T) -> Self {
        if handle.is_null() {
            return Self::null();
        }

        Self {
            inner: Some(Arc::new(Owned {
                handle,
                deleter: None,
            })),
        }
    }

    /// The null wrapper: no handle, nothing to release.
    pub const fn null() -> Self {
        Self { inner: None }
    }

    /// No-op deleter for non-owning references.
    pub fn null_deleter(_handle: *mut T) {}

    /// The raw handle, or a null pointer for the null wrapper.
    pub fn raw(&self) -> *mut T {
        self.inner
            .as_ref()
            .map_or(ptr::null_mut(), |owned| owned.handle)
    }

    /// Borrow the pointee.
    ///
    /// Returns `None` for the null wrapper.
    ///
    /// # Safety
    ///
    /// The handle must point to a live, properly aligned `T` for the duration
    /// of the returned borrow, and nothing may mutate it through another alias
    /// meanwhile. Opaque native types are usually only sound to pass back to
    /// the library through [`raw`](Self::raw).
    pub unsafe fn get(&self) -> Option<&T> {
        self.raw().as_ref()
    }

    /// True when a non-null handle is held.
    pub fn is_valid(&self) -> bool {
        !self.raw().is_null()
    }

    /// True when no handle is held.
    pub fn is_null(&self) -> bool {
        !self.is_valid()
    }

    /// Number of wrappers currently sharing this handle (0 when null).
    pub fn use_count(&self) -> usize {
        self.inner.as_ref().map_or(0, Arc::strong_count)
    }

    /// Replace this wrapper's share with a new handle.
    ///
    /// The previous share is released as if this wrapper had been dropped;
    /// other clones of it are unaffected. Resetting to the handle already
    /// held keeps the current share and drops `deleter` unrun.
    pub fn reset<D>(&mut self, handle: *mut T, deleter: D)
    where
        D: FnOnce(*mut T) + 'static,
    {
        if ptr::eq(handle, self.raw()) {
            return;
        }
        *self = Self::new(handle, deleter);
    }

    /// A weak reference that does not keep the handle alive.
    pub fn downgrade(&self) -> WeakResource<T> {
        WeakResource {
            inner: self.inner.as_ref().map(Arc::downgrade),
        }
    }
}

/// Weak counterpart of [`SharedResource`].
///
/// Upgrading yields a new share while some owner is still alive, and the null
/// wrapper once the deleter has run.
pub struct WeakResource<T> {
    inner: Option<Weak<Owned<T>>>,
}

impl<T> WeakResource<T> {
    /// A weak reference that never upgrades
    pub const fn new() -> Self {
        Self { inner: None }
    }

    /// Take a new share of the handle if it is still alive.
    pub fn upgrade(&self) -> SharedResource<T> {
        SharedResource {
            inner: self.inner.as_ref().and_then(Weak::upgrade),
        }
    }
}

impl<T> Clone for WeakResource<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> Default for WeakResource<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for WeakResource<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakResource")
            .field("alive", &self.inner.as_ref().is_some_and(|w| w.strong_count() > 0))
            .finish()
    }
}

impl<T> Clone for SharedResource<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> Default for SharedResource<T> {
    fn default() -> Self {
        Self::null()
    }
}

impl<T> PartialEq for SharedResource<T> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.raw(), other.raw())
    }
}

impl<T> Eq for SharedResource<T> {}

/// Compare against a raw pointer, most usefully `ptr::null_mut()`.
impl<T> PartialEq<*mut T> for SharedResource<T> {
    fn eq(&self, other: &*mut T) -> bool {
        ptr::eq(self.raw(), *other)
    }
}

impl<T> fmt::Debug for SharedResource<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedResource")
            .field("handle", &self.raw())
            .field("use_count", &self.use_count())
            .finish()
    }
}

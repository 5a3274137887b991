//! Resource ownership
//!
//! Every native handle the crate hands out is held by a [`SharedResource`],
//! either owning (with a real deleter) or as a non-owning view.

pub mod shared;

pub use shared::{Deleter, SharedResource, WeakResource};

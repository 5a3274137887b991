//! Foundation module - Core utilities shared by the bindings
//!
//! - Logging setup and re-exported `log` macros

pub mod logging;

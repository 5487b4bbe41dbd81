//! Core types and constants shared across the TapTunes services.
//!
//! This crate defines the domain vocabulary used by every other member of
//! the workspace: validated newtypes for card identifiers and volume
//! levels, the shared error type, and the tuning constants (debounce
//! window, poll intervals, hysteresis threshold) that the services are
//! built around.

pub mod constants;
pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::*;

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! Hardware device abstraction layer for the TapTunes services.
//!
//! This crate provides trait-based abstractions for the two physical
//! peripherals the system reads (a bank of momentary buttons and a
//! proximity tag reader) so the button dispatcher and presence tracker
//! can be written once and run against either mock devices (development
//! and testing) or real pin-level drivers.
//!
//! # Design Philosophy
//!
//! - **Async-first**: All I/O operations are asynchronous using native
//!   `async fn` in traits (Rust 1.90 + Edition 2024 RPITIT).
//! - **No-data is not an error**: a poll that sees no tag returns
//!   `Ok(None)`; errors are reserved for bus-level faults.
//! - **Exclusive ownership**: a port owns its pin/bus handle; dropping
//!   the port releases the hardware on every exit path.
//!
//! # Device Traits
//!
//! The [`InputPort`] trait represents the button bank:
//!
//! ```no_run
//! use taptunes_hardware::traits::{InputPort, Level};
//! use taptunes_hardware::error::Result;
//!
//! async fn edge<P: InputPort>(port: &mut P, channel: &str, last: Level) -> Result<bool> {
//!     let level = port.read_level(channel).await?;
//!     Ok(level.is_active() && !last.is_active())
//! }
//! ```
//!
//! The [`TagReader`] trait represents the proximity reader:
//!
//! ```no_run
//! use taptunes_hardware::traits::TagReader;
//! use taptunes_hardware::error::Result;
//!
//! async fn seen<R: TagReader>(reader: &mut R) -> Result<bool> {
//!     Ok(reader.poll_tag().await?.is_some())
//! }
//! ```
//!
//! # Mock Implementations
//!
//! The [`mock`] module ships programmable `(device, handle)` pairs used by
//! the test suites and the emulated service mode of the CLI.
//!
//! [`InputPort`]: traits::InputPort
//! [`TagReader`]: traits::TagReader

pub mod error;
pub mod mock;
pub mod traits;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{HardwareError, Result};
pub use traits::{InputPort, Level, TagReader};
pub use types::DeviceInfo;

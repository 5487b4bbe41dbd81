//! Mock device implementations for testing and development.
//!
//! This module provides simulated devices that can be controlled
//! programmatically without physical hardware. Each mock is created as a
//! `(device, handle)` pair: the device side implements the hardware trait
//! and is handed to a service, while the handle stays with the test (or
//! emulator shell) to drive levels and tag presentations.

pub mod input;
pub mod tag;

// Re-export commonly used types
pub use input::{MockInputPort, MockInputPortHandle};
pub use tag::{MockTagReader, MockTagReaderHandle};

//! Hardware device trait definitions.
//!
//! This module defines the trait interfaces that separate the TapTunes
//! services from the physical drivers. The button dispatcher and the
//! presence tracker are written against these traits, enabling
//! substitution between mock devices (development, tests) and real
//! pin-level drivers.
//!
//! All traits use native `async fn` methods (Rust 1.90 + Edition 2024
//! RPITIT), eliminating the need for the `async_trait` macro.

#![allow(async_fn_in_trait)]

use crate::error::Result;
use crate::types::DeviceInfo;
use taptunes_core::CardId;

/// Logical level of a digital input channel.
///
/// `Active` means the button is pressed, independent of the electrical
/// polarity of the underlying pin (an active-low pull-up input reports
/// `Active` on a low pin; that inversion is the driver's concern).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// Channel at rest.
    Inactive,

    /// Channel asserted (button held down).
    Active,
}

impl Level {
    /// Returns `true` for [`Level::Active`].
    #[must_use]
    pub fn is_active(self) -> bool {
        matches!(self, Level::Active)
    }
}

/// Digital input port abstraction.
///
/// Represents a bank of momentary-button inputs addressed by logical
/// channel name. The port owns the underlying pin/bus handle exclusively;
/// implementations must release it when dropped so that exactly one
/// process holds the hardware at a time.
///
/// # Object Safety and Dynamic Dispatch
///
/// This trait is NOT object-safe because `async fn` methods return
/// `impl Future` (Edition 2024 RPITIT). Use generic type parameters:
///
/// ```no_run
/// use taptunes_hardware::traits::{InputPort, Level};
/// use taptunes_hardware::error::Result;
///
/// async fn is_pressed<P: InputPort>(port: &mut P, channel: &str) -> Result<bool> {
///     Ok(port.read_level(channel).await?.is_active())
/// }
/// ```
pub trait InputPort: Send + Sync {
    /// Read the current level of one logical channel.
    ///
    /// This is a non-blocking snapshot of the pin state.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The channel name is not part of this port's roster
    /// - The underlying pin read fails
    /// - The device is disconnected
    async fn read_level(&mut self, channel: &str) -> Result<Level>;

    /// Get device information.
    ///
    /// # Errors
    ///
    /// Returns an error if a communication error occurs while querying
    /// device information.
    async fn get_info(&self) -> Result<DeviceInfo>;
}

/// Proximity tag reader abstraction.
///
/// Represents an RFID/NFC transceiver polled for tag presence. A poll is
/// non-blocking and `Ok(None)` is a recognized "no tag this cycle" state,
/// never a fault: the sensor yields false negatives even while a tag sits
/// on the reader, and the presence tracker's hysteresis absorbs them.
///
/// # Object Safety and Dynamic Dispatch
///
/// Like [`InputPort`], this trait is not object-safe; use generics.
pub trait TagReader: Send + Sync {
    /// Poll the reader once for a tag.
    ///
    /// Returns `Ok(Some(id))` when a tag was decoded this cycle and
    /// `Ok(None)` when nothing was read, including misreads of a tag that
    /// is physically present.
    ///
    /// # Errors
    ///
    /// Returns an error only for bus-level failures (SPI glitch, device
    /// disconnected), never for the mere absence of a tag.
    async fn poll_tag(&mut self) -> Result<Option<CardId>>;

    /// Get device information.
    ///
    /// # Errors
    ///
    /// Returns an error if a communication error occurs while querying
    /// device information.
    async fn get_info(&self) -> Result<DeviceInfo>;
}

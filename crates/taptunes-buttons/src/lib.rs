//! Debounced button service for TapTunes.
//!
//! Converts raw level transitions on a bank of momentary buttons into
//! single-fire playback actions. Debouncing is per channel: a rising edge
//! is accepted only when the previous accepted activation lies at least
//! one debounce window in the past, so mechanical contact bounce never
//! produces duplicate actions.
//!
//! The dispatcher talks outward only, through
//! [`ControlClient`](taptunes_client::ControlClient); a failed backend
//! call is logged and dropped for that cycle.

pub mod action;
pub mod channel;
pub mod dispatcher;

pub use action::{ButtonAction, default_roster};
pub use channel::ButtonChannel;
pub use dispatcher::{Dispatcher, DispatcherConfig};

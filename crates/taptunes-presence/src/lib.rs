//! Presence tracking service for TapTunes.
//!
//! Polls the proximity tag reader and converts its noisy per-cycle
//! results into stable arrival and departure events. The reader misreads
//! stationary tags, so departures are declared only after a configurable
//! number of consecutive empty polls (hysteresis); arrivals fire
//! immediately, including a different tag arriving while the previous
//! one's removal countdown is still running.
//!
//! Arrival notifies the backend of the scan; departure saves the playback
//! position (best-effort) and then stops playback.

pub mod state;
pub mod tracker;

pub use state::{PresenceDetector, PresenceEvent, PresenceState};
pub use tracker::{PresenceTracker, TrackerConfig};

//! HTTP client for the TapTunes playback-control backend.
//!
//! The backend exposes a small fixed JSON surface:
//!
//! | Operation | Method + Path |
//! |---|---|
//! | get current playback | `GET /audio/current` |
//! | set volume | `POST /audio/volume` |
//! | next / previous track | `POST /audio/next`, `POST /audio/previous` |
//! | play / pause / stop | `POST /audio/play`, `/pause`, `/stop` |
//! | card detected | `POST /api/rfid/card-detected` |
//! | save position | `POST /api/rfid/save-position` |
//!
//! [`ControlClient`] wraps that surface with fixed per-request timeouts
//! and a typed error enum. It performs no retries: the polling services
//! drop a failed call and pick the work up again on their next cycle if
//! the triggering condition still holds.

pub mod client;

pub use client::{ClientConfig, ClientError, ControlClient, PlaybackStatus, Result};

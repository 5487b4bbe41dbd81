//! Tuning constants for the TapTunes services.
//!
//! These values define the timing behavior of the three polling loops
//! (button dispatcher, presence tracker, process supervisor) and the
//! defaults for volume handling and backend communication. They are
//! centralized here so the services and the CLI agree on one set of
//! defaults; each service config struct builds its `Default` from them.

use std::time::Duration;

// ============================================================================
// Button Dispatcher
// ============================================================================

/// Minimum time between accepted transitions on the same channel.
///
/// Edges arriving inside this window are recorded as level changes but do
/// not fire an action; this suppresses mechanical contact bounce.
///
/// # Value: 200ms
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(200);

/// Button polling cycle.
///
/// 50ms (20Hz) comfortably outpaces human button presses while keeping the
/// loop cheap on a small board.
pub const BUTTON_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Volume change applied per button press, in percent.
pub const VOLUME_STEP: u8 = 5;

/// Lower volume bound.
pub const MIN_VOLUME: u8 = 0;

/// Upper volume bound.
pub const MAX_VOLUME: u8 = 100;

/// Local volume fallback used when the backend cannot be reached.
pub const DEFAULT_VOLUME: u8 = 75;

// ============================================================================
// Presence Tracker
// ============================================================================

/// Tag polling cycle.
pub const PRESENCE_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Consecutive empty polls required before a tag is declared removed.
///
/// The transceiver yields false negatives even while a tag sits on the
/// reader; requiring this many misses in a row (about 2 seconds at the
/// default poll rate) distinguishes a transient misread from a genuine
/// removal.
///
/// # Value: 4
pub const ABSENCE_THRESHOLD: u32 = 4;

// ============================================================================
// Process Supervisor
// ============================================================================

/// Liveness check cycle for supervised workers.
pub const MONITOR_INTERVAL: Duration = Duration::from_secs(5);

/// Maximum wait for a worker to exit after a graceful terminate before it
/// is forcefully killed.
pub const STOP_TIMEOUT: Duration = Duration::from_secs(5);

/// Settle window after launching the primary backend.
///
/// An exit within this window is treated as a startup failure rather than
/// an unexpected exit, so a misconfigured backend aborts the run instead
/// of entering a restart loop.
///
/// # Value: 3s
pub const BACKEND_SETTLE: Duration = Duration::from_secs(3);

// ============================================================================
// Backend Communication
// ============================================================================

/// Default base URL of the playback-control backend.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:3001";

/// Request timeout for the playback endpoints (volume, transport).
///
/// Short enough that an unreachable backend cannot stall the button loop
/// beyond a single request.
pub const PLAYBACK_TIMEOUT: Duration = Duration::from_secs(2);

/// Request timeout for the card endpoints (scan notify, save-position).
pub const CARD_TIMEOUT: Duration = Duration::from_secs(5);

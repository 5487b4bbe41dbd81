//! Presence tracker poll loop.
//!
//! Wires the pure [`PresenceDetector`] to its two collaborators: the
//! [`TagReader`] it polls and the [`ControlClient`] it notifies. All
//! state lives in the tracker; nothing is shared with the other services.

use crate::state::{PresenceDetector, PresenceEvent};
use std::time::Duration;
use taptunes_client::ControlClient;
use taptunes_core::constants::{ABSENCE_THRESHOLD, PRESENCE_POLL_INTERVAL};
use taptunes_hardware::TagReader;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Configuration for the presence tracker.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Consecutive empty polls before a departure fires.
    pub absence_threshold: u32,

    /// Polling cycle.
    pub poll_interval: Duration,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            absence_threshold: ABSENCE_THRESHOLD,
            poll_interval: PRESENCE_POLL_INTERVAL,
        }
    }
}

/// Presence tracker over one tag reader.
pub struct PresenceTracker<R: TagReader> {
    reader: R,
    client: ControlClient,
    detector: PresenceDetector,
    cfg: TrackerConfig,
}

impl<R: TagReader> PresenceTracker<R> {
    /// Create a tracker in the idle state.
    pub fn new(reader: R, client: ControlClient, cfg: TrackerConfig) -> Self {
        let detector = PresenceDetector::new(cfg.absence_threshold);
        Self {
            reader,
            client,
            detector,
            cfg,
        }
    }

    /// The tag currently tracked, if any.
    #[must_use]
    pub fn current(&self) -> Option<&taptunes_core::CardId> {
        self.detector.current()
    }

    /// Run one polling cycle.
    ///
    /// A reader error is logged and dropped without feeding the detector:
    /// a bus glitch is not evidence of removal, so it must not advance
    /// the absence countdown.
    pub async fn poll_once(&mut self) {
        let seen = match self.reader.poll_tag().await {
            Ok(seen) => seen,
            Err(e) => {
                warn!(error = %e, "Tag poll failed");
                return;
            }
        };

        if let Some(event) = self.detector.observe(seen) {
            debug!(state = %self.detector.state(), "Presence state changed");
            self.apply(event).await;
        }
    }

    /// Run the polling loop until the token is cancelled.
    pub async fn run(mut self, token: CancellationToken) {
        info!("Presence tracker started");
        info!(
            backend = %self.client.base_url(),
            threshold = self.cfg.absence_threshold,
            "Tracker configuration"
        );

        match self.reader.get_info().await {
            Ok(device) => info!(device = %device.name, model = %device.model, "Tag reader ready"),
            Err(e) => warn!(error = %e, "Tag reader info unavailable"),
        }

        let mut interval = tokio::time::interval(self.cfg.poll_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = token.cancelled() => break,
                _ = interval.tick() => self.poll_once().await,
            }
        }

        info!("Presence tracker stopped");
    }

    async fn apply(&self, event: PresenceEvent) {
        match event {
            PresenceEvent::Arrived(card) => {
                info!(%card, "Tag arrived");
                match self.client.notify_card_detected(&card).await {
                    Ok(()) => debug!(%card, "Card scan accepted"),
                    Err(e) if e.is_unknown_card() => warn!(%card, "Card not registered"),
                    Err(e) => warn!(%card, error = %e, "Card scan notify failed"),
                }
            }
            PresenceEvent::Departed(card) => {
                info!(%card, "Tag departed");

                // Save first, stop regardless: the position save is
                // best-effort and must never block the stop
                if let Err(e) = self.client.save_position(&card).await {
                    warn!(%card, error = %e, "Position save failed");
                }
                if let Err(e) = self.client.stop_playback().await {
                    warn!(error = %e, "Stop playback failed");
                }
            }
        }
    }
}

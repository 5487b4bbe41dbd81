//! Debounced button-to-action dispatcher.
//!
//! The dispatcher polls every channel of an [`InputPort`] on a fixed
//! cycle, runs each sample through the per-channel debounce state, and
//! turns accepted activations into backend calls. All state is local to
//! the dispatcher; nothing is shared with the other services.

use crate::{action::ButtonAction, channel::ButtonChannel};
use std::time::{Duration, Instant};
use taptunes_client::ControlClient;
use taptunes_core::{
    Volume,
    constants::{BUTTON_POLL_INTERVAL, DEBOUNCE_WINDOW, DEFAULT_VOLUME, VOLUME_STEP},
};
use taptunes_hardware::InputPort;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Configuration for the button dispatcher.
#[derive(Debug, Clone)]
pub struct DispatcherConfig {
    /// Minimum time between accepted activations on one channel.
    pub debounce_window: Duration,

    /// Polling cycle.
    pub poll_interval: Duration,

    /// Volume change per press, in percent.
    pub volume_step: u8,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            debounce_window: DEBOUNCE_WINDOW,
            poll_interval: BUTTON_POLL_INTERVAL,
            volume_step: VOLUME_STEP,
        }
    }
}

/// Debounced dispatcher over one input port.
///
/// Generic over the [`InputPort`] implementation so the same dispatcher
/// runs against the mock port in tests and a real driver in production.
pub struct Dispatcher<P: InputPort> {
    port: P,
    client: ControlClient,
    channels: Vec<ButtonChannel>,
    last_volume: Volume,
    cfg: DispatcherConfig,
}

impl<P: InputPort> Dispatcher<P> {
    /// Create a dispatcher over the given roster.
    ///
    /// The roster fixes the channel→action mapping for the lifetime of
    /// the dispatcher; channels are never added or removed afterwards.
    pub fn new(
        port: P,
        client: ControlClient,
        roster: Vec<(String, ButtonAction)>,
        cfg: DispatcherConfig,
    ) -> Self {
        let channels = roster
            .into_iter()
            .map(|(name, action)| ButtonChannel::new(name, action))
            .collect();

        Self {
            port,
            client,
            channels,
            last_volume: Volume::clamped(DEFAULT_VOLUME),
            cfg,
        }
    }

    /// Run one polling cycle at the given instant.
    ///
    /// Reads every channel, applies debouncing, and dispatches the
    /// resulting activations. A read failure on one channel skips that
    /// channel for this cycle only.
    pub async fn poll_once(&mut self, now: Instant) {
        let mut activated = Vec::new();

        for idx in 0..self.channels.len() {
            let name = self.channels[idx].name().to_owned();
            let level = match self.port.read_level(&name).await {
                Ok(level) => level,
                Err(e) => {
                    warn!(channel = %name, error = %e, "Channel read failed");
                    continue;
                }
            };

            if self.channels[idx].observe(level, now, self.cfg.debounce_window) {
                activated.push(self.channels[idx].action());
            }
        }

        for action in activated {
            self.dispatch(action).await;
        }
    }

    /// Run the polling loop until the token is cancelled.
    ///
    /// Cancellation is observed between cycles, so the loop exits within
    /// one poll interval.
    pub async fn run(mut self, token: CancellationToken) {
        self.log_startup().await;

        let mut interval = tokio::time::interval(self.cfg.poll_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = token.cancelled() => break,
                _ = interval.tick() => self.poll_once(Instant::now()).await,
            }
        }

        info!("Button dispatcher stopped");
    }

    async fn log_startup(&self) {
        info!("Button dispatcher started");
        info!(backend = %self.client.base_url(), step = self.cfg.volume_step, "Dispatcher configuration");

        match self.port.get_info().await {
            Ok(device) => info!(device = %device.name, model = %device.model, "Input port ready"),
            Err(e) => warn!(error = %e, "Input port info unavailable"),
        }

        for channel in &self.channels {
            info!(channel = channel.name(), action = %channel.action(), "Channel registered");
        }
    }

    async fn dispatch(&mut self, action: ButtonAction) {
        info!(%action, "Button activated");

        match action {
            ButtonAction::VolumeUp => self.adjust_volume(true).await,
            ButtonAction::VolumeDown => self.adjust_volume(false).await,
            ButtonAction::TrackNext => {
                if let Err(e) = self.client.next_track().await {
                    warn!(error = %e, "Next track failed");
                }
            }
            ButtonAction::TrackPrevious => {
                if let Err(e) = self.client.previous_track().await {
                    warn!(error = %e, "Previous track failed");
                }
            }
            ButtonAction::PlayPauseToggle => self.toggle_playback().await,
        }
    }

    /// Apply one volume step.
    ///
    /// Fetches the current volume first so presses compose with changes
    /// made elsewhere (web UI, another client); on fetch failure the last
    /// locally known value stands in. The update call is skipped entirely
    /// when the clamped target equals the current value.
    async fn adjust_volume(&mut self, up: bool) {
        let current = match self.client.current_playback().await {
            Ok(status) => {
                self.last_volume = status.volume;
                status.volume
            }
            Err(e) => {
                warn!(error = %e, fallback = %self.last_volume, "Volume fetch failed, using last known value");
                self.last_volume
            }
        };

        let target = if up {
            current.stepped_up(self.cfg.volume_step)
        } else {
            current.stepped_down(self.cfg.volume_step)
        };

        if target == current {
            debug!(%current, "Volume already at bound");
            return;
        }

        match self.client.set_volume(target).await {
            Ok(()) => {
                self.last_volume = target;
                info!(volume = %target, "Volume updated");
            }
            Err(e) => warn!(error = %e, "Volume update failed"),
        }
    }

    /// Issue the complement of the current playback state.
    ///
    /// If the state cannot be fetched the press is dropped: guessing
    /// between play and pause would act on stale information.
    async fn toggle_playback(&self) {
        match self.client.current_playback().await {
            Ok(status) if status.is_playing => {
                debug!("Pausing playback");
                if let Err(e) = self.client.pause().await {
                    warn!(error = %e, "Pause failed");
                }
            }
            Ok(_) => {
                debug!("Resuming playback");
                if let Err(e) = self.client.play().await {
                    warn!(error = %e, "Play failed");
                }
            }
            Err(e) => warn!(error = %e, "Playback state fetch failed, dropping play-pause"),
        }
    }
}

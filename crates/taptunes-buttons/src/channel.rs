//! Per-channel debounce state.

use crate::action::ButtonAction;
use std::time::{Duration, Instant};
use taptunes_hardware::Level;

/// Debounce state for one input channel.
///
/// Owns the channel's last observed level and the timestamp of the last
/// accepted activation. Mutated only by the dispatcher's own poll cycle.
#[derive(Debug)]
pub struct ButtonChannel {
    name: String,
    action: ButtonAction,
    last_level: Level,
    last_accepted: Option<Instant>,
}

impl ButtonChannel {
    /// Create a channel at rest with no accepted activations yet.
    pub fn new(name: impl Into<String>, action: ButtonAction) -> Self {
        Self {
            name: name.into(),
            action,
            last_level: Level::Inactive,
            last_accepted: None,
        }
    }

    /// Channel name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Action this channel is bound to.
    #[must_use]
    pub fn action(&self) -> ButtonAction {
        self.action
    }

    /// Feed one level sample into the channel.
    ///
    /// Returns `true` exactly when this sample is an accepted activation:
    /// a rising edge (inactive to active) whose distance from the last
    /// accepted activation is at least `window`. Edges inside the window
    /// update the stored level but fire nothing, which is what suppresses
    /// mechanical contact bounce. Falling edges never fire.
    pub fn observe(&mut self, level: Level, now: Instant, window: Duration) -> bool {
        let rising = !self.last_level.is_active() && level.is_active();
        self.last_level = level;

        if !rising {
            return false;
        }

        match self.last_accepted {
            Some(accepted) if now.duration_since(accepted) < window => false,
            _ => {
                self.last_accepted = Some(now);
                true
            }
        }
    }
}

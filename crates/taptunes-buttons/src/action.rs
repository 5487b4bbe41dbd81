//! Playback actions triggered by button presses.

use std::fmt;

/// Action bound to one input channel.
///
/// Each channel maps to exactly one action; the mapping is fixed at
/// dispatcher construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonAction {
    /// Raise the volume by one step.
    VolumeUp,

    /// Lower the volume by one step.
    VolumeDown,

    /// Skip to the next track.
    TrackNext,

    /// Go back to the previous track.
    TrackPrevious,

    /// Pause if playing, resume if paused.
    PlayPauseToggle,
}

impl ButtonAction {
    /// Stable name used in logs and channel rosters.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ButtonAction::VolumeUp => "volume-up",
            ButtonAction::VolumeDown => "volume-down",
            ButtonAction::TrackNext => "track-next",
            ButtonAction::TrackPrevious => "track-previous",
            ButtonAction::PlayPauseToggle => "play-pause",
        }
    }
}

impl fmt::Display for ButtonAction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The standard five-button roster, channel name to action.
///
/// Channel names double as the logical pin names the [`InputPort`]
/// implementation resolves to physical pins.
///
/// [`InputPort`]: taptunes_hardware::InputPort
#[must_use]
pub fn default_roster() -> Vec<(String, ButtonAction)> {
    [
        ButtonAction::VolumeUp,
        ButtonAction::VolumeDown,
        ButtonAction::TrackNext,
        ButtonAction::TrackPrevious,
        ButtonAction::PlayPauseToggle,
    ]
    .into_iter()
    .map(|action| (action.as_str().to_string(), action))
    .collect()
}

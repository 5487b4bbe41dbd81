//! Presence/absence hysteresis state machine.
//!
//! The proximity reader yields false negatives even while a tag sits
//! still on it, so a single empty poll must never count as a removal.
//! The detector requires a configurable number of consecutive misses
//! before declaring a tag gone, and resets the countdown on any read.
//!
//! # States
//!
//! - `Idle`: no tag tracked
//! - `Present`: a tag is tracked and was seen on the latest poll
//! - `PendingRemoval`: a tracked tag has been missed 1..threshold times
//!
//! # Valid Transitions
//!
//! - Idle → Present on any read (arrival)
//! - Present → Present on a same-tag read (countdown reset, no event)
//! - Present → Present on a different-tag read (arrival of the new tag)
//! - Present → PendingRemoval on a miss
//! - PendingRemoval → Present on any read (arrival only if the tag differs)
//! - PendingRemoval → Idle after threshold consecutive misses (departure)
//!
//! No state is terminal; the machine runs for the process lifetime.

use std::fmt;
use taptunes_core::CardId;

/// Tracking state of the proximity reader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresenceState {
    /// No tag tracked.
    Idle,

    /// A tag is tracked and was seen on the latest poll.
    Present {
        /// The tracked tag.
        card: CardId,
    },

    /// A tracked tag is being missed; removal fires when `misses`
    /// reaches the threshold.
    PendingRemoval {
        /// The tag whose removal is pending.
        card: CardId,

        /// Consecutive misses so far (1..threshold).
        misses: u32,
    },
}

impl fmt::Display for PresenceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PresenceState::Idle => write!(f, "Idle"),
            PresenceState::Present { card } => write!(f, "Present({card})"),
            PresenceState::PendingRemoval { card, misses } => {
                write!(f, "PendingRemoval({card}, misses={misses})")
            }
        }
    }
}

/// Stable event produced by the detector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresenceEvent {
    /// A tag arrived (or replaced the previously tracked tag).
    Arrived(CardId),

    /// The tracked tag was absent for the full threshold and is gone.
    Departed(CardId),
}

/// Converts noisy per-poll observations into stable arrival/departure
/// events.
///
/// The detector is pure state: feed it one observation per poll via
/// [`observe`](PresenceDetector::observe) and apply the returned event's
/// side effects outside. This keeps the hysteresis logic testable without
/// any IO.
///
/// # Examples
///
/// ```
/// use taptunes_presence::state::{PresenceDetector, PresenceEvent};
/// use taptunes_core::CardId;
///
/// let mut detector = PresenceDetector::new(4);
/// let tag = CardId::new("x1").unwrap();
///
/// assert_eq!(
///     detector.observe(Some(tag.clone())),
///     Some(PresenceEvent::Arrived(tag.clone()))
/// );
///
/// // Three misses: still within the hysteresis window
/// assert_eq!(detector.observe(None), None);
/// assert_eq!(detector.observe(None), None);
/// assert_eq!(detector.observe(None), None);
///
/// // Fourth consecutive miss: departure
/// assert_eq!(detector.observe(None), Some(PresenceEvent::Departed(tag)));
/// ```
#[derive(Debug)]
pub struct PresenceDetector {
    state: PresenceState,
    threshold: u32,
}

impl PresenceDetector {
    /// Create a detector requiring `threshold` consecutive misses before
    /// a departure fires.
    ///
    /// A threshold of 0 would make every miss an instant removal and
    /// defeat the hysteresis entirely, so it is clamped to 1.
    #[must_use]
    pub fn new(threshold: u32) -> Self {
        Self {
            state: PresenceState::Idle,
            threshold: threshold.max(1),
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &PresenceState {
        &self.state
    }

    /// The tag currently tracked, if any.
    #[must_use]
    pub fn current(&self) -> Option<&CardId> {
        match &self.state {
            PresenceState::Idle => None,
            PresenceState::Present { card } | PresenceState::PendingRemoval { card, .. } => {
                Some(card)
            }
        }
    }

    /// Feed one poll observation into the machine.
    ///
    /// Returns the stable event this observation produces, if any. At
    /// most one event is ever produced per observation.
    pub fn observe(&mut self, seen: Option<CardId>) -> Option<PresenceEvent> {
        match seen {
            Some(id) => self.observe_read(id),
            None => self.observe_miss(),
        }
    }

    fn observe_read(&mut self, id: CardId) -> Option<PresenceEvent> {
        let arrival = match &self.state {
            PresenceState::Idle => true,
            PresenceState::Present { card } | PresenceState::PendingRemoval { card, .. } => {
                *card != id
            }
        };

        // Any read re-enters Present and resets the miss countdown
        self.state = PresenceState::Present { card: id.clone() };

        arrival.then_some(PresenceEvent::Arrived(id))
    }

    fn observe_miss(&mut self) -> Option<PresenceEvent> {
        let (card, misses) = match &self.state {
            PresenceState::Idle => return None,
            PresenceState::Present { card } => (card.clone(), 1),
            PresenceState::PendingRemoval { card, misses } => (card.clone(), misses + 1),
        };

        if misses >= self.threshold {
            self.state = PresenceState::Idle;
            Some(PresenceEvent::Departed(card))
        } else {
            self.state = PresenceState::PendingRemoval { card, misses };
            None
        }
    }
}

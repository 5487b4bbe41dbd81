use crate::{
    Result,
    constants::{MAX_VOLUME, MIN_VOLUME},
    error::Error,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Proximity tag identifier.
///
/// An opaque identifier read from an RFID tag. The raw value is normalized
/// (trimmed and converted to uppercase) so that the same physical tag always
/// compares equal regardless of how the transceiver formats its output.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardId(String);

impl CardId {
    /// Create a new card id with normalization and validation.
    ///
    /// # Errors
    /// Returns `Error::InvalidCardId` if the id is empty after trimming or
    /// contains non-ASCII characters.
    pub fn new(id: &str) -> Result<Self> {
        let id = id.trim().to_uppercase();

        if id.is_empty() {
            return Err(Error::InvalidCardId("empty id".to_string()));
        }

        if !id.is_ascii() {
            return Err(Error::InvalidCardId(format!("non-ASCII id: {id:?}")));
        }

        Ok(CardId(id))
    }

    /// Get the normalized id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for CardId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        CardId::new(s)
    }
}

/// Playback volume as a percentage.
///
/// Always within `[MIN_VOLUME, MAX_VOLUME]`; the stepping operations
/// saturate at the bounds, so an out-of-range volume is unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Volume(u8);

impl Volume {
    /// Create a volume with validation.
    ///
    /// # Errors
    /// Returns `Error::InvalidVolume` if the value exceeds [`MAX_VOLUME`].
    pub fn new(percent: u8) -> Result<Self> {
        if percent > MAX_VOLUME {
            return Err(Error::InvalidVolume(format!(
                "volume must be {MIN_VOLUME}-{MAX_VOLUME}, got {percent}"
            )));
        }
        Ok(Volume(percent))
    }

    /// Create a volume, clamping out-of-range values to the bounds.
    #[must_use]
    pub fn clamped(percent: u8) -> Self {
        Volume(percent.min(MAX_VOLUME))
    }

    /// Get the raw percentage.
    #[must_use]
    pub fn as_u8(&self) -> u8 {
        self.0
    }

    /// Volume after one upward step, saturating at [`MAX_VOLUME`].
    #[must_use]
    pub fn stepped_up(&self, step: u8) -> Self {
        Volume(self.0.saturating_add(step).min(MAX_VOLUME))
    }

    /// Volume after one downward step, saturating at [`MIN_VOLUME`].
    #[must_use]
    pub fn stepped_down(&self, step: u8) -> Self {
        Volume(self.0.saturating_sub(step).max(MIN_VOLUME))
    }
}

impl TryFrom<u8> for Volume {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        Volume::new(value)
    }
}

impl From<Volume> for u8 {
    fn from(volume: Volume) -> u8 {
        volume.0
    }
}

impl fmt::Display for Volume {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("ab12cd", "AB12CD")]
    #[case("  0012345678  ", "0012345678")]
    #[case("Test_Card_7", "TEST_CARD_7")]
    fn test_card_id_normalization(#[case] input: &str, #[case] expected: &str) {
        let id = CardId::new(input).unwrap();
        assert_eq!(id.as_str(), expected);
    }

    #[test]
    fn test_card_id_equality_ignores_case_and_whitespace() {
        let a: CardId = "ab12cd".parse().unwrap();
        let b: CardId = " AB12CD ".parse().unwrap();
        assert_eq!(a, b);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("café")]
    fn test_card_id_invalid(#[case] input: &str) {
        assert!(CardId::new(input).is_err());
    }

    #[rstest]
    #[case(0)]
    #[case(75)]
    #[case(100)]
    fn test_volume_valid(#[case] percent: u8) {
        let volume = Volume::new(percent).unwrap();
        assert_eq!(volume.as_u8(), percent);
    }

    #[test]
    fn test_volume_invalid() {
        assert!(Volume::new(101).is_err());
        assert!(Volume::new(255).is_err());
    }

    #[test]
    fn test_volume_clamped() {
        assert_eq!(Volume::clamped(150).as_u8(), 100);
        assert_eq!(Volume::clamped(40).as_u8(), 40);
    }

    #[rstest]
    #[case(95, 5, 100)]
    #[case(98, 5, 100)]
    #[case(100, 5, 100)]
    #[case(40, 5, 45)]
    fn test_volume_stepped_up_saturates(#[case] start: u8, #[case] step: u8, #[case] expected: u8) {
        let volume = Volume::new(start).unwrap();
        assert_eq!(volume.stepped_up(step).as_u8(), expected);
    }

    #[rstest]
    #[case(5, 5, 0)]
    #[case(3, 5, 0)]
    #[case(0, 5, 0)]
    #[case(40, 5, 35)]
    fn test_volume_stepped_down_saturates(
        #[case] start: u8,
        #[case] step: u8,
        #[case] expected: u8,
    ) {
        let volume = Volume::new(start).unwrap();
        assert_eq!(volume.stepped_down(step).as_u8(), expected);
    }

    #[test]
    fn test_volume_serde_round_trip() {
        let volume = Volume::new(75).unwrap();
        let json = serde_json::to_string(&volume).unwrap();
        assert_eq!(json, "75");

        let parsed: Volume = serde_json::from_str("75").unwrap();
        assert_eq!(parsed, volume);

        // Out-of-range values are rejected at deserialization time
        assert!(serde_json::from_str::<Volume>("120").is_err());
    }
}

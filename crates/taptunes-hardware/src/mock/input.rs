//! Mock digital input port for testing and development.

use crate::{
    Result,
    traits::{InputPort, Level},
    types::DeviceInfo,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock input port for testing and development.
///
/// Simulates a bank of momentary buttons. Channel levels are set through
/// the paired [`MockInputPortHandle`]; every channel starts out
/// [`Level::Inactive`].
///
/// # Examples
///
/// ```
/// use taptunes_hardware::mock::MockInputPort;
/// use taptunes_hardware::traits::{InputPort, Level};
///
/// #[tokio::main]
/// async fn main() -> taptunes_hardware::Result<()> {
///     let (mut port, handle) = MockInputPort::new(&["play-pause"]);
///
///     assert_eq!(port.read_level("play-pause").await?, Level::Inactive);
///
///     handle.press("play-pause");
///     assert_eq!(port.read_level("play-pause").await?, Level::Active);
///
///     handle.release("play-pause");
///     assert_eq!(port.read_level("play-pause").await?, Level::Inactive);
///
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct MockInputPort {
    levels: Arc<Mutex<HashMap<String, Level>>>,
    name: String,
}

impl MockInputPort {
    /// Create a new mock port with the given channel roster.
    ///
    /// Returns a tuple of (MockInputPort, MockInputPortHandle) where the
    /// handle is used to drive channel levels.
    pub fn new(channels: &[&str]) -> (Self, MockInputPortHandle) {
        Self::with_name("Mock Input Port", channels)
    }

    /// Create a new mock port with a custom device name.
    pub fn with_name(name: impl Into<String>, channels: &[&str]) -> (Self, MockInputPortHandle) {
        let levels: HashMap<String, Level> = channels
            .iter()
            .map(|c| ((*c).to_string(), Level::Inactive))
            .collect();
        let levels = Arc::new(Mutex::new(levels));

        let name = name.into();
        let port = Self {
            levels: levels.clone(),
            name,
        };
        let handle = MockInputPortHandle { levels };

        (port, handle)
    }
}

impl InputPort for MockInputPort {
    async fn read_level(&mut self, channel: &str) -> Result<Level> {
        let levels = self.levels.lock().expect("mock level map poisoned");
        levels.get(channel).copied().ok_or_else(|| {
            crate::HardwareError::invalid_data(format!("unknown channel: {channel}"))
        })
    }

    async fn get_info(&self) -> Result<DeviceInfo> {
        Ok(DeviceInfo::new(self.name.clone(), "mock-gpio"))
    }
}

/// Handle for controlling a mock input port.
///
/// Cloneable; all clones drive the same port.
#[derive(Debug, Clone)]
pub struct MockInputPortHandle {
    levels: Arc<Mutex<HashMap<String, Level>>>,
}

impl MockInputPortHandle {
    /// Set a channel to an explicit level.
    ///
    /// Setting an unknown channel is ignored; the port's roster is fixed
    /// at construction.
    pub fn set_level(&self, channel: &str, level: Level) {
        let mut levels = self.levels.lock().expect("mock level map poisoned");
        if let Some(slot) = levels.get_mut(channel) {
            *slot = level;
        }
    }

    /// Drive a channel active (button pressed).
    pub fn press(&self, channel: &str) {
        self.set_level(channel, Level::Active);
    }

    /// Drive a channel inactive (button released).
    pub fn release(&self, channel: &str) {
        self.set_level(channel, Level::Inactive);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_port_levels() {
        let (mut port, handle) = MockInputPort::new(&["volume-up", "volume-down"]);

        assert_eq!(port.read_level("volume-up").await.unwrap(), Level::Inactive);

        handle.press("volume-up");
        assert_eq!(port.read_level("volume-up").await.unwrap(), Level::Active);
        assert_eq!(
            port.read_level("volume-down").await.unwrap(),
            Level::Inactive
        );

        handle.release("volume-up");
        assert_eq!(port.read_level("volume-up").await.unwrap(), Level::Inactive);
    }

    #[tokio::test]
    async fn test_mock_port_unknown_channel() {
        let (mut port, _handle) = MockInputPort::new(&["play-pause"]);

        let result = port.read_level("missing").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_mock_port_handle_clone_shares_state() {
        let (mut port, handle) = MockInputPort::new(&["play-pause"]);

        let clone = handle.clone();
        clone.press("play-pause");

        assert_eq!(port.read_level("play-pause").await.unwrap(), Level::Active);
    }

    #[tokio::test]
    async fn test_mock_port_info() {
        let (port, _handle) = MockInputPort::with_name("Test Port", &[]);
        let info = port.get_info().await.unwrap();
        assert_eq!(info.name, "Test Port");
    }
}

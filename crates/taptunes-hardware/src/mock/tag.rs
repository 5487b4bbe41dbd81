//! Mock proximity tag reader for testing and development.

use crate::{
    Result,
    traits::TagReader,
    types::DeviceInfo,
};
use std::sync::{Arc, Mutex};
use taptunes_core::CardId;

#[derive(Debug, Default)]
struct TagState {
    /// Tag currently sitting on the (simulated) reader.
    present: Option<CardId>,

    /// Number of upcoming polls that misread even though a tag is present.
    misread_budget: u32,
}

/// Mock tag reader for testing and development.
///
/// Simulates an RFID transceiver, including its flakiness: the paired
/// handle can queue misreads so that polls return `None` while a tag is
/// still "present", which is exactly the condition the presence tracker's
/// hysteresis exists for.
///
/// # Examples
///
/// ```
/// use taptunes_hardware::mock::MockTagReader;
/// use taptunes_hardware::traits::TagReader;
/// use taptunes_core::CardId;
///
/// #[tokio::main]
/// async fn main() -> taptunes_hardware::Result<()> {
///     let (mut reader, handle) = MockTagReader::new();
///
///     assert_eq!(reader.poll_tag().await?, None);
///
///     let id = CardId::new("ab12cd").unwrap();
///     handle.present(id.clone());
///     assert_eq!(reader.poll_tag().await?, Some(id));
///
///     handle.remove();
///     assert_eq!(reader.poll_tag().await?, None);
///
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct MockTagReader {
    state: Arc<Mutex<TagState>>,
    name: String,
}

impl MockTagReader {
    /// Create a new mock reader with the default name.
    ///
    /// Returns a tuple of (MockTagReader, MockTagReaderHandle) where the
    /// handle simulates tag placement and removal.
    pub fn new() -> (Self, MockTagReaderHandle) {
        Self::with_name("Mock Tag Reader")
    }

    /// Create a new mock reader with a custom name.
    pub fn with_name(name: impl Into<String>) -> (Self, MockTagReaderHandle) {
        let state = Arc::new(Mutex::new(TagState::default()));

        let reader = Self {
            state: state.clone(),
            name: name.into(),
        };
        let handle = MockTagReaderHandle { state };

        (reader, handle)
    }
}

impl TagReader for MockTagReader {
    async fn poll_tag(&mut self) -> Result<Option<CardId>> {
        let mut state = self.state.lock().expect("mock tag state poisoned");

        if state.misread_budget > 0 {
            state.misread_budget -= 1;
            return Ok(None);
        }

        Ok(state.present.clone())
    }

    async fn get_info(&self) -> Result<DeviceInfo> {
        Ok(DeviceInfo::new(self.name.clone(), "mock-rfid"))
    }
}

/// Handle for controlling a mock tag reader.
///
/// Cloneable; all clones drive the same reader.
#[derive(Debug, Clone)]
pub struct MockTagReaderHandle {
    state: Arc<Mutex<TagState>>,
}

impl MockTagReaderHandle {
    /// Place a tag on the reader.
    pub fn present(&self, id: CardId) {
        let mut state = self.state.lock().expect("mock tag state poisoned");
        state.present = Some(id);
    }

    /// Remove the current tag from the reader.
    pub fn remove(&self) {
        let mut state = self.state.lock().expect("mock tag state poisoned");
        state.present = None;
    }

    /// Make the next `count` polls misread (return no tag) even while a
    /// tag is present.
    pub fn misread_next(&self, count: u32) {
        let mut state = self.state.lock().expect("mock tag state poisoned");
        state.misread_budget = count;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: &str) -> CardId {
        CardId::new(id).unwrap()
    }

    #[tokio::test]
    async fn test_mock_reader_present_and_remove() {
        let (mut reader, handle) = MockTagReader::new();

        assert_eq!(reader.poll_tag().await.unwrap(), None);

        handle.present(card("ab12cd"));
        assert_eq!(reader.poll_tag().await.unwrap(), Some(card("AB12CD")));

        handle.remove();
        assert_eq!(reader.poll_tag().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_mock_reader_misreads_then_recovers() {
        let (mut reader, handle) = MockTagReader::new();

        handle.present(card("x1"));
        handle.misread_next(2);

        assert_eq!(reader.poll_tag().await.unwrap(), None);
        assert_eq!(reader.poll_tag().await.unwrap(), None);
        // Budget exhausted; the tag is still on the reader
        assert_eq!(reader.poll_tag().await.unwrap(), Some(card("X1")));
    }

    #[tokio::test]
    async fn test_mock_reader_info() {
        let (reader, _handle) = MockTagReader::with_name("Bench Reader");
        let info = reader.get_info().await.unwrap();
        assert_eq!(info.name, "Bench Reader");
        assert_eq!(info.model, "mock-rfid");
    }
}

//! `taptunes presence`: run the presence tracker in the foreground.

use taptunes_client::{ClientConfig, ControlClient};
use taptunes_hardware::mock::MockTagReader;
use taptunes_presence::{PresenceTracker, TrackerConfig};
use tracing::warn;

/// Run the tracker loop until a shutdown signal.
///
/// Without a physical transceiver crate wired in, the tracker runs
/// against the emulated reader; a real RFID driver plugs in through the
/// `taptunes_hardware::TagReader` trait.
pub async fn run(backend_url: &str) -> anyhow::Result<()> {
    let client = ControlClient::new(ClientConfig::for_base_url(backend_url))?;

    let (reader, _handle) = MockTagReader::with_name("Emulated Tag Reader");
    warn!("No physical tag reader wired in; using the emulated reader");

    let tracker = PresenceTracker::new(reader, client, TrackerConfig::default());
    let token = super::shutdown_token();

    tracker.run(token).await;
    Ok(())
}

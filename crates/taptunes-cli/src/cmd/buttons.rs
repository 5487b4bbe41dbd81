//! `taptunes buttons`: run the button dispatcher in the foreground.

use taptunes_buttons::{Dispatcher, DispatcherConfig, default_roster};
use taptunes_client::{ClientConfig, ControlClient};
use taptunes_hardware::mock::MockInputPort;
use tracing::warn;

/// Run the dispatcher loop until a shutdown signal.
///
/// Without a physical driver crate wired in, the dispatcher runs against
/// the emulated input port; a real GPIO driver plugs in through the
/// `taptunes_hardware::InputPort` trait.
pub async fn run(backend_url: &str) -> anyhow::Result<()> {
    let client = ControlClient::new(ClientConfig::for_base_url(backend_url))?;

    let roster = default_roster();
    let channels: Vec<&str> = roster.iter().map(|(name, _)| name.as_str()).collect();
    let (port, _handle) = MockInputPort::with_name("Emulated Input Port", &channels);
    warn!("No physical input driver wired in; using the emulated port");

    let dispatcher = Dispatcher::new(port, client, roster, DispatcherConfig::default());
    let token = super::shutdown_token();

    dispatcher.run(token).await;
    Ok(())
}

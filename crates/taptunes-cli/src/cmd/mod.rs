pub mod buttons;
pub mod presence;
pub mod supervise;

use taptunes_supervisor::signals;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Cancellation token wired to the process shutdown signals.
///
/// Every subcommand observes the same token between poll cycles, so a
/// SIGINT/SIGTERM stops the service within one cycle.
pub fn shutdown_token() -> CancellationToken {
    let token = CancellationToken::new();
    let signal_token = token.clone();

    tokio::spawn(async move {
        if signals::wait_for_shutdown_signal().await.is_ok() {
            info!("Shutdown signal received");
        }
        signal_token.cancel();
    });

    token
}

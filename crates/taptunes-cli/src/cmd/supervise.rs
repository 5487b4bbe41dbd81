//! `taptunes supervise`: run and babysit the whole fleet.

use anyhow::Context;
use std::path::PathBuf;
use taptunes_supervisor::{Precondition, Supervisor, SupervisorConfig, WorkerSpec};
use tracing::info;

/// Build the worker roster and supervise it until a shutdown signal.
///
/// Roster order is start order: the backend first (required), then the
/// presence tracker and the button service as best-effort children of
/// this same binary. The button service needs direct pin access, so it
/// is gated on root privileges.
pub async fn run(
    backend_url: &str,
    home: Option<PathBuf>,
    backend_program: String,
) -> anyhow::Result<()> {
    let home = match home {
        Some(dir) => dir,
        None => home::home_dir()
            .context("cannot determine home directory")?
            .join("taptunes"),
    };
    let backend_dir = home.join("backend");

    let service_binary = std::env::current_exe()
        .context("cannot locate the taptunes binary")?
        .to_string_lossy()
        .into_owned();

    info!(
        version = taptunes_core::VERSION,
        home = %home.display(),
        backend = backend_url,
        "TapTunes service manager starting"
    );

    let roster = vec![
        WorkerSpec::primary("backend", backend_program)
            .with_arg(backend_dir.join("dist/index.js").to_string_lossy())
            .with_current_dir(&backend_dir)
            .with_env("NODE_ENV", "production")
            .with_env("PORT", "3001")
            .with_env("HOST", "0.0.0.0"),
        WorkerSpec::auxiliary("presence", service_binary.clone())
            .with_args(["presence", "--backend-url", backend_url]),
        WorkerSpec::auxiliary("buttons", service_binary)
            .with_args(["buttons", "--backend-url", backend_url])
            .with_precondition(Precondition::RootUser),
    ];

    let supervisor = Supervisor::new(roster, SupervisorConfig::default());
    let token = super::shutdown_token();

    supervisor.run(token).await?;
    Ok(())
}

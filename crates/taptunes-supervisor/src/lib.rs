//! Process supervision for the TapTunes service fleet.
//!
//! Keeps the playback backend and the hardware bridge services alive:
//! start in priority order, probe liveness on a fixed cycle, relaunch
//! unexpected exits, and tear everything down in reverse order on
//! shutdown with a terminate-then-kill escalation.
//!
//! The primary worker (the backend) is required: if it cannot be
//! started the whole run aborts. Auxiliary workers (presence tracker,
//! button service) are best-effort, including an optional launch
//! precondition such as root privileges for pin access.
//!
//! ```no_run
//! use taptunes_supervisor::{Supervisor, SupervisorConfig, WorkerSpec, signals};
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example() -> taptunes_supervisor::Result<()> {
//! let roster = vec![
//!     WorkerSpec::primary("backend", "node").with_arg("dist/index.js"),
//!     WorkerSpec::auxiliary("presence", "taptunes").with_arg("presence"),
//! ];
//!
//! let supervisor = Supervisor::new(roster, SupervisorConfig::default());
//!
//! let token = CancellationToken::new();
//! let signal_token = token.clone();
//! tokio::spawn(async move {
//!     let _ = signals::wait_for_shutdown_signal().await;
//!     signal_token.cancel();
//! });
//!
//! supervisor.run(token).await
//! # }
//! ```

pub mod error;
pub mod policy;
pub mod signals;
pub mod spec;
pub mod supervisor;
pub mod worker;

pub use error::{Result, SupervisorError};
pub use policy::{BackoffPolicy, RestartPolicy};
pub use spec::{Precondition, WorkerRole, WorkerSpec};
pub use supervisor::{Supervisor, SupervisorConfig};
pub use worker::{StopOutcome, WorkerHandle};

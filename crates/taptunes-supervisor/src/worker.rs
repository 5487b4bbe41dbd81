//! Running worker handles.

use crate::{
    error::{Result, SupervisorError},
    spec::WorkerSpec,
};
use nix::sys::signal::{self, Signal};
use nix::unistd::Pid;
use std::fmt;
use std::process::{ExitStatus, Stdio};
use std::time::{Duration, Instant};
use tokio::process::{Child, Command};
use tracing::{debug, warn};

/// How a worker came to rest during shutdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopOutcome {
    /// The process had already exited before shutdown reached it.
    AlreadyExited,

    /// The process exited within the grace period after SIGTERM.
    Terminated,

    /// The process ignored SIGTERM and was killed.
    Killed,
}

impl fmt::Display for StopOutcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StopOutcome::AlreadyExited => write!(f, "already exited"),
            StopOutcome::Terminated => write!(f, "terminated"),
            StopOutcome::Killed => write!(f, "killed"),
        }
    }
}

/// Handle to one running worker process.
///
/// Created on a successful launch and replaced, not mutated, when the
/// supervisor restarts a worker. `kill_on_drop` is set on the child so a
/// supervisor panic cannot leave orphans behind.
#[derive(Debug)]
pub struct WorkerHandle {
    child: Child,
    started_at: Instant,
}

impl WorkerHandle {
    /// Launch a worker from its descriptor.
    ///
    /// Stdout/stderr are inherited so worker output lands in the
    /// supervisor's journal.
    ///
    /// # Errors
    ///
    /// Returns `SupervisorError::Spawn` if the OS cannot start the
    /// process (missing binary, bad working directory, permissions).
    pub fn launch(spec: &WorkerSpec) -> Result<Self> {
        debug!(worker = %spec.name, program = %spec.program, "Spawning worker");

        let mut command = Command::new(&spec.program);
        command
            .args(&spec.args)
            .stdin(Stdio::null())
            .kill_on_drop(true);

        if let Some(dir) = &spec.cwd {
            command.current_dir(dir);
        }
        for (key, value) in &spec.env {
            command.env(key, value);
        }

        let child = command.spawn().map_err(|source| SupervisorError::Spawn {
            name: spec.name.clone(),
            source,
        })?;

        Ok(Self {
            child,
            started_at: Instant::now(),
        })
    }

    /// OS process id, if the process has not been reaped yet.
    #[must_use]
    pub fn pid(&self) -> Option<u32> {
        self.child.id()
    }

    /// Time since the worker was launched.
    #[must_use]
    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }

    /// Non-blocking exit probe.
    ///
    /// Returns `Some(status)` once the process has exited, `None` while
    /// it is still running.
    pub fn try_exit_status(&mut self) -> Option<ExitStatus> {
        self.child.try_wait().ok().flatten()
    }

    /// Returns `true` while the process is running.
    pub fn is_alive(&mut self) -> bool {
        self.try_exit_status().is_none()
    }

    /// Stop the worker: SIGTERM, wait up to `timeout`, SIGKILL fallback.
    ///
    /// Consumes the handle; the process is guaranteed to be gone when
    /// this returns.
    pub async fn stop(mut self, timeout: Duration) -> StopOutcome {
        if self.try_exit_status().is_some() {
            return StopOutcome::AlreadyExited;
        }

        let signalled = match self.child.id() {
            Some(pid) => match signal::kill(Pid::from_raw(pid as i32), Signal::SIGTERM) {
                Ok(()) => true,
                Err(e) => {
                    warn!(pid, error = %e, "SIGTERM delivery failed");
                    false
                }
            },
            None => return StopOutcome::AlreadyExited,
        };

        if signalled
            && tokio::time::timeout(timeout, self.child.wait())
                .await
                .is_ok()
        {
            return StopOutcome::Terminated;
        }

        if let Err(e) = self.child.start_kill() {
            warn!(error = %e, "SIGKILL delivery failed");
        }
        let _ = self.child.wait().await;
        StopOutcome::Killed
    }
}

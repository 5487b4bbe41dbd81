//! Worker fleet supervision.
//!
//! The supervisor owns a fixed, ordered roster of [`WorkerSpec`]s. The
//! primary worker (the playback backend) starts first and its failure
//! aborts the run; auxiliary workers are best-effort. A monitor cycle
//! reaps unexpected exits and relaunches per the configured
//! [`RestartPolicy`]; shutdown walks the roster in reverse with a
//! terminate-then-kill escalation per worker.

use crate::{
    error::{Result, SupervisorError},
    policy::RestartPolicy,
    spec::WorkerSpec,
    worker::WorkerHandle,
};
use std::time::{Duration, Instant};
use taptunes_core::constants::{BACKEND_SETTLE, MONITOR_INTERVAL, STOP_TIMEOUT};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Configuration for the supervisor.
#[derive(Debug, Clone, Copy)]
pub struct SupervisorConfig {
    /// Liveness check cycle.
    pub monitor_interval: Duration,

    /// Grace period between SIGTERM and SIGKILL at shutdown.
    pub stop_timeout: Duration,

    /// Settle window after launching a primary worker; an exit within it
    /// is a startup failure.
    pub settle: Duration,

    /// Restart behavior for unexpected exits.
    pub restart: RestartPolicy,
}

impl Default for SupervisorConfig {
    fn default() -> Self {
        Self {
            monitor_interval: MONITOR_INTERVAL,
            stop_timeout: STOP_TIMEOUT,
            settle: BACKEND_SETTLE,
            restart: RestartPolicy::default(),
        }
    }
}

/// One roster entry with its lifecycle state.
#[derive(Debug)]
struct WorkerSlot {
    spec: WorkerSpec,
    handle: Option<WorkerHandle>,
    restarts: u32,
    next_restart_at: Option<Instant>,
    /// Permanently out of service: failed precondition, failed startup,
    /// or restart cap reached.
    abandoned: bool,
}

impl WorkerSlot {
    fn new(spec: WorkerSpec) -> Self {
        Self {
            spec,
            handle: None,
            restarts: 0,
            next_restart_at: None,
            abandoned: false,
        }
    }
}

/// Process supervisor over a fixed worker roster.
///
/// The roster order is the start order (primary backend first); shutdown
/// runs in exact reverse so dependents stop before their dependency.
pub struct Supervisor {
    slots: Vec<WorkerSlot>,
    cfg: SupervisorConfig,
}

impl Supervisor {
    /// Create a supervisor over the given roster.
    ///
    /// Roster order is significant: workers start front to back and stop
    /// back to front.
    pub fn new(specs: Vec<WorkerSpec>, cfg: SupervisorConfig) -> Self {
        Self {
            slots: specs.into_iter().map(WorkerSlot::new).collect(),
            cfg,
        }
    }

    /// Start every worker in roster order.
    ///
    /// A primary worker that cannot start (spawn failure, failed
    /// precondition, or exit within the settle window) aborts the whole
    /// startup. Auxiliary failures are logged and the worker is left out
    /// of service.
    ///
    /// # Errors
    ///
    /// Returns `SupervisorError::PrimaryStartup` when a primary worker
    /// cannot be brought up.
    pub async fn start_all(&mut self) -> Result<()> {
        info!("Starting {} workers", self.slots.len());

        for idx in 0..self.slots.len() {
            self.start_slot(idx).await?;
        }

        for slot in &self.slots {
            if slot.handle.is_some() {
                info!(worker = %slot.spec.name, "Running");
            } else {
                warn!(worker = %slot.spec.name, "Not running");
            }
        }

        Ok(())
    }

    async fn start_slot(&mut self, idx: usize) -> Result<()> {
        let spec = self.slots[idx].spec.clone();
        let name = spec.name.clone();

        if let Some(precondition) = &spec.precondition
            && !precondition.is_met()
        {
            if spec.is_primary() {
                return Err(SupervisorError::PrimaryStartup {
                    name,
                    reason: format!("requires {precondition}"),
                });
            }
            info!(worker = %name, requirement = %precondition, "Precondition not met, skipping worker");
            self.slots[idx].abandoned = true;
            return Ok(());
        }

        let is_primary = spec.is_primary();
        match WorkerHandle::launch(&spec) {
            Ok(mut handle) => {
                info!(worker = %name, pid = handle.pid(), "Worker started");

                if is_primary {
                    // The backend needs a moment to come up; an exit in
                    // this window means it never really started
                    tokio::time::sleep(self.cfg.settle).await;
                    if let Some(status) = handle.try_exit_status() {
                        return Err(SupervisorError::PrimaryStartup {
                            name,
                            reason: format!("exited during settle window ({status})"),
                        });
                    }
                }

                self.slots[idx].handle = Some(handle);
                Ok(())
            }
            Err(e) if is_primary => Err(SupervisorError::PrimaryStartup {
                name,
                reason: e.to_string(),
            }),
            Err(e) => {
                warn!(worker = %name, error = %e, "Auxiliary worker failed to start, continuing without it");
                self.slots[idx].abandoned = true;
                Ok(())
            }
        }
    }

    /// Run one liveness pass over the roster.
    ///
    /// Reaps workers that exited outside a requested shutdown and
    /// relaunches them per the restart policy. Never fails: a worker
    /// that cannot be relaunched is retried on later cycles (or
    /// abandoned once the restart cap is hit).
    pub async fn monitor_cycle(&mut self) {
        let now = Instant::now();

        for idx in 0..self.slots.len() {
            if self.slots[idx].abandoned {
                continue;
            }

            if let Some(handle) = self.slots[idx].handle.as_mut() {
                if let Some(status) = handle.try_exit_status() {
                    let uptime = handle.uptime();
                    warn!(
                        worker = %self.slots[idx].spec.name,
                        %status,
                        uptime_secs = uptime.as_secs(),
                        "Worker exited unexpectedly"
                    );
                    self.slots[idx].handle = None;
                    self.schedule_restart(idx, now);
                }
                continue;
            }

            // A restart is pending from an earlier cycle
            if let Some(due) = self.slots[idx].next_restart_at
                && now >= due
            {
                self.try_relaunch(idx, now);
            }
        }
    }

    fn schedule_restart(&mut self, idx: usize, now: Instant) {
        let delay = self.cfg.restart.backoff.next(self.slots[idx].restarts);
        if delay.is_zero() {
            self.try_relaunch(idx, now);
        } else {
            debug!(
                worker = %self.slots[idx].spec.name,
                delay_ms = delay.as_millis() as u64,
                "Restart scheduled"
            );
            self.slots[idx].next_restart_at = Some(now + delay);
        }
    }

    fn try_relaunch(&mut self, idx: usize, now: Instant) {
        let policy = self.cfg.restart;
        let slot = &mut self.slots[idx];

        if let Some(max) = policy.max_restarts
            && slot.restarts >= max
        {
            error!(
                worker = %slot.spec.name,
                restarts = slot.restarts,
                "Restart limit reached, abandoning worker"
            );
            slot.abandoned = true;
            slot.next_restart_at = None;
            return;
        }

        slot.next_restart_at = None;
        slot.restarts += 1;

        match WorkerHandle::launch(&slot.spec) {
            Ok(handle) => {
                info!(
                    worker = %slot.spec.name,
                    pid = handle.pid(),
                    attempt = slot.restarts,
                    "Worker restarted"
                );
                slot.handle = Some(handle);
            }
            Err(e) => {
                warn!(worker = %slot.spec.name, error = %e, "Relaunch failed, will retry");
                slot.next_restart_at = Some(now + policy.backoff.next(slot.restarts));
            }
        }
    }

    /// Stop every running worker in reverse roster order.
    ///
    /// Each worker gets a SIGTERM, the stop timeout to comply, and a
    /// SIGKILL if it does not. Every stop outcome is logged.
    pub async fn shutdown_all(&mut self) {
        info!("Stopping all workers");

        for idx in (0..self.slots.len()).rev() {
            if let Some(handle) = self.slots[idx].handle.take() {
                let name = self.slots[idx].spec.name.clone();
                info!(worker = %name, "Stopping worker");
                let outcome = handle.stop(self.cfg.stop_timeout).await;
                info!(worker = %name, %outcome, "Worker stopped");
            }
        }

        info!("All workers stopped");
    }

    /// Start the fleet, monitor it until the token is cancelled, then
    /// shut everything down.
    ///
    /// Shutdown runs exactly once, whether the loop ends by cancellation
    /// or startup fails part-way.
    ///
    /// # Errors
    ///
    /// Returns the primary worker's startup failure, after stopping
    /// anything that did come up.
    pub async fn run(mut self, token: CancellationToken) -> Result<()> {
        if let Err(e) = self.start_all().await {
            self.shutdown_all().await;
            return Err(e);
        }

        let mut interval = tokio::time::interval(self.cfg.monitor_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = token.cancelled() => break,
                _ = interval.tick() => self.monitor_cycle().await,
            }
        }

        self.shutdown_all().await;
        Ok(())
    }

    /// Returns `true` while the named worker has a live process.
    pub fn is_running(&mut self, name: &str) -> bool {
        self.slots
            .iter_mut()
            .find(|slot| slot.spec.name == name)
            .and_then(|slot| slot.handle.as_mut())
            .is_some_and(WorkerHandle::is_alive)
    }

    /// Number of workers with a live process.
    pub fn running_count(&mut self) -> usize {
        (0..self.slots.len())
            .filter(|idx| {
                self.slots[*idx]
                    .handle
                    .as_mut()
                    .is_some_and(WorkerHandle::is_alive)
            })
            .count()
    }

    /// How many times the named worker has been relaunched.
    pub fn restart_count(&self, name: &str) -> Option<u32> {
        self.slots
            .iter()
            .find(|slot| slot.spec.name == name)
            .map(|slot| slot.restarts)
    }
}

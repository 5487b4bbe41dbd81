//! Integration tests for the supervisor against real child processes.
//!
//! Workers are small `sh` one-liners, so these tests exercise the full
//! spawn / probe / signal / reap path.

use std::time::Duration;

use taptunes_supervisor::{
    BackoffPolicy, RestartPolicy, Supervisor, SupervisorConfig, SupervisorError, WorkerSpec,
};
use tokio_util::sync::CancellationToken;

fn fast_config() -> SupervisorConfig {
    SupervisorConfig {
        monitor_interval: Duration::from_millis(100),
        stop_timeout: Duration::from_secs(2),
        settle: Duration::ZERO,
        restart: RestartPolicy::default(),
    }
}

fn sh(name: &str, script: &str) -> WorkerSpec {
    WorkerSpec::auxiliary(name, "sh").with_args(["-c", script])
}

#[tokio::test]
async fn primary_spawn_failure_aborts_and_skips_auxiliaries() {
    let roster = vec![
        WorkerSpec::primary("backend", "/nonexistent/taptunes-backend"),
        sh("helper", "sleep 30"),
    ];
    let mut supervisor = Supervisor::new(roster, fast_config());

    let result = supervisor.start_all().await;
    assert!(matches!(
        result,
        Err(SupervisorError::PrimaryStartup { .. })
    ));

    // Nothing after the primary was ever started
    assert!(!supervisor.is_running("helper"));
    assert_eq!(supervisor.running_count(), 0);
}

#[tokio::test]
async fn primary_exit_during_settle_window_is_startup_failure() {
    let cfg = SupervisorConfig {
        settle: Duration::from_millis(300),
        ..fast_config()
    };
    let roster = vec![WorkerSpec::primary("backend", "sh").with_args(["-c", "exit 1"])];
    let mut supervisor = Supervisor::new(roster, cfg);

    let result = supervisor.start_all().await;
    match result {
        Err(SupervisorError::PrimaryStartup { name, reason }) => {
            assert_eq!(name, "backend");
            assert!(reason.contains("settle"), "unexpected reason: {reason}");
        }
        other => panic!("expected PrimaryStartup, got {other:?}"),
    }
}

#[tokio::test]
async fn auxiliary_spawn_failure_is_not_fatal() {
    let roster = vec![
        WorkerSpec::primary("backend", "sh").with_args(["-c", "sleep 30"]),
        WorkerSpec::auxiliary("ghost", "/nonexistent/taptunes-ghost"),
    ];
    let mut supervisor = Supervisor::new(roster, fast_config());

    supervisor.start_all().await.unwrap();
    assert!(supervisor.is_running("backend"));
    assert!(!supervisor.is_running("ghost"));

    // A worker that never started is not restarted either
    supervisor.monitor_cycle().await;
    assert_eq!(supervisor.restart_count("ghost"), Some(0));

    supervisor.shutdown_all().await;
}

#[tokio::test]
async fn auxiliary_exit_is_relaunched_within_one_cycle() {
    let roster = vec![
        WorkerSpec::primary("backend", "sh").with_args(["-c", "sleep 30"]),
        sh("flaky", "sleep 0.2"),
    ];
    let mut supervisor = Supervisor::new(roster, fast_config());

    supervisor.start_all().await.unwrap();
    assert_eq!(supervisor.restart_count("flaky"), Some(0));

    // Let the auxiliary exit, then run one monitor pass
    tokio::time::sleep(Duration::from_millis(400)).await;
    supervisor.monitor_cycle().await;

    assert_eq!(supervisor.restart_count("flaky"), Some(1));
    assert!(supervisor.is_running("flaky"));

    // The primary was untouched
    assert_eq!(supervisor.restart_count("backend"), Some(0));
    assert!(supervisor.is_running("backend"));

    supervisor.shutdown_all().await;
}

#[tokio::test]
async fn restart_cap_abandons_a_crash_looping_worker() {
    let cfg = SupervisorConfig {
        restart: RestartPolicy {
            backoff: BackoffPolicy::default(),
            max_restarts: Some(2),
        },
        ..fast_config()
    };
    let roster = vec![
        WorkerSpec::primary("backend", "sh").with_args(["-c", "sleep 30"]),
        sh("looper", "true"),
    ];
    let mut supervisor = Supervisor::new(roster, cfg);

    supervisor.start_all().await.unwrap();

    for _ in 0..6 {
        tokio::time::sleep(Duration::from_millis(150)).await;
        supervisor.monitor_cycle().await;
    }

    // Two relaunches happened, then the worker was abandoned
    assert_eq!(supervisor.restart_count("looper"), Some(2));
    assert!(supervisor.is_running("backend"));

    supervisor.shutdown_all().await;
}

#[tokio::test]
async fn backoff_delays_relaunch_to_a_later_cycle() {
    let cfg = SupervisorConfig {
        restart: RestartPolicy {
            backoff: BackoffPolicy::exponential(
                Duration::from_millis(500),
                Duration::from_secs(5),
            ),
            max_restarts: None,
        },
        ..fast_config()
    };
    let roster = vec![
        WorkerSpec::primary("backend", "sh").with_args(["-c", "sleep 30"]),
        sh("flaky", "sleep 0.1"),
    ];
    let mut supervisor = Supervisor::new(roster, cfg);

    supervisor.start_all().await.unwrap();
    tokio::time::sleep(Duration::from_millis(300)).await;

    // First pass reaps the exit but the 500ms backoff defers the relaunch
    supervisor.monitor_cycle().await;
    assert_eq!(supervisor.restart_count("flaky"), Some(0));
    assert!(!supervisor.is_running("flaky"));

    // Once the delay has elapsed, a later pass relaunches
    tokio::time::sleep(Duration::from_millis(600)).await;
    supervisor.monitor_cycle().await;
    assert_eq!(supervisor.restart_count("flaky"), Some(1));

    supervisor.shutdown_all().await;
}

#[tokio::test]
async fn shutdown_stops_every_worker() {
    let roster = vec![
        WorkerSpec::primary("backend", "sh").with_args(["-c", "sleep 30"]),
        sh("presence", "sleep 30"),
        sh("buttons", "sleep 30"),
    ];
    let mut supervisor = Supervisor::new(roster, fast_config());

    supervisor.start_all().await.unwrap();
    assert_eq!(supervisor.running_count(), 3);

    supervisor.shutdown_all().await;
    assert_eq!(supervisor.running_count(), 0);
}

#[tokio::test]
async fn run_shuts_down_on_cancellation() {
    let roster = vec![WorkerSpec::primary("backend", "sh").with_args(["-c", "sleep 30"])];
    let supervisor = Supervisor::new(roster, fast_config());

    let token = CancellationToken::new();
    let cancel = token.clone();
    let run = tokio::spawn(supervisor.run(token));

    tokio::time::sleep(Duration::from_millis(300)).await;
    cancel.cancel();

    let result = tokio::time::timeout(Duration::from_secs(5), run)
        .await
        .expect("run did not shut down in time")
        .unwrap();
    assert!(result.is_ok());
}

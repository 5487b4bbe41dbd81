//! Integration tests for the debounced dispatcher against a mock input
//! port and a stubbed backend.

use std::time::{Duration, Instant};

use mockito::Matcher;
use taptunes_buttons::{ButtonAction, Dispatcher, DispatcherConfig};
use taptunes_client::{ClientConfig, ControlClient};
use taptunes_hardware::mock::{MockInputPort, MockInputPortHandle};

fn dispatcher_for(
    server: &mockito::ServerGuard,
    channel: &str,
    action: ButtonAction,
) -> (Dispatcher<MockInputPort>, MockInputPortHandle) {
    let (port, handle) = MockInputPort::new(&[channel]);
    let client = ControlClient::new(ClientConfig::for_base_url(server.url())).unwrap();
    let dispatcher = Dispatcher::new(
        port,
        client,
        vec![(channel.to_string(), action)],
        DispatcherConfig::default(),
    );
    (dispatcher, handle)
}

fn at(base: Instant, ms: u64) -> Instant {
    base + Duration::from_millis(ms)
}

#[tokio::test]
async fn press_bounce_press_inside_window_dispatches_once() {
    let mut server = mockito::Server::new_async().await;
    let next = server
        .mock("POST", "/audio/next")
        .with_status(200)
        .expect(2)
        .create_async()
        .await;

    let (mut dispatcher, handle) = dispatcher_for(&server, "track-next", ButtonAction::TrackNext);
    let base = Instant::now();

    // Press at t=0: dispatched
    handle.press("track-next");
    dispatcher.poll_once(at(base, 0)).await;

    // Bounce: release at t=50, re-press at t=100, inside the 200ms window
    handle.release("track-next");
    dispatcher.poll_once(at(base, 50)).await;
    handle.press("track-next");
    dispatcher.poll_once(at(base, 100)).await;

    // Clean second press at t=250: dispatched again
    handle.release("track-next");
    dispatcher.poll_once(at(base, 150)).await;
    handle.press("track-next");
    dispatcher.poll_once(at(base, 250)).await;

    next.assert_async().await;
}

#[tokio::test]
async fn held_button_does_not_repeat() {
    let mut server = mockito::Server::new_async().await;
    let previous = server
        .mock("POST", "/audio/previous")
        .with_status(200)
        .expect(1)
        .create_async()
        .await;

    let (mut dispatcher, handle) =
        dispatcher_for(&server, "track-previous", ButtonAction::TrackPrevious);
    let base = Instant::now();

    handle.press("track-previous");
    for ms in [0u64, 50, 500, 1000, 5000] {
        dispatcher.poll_once(at(base, ms)).await;
    }

    previous.assert_async().await;
}

#[tokio::test]
async fn volume_up_posts_clamped_value() {
    let mut server = mockito::Server::new_async().await;
    let _m1 = server
        .mock("GET", "/audio/current")
        .with_status(200)
        .with_body(r#"{"volume": 98, "isPlaying": false}"#)
        .create_async()
        .await;
    let set = server
        .mock("POST", "/audio/volume")
        .match_body(Matcher::Json(serde_json::json!({"volume": 100})))
        .with_status(200)
        .expect(1)
        .create_async()
        .await;

    let (mut dispatcher, handle) = dispatcher_for(&server, "volume-up", ButtonAction::VolumeUp);

    handle.press("volume-up");
    dispatcher.poll_once(Instant::now()).await;

    set.assert_async().await;
}

#[tokio::test]
async fn volume_at_bound_skips_update_call() {
    let mut server = mockito::Server::new_async().await;
    let _m2 = server
        .mock("GET", "/audio/current")
        .with_status(200)
        .with_body(r#"{"volume": 100, "isPlaying": true}"#)
        .create_async()
        .await;
    let set = server
        .mock("POST", "/audio/volume")
        .with_status(200)
        .expect(0)
        .create_async()
        .await;

    let (mut dispatcher, handle) = dispatcher_for(&server, "volume-up", ButtonAction::VolumeUp);

    handle.press("volume-up");
    dispatcher.poll_once(Instant::now()).await;

    set.assert_async().await;
}

#[tokio::test]
async fn volume_down_bottoms_out_at_zero() {
    let mut server = mockito::Server::new_async().await;
    let _m3 = server
        .mock("GET", "/audio/current")
        .with_status(200)
        .with_body(r#"{"volume": 3, "isPlaying": true}"#)
        .create_async()
        .await;
    let set = server
        .mock("POST", "/audio/volume")
        .match_body(Matcher::Json(serde_json::json!({"volume": 0})))
        .with_status(200)
        .expect(1)
        .create_async()
        .await;

    let (mut dispatcher, handle) = dispatcher_for(&server, "volume-down", ButtonAction::VolumeDown);

    handle.press("volume-down");
    dispatcher.poll_once(Instant::now()).await;

    set.assert_async().await;
}

#[tokio::test]
async fn volume_fetch_failure_falls_back_to_local_value() {
    let mut server = mockito::Server::new_async().await;
    let _m4 = server
        .mock("GET", "/audio/current")
        .with_status(500)
        .create_async()
        .await;
    // Local fallback starts at 75, so one step up lands on 80
    let set = server
        .mock("POST", "/audio/volume")
        .match_body(Matcher::Json(serde_json::json!({"volume": 80})))
        .with_status(200)
        .expect(1)
        .create_async()
        .await;

    let (mut dispatcher, handle) = dispatcher_for(&server, "volume-up", ButtonAction::VolumeUp);

    handle.press("volume-up");
    dispatcher.poll_once(Instant::now()).await;

    set.assert_async().await;
}

#[tokio::test]
async fn play_pause_issues_complement_of_current_state() {
    let mut server = mockito::Server::new_async().await;
    let _m5 = server
        .mock("GET", "/audio/current")
        .with_status(200)
        .with_body(r#"{"volume": 40, "isPlaying": true}"#)
        .create_async()
        .await;
    let pause = server
        .mock("POST", "/audio/pause")
        .with_status(200)
        .expect(1)
        .create_async()
        .await;
    let play = server
        .mock("POST", "/audio/play")
        .with_status(200)
        .expect(0)
        .create_async()
        .await;

    let (mut dispatcher, handle) =
        dispatcher_for(&server, "play-pause", ButtonAction::PlayPauseToggle);

    handle.press("play-pause");
    dispatcher.poll_once(Instant::now()).await;

    pause.assert_async().await;
    play.assert_async().await;
}

#[tokio::test]
async fn play_pause_dropped_when_state_fetch_fails() {
    let mut server = mockito::Server::new_async().await;
    let _m6 = server
        .mock("GET", "/audio/current")
        .with_status(500)
        .create_async()
        .await;
    let pause = server
        .mock("POST", "/audio/pause")
        .with_status(200)
        .expect(0)
        .create_async()
        .await;
    let play = server
        .mock("POST", "/audio/play")
        .with_status(200)
        .expect(0)
        .create_async()
        .await;

    let (mut dispatcher, handle) =
        dispatcher_for(&server, "play-pause", ButtonAction::PlayPauseToggle);

    handle.press("play-pause");
    dispatcher.poll_once(Instant::now()).await;

    pause.assert_async().await;
    play.assert_async().await;
}

use std::{sync::Arc, time::Duration};

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use chrono::{Local, TimeZone};
use futures::StreamExt;
use serde_json::Value;
use tower::ServiceExt;

use time_timer::{
    create_router,
    state::{AppState, TimerAccumulator},
    store::{MemoryStore, StoredDay, TimeStore},
    utils::{Clock, ManualClock},
};

fn setup(store: MemoryStore) -> (Router, Arc<AppState>, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(
        Local.with_ymd_and_hms(2025, 4, 19, 14, 0, 0).unwrap(),
    ));
    let boxed: Box<dyn TimeStore> = Box::new(store);
    let timer = TimerAccumulator::load(boxed, 15, clock.now());
    let state = AppState::new(
        timer,
        Arc::clone(&clock) as Arc<dyn Clock>,
        Duration::from_secs(3600),
        "127.0.0.1".to_string(),
        20554,
    );
    (create_router(Arc::clone(&state)), state, clock)
}

async fn call(app: &Router, method: &str, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().method(method).uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn health_reports_ok() {
    let (app, _, _) = setup(MemoryStore::new());
    let (status, body) = call(&app, "GET", "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn status_shows_restored_total() {
    let saved_at = Local.with_ymd_and_hms(2025, 4, 19, 8, 0, 0).unwrap();
    let (app, _, _) = setup(MemoryStore::with_day(StoredDay::new(3725.0, saved_at)));

    let (status, body) = call(&app, "GET", "/status").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "paused");
    assert_eq!(body["timer"]["running"], false);
    assert_eq!(body["timer"]["elapsed"], "0h 0m 0s");
    assert_eq!(body["timer"]["cumulative_today"], "1h 2m 5s");
    assert_eq!(body["port"], 20554);
    assert!(body["last_action"].is_null());
}

#[tokio::test]
async fn toggle_round_trip_persists_on_pause() {
    let store = MemoryStore::new();
    let (app, state, clock) = setup(store.clone());

    let (status, body) = call(&app, "POST", "/toggle").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "active");
    assert_eq!(body["message"], "Timer started");

    clock.advance_secs(30);
    state.tick().unwrap();
    let (_, body) = call(&app, "GET", "/status").await;
    assert_eq!(body["timer"]["elapsed"], "0h 0m 30s");
    assert_eq!(body["last_action"], "start");

    let (status, body) = call(&app, "POST", "/toggle").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "paused");
    assert_eq!(body["timer"]["elapsed_seconds"], 30.0);
    assert_eq!(store.snapshot().unwrap().cumulative_time_today, 30.0);
}

#[tokio::test]
async fn reset_keeps_today_total() {
    let (app, state, clock) = setup(MemoryStore::new());

    call(&app, "POST", "/toggle").await;
    clock.advance_secs(10);
    state.tick().unwrap();

    let (status, body) = call(&app, "POST", "/reset").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "paused");
    assert_eq!(body["timer"]["elapsed"], "0h 0m 0s");
    assert_eq!(body["timer"]["cumulative_today"], "0h 0m 10s");
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let (app, _, _) = setup(MemoryStore::new());
    let response = app
        .oneshot(Request::builder().uri("/stopwatch").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn events_stream_current_then_each_change() {
    let (app, _, _) = setup(MemoryStore::new());
    let response = app
        .clone()
        .oneshot(Request::builder().uri("/events").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let mut frames = response.into_body().into_data_stream();

    let first = tokio::time::timeout(Duration::from_secs(2), frames.next())
        .await
        .expect("current snapshot is sent immediately")
        .unwrap()
        .unwrap();
    let first = String::from_utf8(first.to_vec()).unwrap();
    assert!(first.contains("event: snapshot"), "{}", first);
    assert!(first.contains(r#""running":false"#), "{}", first);
    assert!(first.contains(r#""cumulative_today":"0h 0m 0s""#), "{}", first);

    call(&app, "POST", "/toggle").await;

    let second = tokio::time::timeout(Duration::from_secs(2), frames.next())
        .await
        .expect("toggle publishes a snapshot")
        .unwrap()
        .unwrap();
    let second = String::from_utf8(second.to_vec()).unwrap();
    assert!(second.contains("event: snapshot"), "{}", second);
    assert!(second.contains(r#""running":true"#), "{}", second);
}

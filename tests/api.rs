use std::{sync::Arc, time::Duration};

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tokio::runtime::Handle;
use tower::ServiceExt;

use carousel_autoplay::{
    api::create_router,
    services::{InMemoryCarousel, TokioTimer, VisibilityFlag},
    state::{AppState, AutoplaySettings},
    tasks::Autoplay,
};

struct Harness {
    app: Router,
    carousel: Arc<InMemoryCarousel>,
}

fn harness(settings: AutoplaySettings) -> Harness {
    let carousel = Arc::new(InMemoryCarousel::new(4, settings));
    let timer = Arc::new(TokioTimer::new(Handle::current()));
    let visibility = Arc::new(VisibilityFlag::new());
    let autoplay = Autoplay::builder(carousel.clone(), timer)
        .visibility(visibility.clone())
        .build();
    autoplay.attach();

    let state = Arc::new(AppState::new(
        carousel.clone(),
        autoplay,
        visibility,
        20554,
        "127.0.0.1".to_string(),
    ));
    Harness {
        app: create_router(state),
        carousel,
    }
}

fn autoplay_settings(hover_pause: bool) -> AutoplaySettings {
    AutoplaySettings {
        autoplay: true,
        autoplay_timeout: 1000,
        autoplay_speed: 250,
        autoplay_hover_pause: hover_pause,
        autoplay_mouseleave_timeout: 1,
    }
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

/// Let the notification task drain pending carousel events
async fn settle() {
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
}

#[tokio::test]
async fn health_reports_ok() {
    let harness = harness(AutoplaySettings::default());
    let (status, body) = send(&harness.app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test(start_paused = true)]
async fn enabling_autoplay_through_settings_starts_rotation() {
    let harness = harness(AutoplaySettings::default());
    harness.carousel.initialize();
    settle().await;

    let (_, body) = send(&harness.app, "GET", "/status", None).await;
    assert_eq!(body["autoplay"]["rotating"], false);

    let (status, _) = send(
        &harness.app,
        "POST",
        "/settings",
        Some(json!({"autoplay": true, "autoplayTimeout": 1000})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    settle().await;

    let (_, body) = send(&harness.app, "GET", "/status", None).await;
    assert_eq!(body["autoplay"]["rotating"], true);
    assert_eq!(body["settings"]["autoplayTimeout"], 1000);
    assert_eq!(body["last_action"], "settings");

    tokio::time::sleep(Duration::from_millis(1001)).await;
    assert_eq!(harness.carousel.advance_count(), 1);
    assert_eq!(harness.carousel.position(), 1);
}

#[tokio::test(start_paused = true)]
async fn hover_pauses_and_leave_resumes() {
    let harness = harness(autoplay_settings(true));
    harness.carousel.initialize();
    settle().await;

    let (_, body) = send(&harness.app, "POST", "/pointer/enter", None).await;
    assert_eq!(body["autoplay"]["paused"], true);

    tokio::time::sleep(Duration::from_millis(1500)).await;
    assert_eq!(harness.carousel.advance_count(), 0);

    let (_, body) = send(&harness.app, "POST", "/pointer/leave", None).await;
    assert_eq!(body["autoplay"]["paused"], false);
    assert_eq!(body["autoplay"]["artificial_timeout"], true);
    assert_eq!(body["status"], "playing");

    tokio::time::sleep(Duration::from_millis(10)).await;
    assert_eq!(harness.carousel.advance_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn indefinite_stop_blocks_resume_on_resize() {
    let harness = harness(autoplay_settings(false));
    harness.carousel.initialize();
    settle().await;

    let (status, body) = send(
        &harness.app,
        "PUT",
        "/autoplay/stopped",
        Some(json!({"stopped": true})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["autoplay"]["stopped"], true);

    let (status, _) = send(&harness.app, "POST", "/resize", Some(json!({"width": 800}))).await;
    assert_eq!(status, StatusCode::OK);
    settle().await;

    let (_, body) = send(&harness.app, "GET", "/status", None).await;
    assert_eq!(body["autoplay"]["rotating"], false);
    assert_eq!(body["width"], 800);

    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(harness.carousel.advance_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn hidden_carousel_does_not_advance() {
    let harness = harness(autoplay_settings(false));
    send(&harness.app, "POST", "/visibility", Some(json!({"hidden": true}))).await;
    harness.carousel.initialize();
    settle().await;

    tokio::time::sleep(Duration::from_millis(1500)).await;
    assert_eq!(harness.carousel.advance_count(), 0);

    let (_, body) = send(&harness.app, "GET", "/status", None).await;
    assert_eq!(body["hidden"], true);
    assert_eq!(body["autoplay"]["timer_pending"], false);
}

#[tokio::test]
async fn play_accepts_missing_body_and_stop_leaves_rotating() {
    let harness = harness(AutoplaySettings::default());

    let (status, body) = send(&harness.app, "POST", "/play", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["autoplay"]["rotating"], true);

    let (status, body) = send(&harness.app, "POST", "/stop", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["autoplay"]["rotating"], false);
    assert_eq!(body["autoplay"]["timer_pending"], false);
    assert_eq!(body["status"], "idle");
}

#[tokio::test]
async fn zero_width_resize_is_rejected() {
    let harness = harness(AutoplaySettings::default());
    let (status, _) = send(&harness.app, "POST", "/resize", Some(json!({"width": 0}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn play_rejects_malformed_overrides() {
    let harness = harness(AutoplaySettings::default());

    let (status, _) = send(&harness.app, "POST", "/play", Some(json!({"timeoutMs": "abc"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = send(&harness.app, "GET", "/status", None).await;
    assert_eq!(body["autoplay"]["rotating"], false);
    assert_eq!(body["autoplay"]["timer_pending"], false);
}

#[tokio::test]
async fn play_applies_valid_overrides() {
    let harness = harness(AutoplaySettings::default());

    let (status, body) = send(
        &harness.app,
        "POST",
        "/play",
        Some(json!({"timeoutMs": 200, "speedMs": 40})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["autoplay"]["rotating"], true);
    assert_eq!(body["autoplay"]["artificial_timeout"], true);
}

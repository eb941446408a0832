//! HTTP endpoint handlers

use std::{sync::Arc, time::Duration};
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::Json,
};
use tracing::{info, warn};

use crate::{
    services::{CarouselController, Visibility},
    state::{AppState, SettingsPatch},
};
use super::responses::{
    ApiResponse, HealthResponse, InteractingRequest, PlayRequest, ResizeRequest, StatusResponse,
    StoppedRequest, VisibilityRequest,
};

type ApiResult = Result<Json<ApiResponse>, StatusCode>;

/// Record the action and answer with the coordinator's current state
fn respond(state: &AppState, action: &str, message: &str) -> ApiResult {
    state.record_action(action);
    Ok(Json(ApiResponse::from_snapshot(
        message.to_string(),
        state.autoplay.snapshot(),
    )))
}

/// Handle POST /play - Start or resume autoplay
///
/// An empty body means no overrides; anything else must be a valid `PlayRequest`.
pub async fn play_handler(State(state): State<Arc<AppState>>, body: Bytes) -> ApiResult {
    let request = if body.is_empty() {
        PlayRequest::default()
    } else {
        serde_json::from_slice::<PlayRequest>(&body).map_err(|e| {
            warn!("Rejected play request: {}", e);
            StatusCode::BAD_REQUEST
        })?
    };
    let timeout = request.timeout_ms.map(Duration::from_millis);
    let speed = request.speed_ms.map(Duration::from_millis);

    state.autoplay.play(timeout, speed);
    info!("Play endpoint called (timeout={:?}, speed={:?})", timeout, speed);
    respond(&state, "play", "Autoplay started")
}

/// Handle POST /stop - Cancel the pending tick and leave rotating
pub async fn stop_handler(State(state): State<Arc<AppState>>) -> ApiResult {
    state.autoplay.stop();
    info!("Stop endpoint called");
    respond(&state, "stop", "Autoplay stopped")
}

/// Handle POST /pause - Pause without cancelling the pending tick
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> ApiResult {
    state.autoplay.pause();
    info!("Pause endpoint called");
    respond(&state, "pause", "Autoplay paused")
}

/// Handle POST /pointer/enter
pub async fn pointer_enter_handler(State(state): State<Arc<AppState>>) -> ApiResult {
    state.autoplay.start_pausing();
    respond(&state, "pointer-enter", "Pointer entered the carousel")
}

/// Handle POST /pointer/leave
pub async fn pointer_leave_handler(State(state): State<Arc<AppState>>) -> ApiResult {
    state.autoplay.start_playing_on_mouse_leave();
    respond(&state, "pointer-leave", "Pointer left the carousel")
}

/// Handle POST /touch/start
pub async fn touch_start_handler(State(state): State<Arc<AppState>>) -> ApiResult {
    state.autoplay.start_pausing();
    respond(&state, "touch-start", "Touch started on the carousel")
}

/// Handle POST /touch/end
pub async fn touch_end_handler(State(state): State<Arc<AppState>>) -> ApiResult {
    state.autoplay.start_playing_on_touch_end();
    respond(&state, "touch-end", "Touch ended on the carousel")
}

/// Handle PUT /autoplay/stopped - Set the indefinite stop flag
pub async fn autoplay_stopped_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<StoppedRequest>,
) -> ApiResult {
    state.autoplay.set_autoplay_stopped(request.stopped);
    info!("Indefinite autoplay stop set to {}", request.stopped);
    respond(
        &state,
        "autoplay-stopped",
        if request.stopped { "Autoplay suspended indefinitely" } else { "Autoplay suspension lifted" },
    )
}

/// Handle POST /settings - Patch the carousel settings
pub async fn settings_handler(
    State(state): State<Arc<AppState>>,
    Json(patch): Json<SettingsPatch>,
) -> ApiResult {
    let settings = state.carousel.update_settings(&patch);
    info!("Settings endpoint called - autoplay={}", settings.autoplay);
    respond(&state, "settings", "Carousel settings updated")
}

/// Handle POST /resize
pub async fn resize_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ResizeRequest>,
) -> ApiResult {
    if let Err(e) = state.carousel.resize(request.width) {
        warn!("Rejected resize: {}", e);
        return Err(StatusCode::BAD_REQUEST);
    }
    respond(&state, "resize", "Carousel resized")
}

/// Handle POST /visibility - Mark the hosting surface hidden or visible
pub async fn visibility_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<VisibilityRequest>,
) -> ApiResult {
    state.visibility.set_hidden(request.hidden);
    respond(
        &state,
        "visibility",
        if request.hidden { "Carousel hidden" } else { "Carousel visible" },
    )
}

/// Handle POST /interacting - Start or finish a drag
pub async fn interacting_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<InteractingRequest>,
) -> ApiResult {
    state.carousel.set_interacting(request.interacting);
    respond(
        &state,
        "interacting",
        if request.interacting { "Interaction started" } else { "Interaction finished" },
    )
}

/// Handle GET /status - Return carousel and autoplay status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let (last_action, last_action_time) = state.get_last_action();

    Json(StatusResponse {
        position: state.carousel.position(),
        item_count: state.carousel.item_count(),
        advance_count: state.carousel.advance_count(),
        width: state.carousel.width(),
        flags: state.carousel.flags(),
        settings: state.carousel.settings(),
        autoplay: state.autoplay.snapshot(),
        hidden: state.visibility.is_hidden(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    })
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

//! HTTP API module
//!
//! This module contains the demo host's control endpoints and response structures.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/play", post(play_handler))
        .route("/stop", post(stop_handler))
        .route("/pause", post(pause_handler))
        // Interaction events
        .route("/pointer/enter", post(pointer_enter_handler))
        .route("/pointer/leave", post(pointer_leave_handler))
        .route("/touch/start", post(touch_start_handler))
        .route("/touch/end", post(touch_end_handler))
        .route("/interacting", post(interacting_handler))
        // Host-side changes
        .route("/autoplay/stopped", put(autoplay_stopped_handler))
        .route("/settings", post(settings_handler))
        .route("/resize", post(resize_handler))
        .route("/visibility", post(visibility_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

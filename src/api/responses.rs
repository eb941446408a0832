//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::{AutoplaySettings, AutoplaySnapshot, CarouselFlag};

/// API response structure for endpoints that act on the carousel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub autoplay: AutoplaySnapshot,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: String, message: String, autoplay: AutoplaySnapshot) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            autoplay,
        }
    }

    /// Create a response whose status reflects whether autoplay is running
    pub fn from_snapshot(message: String, autoplay: AutoplaySnapshot) -> Self {
        let status = if autoplay.is_running() { "playing" } else { "idle" };
        Self::new(status.to_string(), message, autoplay)
    }
}

/// Full status of the carousel and its autoplay
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub position: usize,
    pub item_count: usize,
    pub advance_count: u64,
    pub width: u32,
    pub flags: Vec<CarouselFlag>,
    pub settings: AutoplaySettings,
    pub autoplay: AutoplaySnapshot,
    pub hidden: bool,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Optional overrides for POST /play
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayRequest {
    pub timeout_ms: Option<u64>,
    pub speed_ms: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoppedRequest {
    pub stopped: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResizeRequest {
    pub width: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisibilityRequest {
    pub hidden: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractingRequest {
    pub interacting: bool,
}

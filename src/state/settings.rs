//! Autoplay settings record and partial updates

use std::time::Duration;
use serde::{Deserialize, Serialize};

/// Autoplay-related subset of the carousel settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AutoplaySettings {
    /// Whether the carousel should advance on its own
    pub autoplay: bool,
    /// Delay between automatic advances, in milliseconds
    pub autoplay_timeout: u64,
    /// Transition speed used for automatic advances, in milliseconds
    pub autoplay_speed: u64,
    /// Suspend autoplay while the pointer hovers the carousel
    pub autoplay_hover_pause: bool,
    /// Delay before the first advance after the pointer leaves, in milliseconds
    pub autoplay_mouseleave_timeout: u64,
}

impl AutoplaySettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.autoplay_timeout)
    }

    pub fn speed(&self) -> Duration {
        Duration::from_millis(self.autoplay_speed)
    }

    pub fn mouseleave_timeout(&self) -> Duration {
        Duration::from_millis(self.autoplay_mouseleave_timeout)
    }

    /// Apply a partial update, returning true if anything changed
    pub fn apply(&mut self, patch: &SettingsPatch) -> bool {
        let before = self.clone();
        if let Some(autoplay) = patch.autoplay {
            self.autoplay = autoplay;
        }
        if let Some(timeout) = patch.autoplay_timeout {
            self.autoplay_timeout = timeout;
        }
        if let Some(speed) = patch.autoplay_speed {
            self.autoplay_speed = speed;
        }
        if let Some(hover_pause) = patch.autoplay_hover_pause {
            self.autoplay_hover_pause = hover_pause;
        }
        if let Some(timeout) = patch.autoplay_mouseleave_timeout {
            self.autoplay_mouseleave_timeout = timeout;
        }
        *self != before
    }
}

impl Default for AutoplaySettings {
    fn default() -> Self {
        Self {
            autoplay: false,
            autoplay_timeout: 5000,
            autoplay_speed: 250,
            autoplay_hover_pause: false,
            autoplay_mouseleave_timeout: 1,
        }
    }
}

/// Partial settings update, every field optional
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    pub autoplay: Option<bool>,
    pub autoplay_timeout: Option<u64>,
    pub autoplay_speed: Option<u64>,
    pub autoplay_hover_pause: Option<bool>,
    pub autoplay_mouseleave_timeout: Option<u64>,
}

/// Treat a zero duration as "not supplied"
pub(crate) fn non_zero(duration: Option<Duration>) -> Option<Duration> {
    duration.filter(|d| !d.is_zero())
}

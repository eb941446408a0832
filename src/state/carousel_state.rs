//! Carousel flags and the notifications a carousel publishes

use std::fmt;
use serde::{Deserialize, Serialize};

/// Named carousel states the autoplay coordinator reads or requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CarouselFlag {
    /// Autoplay is engaged
    Rotating,
    /// A position transition is in flight
    Busy,
    /// The user is dragging or otherwise interacting
    Interacting,
}

impl fmt::Display for CarouselFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CarouselFlag::Rotating => "rotating",
            CarouselFlag::Busy => "busy",
            CarouselFlag::Interacting => "interacting",
        };
        f.write_str(name)
    }
}

/// Which part of the carousel a `Changed` notification concerns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "lowercase")]
pub enum ChangedProperty {
    Settings,
    Position { index: usize },
}

/// Notifications pushed by the carousel controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CarouselEvent {
    Initialized,
    Changed { property: ChangedProperty },
    Resized,
    /// Fires once per completed position transition
    Translated,
}

impl CarouselEvent {
    pub fn settings_changed() -> Self {
        CarouselEvent::Changed {
            property: ChangedProperty::Settings,
        }
    }

    pub fn position_changed(index: usize) -> Self {
        CarouselEvent::Changed {
            property: ChangedProperty::Position { index },
        }
    }
}

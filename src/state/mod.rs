//! State management module
//! 
//! Carousel-facing types, autoplay coordinator state and the demo host state.

pub mod app_state;
pub mod autoplay_state;
pub mod carousel_state;
pub mod settings;

// Re-export main types
pub use app_state::AppState;
pub use autoplay_state::AutoplaySnapshot;
pub(crate) use autoplay_state::AutoplayState;
pub use carousel_state::{CarouselEvent, CarouselFlag, ChangedProperty};
pub use settings::{AutoplaySettings, SettingsPatch};

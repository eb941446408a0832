//! Carousel Autoplay - timer-driven advancement for carousel widgets
//! 
//! This library coordinates a single cancellable autoplay timer on top of an
//! external carousel controller, reacting to its notifications and to user
//! interaction (hover, touch) the way a slideshow host expects.

pub mod config;
pub mod state;
pub mod api;
pub mod services;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::{AppState, AutoplaySettings, CarouselEvent, CarouselFlag};
pub use services::{CarouselController, InMemoryCarousel, TimerFacility, TokioTimer};
pub use tasks::Autoplay;
pub use api::create_router;
pub use utils::signals::shutdown_signal;

//! Collaborators the autoplay coordinator depends on
//! 
//! The carousel controller, the timer facility and the host capabilities,
//! each with the implementations used by the demo host and tests.

pub mod carousel;
pub mod host;
pub mod timer;

// Re-export main types
pub use carousel::{CarouselController, InMemoryCarousel};
pub use host::{AlwaysVisible, HostUpdate, Immediate, Visibility, VisibilityFlag};
pub use timer::{ManualTimer, TimerCallback, TimerFacility, TimerHandle, TokioTimer};

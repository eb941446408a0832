//! Background tasks module
//! 
//! The autoplay coordinator and the task that feeds it carousel notifications.

pub mod autoplay;

// Re-export main types
pub use autoplay::{autoplay_task, Autoplay, AutoplayBuilder};

//! Capabilities supplied by the hosting UI

use std::sync::atomic::{AtomicBool, Ordering};

/// Whether the hosting surface is currently hidden from the user
pub trait Visibility: Send + Sync {
    fn is_hidden(&self) -> bool;
}

/// Run a state-mutating closure inside the host's update/refresh batch
pub trait HostUpdate: Send + Sync {
    fn run_update(&self, update: &mut dyn FnMut());
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysVisible;

impl Visibility for AlwaysVisible {
    fn is_hidden(&self) -> bool {
        false
    }
}

/// Visibility toggled by the host, e.g. from a page-visibility listener
#[derive(Debug, Default)]
pub struct VisibilityFlag {
    hidden: AtomicBool,
}

impl VisibilityFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_hidden(&self, hidden: bool) {
        self.hidden.store(hidden, Ordering::SeqCst);
    }
}

impl Visibility for VisibilityFlag {
    fn is_hidden(&self) -> bool {
        self.hidden.load(Ordering::SeqCst)
    }
}

/// No batching: the closure runs directly
#[derive(Debug, Clone, Copy, Default)]
pub struct Immediate;

impl HostUpdate for Immediate {
    fn run_update(&self, update: &mut dyn FnMut()) {
        update()
    }
}

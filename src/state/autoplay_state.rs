//! Autoplay coordinator state and its status snapshot
//!
//! Only the snapshot leaves the crate; the live state stays with the
//! coordinator so nothing else can arm or drop its timer.
//!
//! ```compile_fail
//! use carousel_autoplay::state::autoplay_state::AutoplayState;
//! ```

use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;

use crate::services::TimerHandle;

/// Flags and handles owned exclusively by the autoplay coordinator
#[derive(Debug, Default)]
pub(crate) struct AutoplayState {
    /// Suspended by hover/touch, waiting to resume
    pub(crate) paused: bool,
    /// Suspended indefinitely by the host
    pub(crate) stopped: bool,
    /// The pending tick was scheduled with a caller-supplied delay
    pub(crate) artificial_timeout: bool,
    /// The one live tick, if any
    pub(crate) pending: Option<PendingTick>,
    /// Bumped on every schedule, identifies the live tick
    pub(crate) generation: u64,
    /// A mouse-leave watcher is waiting for the next `Translated`
    pub(crate) awaiting_translated: bool,
    pub(crate) torn_down: bool,
    pub(crate) subscription: Option<JoinHandle<()>>,
}

impl AutoplayState {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Drop the live tick, returning its timer handle for cancellation
    pub(crate) fn take_pending(&mut self) -> Option<TimerHandle> {
        self.pending.take().and_then(|tick| tick.handle)
    }

    /// Start a new generation, returning it with the handle it replaces
    pub(crate) fn arm(&mut self) -> (u64, Option<TimerHandle>) {
        let previous = self.take_pending();
        self.generation += 1;
        self.pending = Some(PendingTick {
            generation: self.generation,
            handle: None,
        });
        (self.generation, previous)
    }

    /// Attach the timer handle to its generation
    ///
    /// Returns false if the generation already fired or was replaced, in
    /// which case the caller must cancel `handle`.
    pub(crate) fn bind(&mut self, generation: u64, handle: TimerHandle) -> bool {
        match self.pending.as_mut() {
            Some(tick) if tick.generation == generation => {
                tick.handle = Some(handle);
                true
            }
            _ => false,
        }
    }

    /// Consume the live tick if it belongs to `generation`
    pub(crate) fn consume(&mut self, generation: u64) -> bool {
        if self.pending.map(|tick| tick.generation) == Some(generation) {
            self.pending = None;
            true
        } else {
            false
        }
    }
}

/// A scheduled tick; the handle is filled in once the timer returns it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PendingTick {
    pub(crate) generation: u64,
    pub(crate) handle: Option<TimerHandle>,
}

/// Point-in-time view of the coordinator, for status reporting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoplaySnapshot {
    pub rotating: bool,
    pub paused: bool,
    pub stopped: bool,
    pub artificial_timeout: bool,
    pub timer_pending: bool,
    pub awaiting_translated: bool,
    pub torn_down: bool,
}

impl AutoplaySnapshot {
    pub(crate) fn capture(state: &AutoplayState, rotating: bool) -> Self {
        Self {
            rotating,
            paused: state.paused,
            stopped: state.stopped,
            artificial_timeout: state.artificial_timeout,
            timer_pending: state.pending.is_some(),
            awaiting_translated: state.awaiting_translated,
            torn_down: state.torn_down,
        }
    }

    /// Autoplay is engaged and will advance on the next tick
    pub fn is_running(&self) -> bool {
        self.rotating && !self.paused && self.timer_pending
    }
}

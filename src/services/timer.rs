//! One-shot timer facilities

use std::{
    collections::{BTreeMap, HashMap},
    fmt,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};
use tokio::{runtime::Handle, task::AbortHandle};
use tracing::{debug, warn};

/// Callback run when a scheduled delay elapses
pub type TimerCallback = Box<dyn FnOnce() + Send + 'static>;

/// Opaque reference to a pending one-shot callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

impl TimerHandle {
    /// Wrap an id minted by a custom [`TimerFacility`]
    pub fn from_id(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TimerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

/// Schedule and cancel delayed one-shot callbacks
pub trait TimerFacility: Send + Sync {
    fn schedule(&self, delay: Duration, callback: TimerCallback) -> TimerHandle;

    /// Cancel a pending callback; unknown or fired handles are ignored
    fn cancel(&self, handle: TimerHandle);
}

/// Timer facility backed by tokio tasks, one task per scheduled callback
#[derive(Debug)]
pub struct TokioTimer {
    runtime: Handle,
    next_id: AtomicU64,
    tasks: Arc<Mutex<HashMap<u64, AbortHandle>>>,
}

impl TokioTimer {
    pub fn new(runtime: Handle) -> Self {
        Self {
            runtime,
            next_id: AtomicU64::new(1),
            tasks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Number of callbacks that have neither fired nor been cancelled
    pub fn pending(&self) -> usize {
        self.tasks.lock().map(|tasks| tasks.len()).unwrap_or(0)
    }
}

impl TimerFacility for TokioTimer {
    fn schedule(&self, delay: Duration, callback: TimerCallback) -> TimerHandle {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let tasks = Arc::clone(&self.tasks);

        // Hold the registry lock across spawn so the task can't remove itself first
        let mut registry = match self.tasks.lock() {
            Ok(registry) => registry,
            Err(poisoned) => {
                warn!("Timer registry lock poisoned, recovering");
                poisoned.into_inner()
            }
        };
        let task = self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            if let Ok(mut tasks) = tasks.lock() {
                tasks.remove(&id);
            }
            callback();
        });
        registry.insert(id, task.abort_handle());
        debug!("Scheduled timer#{} in {:?}", id, delay);

        TimerHandle(id)
    }

    fn cancel(&self, handle: TimerHandle) {
        let task = self.tasks.lock().ok().and_then(|mut tasks| tasks.remove(&handle.0));
        if let Some(task) = task {
            task.abort();
            debug!("Cancelled {}", handle);
        }
    }
}

/// Deterministic timer facility: callbacks only run when fired by hand
#[derive(Default)]
pub struct ManualTimer {
    next_id: AtomicU64,
    entries: Mutex<BTreeMap<u64, (Duration, TimerCallback)>>,
}

impl ManualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> usize {
        self.entries.lock().map(|entries| entries.len()).unwrap_or(0)
    }

    /// Delays of the pending callbacks, oldest first
    pub fn delays(&self) -> Vec<Duration> {
        self.entries
            .lock()
            .map(|entries| entries.values().map(|(delay, _)| *delay).collect())
            .unwrap_or_default()
    }

    /// Run the oldest pending callback, returning false if none was pending
    pub fn fire_next(&self) -> bool {
        // Released before running the callback, which may schedule again
        let entry = self.entries.lock().ok().and_then(|mut entries| entries.pop_first());
        match entry {
            Some((_, (_, callback))) => {
                callback();
                true
            }
            None => false,
        }
    }
}

impl fmt::Debug for ManualTimer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualTimer")
            .field("delays", &self.delays())
            .finish()
    }
}

impl TimerFacility for ManualTimer {
    fn schedule(&self, delay: Duration, callback: TimerCallback) -> TimerHandle {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(id, (delay, callback));
        }
        TimerHandle(id)
    }

    fn cancel(&self, handle: TimerHandle) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.remove(&handle.0);
        }
    }
}

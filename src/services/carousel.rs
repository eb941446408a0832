//! Carousel controller interface and an in-memory implementation

use std::{
    collections::BTreeSet,
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};
use tokio::{runtime::Handle, sync::broadcast};
use tracing::{debug, info, warn};

use crate::state::{AutoplaySettings, CarouselEvent, CarouselFlag, SettingsPatch};

const EVENT_CAPACITY: usize = 100;

/// The carousel as seen by the autoplay coordinator
///
/// Implementations own the settings and flags; the coordinator only reads
/// them and requests transitions.
pub trait CarouselController: Send + Sync {
    fn settings(&self) -> AutoplaySettings;

    fn is(&self, flag: CarouselFlag) -> bool;

    fn enter(&self, flag: CarouselFlag);

    fn leave(&self, flag: CarouselFlag);

    /// Advance to the next item using a transition of `speed`
    fn next(&self, speed: Duration);

    /// Subscribe to initialized/changed/resized/translated notifications
    fn subscribe(&self) -> broadcast::Receiver<CarouselEvent>;
}

#[derive(Debug)]
struct CarouselInner {
    settings: AutoplaySettings,
    flags: BTreeSet<CarouselFlag>,
    item_count: usize,
    position: usize,
    advance_count: u64,
    width: u32,
}

/// Carousel controller that keeps everything in memory
///
/// Transitions take `speed` to finish: `next` marks the carousel busy and a
/// tokio task publishes `Translated` once the transition is over.
#[derive(Debug)]
pub struct InMemoryCarousel {
    inner: Arc<Mutex<CarouselInner>>,
    events_tx: broadcast::Sender<CarouselEvent>,
}

impl InMemoryCarousel {
    pub fn new(item_count: usize, settings: AutoplaySettings) -> Self {
        let (events_tx, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            inner: Arc::new(Mutex::new(CarouselInner {
                settings,
                flags: BTreeSet::new(),
                item_count,
                position: 0,
                advance_count: 0,
                width: 0,
            })),
            events_tx,
        }
    }

    fn lock(&self) -> MutexGuard<'_, CarouselInner> {
        lock_inner(&self.inner)
    }

    fn publish(&self, event: CarouselEvent) {
        publish(&self.events_tx, event);
    }

    /// Announce that the carousel finished setting up
    pub fn initialize(&self) {
        info!("Carousel initialized with {} items", self.item_count());
        self.publish(CarouselEvent::Initialized);
    }

    /// Apply a settings patch and announce the change
    pub fn update_settings(&self, patch: &SettingsPatch) -> AutoplaySettings {
        let settings = {
            let mut inner = self.lock();
            if !inner.settings.apply(patch) {
                debug!("Settings patch changed nothing");
            }
            inner.settings.clone()
        };
        info!("Carousel settings updated: {:?}", settings);
        self.publish(CarouselEvent::settings_changed());
        settings
    }

    /// Record a new viewport width and announce the resize
    pub fn resize(&self, width: u32) -> Result<(), String> {
        if width == 0 {
            return Err("Carousel width must be positive".to_string());
        }
        self.lock().width = width;
        debug!("Carousel resized to {}px", width);
        self.publish(CarouselEvent::Resized);
        Ok(())
    }

    /// Mark a drag or similar interaction as in progress or finished
    pub fn set_interacting(&self, interacting: bool) {
        if interacting {
            self.enter(CarouselFlag::Interacting);
        } else {
            self.leave(CarouselFlag::Interacting);
        }
    }

    pub fn position(&self) -> usize {
        self.lock().position
    }

    pub fn item_count(&self) -> usize {
        self.lock().item_count
    }

    pub fn width(&self) -> u32 {
        self.lock().width
    }

    /// Number of completed `next` requests
    pub fn advance_count(&self) -> u64 {
        self.lock().advance_count
    }

    pub fn flags(&self) -> Vec<CarouselFlag> {
        self.lock().flags.iter().copied().collect()
    }
}

impl CarouselController for InMemoryCarousel {
    fn settings(&self) -> AutoplaySettings {
        self.lock().settings.clone()
    }

    fn is(&self, flag: CarouselFlag) -> bool {
        self.lock().flags.contains(&flag)
    }

    fn enter(&self, flag: CarouselFlag) {
        if self.lock().flags.insert(flag) {
            debug!("Carousel entered {}", flag);
        }
    }

    fn leave(&self, flag: CarouselFlag) {
        if self.lock().flags.remove(&flag) {
            debug!("Carousel left {}", flag);
        }
    }

    fn next(&self, speed: Duration) {
        let position = {
            let mut inner = self.lock();
            if inner.item_count == 0 {
                warn!("Ignoring next() on an empty carousel");
                return;
            }
            inner.position = (inner.position + 1) % inner.item_count;
            inner.advance_count += 1;
            inner.flags.insert(CarouselFlag::Busy);
            inner.position
        };
        info!("Carousel advancing to item {} over {:?}", position, speed);
        self.publish(CarouselEvent::position_changed(position));

        let inner = Arc::clone(&self.inner);
        let events_tx = self.events_tx.clone();
        let finish = move || {
            lock_inner(&inner).flags.remove(&CarouselFlag::Busy);
            publish(&events_tx, CarouselEvent::Translated);
        };

        match Handle::try_current() {
            Ok(runtime) if !speed.is_zero() => {
                runtime.spawn(async move {
                    tokio::time::sleep(speed).await;
                    finish();
                });
            }
            _ => finish(),
        }
    }

    fn subscribe(&self) -> broadcast::Receiver<CarouselEvent> {
        self.events_tx.subscribe()
    }
}

fn lock_inner(inner: &Mutex<CarouselInner>) -> MutexGuard<'_, CarouselInner> {
    inner.lock().unwrap_or_else(|poisoned| {
        warn!("Carousel state lock poisoned, recovering");
        poisoned.into_inner()
    })
}

fn publish(events_tx: &broadcast::Sender<CarouselEvent>, event: CarouselEvent) {
    if let Err(e) = events_tx.send(event) {
        debug!("No subscribers for carousel event: {}", e);
    }
}

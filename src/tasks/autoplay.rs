//! Autoplay coordinator
//!
//! Owns the single autoplay timer of a carousel. A tick either advances the
//! carousel or, when paused/busy/interacting/hidden, is skipped without a
//! retry; the next schedule comes from `play` or a carousel notification.

use std::{
    fmt,
    sync::{Arc, Mutex, MutexGuard, Weak},
    time::Duration,
};
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{debug, info, warn};

use crate::{
    services::{
        AlwaysVisible, CarouselController, HostUpdate, Immediate, TimerFacility, Visibility,
    },
    state::{
        settings::non_zero, AutoplaySnapshot, AutoplayState, CarouselEvent, CarouselFlag,
        ChangedProperty,
    },
};

/// Builder for [`Autoplay`], letting the host swap in its own capabilities
pub struct AutoplayBuilder {
    carousel: Arc<dyn CarouselController>,
    timer: Arc<dyn TimerFacility>,
    visibility: Arc<dyn Visibility>,
    host: Arc<dyn HostUpdate>,
}

impl AutoplayBuilder {
    pub fn visibility(mut self, visibility: Arc<dyn Visibility>) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn host_update(mut self, host: Arc<dyn HostUpdate>) -> Self {
        self.host = host;
        self
    }

    pub fn build(self) -> Arc<Autoplay> {
        Arc::new_cyclic(|me| Autoplay {
            me: me.clone(),
            carousel: self.carousel,
            timer: self.timer,
            visibility: self.visibility,
            host: self.host,
            state: Mutex::new(AutoplayState::new()),
        })
    }
}

/// Coordinates timed advancement of one carousel
pub struct Autoplay {
    me: Weak<Autoplay>,
    carousel: Arc<dyn CarouselController>,
    timer: Arc<dyn TimerFacility>,
    visibility: Arc<dyn Visibility>,
    host: Arc<dyn HostUpdate>,
    state: Mutex<AutoplayState>,
}

impl Autoplay {
    pub fn builder(
        carousel: Arc<dyn CarouselController>,
        timer: Arc<dyn TimerFacility>,
    ) -> AutoplayBuilder {
        AutoplayBuilder {
            carousel,
            timer,
            visibility: Arc::new(AlwaysVisible),
            host: Arc::new(Immediate),
        }
    }

    /// Shorthand for a coordinator with the default host capabilities
    pub fn new(carousel: Arc<dyn CarouselController>, timer: Arc<dyn TimerFacility>) -> Arc<Self> {
        Self::builder(carousel, timer).build()
    }

    fn state(&self) -> MutexGuard<'_, AutoplayState> {
        self.state.lock().unwrap_or_else(|poisoned| {
            warn!("Autoplay state lock poisoned, recovering");
            poisoned.into_inner()
        })
    }

    fn is_torn_down(&self) -> bool {
        self.state().torn_down
    }

    fn is_rotating(&self) -> bool {
        self.carousel.is(CarouselFlag::Rotating)
    }

    /// Subscribe to the carousel's notifications for the coordinator's lifetime
    ///
    /// Must be called from within a tokio runtime. Calling it again replaces
    /// the previous subscription.
    pub fn attach(&self) {
        let events = self.carousel.subscribe();
        let task = tokio::spawn(autoplay_task(self.me.clone(), events));

        let mut state = self.state();
        if state.torn_down {
            task.abort();
            return;
        }
        if let Some(previous) = state.subscription.replace(task) {
            previous.abort();
        }
        debug!("Autoplay subscribed to carousel notifications");
    }

    /// Start or resume autoplay
    ///
    /// Resuming from a pause reschedules with the mouse-leave timeout; a
    /// carousel already rotating is otherwise left alone.
    pub fn play(&self, timeout: Option<Duration>, speed: Option<Duration>) {
        if self.is_torn_down() {
            return;
        }

        let was_paused = std::mem::replace(&mut self.state().paused, false);
        if was_paused {
            let resume_after = self.carousel.settings().mouseleave_timeout();
            debug!("Resuming paused autoplay after {:?}", resume_after);
            self.schedule_next(Some(resume_after), None);
        }

        if self.is_rotating() {
            return;
        }

        info!("Autoplay started");
        self.carousel.enter(CarouselFlag::Rotating);
        self.schedule_next(timeout, speed);
    }

    /// Suspend autoplay: cancel the pending tick and leave rotating
    pub fn stop(&self) {
        if self.is_torn_down() || !self.is_rotating() {
            return;
        }

        let pending = {
            let mut state = self.state();
            state.paused = true;
            state.take_pending()
        };
        if let Some(handle) = pending {
            self.timer.cancel(handle);
        }
        self.carousel.leave(CarouselFlag::Rotating);
        info!("Autoplay stopped");
    }

    /// Suspend autoplay without cancelling the pending tick
    ///
    /// The carousel stays rotating; the tick fires, sees the pause and skips.
    pub fn pause(&self) {
        if self.is_torn_down() || !self.is_rotating() {
            return;
        }
        self.state().paused = true;
        debug!("Autoplay paused");
    }

    /// Pointer entered (or touch started on) the carousel
    pub fn start_pausing(&self) {
        if self.carousel.settings().autoplay_hover_pause && self.is_rotating() {
            self.pause();
        }
    }

    /// Pointer left the carousel
    pub fn start_playing_on_mouse_leave(&self) {
        self.resume_after_interaction();
    }

    /// Touch ended on the carousel
    pub fn start_playing_on_touch_end(&self) {
        self.resume_after_interaction();
    }

    fn resume_after_interaction(&self) {
        if !self.carousel.settings().autoplay_hover_pause || !self.is_rotating() {
            return;
        }
        self.play(None, None);

        let mut state = self.state();
        if !state.torn_down {
            state.awaiting_translated = true;
        }
    }

    pub fn is_autoplay_stopped(&self) -> bool {
        self.state().stopped
    }

    /// Suspend autoplay indefinitely, e.g. while an overlay covers the carousel
    ///
    /// Only the resize path honours this flag.
    pub fn set_autoplay_stopped(&self, stopped: bool) {
        self.state().stopped = stopped;
        debug!("Autoplay indefinite stop set to {}", stopped);
    }

    pub fn snapshot(&self) -> AutoplaySnapshot {
        let rotating = self.is_rotating();
        AutoplaySnapshot::capture(&self.state(), rotating)
    }

    /// React to one carousel notification
    pub fn handle_event(&self, event: CarouselEvent) {
        if self.is_torn_down() {
            return;
        }
        debug!("Autoplay handling {:?}", event);

        let settings = self.carousel.settings();
        match event {
            CarouselEvent::Initialized => {
                if settings.autoplay {
                    self.play(None, None);
                }
            }
            CarouselEvent::Changed {
                property: ChangedProperty::Settings,
            } => {
                if settings.autoplay {
                    self.play(None, None);
                } else {
                    self.stop();
                }
            }
            CarouselEvent::Changed {
                property: ChangedProperty::Position { .. },
            } => {
                if settings.autoplay {
                    self.schedule_next(None, None);
                }
            }
            CarouselEvent::Resized => {
                if settings.autoplay && !self.is_autoplay_stopped() {
                    self.play(None, None);
                } else {
                    self.stop();
                }
            }
            CarouselEvent::Translated => {
                let reschedule = {
                    let mut state = self.state();
                    std::mem::take(&mut state.awaiting_translated) && state.artificial_timeout
                };
                if reschedule {
                    debug!("Transition finished, replacing artificial timeout");
                    self.schedule_next(None, None);
                }
            }
        }
    }

    /// Replace the pending tick with a new one
    fn schedule_next(&self, timeout: Option<Duration>, speed: Option<Duration>) {
        let timeout = non_zero(timeout);
        let speed = non_zero(speed);
        let delay = timeout.unwrap_or_else(|| self.carousel.settings().timeout());

        let (generation, previous) = {
            let mut state = self.state();
            if state.torn_down {
                return;
            }
            state.artificial_timeout = timeout.is_some();
            state.arm()
        };
        if let Some(handle) = previous {
            self.timer.cancel(handle);
        }

        let me = self.me.clone();
        let handle = self.timer.schedule(
            delay,
            Box::new(move || {
                if let Some(autoplay) = me.upgrade() {
                    autoplay.tick(generation, speed);
                }
            }),
        );

        // Fired already (zero delay) or superseded while scheduling
        if !self.state().bind(generation, handle) {
            self.timer.cancel(handle);
            return;
        }
        debug!("Next autoplay tick in {:?} ({})", delay, handle);
    }

    fn tick(&self, generation: u64, speed: Option<Duration>) {
        {
            let mut state = self.state();
            if state.torn_down || !state.consume(generation) {
                debug!("Ignoring stale autoplay tick #{}", generation);
                return;
            }
        }

        self.host.run_update(&mut || self.advance(speed));
    }

    fn advance(&self, speed: Option<Duration>) {
        {
            let state = self.state();
            // Teardown may have landed between the tick and this update
            if state.torn_down {
                return;
            }
            if state.paused {
                debug!("Autoplay tick skipped: paused");
                return;
            }
        }
        if self.carousel.is(CarouselFlag::Busy) || self.carousel.is(CarouselFlag::Interacting) {
            debug!("Autoplay tick skipped: carousel busy or interacting");
            return;
        }
        if self.visibility.is_hidden() {
            debug!("Autoplay tick skipped: hidden");
            return;
        }

        let speed = speed.unwrap_or_else(|| self.carousel.settings().speed());
        self.carousel.next(speed);
    }

    /// Unsubscribe and cancel the pending tick; nothing happens afterwards
    pub fn teardown(&self) {
        let (pending, subscription) = {
            let mut state = self.state();
            if state.torn_down {
                return;
            }
            state.torn_down = true;
            state.awaiting_translated = false;
            (state.take_pending(), state.subscription.take())
        };
        if let Some(handle) = pending {
            self.timer.cancel(handle);
        }
        if let Some(task) = subscription {
            task.abort();
        }
        info!("Autoplay torn down");
    }
}

impl fmt::Debug for Autoplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Autoplay")
            .field("state", &*self.state())
            .finish_non_exhaustive()
    }
}

impl Drop for Autoplay {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Background task feeding carousel notifications to the coordinator
///
/// Holds only a weak reference, so it ends once the coordinator is dropped.
pub async fn autoplay_task(autoplay: Weak<Autoplay>, mut events: broadcast::Receiver<CarouselEvent>) {
    debug!("Starting autoplay notification task");

    loop {
        match events.recv().await {
            Ok(event) => match autoplay.upgrade() {
                Some(autoplay) => autoplay.handle_event(event),
                None => break,
            },
            Err(RecvError::Lagged(skipped)) => {
                warn!("Autoplay missed {} carousel notifications", skipped);
            }
            Err(RecvError::Closed) => {
                debug!("Carousel notification stream closed");
                break;
            }
        }
    }
}

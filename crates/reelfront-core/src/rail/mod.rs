//! Auto-scrolling media rail
//!
//! A rail is a horizontal strip of cards that drifts on its own, stops while
//! the user interacts with it and picks up again after a quiet period.
//!
//! - `looped` - doubled content view so the strip can wrap without a seam
//! - `scroll` - container offset and loop arithmetic
//! - `driver` - frame-rate independent autoscroll tick
//! - `pause` - hover/focus/manual-navigation pause state machine
//! - `nav` - next/previous jump geometry
//! - `runner` - async frame loop with explicit shutdown
//!
//! [`Rail`] owns all of it for one mounted instance. Time is always passed in,
//! so the same rail can be driven by the terminal event loop, by the async
//! runner, or by a test stepping through simulated frames.

pub mod driver;
pub mod looped;
pub mod nav;
pub mod pause;
pub mod runner;
pub mod scroll;

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::anim::{EasingType, Tween};
use crate::config::RailConfig;
use crate::motion::MotionPreference;

pub use driver::{AutoscrollDriver, HoldReason, TickOutcome};
pub use looped::{LoopedSequence, RailItem};
pub use nav::{jump_distance, Direction};
pub use pause::{PauseController, PauseEvent, PauseMode};
pub use runner::RailRunner;
pub use scroll::ScrollState;

/// What a single frame did to the rail
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameOutcome {
    Scrolled(TickOutcome),
    /// A manual jump is being animated
    Navigating { position: f64 },
    Unmounted,
}

/// One mounted rail instance
#[derive(Debug)]
pub struct Rail<T> {
    items: LoopedSequence<T>,
    scroll: Option<ScrollState>,
    pause: PauseController,
    driver: AutoscrollDriver,
    smooth: Option<Tween>,
    nav_fraction: f64,
    nav_duration: Duration,
    nav_easing: EasingType,
    mounted: bool,
}

impl<T> Rail<T> {
    pub fn new(items: Arc<[T]>, config: &RailConfig) -> Self {
        Self {
            items: LoopedSequence::new(items),
            scroll: None,
            pause: PauseController::new(config.resume_delay()),
            driver: AutoscrollDriver::from_config(config),
            smooth: None,
            nav_fraction: config.nav_fraction,
            nav_duration: config.nav_duration(),
            nav_easing: config.nav_easing,
            mounted: true,
        }
    }

    pub fn items(&self) -> &LoopedSequence<T> {
        &self.items
    }

    /// Swap in a new source list; the same list is a no-op
    pub fn set_items(&mut self, items: &Arc<[T]>) -> bool {
        let rebuilt = self.items.refresh(items);
        if rebuilt {
            self.smooth = None;
            if let Some(scroll) = self.scroll.as_mut() {
                scroll.set_position(0.0);
            }
        }
        rebuilt
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Report container metrics after layout
    pub fn measure(&mut self, scroll_width: f64, visible_width: f64) {
        if !self.mounted {
            return;
        }
        match self.scroll.as_mut() {
            Some(scroll) => scroll.resize(scroll_width, visible_width),
            None => self.scroll = Some(ScrollState::new(scroll_width, visible_width)),
        }
    }

    /// The container went away (page hidden, widget not laid out)
    pub fn detach(&mut self) {
        self.scroll = None;
        self.smooth = None;
        self.driver.reset();
    }

    pub fn scroll(&self) -> Option<&ScrollState> {
        self.scroll.as_ref()
    }

    pub fn position(&self) -> Option<f64> {
        self.scroll.as_ref().map(ScrollState::position)
    }

    pub fn pause_mode(&self) -> PauseMode {
        self.pause.mode()
    }

    pub fn is_paused(&self) -> bool {
        self.pause.is_paused()
    }

    pub fn pending_timers(&self) -> usize {
        self.pause.pending_timers()
    }

    pub fn is_navigating(&self) -> bool {
        self.smooth.is_some()
    }

    /// Whether the next frames can change anything visible
    pub fn needs_frames(&self, motion: &impl MotionPreference) -> bool {
        if !self.mounted || !self.scroll.is_some_and(|s| s.is_measurable()) {
            return false;
        }
        self.smooth.is_some()
            || self.pause.pending_timers() > 0
            || (!self.pause.is_paused() && !motion.prefers_reduced_motion())
    }

    pub fn pointer_enter(&mut self, now: Instant) -> PauseMode {
        self.interact(PauseEvent::PointerEnter, now)
    }

    pub fn pointer_leave(&mut self, now: Instant) -> PauseMode {
        self.interact(PauseEvent::PointerLeave, now)
    }

    pub fn focus_in(&mut self, now: Instant) -> PauseMode {
        self.interact(PauseEvent::FocusIn, now)
    }

    pub fn focus_out(&mut self, now: Instant) -> PauseMode {
        self.interact(PauseEvent::FocusOut, now)
    }

    fn interact(&mut self, event: PauseEvent, now: Instant) -> PauseMode {
        if !self.mounted {
            return self.pause.mode();
        }
        self.pause.handle(event, now)
    }

    /// Jump roughly one viewport in `direction`, pausing autoscroll
    ///
    /// Returns `false` when there was nothing to scroll.
    pub fn move_rail(
        &mut self,
        direction: Direction,
        now: Instant,
        motion: &impl MotionPreference,
    ) -> bool {
        if !self.mounted {
            return false;
        }
        self.pause.pause_then_resume(now);

        let Some(scroll) = self.scroll.as_mut() else {
            return false;
        };
        if !scroll.is_measurable() {
            return false;
        }
        let distance = jump_distance(direction, scroll.visible_width(), self.nav_fraction);

        // Chain onto a jump that is still in flight
        let (from, base) = match &self.smooth {
            Some(tween) => (tween.sample(now), tween.to()),
            None => (scroll.position(), scroll.position()),
        };
        let target = base + distance;
        debug!(?direction, from, target, "rail jump");

        if motion.prefers_reduced_motion() || self.nav_duration.is_zero() {
            scroll.set_position(target);
            self.smooth = None;
        } else {
            self.smooth = Some(Tween::new(now, from, target, self.nav_duration, self.nav_easing));
        }
        true
    }

    /// Advance the rail by one frame
    pub fn frame(&mut self, now: Instant, motion: &impl MotionPreference) -> FrameOutcome {
        if !self.mounted {
            return FrameOutcome::Unmounted;
        }
        self.pause.poll(now);

        if let Some(tween) = self.smooth.clone() {
            let Some(scroll) = self.scroll.as_mut() else {
                self.smooth = None;
                return FrameOutcome::Scrolled(self.driver.tick(now, None, true, motion));
            };
            scroll.set_position(tween.sample(now));
            if tween.is_done(now) {
                self.smooth = None;
            }
            // Keeps the driver's frame clock current while it is held
            self.driver.tick(now, Some(scroll), true, motion);
            return FrameOutcome::Navigating {
                position: scroll.position(),
            };
        }

        let paused = self.pause.is_paused();
        FrameOutcome::Scrolled(self.driver.tick(now, self.scroll.as_mut(), paused, motion))
    }

    /// Tear down: cancel the pending resume timer and stop frame scheduling
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.pause.cancel();
        self.detach();
        debug!("rail unmounted");
    }
}

impl<T> Drop for Rail<T> {
    fn drop(&mut self) {
        self.unmount();
    }
}

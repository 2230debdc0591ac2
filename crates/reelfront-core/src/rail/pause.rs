//! Interaction pause controller
//!
//! Pause reasons are tracked independently: pointer hover and keyboard focus
//! are sticky for as long as they last, manual navigation arms a single timed
//! resume. The rail only runs when no reason is left.
//!
//! | event          | effect                                        |
//! |----------------|-----------------------------------------------|
//! | `PointerEnter` | hover reason set                              |
//! | `PointerLeave` | hover reason cleared                          |
//! | `FocusIn`      | focus reason set                              |
//! | `FocusOut`     | focus reason cleared                          |
//! | `ManualNav`    | resume deadline replaced by `now + delay`     |
//! | `TimerFired`   | resume deadline cleared once it has passed    |

use std::time::{Duration, Instant};

use tracing::debug;

/// Observable pause state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseMode {
    Running,
    /// Held by hover or focus; any pending deadline is kept underneath
    PausedSticky,
    PausedTimed { deadline: Instant },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseEvent {
    PointerEnter,
    PointerLeave,
    FocusIn,
    FocusOut,
    ManualNav,
    TimerFired,
}

#[derive(Debug, Clone)]
pub struct PauseController {
    hover: bool,
    focus: bool,
    resume_at: Option<Instant>,
    resume_delay: Duration,
}

impl PauseController {
    pub fn new(resume_delay: Duration) -> Self {
        Self {
            hover: false,
            focus: false,
            resume_at: None,
            resume_delay,
        }
    }

    pub fn resume_delay(&self) -> Duration {
        self.resume_delay
    }

    pub fn mode(&self) -> PauseMode {
        if self.hover || self.focus {
            PauseMode::PausedSticky
        } else if let Some(deadline) = self.resume_at {
            PauseMode::PausedTimed { deadline }
        } else {
            PauseMode::Running
        }
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.mode() != PauseMode::Running
    }

    /// Pending resume deadline, if a timed pause is armed
    pub fn resume_deadline(&self) -> Option<Instant> {
        self.resume_at
    }

    /// Number of live resume timers (0 or 1)
    pub fn pending_timers(&self) -> usize {
        usize::from(self.resume_at.is_some())
    }

    /// Pause now and resume after the configured quiet period
    pub fn pause_then_resume(&mut self, now: Instant) -> PauseMode {
        self.handle(PauseEvent::ManualNav, now)
    }

    pub fn handle(&mut self, event: PauseEvent, now: Instant) -> PauseMode {
        match event {
            PauseEvent::PointerEnter => self.hover = true,
            PauseEvent::PointerLeave => self.hover = false,
            PauseEvent::FocusIn => self.focus = true,
            PauseEvent::FocusOut => self.focus = false,
            PauseEvent::ManualNav => {
                let deadline = now + self.resume_delay;
                if self.resume_at.replace(deadline).is_some() {
                    debug!("resume timer replaced");
                }
            }
            PauseEvent::TimerFired => {
                // A stale firing (deadline moved later) is ignored
                if self.resume_at.is_some_and(|deadline| deadline <= now) {
                    self.resume_at = None;
                }
            }
        }
        self.mode()
    }

    /// Fire the resume timer if its deadline has passed
    ///
    /// Returns `true` when the timer fired during this call.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.resume_at {
            Some(deadline) if deadline <= now => {
                self.handle(PauseEvent::TimerFired, now);
                debug!(mode = ?self.mode(), "resume timer fired");
                true
            }
            _ => false,
        }
    }

    /// Drop every pause reason and the pending timer
    pub fn cancel(&mut self) {
        self.hover = false;
        self.focus = false;
        self.resume_at = None;
    }
}

use std::time::{Duration, Instant};

use crate::anim::timing::frames_elapsed;
use crate::config::RailConfig;
use crate::motion::MotionPreference;

use super::scroll::ScrollState;

/// Why a tick left the position untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoldReason {
    Paused,
    ReducedMotion,
    /// Container has no usable width (empty rail, zero-sized terminal)
    Unmeasured,
}

/// Result of one driver tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    Advanced { position: f64, wrapped: bool },
    Held(HoldReason),
    /// No container; the caller should stop scheduling frames for this rail
    Stopped,
}

/// Frame-rate independent autoscroll
///
/// Speed is expressed per reference frame; elapsed wall time is converted into
/// a (possibly fractional) number of reference frames on each tick.
#[derive(Debug, Clone)]
pub struct AutoscrollDriver {
    speed: f64,
    reference_frame: Duration,
    last_frame: Option<Instant>,
}

impl AutoscrollDriver {
    pub fn new(speed: f64, reference_frame: Duration) -> Self {
        Self {
            speed,
            reference_frame,
            last_frame: None,
        }
    }

    pub fn from_config(config: &RailConfig) -> Self {
        Self::new(config.speed, config.reference_frame())
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Forget the last frame time so the next tick starts fresh
    pub fn reset(&mut self) {
        self.last_frame = None;
    }

    pub fn tick(
        &mut self,
        now: Instant,
        scroll: Option<&mut ScrollState>,
        paused: bool,
        motion: &impl MotionPreference,
    ) -> TickOutcome {
        let Some(scroll) = scroll else {
            self.last_frame = None;
            return TickOutcome::Stopped;
        };

        // Re-acquired on every tick, held or not, so a long pause never turns
        // into one large jump.
        let delta = self
            .last_frame
            .map(|last| frames_elapsed(now.saturating_duration_since(last), self.reference_frame))
            .unwrap_or(0.0);
        self.last_frame = Some(now);

        if !scroll.is_measurable() {
            return TickOutcome::Held(HoldReason::Unmeasured);
        }
        if motion.prefers_reduced_motion() {
            return TickOutcome::Held(HoldReason::ReducedMotion);
        }
        if paused {
            return TickOutcome::Held(HoldReason::Paused);
        }

        let wrapped = scroll.advance(self.speed * delta);
        TickOutcome::Advanced {
            position: scroll.position(),
            wrapped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_micros(16_667);

    fn run(driver: &mut AutoscrollDriver, scroll: &mut ScrollState, start: Instant, step: Duration, total: Duration) {
        let mut t = Duration::ZERO;
        while t <= total {
            driver.tick(start + t, Some(scroll), false, &false);
            t += step;
        }
    }

    #[test]
    fn test_first_tick_does_not_move() {
        let mut driver = AutoscrollDriver::new(1.0, FRAME);
        let mut scroll = ScrollState::new(1000.0, 100.0);
        let outcome = driver.tick(Instant::now(), Some(&mut scroll), false, &false);
        assert_eq!(outcome, TickOutcome::Advanced { position: 0.0, wrapped: false });
    }

    #[test]
    fn test_advances_by_speed_per_frame() {
        let mut driver = AutoscrollDriver::new(2.0, FRAME);
        let mut scroll = ScrollState::new(1000.0, 100.0);
        let start = Instant::now();
        driver.tick(start, Some(&mut scroll), false, &false);
        driver.tick(start + FRAME * 3, Some(&mut scroll), false, &false);
        assert!((scroll.position() - 6.0).abs() < 1e-6);
    }

    #[test]
    fn test_wraparound_invariant() {
        let mut driver = AutoscrollDriver::new(7.3, FRAME);
        let mut scroll = ScrollState::new(90.0, 30.0);
        let start = Instant::now();
        for i in 0..5_000u32 {
            driver.tick(start + FRAME * i, Some(&mut scroll), false, &false);
            assert!(scroll.position() >= 0.0);
            assert!(scroll.position() < scroll.loop_width());
        }
    }

    #[test]
    fn test_frame_rate_independence() {
        let item_width = 24.0;
        let start = Instant::now();
        let total = Duration::from_secs(10);

        let mut fast = AutoscrollDriver::new(0.5, FRAME);
        let mut fast_scroll = ScrollState::new(item_width * 20.0, 80.0);
        run(&mut fast, &mut fast_scroll, start, Duration::from_micros(6_944), total);

        let mut slow = AutoscrollDriver::new(0.5, FRAME);
        let mut slow_scroll = ScrollState::new(item_width * 20.0, 80.0);
        run(&mut slow, &mut slow_scroll, start, Duration::from_millis(33), total);

        let diff = (fast_scroll.position() - slow_scroll.position()).abs();
        let loop_width = fast_scroll.loop_width();
        let diff = diff.min(loop_width - diff);
        assert!(diff < item_width, "diff {diff}");
    }

    #[test]
    fn test_paused_holds_and_reacquires_time() {
        let mut driver = AutoscrollDriver::new(1.0, FRAME);
        let mut scroll = ScrollState::new(1000.0, 100.0);
        let start = Instant::now();
        driver.tick(start, Some(&mut scroll), false, &false);
        let held = driver.tick(start + Duration::from_secs(5), Some(&mut scroll), true, &false);
        assert_eq!(held, TickOutcome::Held(HoldReason::Paused));
        assert_eq!(scroll.position(), 0.0);

        // One frame after resuming moves one frame's worth, not five seconds' worth
        driver.tick(start + Duration::from_secs(5) + FRAME, Some(&mut scroll), false, &false);
        assert!((scroll.position() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_reduced_motion_suppresses_movement() {
        let mut driver = AutoscrollDriver::new(3.0, FRAME);
        let mut scroll = ScrollState::new(300.0, 100.0);
        scroll.set_position(42.0);
        let start = Instant::now();
        for i in 0..500u32 {
            let paused = i % 3 == 0;
            let outcome = driver.tick(start + FRAME * i, Some(&mut scroll), paused, &true);
            assert_eq!(outcome, TickOutcome::Held(HoldReason::ReducedMotion));
            assert_eq!(scroll.position(), 42.0);
        }
    }

    #[test]
    fn test_unmeasured_and_missing_container() {
        let mut driver = AutoscrollDriver::new(1.0, FRAME);
        let mut scroll = ScrollState::new(0.0, 0.0);
        let now = Instant::now();
        assert_eq!(
            driver.tick(now, Some(&mut scroll), false, &false),
            TickOutcome::Held(HoldReason::Unmeasured)
        );
        assert_eq!(driver.tick(now, None, false, &false), TickOutcome::Stopped);
    }
}

//! Page scroll controller
//!
//! Batches scroll requests between frames and eases toward the target row.
//! Under reduced motion every scroll lands immediately.

use std::time::{Duration, Instant};

use reelfront_core::anim::Tween;
use reelfront_core::config::ScrollConfig;
use reelfront_core::MotionPreference;

#[derive(Debug, Clone)]
pub struct PageScroller {
    animation: Option<Tween>,
    config: ScrollConfig,
    /// Current row offset (always up to date)
    current: u16,
    /// Scroll requests not yet folded into an animation
    pending_delta: i32,
    max_scroll: u16,
}

impl Default for PageScroller {
    fn default() -> Self {
        Self::new(ScrollConfig::default())
    }
}

impl PageScroller {
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            animation: None,
            config,
            current: 0,
            pending_delta: 0,
            max_scroll: 0,
        }
    }

    fn duration(&self) -> Duration {
        Duration::from_millis(self.config.animation_duration_ms)
    }

    fn is_smooth(&self, motion: &impl MotionPreference) -> bool {
        self.config.smooth_enabled
            && self.config.animation_duration_ms > 0
            && !motion.prefers_reduced_motion()
    }

    #[inline]
    pub fn current(&self) -> u16 {
        self.current
    }

    pub fn max_scroll(&self) -> u16 {
        self.max_scroll
    }

    /// Content or viewport changed; keeps the offset in range
    pub fn set_bounds(&mut self, content_height: u16, viewport_height: u16) {
        self.max_scroll = content_height.saturating_sub(viewport_height);
        self.current = self.current.min(self.max_scroll);
    }

    /// Whether frames are needed to finish pending work
    #[inline]
    pub fn needs_update(&self) -> bool {
        self.animation.is_some() || self.pending_delta != 0
    }

    pub fn target(&self) -> u16 {
        self.animation
            .as_ref()
            .map(|a| a.to().round().max(0.0) as u16)
            .unwrap_or(self.current)
    }

    /// Jump without animating
    pub fn set(&mut self, row: u16) {
        self.animation = None;
        self.pending_delta = 0;
        self.current = row.min(self.max_scroll);
    }

    /// Scroll by `delta` rows, positive is down
    pub fn scroll_by(&mut self, delta: i32, motion: &impl MotionPreference) {
        if !self.is_smooth(motion) {
            self.set((i32::from(self.current) + delta).clamp(0, i32::from(self.max_scroll)) as u16);
            return;
        }
        self.pending_delta += delta;
    }

    pub fn scroll_lines(&self) -> i32 {
        i32::from(self.config.scroll_lines.max(1))
    }

    pub fn half_page(viewport_height: u16) -> i32 {
        i32::from((viewport_height / 2).max(1))
    }

    pub fn to_top(&mut self, now: Instant, motion: &impl MotionPreference) {
        self.scroll_to(0, now, motion);
    }

    pub fn to_bottom(&mut self, now: Instant, motion: &impl MotionPreference) {
        self.scroll_to(self.max_scroll, now, motion);
    }

    pub fn scroll_to(&mut self, row: u16, now: Instant, motion: &impl MotionPreference) {
        let row = row.min(self.max_scroll);
        self.pending_delta = 0;
        if !self.is_smooth(motion) || row == self.current {
            self.set(row);
            return;
        }
        self.animation = Some(Tween::new(
            now,
            f64::from(self.current),
            f64::from(row),
            self.duration(),
            self.config.easing,
        ));
    }

    /// Advance the animation and return the row to draw
    pub fn update(&mut self, now: Instant) -> u16 {
        if self.pending_delta != 0 {
            let target = (i32::from(self.target()) + self.pending_delta)
                .clamp(0, i32::from(self.max_scroll)) as u16;
            self.pending_delta = 0;
            if target != self.current {
                self.animation = Some(Tween::new(
                    now,
                    f64::from(self.current),
                    f64::from(target),
                    self.duration(),
                    self.config.easing,
                ));
            } else {
                self.animation = None;
            }
        }

        if let Some(tween) = &self.animation {
            let row = tween.sample(now).round().clamp(0.0, f64::from(u16::MAX)) as u16;
            self.current = row.min(self.max_scroll);
            if tween.is_done(now) {
                self.animation = None;
            }
        }

        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scroller(smooth: bool) -> PageScroller {
        let mut scroller = PageScroller::new(ScrollConfig {
            smooth_enabled: smooth,
            animation_duration_ms: 100,
            ..Default::default()
        });
        scroller.set_bounds(200, 40);
        scroller
    }

    #[test]
    fn test_instant_scroll_when_disabled() {
        let mut scroller = scroller(false);
        scroller.scroll_by(10, &false);
        assert_eq!(scroller.current(), 10);
        assert!(!scroller.needs_update());
    }

    #[test]
    fn test_reduced_motion_is_instant() {
        let mut scroller = scroller(true);
        scroller.scroll_by(10, &true);
        assert_eq!(scroller.current(), 10);
    }

    #[test]
    fn test_scroll_by_batching() {
        let mut scroller = scroller(true);
        scroller.scroll_by(10, &false);
        scroller.scroll_by(10, &false);
        scroller.scroll_by(10, &false);

        let now = Instant::now();
        scroller.update(now);
        assert_eq!(scroller.target(), 30);
        assert_eq!(scroller.update(now + Duration::from_millis(100)), 30);
        assert!(!scroller.needs_update());
    }

    #[test]
    fn test_clamped_to_bounds() {
        let mut scroller = scroller(false);
        scroller.scroll_by(1000, &false);
        assert_eq!(scroller.current(), 160);
        scroller.set_bounds(100, 40);
        assert_eq!(scroller.current(), 60);
        scroller.scroll_by(-1000, &false);
        assert_eq!(scroller.current(), 0);
    }

    #[test]
    fn test_scroll_to_bottom_animates() {
        let mut scroller = scroller(true);
        let now = Instant::now();
        scroller.to_bottom(now, &false);
        assert!(scroller.needs_update());
        let mid = scroller.update(now + Duration::from_millis(50));
        assert!(mid > 0 && mid < 160, "mid {mid}");
        assert_eq!(scroller.update(now + Duration::from_millis(150)), 160);
    }
}

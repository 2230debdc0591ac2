//! Scroll-linked scene animation
//!
//! A scene is a block of a page that fades and slides in the first time it
//! comes into view, then drifts with a parallax offset that is a pure
//! function of scroll progress between two anchors.

use std::time::{Duration, Instant};

use crate::anim::timing::{lerp, progress};
use crate::anim::{EasingType, EasingTypeExt};
use crate::motion::MotionPreference;

/// Viewports narrower than this many columns use the compact variant
pub const COMPACT_MAX_WIDTH: u16 = 80;

const ENTRANCE_DURATION: Duration = Duration::from_millis(480);
const ENTRANCE_STAGGER: Duration = Duration::from_millis(90);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Breakpoint {
    Compact,
    Wide,
}

impl Breakpoint {
    pub fn from_width(width: u16) -> Self {
        if width < COMPACT_MAX_WIDTH {
            Breakpoint::Compact
        } else {
            Breakpoint::Wide
        }
    }
}

/// Scroll offsets at which progress is 0 and 1
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneAnchors {
    pub start: f64,
    pub end: f64,
}

impl SceneAnchors {
    /// Anchors for a block at `top` that is `height` rows tall
    ///
    /// Progress starts when the block's top reaches the bottom of the viewport
    /// and ends when its bottom leaves the top.
    pub fn for_block(top: f64, height: f64, viewport_height: f64) -> Self {
        Self {
            start: top - viewport_height,
            end: top + height,
        }
    }

    /// Progress in `[0, 1]` for the given scroll offset
    pub fn progress(&self, scroll_offset: f64) -> f64 {
        let span = self.end - self.start;
        if !span.is_finite() || span <= 0.0 {
            return if scroll_offset >= self.end { 1.0 } else { 0.0 };
        }
        let p = (scroll_offset - self.start) / span;
        if p.is_nan() {
            0.0
        } else {
            p.clamp(0.0, 1.0)
        }
    }
}

/// Parallax travel per breakpoint, in rows
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parallax {
    pub travel: f64,
    pub compact_travel: f64,
}

impl Default for Parallax {
    fn default() -> Self {
        Self {
            travel: 4.0,
            compact_travel: 1.5,
        }
    }
}

impl Parallax {
    /// Vertical offset for progress `p`: `+travel/2` at the start, `-travel/2`
    /// at the end, identity under reduced motion
    pub fn offset(&self, p: f64, breakpoint: Breakpoint, motion: &impl MotionPreference) -> f64 {
        if motion.prefers_reduced_motion() {
            return 0.0;
        }
        let travel = match breakpoint {
            Breakpoint::Compact => self.compact_travel,
            Breakpoint::Wide => self.travel,
        };
        lerp(travel / 2.0, -travel / 2.0, p.clamp(0.0, 1.0))
    }
}

/// One-shot staggered entrance
#[derive(Debug, Clone)]
pub struct Entrance {
    started: Option<Instant>,
    duration: Duration,
    stagger: Duration,
    easing: EasingType,
}

impl Default for Entrance {
    fn default() -> Self {
        Self::new(ENTRANCE_DURATION, ENTRANCE_STAGGER, EasingType::EaseOut)
    }
}

impl Entrance {
    pub fn new(duration: Duration, stagger: Duration, easing: EasingType) -> Self {
        Self {
            started: None,
            duration,
            stagger,
            easing,
        }
    }

    pub fn has_started(&self) -> bool {
        self.started.is_some()
    }

    /// Start the entrance; later calls are ignored
    ///
    /// Returns `true` only on the call that started it.
    pub fn trigger(&mut self, now: Instant) -> bool {
        if self.started.is_some() {
            return false;
        }
        self.started = Some(now);
        true
    }

    /// Reveal amount in `[0, 1]` of the `index`-th child
    pub fn reveal(&self, index: usize, now: Instant, motion: &impl MotionPreference) -> f64 {
        if motion.prefers_reduced_motion() {
            return 1.0;
        }
        let Some(started) = self.started else {
            return 0.0;
        };
        let delay = self.stagger.saturating_mul(index.min(u32::MAX as usize) as u32);
        let child_start = started + delay;
        if now < child_start {
            return 0.0;
        }
        self.easing.apply(progress(child_start, now, self.duration))
    }

    /// Rows the `index`-th child is still shifted down by
    pub fn slide(&self, index: usize, now: Instant, distance: u16, motion: &impl MotionPreference) -> u16 {
        let reveal = self.reveal(index, now, motion);
        lerp(f64::from(distance), 0.0, reveal).round().max(0.0) as u16
    }

    /// Whether all of `count` children are fully revealed
    pub fn is_settled(&self, count: usize, now: Instant, motion: &impl MotionPreference) -> bool {
        count == 0 || self.reveal(count - 1, now, motion) >= 1.0
    }
}

/// Computed state of a scene for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneFrame {
    pub progress: f64,
    pub parallax: f64,
    pub in_view: bool,
}

#[derive(Debug, Clone)]
pub struct Scene {
    anchors: SceneAnchors,
    parallax: Parallax,
    entrance: Entrance,
}

impl Scene {
    pub fn new(anchors: SceneAnchors) -> Self {
        Self {
            anchors,
            parallax: Parallax::default(),
            entrance: Entrance::default(),
        }
    }

    pub fn with_parallax(mut self, parallax: Parallax) -> Self {
        self.parallax = parallax;
        self
    }

    pub fn anchors(&self) -> SceneAnchors {
        self.anchors
    }

    /// Recompute anchors after a resize or layout change
    pub fn set_anchors(&mut self, anchors: SceneAnchors) {
        self.anchors = anchors;
    }

    pub fn entrance(&self) -> &Entrance {
        &self.entrance
    }

    /// Recompute progress and parallax for the current scroll offset,
    /// starting the entrance the first time the scene is in view
    pub fn update(
        &mut self,
        scroll_offset: f64,
        breakpoint: Breakpoint,
        now: Instant,
        motion: &impl MotionPreference,
    ) -> SceneFrame {
        let progress = self.anchors.progress(scroll_offset);
        let in_view = progress > 0.0 && progress < 1.0;
        if in_view || motion.prefers_reduced_motion() {
            self.entrance.trigger(now);
        }
        SceneFrame {
            progress,
            parallax: self.parallax.offset(progress, breakpoint, motion),
            in_view,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakpoints() {
        assert_eq!(Breakpoint::from_width(60), Breakpoint::Compact);
        assert_eq!(Breakpoint::from_width(80), Breakpoint::Wide);
    }

    #[test]
    fn test_progress_mapping() {
        let anchors = SceneAnchors::for_block(100.0, 20.0, 40.0);
        assert_eq!(anchors.start, 60.0);
        assert_eq!(anchors.end, 120.0);
        assert_eq!(anchors.progress(0.0), 0.0);
        assert!((anchors.progress(90.0) - 0.5).abs() < 1e-9);
        assert_eq!(anchors.progress(500.0), 1.0);
    }

    #[test]
    fn test_degenerate_anchors() {
        let anchors = SceneAnchors { start: 10.0, end: 10.0 };
        assert_eq!(anchors.progress(9.0), 0.0);
        assert_eq!(anchors.progress(10.0), 1.0);
    }

    #[test]
    fn test_parallax_is_pure_and_responsive() {
        let parallax = Parallax::default();
        assert_eq!(parallax.offset(0.0, Breakpoint::Wide, &false), 2.0);
        assert_eq!(parallax.offset(1.0, Breakpoint::Wide, &false), -2.0);
        assert_eq!(parallax.offset(0.5, Breakpoint::Wide, &false), 0.0);
        assert!(parallax.offset(0.0, Breakpoint::Compact, &false) < parallax.offset(0.0, Breakpoint::Wide, &false));
        assert_eq!(
            parallax.offset(0.3, Breakpoint::Wide, &false),
            parallax.offset(0.3, Breakpoint::Wide, &false)
        );
    }

    #[test]
    fn test_reduced_motion_identity() {
        let parallax = Parallax::default();
        assert_eq!(parallax.offset(0.0, Breakpoint::Wide, &true), 0.0);

        let entrance = Entrance::default();
        let now = Instant::now();
        assert_eq!(entrance.reveal(3, now, &true), 1.0);
        assert_eq!(entrance.slide(3, now, 4, &true), 0);
    }

    #[test]
    fn test_entrance_is_one_shot_and_staggered() {
        let mut entrance = Entrance::new(
            Duration::from_millis(100),
            Duration::from_millis(50),
            EasingType::Linear,
        );
        let t0 = Instant::now();
        assert_eq!(entrance.reveal(0, t0, &false), 0.0);
        assert!(entrance.trigger(t0));
        assert!(!entrance.trigger(t0 + Duration::from_secs(5)));

        let t = t0 + Duration::from_millis(50);
        assert!((entrance.reveal(0, t, &false) - 0.5).abs() < 1e-9);
        assert_eq!(entrance.reveal(1, t, &false), 0.0);

        assert!(!entrance.is_settled(3, t0 + Duration::from_millis(150), &false));
        assert!(entrance.is_settled(3, t0 + Duration::from_millis(200), &false));
    }

    #[test]
    fn test_scene_triggers_entrance_in_view() {
        let mut scene = Scene::new(SceneAnchors::for_block(100.0, 20.0, 40.0));
        let now = Instant::now();
        let frame = scene.update(0.0, Breakpoint::Wide, now, &false);
        assert!(!frame.in_view);
        assert!(!scene.entrance().has_started());

        let frame = scene.update(80.0, Breakpoint::Wide, now, &false);
        assert!(frame.in_view);
        assert!(scene.entrance().has_started());
    }

    #[test]
    fn test_scene_under_reduced_motion_completes_immediately() {
        let mut scene = Scene::new(SceneAnchors::for_block(100.0, 20.0, 40.0));
        let now = Instant::now();
        let frame = scene.update(0.0, Breakpoint::Wide, now, &true);
        assert_eq!(frame.parallax, 0.0);
        assert!(scene.entrance().is_settled(5, now, &true));
    }
}

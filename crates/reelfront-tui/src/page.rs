//! Per-page state that only lives while the page is mounted
//!
//! Leaving a page unmounts its rail (cancelling the resume timer) and drops
//! everything else here.

use std::time::Instant;

use ratatui::layout::Rect;
use reelfront_core::content::{MediaImage, Testimonial};
use reelfront_core::media::{AudioPlayer, ClipGallery, SilentBackend};
use reelfront_core::rail::{Direction, FrameOutcome, PauseMode};
use reelfront_core::scene::Scene;
use reelfront_core::typewriter::Typewriter;
use reelfront_core::{MotionPreference, Rail, Route};

use crate::scroll::PageScroller;

/// The one rail a page carries
#[derive(Debug)]
pub enum PageRail {
    Testimonials(Rail<Testimonial>),
    Gallery(Rail<MediaImage>),
}

macro_rules! with_rail {
    ($rail:expr, $r:ident => $body:expr) => {
        match $rail {
            PageRail::Testimonials($r) => $body,
            PageRail::Gallery($r) => $body,
        }
    };
}

impl PageRail {
    pub fn measure(&mut self, scroll_width: f64, visible_width: f64) {
        with_rail!(self, r => r.measure(scroll_width, visible_width))
    }

    pub fn frame(&mut self, now: Instant, motion: &impl MotionPreference) -> FrameOutcome {
        with_rail!(self, r => r.frame(now, motion))
    }

    pub fn move_rail(&mut self, direction: Direction, now: Instant, motion: &impl MotionPreference) -> bool {
        with_rail!(self, r => r.move_rail(direction, now, motion))
    }

    pub fn pointer_enter(&mut self, now: Instant) -> PauseMode {
        with_rail!(self, r => r.pointer_enter(now))
    }

    pub fn pointer_leave(&mut self, now: Instant) -> PauseMode {
        with_rail!(self, r => r.pointer_leave(now))
    }

    pub fn focus_in(&mut self, now: Instant) -> PauseMode {
        with_rail!(self, r => r.focus_in(now))
    }

    pub fn focus_out(&mut self, now: Instant) -> PauseMode {
        with_rail!(self, r => r.focus_out(now))
    }

    pub fn needs_frames(&self, motion: &impl MotionPreference) -> bool {
        with_rail!(self, r => r.needs_frames(motion))
    }

    pub fn position(&self) -> Option<f64> {
        with_rail!(self, r => r.position())
    }

    pub fn pause_mode(&self) -> PauseMode {
        with_rail!(self, r => r.pause_mode())
    }

    pub fn is_navigating(&self) -> bool {
        with_rail!(self, r => r.is_navigating())
    }

    pub fn unmount(&mut self) {
        with_rail!(self, r => r.unmount())
    }
}

/// Screen regions recorded during the last draw, used for pointer hit tests
#[derive(Debug, Clone, Default)]
pub struct PageLayout {
    pub nav: Vec<(Rect, Route)>,
    pub rail: Option<Rect>,
    pub rail_prev: Option<Rect>,
    pub rail_next: Option<Rect>,
    pub content_height: u16,
    pub viewport_height: u16,
}

#[derive(Debug)]
pub struct Page {
    pub route: Route,
    pub rail: Option<PageRail>,
    pub scenes: Vec<Scene>,
    /// Children per scene that enter one after another
    pub scene_children: Vec<usize>,
    pub scroller: PageScroller,
    pub typewriter: Option<Typewriter>,
    pub game: usize,
    pub clips: Option<ClipGallery<SilentBackend>>,
    pub player: Option<AudioPlayer<SilentBackend>>,
    pub channel: usize,
    pub hovering: bool,
    pub layout: PageLayout,
}

impl Page {
    pub fn new(route: Route, scroller: PageScroller) -> Self {
        Self {
            route,
            rail: None,
            scenes: Vec::new(),
            scene_children: Vec::new(),
            scroller,
            typewriter: None,
            game: 0,
            clips: None,
            player: None,
            channel: 0,
            hovering: false,
            layout: PageLayout::default(),
        }
    }

    /// Tear down everything that could still fire
    pub fn unmount(&mut self) {
        if let Some(rail) = self.rail.as_mut() {
            rail.unmount();
        }
        if let Some(player) = self.player.as_mut() {
            player.pause();
        }
        if let Some(clips) = self.clips.as_mut() {
            clips.stop();
        }
    }
}

impl Drop for Page {
    fn drop(&mut self) {
        self.unmount();
    }
}

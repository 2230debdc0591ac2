use std::sync::Arc;
use std::time::Instant;

use reelfront_core::content::{MediaImage, Testimonial};
use reelfront_core::media::{AudioPlayer, ClipGallery, SilentBackend};
use reelfront_core::typewriter::Typewriter;
use reelfront_core::{AppConfig, Direction, MotionGuard, MotionPreference, Rail, Route, SiteContent};
use tracing::{debug, info, warn};
use url::Url;

use crate::input::Action;
use crate::keymap::Keymap;
use crate::page::{Page, PageRail};
use crate::scroll::PageScroller;
use crate::theme::Theme;
use crate::themes::load_theme;

/// Seconds skipped by one seek keypress
const SEEK_STEP_SECS: f64 = 5.0;

/// Link schemes the contact page is allowed to hand to the desktop
const OPENABLE_SCHEMES: [&str; 3] = ["http", "https", "mailto"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Help,
}

/// Which part of the current page receives j/k
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Page,
    GameList,
    Rail,
    Clips,
    Player,
    Channels,
}

impl Focus {
    /// Focus ring for a route, in tab order
    pub fn ring(route: Route) -> &'static [Focus] {
        match route {
            Route::Home | Route::About => &[Focus::Page, Focus::Rail],
            Route::Contact => &[Focus::Page, Focus::Channels],
            Route::Games => &[
                Focus::Page,
                Focus::GameList,
                Focus::Rail,
                Focus::Clips,
                Focus::Player,
            ],
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Focus::Page => "page",
            Focus::GameList => "games",
            Focus::Rail => "rail",
            Focus::Clips => "clips",
            Focus::Player => "player",
            Focus::Channels => "channels",
        }
    }
}

/// Application state
pub struct App {
    pub config: Arc<AppConfig>,
    pub content: Arc<SiteContent>,
    pub theme: Theme,
    pub keymap: Keymap,
    pub motion: MotionGuard,
    pub mode: Mode,
    pub focus: Focus,
    /// The mounted page; replaced wholesale on navigation
    pub page: Page,
    /// Pending key for multi-key sequences (e.g. "gg")
    pub pending_key: Option<char>,
    pub status_message: Option<String>,
    pub should_quit: bool,
    /// Time of the last tick; rendering samples animations here
    pub now: Instant,
    pub pointer: Option<(u16, u16)>,
    // Rail sources are shared so remounting a page reuses the same lists
    testimonials: Arc<[Testimonial]>,
    gallery: Arc<[MediaImage]>,
    game_images: Vec<Arc<[MediaImage]>>,
}

impl App {
    pub fn new(
        config: Arc<AppConfig>,
        content: Arc<SiteContent>,
        motion: MotionGuard,
        now: Instant,
    ) -> Self {
        let testimonials: Arc<[Testimonial]> = content.testimonials.clone().into();
        let gallery: Arc<[MediaImage]> = content.gallery.clone().into();
        let game_images = content
            .games
            .iter()
            .map(|g| Arc::from(g.images.clone()))
            .collect();

        let mut app = Self {
            theme: load_theme(&config.ui.theme),
            keymap: Keymap::from_config(&config.keymap),
            page: Page::new(Route::Home, PageScroller::new(config.ui.scroll.clone())),
            config,
            content,
            motion,
            mode: Mode::Normal,
            focus: Focus::Page,
            pending_key: None,
            status_message: None,
            should_quit: false,
            now,
            pointer: None,
            testimonials,
            gallery,
            game_images,
        };
        app.page = app.mount(Route::Home, now);
        app
    }

    pub fn route(&self) -> Route {
        self.page.route
    }

    fn new_rail<T>(&self, items: &Arc<[T]>) -> Option<Rail<T>> {
        (!items.is_empty()).then(|| Rail::new(Arc::clone(items), &self.config.rail))
    }

    fn mount(&self, route: Route, now: Instant) -> Page {
        let mut page = Page::new(route, PageScroller::new(self.config.ui.scroll.clone()));
        match route {
            Route::Home => {
                page.typewriter = Some(Typewriter::new(
                    &self.content.studio.headline_phrases,
                    self.config.typewriter.clone(),
                    now,
                ));
                page.rail = self.new_rail(&self.testimonials).map(PageRail::Testimonials);
            }
            Route::About => {
                page.rail = self.new_rail(&self.gallery).map(PageRail::Gallery);
            }
            Route::Games => {
                self.mount_game(&mut page, 0);
            }
            Route::Contact => {}
        }
        page
    }

    /// Load a game's media into `page`
    ///
    /// A mounted gallery rail is kept and handed the new screenshots, so hover
    /// and focus pauses carry over. Returns `true` when a fresh rail was built.
    fn mount_game(&self, page: &mut Page, index: usize) -> bool {
        let images = self.game_images.get(index).filter(|images| !images.is_empty());
        let swapped = match (page.rail.as_mut(), images) {
            (Some(PageRail::Gallery(rail)), Some(images)) if rail.is_mounted() => {
                rail.set_items(images);
                true
            }
            _ => false,
        };

        if let Some(player) = page.player.as_mut() {
            player.pause();
        }
        if let Some(clips) = page.clips.as_mut() {
            clips.stop();
        }
        if !swapped {
            page.unmount();
            page.rail = images.and_then(|images| self.new_rail(images)).map(PageRail::Gallery);
            page.hovering = false;
        }
        page.game = index;
        match self.content.games.get(index) {
            Some(game) => {
                page.clips = Some(ClipGallery::new(game.clips.clone(), SilentBackend));
                page.player = Some(AudioPlayer::new(game.tracks.clone(), SilentBackend));
            }
            None => {
                page.clips = None;
                page.player = None;
            }
        }
        !swapped
    }

    /// Swap pages; the old page is unmounted before the new one starts
    pub fn navigate(&mut self, route: Route, now: Instant) {
        if route == self.page.route {
            return;
        }
        let next = self.mount(route, now);
        let mut previous = std::mem::replace(&mut self.page, next);
        previous.unmount();
        self.focus = Focus::Page;
        info!(route = %route, "navigated");
    }

    /// Select a game on the games page, remounting its media
    pub fn select_game(&mut self, index: usize, now: Instant) {
        if self.page.route != Route::Games
            || index >= self.content.games.len()
            || index == self.page.game
        {
            return;
        }
        let mut page = std::mem::replace(
            &mut self.page,
            Page::new(Route::Games, PageScroller::new(self.config.ui.scroll.clone())),
        );
        let fresh = self.mount_game(&mut page, index);
        self.page = page;
        if fresh && self.focus == Focus::Rail {
            if let Some(rail) = self.page.rail.as_mut() {
                rail.focus_in(now);
            }
        }
        debug!(game = index, "game selected");
    }

    pub fn set_focus(&mut self, focus: Focus, now: Instant) {
        if focus == self.focus {
            return;
        }
        if let Some(rail) = self.page.rail.as_mut() {
            if self.focus == Focus::Rail {
                rail.focus_out(now);
            }
            if focus == Focus::Rail {
                rail.focus_in(now);
            }
        }
        self.focus = focus;
    }

    fn cycle_focus(&mut self, step: isize, now: Instant) {
        let ring = Focus::ring(self.page.route);
        let current = ring.iter().position(|f| *f == self.focus).unwrap_or(0);
        let next = (current as isize + step).rem_euclid(ring.len() as isize) as usize;
        self.set_focus(ring[next], now);
    }

    /// Pointer moved; hovering the rail pauses it
    pub fn pointer_moved(&mut self, column: u16, row: u16, now: Instant) {
        self.pointer = Some((column, row));
        let over_rail = self
            .page
            .layout
            .rail
            .is_some_and(|r| r.contains((column, row).into()));
        self.set_hover(over_rail, now);
    }

    pub fn pointer_left(&mut self, now: Instant) {
        self.pointer = None;
        self.set_hover(false, now);
    }

    fn set_hover(&mut self, hovering: bool, now: Instant) {
        if hovering == self.page.hovering {
            return;
        }
        self.page.hovering = hovering;
        if let Some(rail) = self.page.rail.as_mut() {
            if hovering {
                rail.pointer_enter(now);
            } else {
                rail.pointer_leave(now);
            }
        }
    }

    /// Click on the nav bar or a rail control
    pub fn click(&mut self, column: u16, row: u16, now: Instant) {
        let position = (column, row).into();
        let layout = &self.page.layout;
        let route = layout
            .nav
            .iter()
            .find(|(r, _)| r.contains(position))
            .map(|(_, route)| *route);
        let direction = if layout.rail_prev.is_some_and(|r| r.contains(position)) {
            Some(Direction::Backward)
        } else if layout.rail_next.is_some_and(|r| r.contains(position)) {
            Some(Direction::Forward)
        } else {
            None
        };

        if let Some(route) = route {
            self.navigate(route, now);
        } else if let Some(direction) = direction {
            self.move_rail(direction, now);
        }
    }

    pub fn wheel(&mut self, lines: i32) {
        let delta = lines * self.page.scroller.scroll_lines();
        self.page.scroller.scroll_by(delta, &self.motion);
    }

    fn move_rail(&mut self, direction: Direction, now: Instant) {
        match self.page.rail.as_mut() {
            Some(rail) => {
                rail.move_rail(direction, now, &self.motion);
            }
            None => self.set_status("Nothing to scroll here"),
        }
    }

    /// Advance every running animation to `now`
    pub fn tick(&mut self, now: Instant) {
        self.now = now;
        if let Some(rail) = self.page.rail.as_mut() {
            rail.frame(now, &self.motion);
        }
        if let Some(typewriter) = self.page.typewriter.as_mut() {
            typewriter.update(now, &self.motion);
        }
        if let Some(player) = self.page.player.as_mut() {
            player.update(now);
        }
        self.page.scroller.update(now);
    }

    /// Whether the event loop should run at animation frame rate
    pub fn needs_animation(&self) -> bool {
        let page = &self.page;
        page.rail.as_ref().is_some_and(|r| r.needs_frames(&self.motion))
            || page.typewriter.as_ref().is_some_and(|t| t.is_animating(&self.motion))
            || page.player.as_ref().is_some_and(|p| p.is_playing())
            || page.scroller.needs_update()
            || page.scenes.iter().zip(&page.scene_children).any(|(scene, children)| {
                let entrance = scene.entrance();
                entrance.has_started() && !entrance.is_settled(*children, self.now, &self.motion)
            })
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn reduced_motion(&self) -> bool {
        self.motion.prefers_reduced_motion()
    }

    /// Apply an input action
    pub fn apply(&mut self, action: Action, now: Instant) {
        if action != Action::PendingG {
            self.pending_key = None;
        }
        if !matches!(action, Action::None | Action::PendingG) {
            self.clear_status();
        }

        match action {
            Action::Quit => self.should_quit = true,
            Action::NextPage => self.navigate(self.page.route.next(), now),
            Action::PrevPage => self.navigate(self.page.route.prev(), now),
            Action::GoTo(route) => self.navigate(route, now),
            Action::ScrollDown => self.step(1, now),
            Action::ScrollUp => self.step(-1, now),
            Action::ScrollHalfPageDown | Action::ScrollHalfPageUp => {
                let half = PageScroller::half_page(self.page.layout.viewport_height);
                let delta = if action == Action::ScrollHalfPageDown { half } else { -half };
                self.page.scroller.scroll_by(delta, &self.motion);
            }
            Action::JumpToTop => self.page.scroller.to_top(now, &self.motion),
            Action::JumpToBottom => self.page.scroller.to_bottom(now, &self.motion),
            Action::PendingG => self.pending_key = Some('g'),
            Action::FocusNext => self.cycle_focus(1, now),
            Action::FocusPrev => self.cycle_focus(-1, now),
            Action::RailForward => self.move_rail(Direction::Forward, now),
            Action::RailBackward => self.move_rail(Direction::Backward, now),
            Action::TogglePlay => self.toggle_play(now),
            Action::SeekForward => self.seek(SEEK_STEP_SECS),
            Action::SeekBackward => self.seek(-SEEK_STEP_SECS),
            Action::NextTrack => {
                if let Some(player) = self.page.player.as_mut() {
                    player.next_track(now);
                }
            }
            Action::PrevTrack => {
                if let Some(player) = self.page.player.as_mut() {
                    player.prev_track(now);
                }
            }
            Action::ToggleReducedMotion => {
                let reduce = self.motion.toggle();
                self.set_status(if reduce {
                    "Reduced motion on"
                } else {
                    "Reduced motion off"
                });
            }
            Action::OpenLink => self.open_selected_link(),
            Action::Help => self.mode = Mode::Help,
            Action::ExitMode => self.mode = Mode::Normal,
            Action::None => {}
        }
    }

    /// j/k: move within whatever has focus
    fn step(&mut self, delta: i32, now: Instant) {
        let forward = delta > 0;
        match self.focus {
            Focus::Page => {
                let lines = self.page.scroller.scroll_lines();
                self.page.scroller.scroll_by(delta * lines, &self.motion);
            }
            Focus::Rail => self.move_rail(
                if forward { Direction::Forward } else { Direction::Backward },
                now,
            ),
            Focus::GameList => {
                let count = self.content.games.len();
                if count > 0 {
                    let index = (self.page.game as i32 + delta).rem_euclid(count as i32) as usize;
                    self.select_game(index, now);
                }
            }
            Focus::Clips => {
                if let Some(clips) = self.page.clips.as_mut() {
                    if forward {
                        clips.next();
                    } else {
                        clips.prev();
                    }
                }
            }
            Focus::Player => {
                if let Some(player) = self.page.player.as_mut() {
                    if forward {
                        player.next_track(now);
                    } else {
                        player.prev_track(now);
                    }
                }
            }
            Focus::Channels => {
                let count = self.content.contact.len();
                if count > 0 {
                    let max = count as i32 - 1;
                    self.page.channel = (self.page.channel as i32 + delta).clamp(0, max) as usize;
                }
            }
        }
    }

    fn toggle_play(&mut self, now: Instant) {
        if self.focus == Focus::Clips {
            if let Some(clips) = self.page.clips.as_mut() {
                let playing = clips.toggle_play();
                if let Some(clip) = clips.current() {
                    let verb = if playing { "Playing" } else { "Stopped" };
                    let message = format!("{verb}: {}", clip.title);
                    self.set_status(message);
                }
            }
            return;
        }
        match self.page.player.as_mut() {
            Some(player) => {
                player.toggle_play(now);
            }
            None => self.set_status("No soundtrack on this page"),
        }
    }

    fn seek(&mut self, secs: f64) {
        if let Some(player) = self.page.player.as_mut() {
            player.seek_by(secs);
        }
    }

    fn open_selected_link(&mut self) {
        if self.page.route != Route::Contact {
            return;
        }
        let Some(channel) = self.content.contact.get(self.page.channel) else {
            return;
        };
        let Some(link) = channel.link.clone() else {
            let message = format!("{} has no link", channel.label);
            self.set_status(message);
            return;
        };
        match openable_url(&link) {
            Ok(url) => match open::that_detached(url.as_str()) {
                Ok(()) => self.set_status(format!("Opened {url}")),
                Err(e) => {
                    warn!(link = %url, error = %e, "failed to open link");
                    self.set_status(format!("Could not open link: {e}"));
                }
            },
            Err(message) => self.set_status(message),
        }
    }
}

/// Parse a contact link and refuse anything that is not web or mail
fn openable_url(link: &str) -> Result<Url, String> {
    let url = Url::parse(link).map_err(|e| format!("Invalid link: {e}"))?;
    if OPENABLE_SCHEMES.contains(&url.scheme()) {
        Ok(url)
    } else {
        Err(format!("Refusing to open {} link", url.scheme()))
    }
}

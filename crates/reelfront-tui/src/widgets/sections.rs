//! Vertically stacked page sections with scroll-linked scenes
//!
//! Every section owns one scene. Its anchors follow the section's place in
//! the page, the entrance slides it up into place the first time it shows,
//! and the hero drifts with the parallax offset.

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use reelfront_core::scene::{Breakpoint, Scene, SceneAnchors};

use crate::app::App;
use crate::widgets::rail::{CONTROL_WIDTH, HEADER_ROWS};

/// Rows between two sections
const SECTION_GAP: u16 = 1;
/// Rows an entering section travels
const ENTRANCE_SLIDE: u16 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Text,
    /// Moves with the parallax offset
    Hero,
    /// Lines enter one after another
    Staggered,
    /// The page rail; its area takes hover and clicks
    Rail,
}

#[derive(Debug, Clone)]
pub struct Section {
    pub kind: SectionKind,
    pub lines: Vec<Line<'static>>,
}

impl Section {
    pub fn new(kind: SectionKind, lines: Vec<Line<'static>>) -> Self {
        Self { kind, lines }
    }

    pub fn text(lines: Vec<Line<'static>>) -> Self {
        Self::new(SectionKind::Text, lines)
    }

    fn height(&self) -> u16 {
        u16::try_from(self.lines.len()).unwrap_or(u16::MAX)
    }
}

/// Lay out, animate and draw `sections` inside `area`
pub fn render(frame: &mut Frame, area: Rect, app: &mut App, sections: Vec<Section>) {
    let sections: Vec<Section> = sections.into_iter().filter(|s| !s.lines.is_empty()).collect();
    let viewport = area.height;

    let mut tops = Vec::with_capacity(sections.len());
    let mut content_height: u16 = 0;
    for section in &sections {
        tops.push(content_height);
        content_height = content_height
            .saturating_add(section.height())
            .saturating_add(SECTION_GAP);
    }
    content_height = content_height.saturating_sub(SECTION_GAP);

    let now = app.now;
    let page = &mut app.page;
    page.layout.content_height = content_height;
    page.layout.viewport_height = viewport;
    page.layout.rail = None;
    page.layout.rail_prev = None;
    page.layout.rail_next = None;
    page.scroller.set_bounds(content_height, viewport);
    let scroll = page.scroller.current();

    let anchors: Vec<SceneAnchors> = sections
        .iter()
        .zip(&tops)
        .map(|(s, top)| SceneAnchors::for_block(f64::from(*top), f64::from(s.height()), f64::from(viewport)))
        .collect();
    page.scene_children = sections
        .iter()
        .map(|s| match s.kind {
            SectionKind::Staggered => s.lines.len(),
            _ => 1,
        })
        .collect();
    if page.scenes.len() != anchors.len() {
        page.scenes = anchors.iter().copied().map(Scene::new).collect();
    } else {
        for (scene, a) in page.scenes.iter_mut().zip(&anchors) {
            scene.set_anchors(*a);
        }
    }

    let breakpoint = Breakpoint::from_width(area.width);
    let motion = &app.motion;
    for ((section, top), scene) in sections.into_iter().zip(tops).zip(page.scenes.iter_mut()) {
        let state = scene.update(f64::from(scroll), breakpoint, now, motion);
        let entrance = scene.entrance();

        let mut y = i32::from(top) - i32::from(scroll)
            + i32::from(entrance.slide(0, now, ENTRANCE_SLIDE, motion));
        if section.kind == SectionKind::Hero {
            y += state.parallax.round() as i32;
        }

        let height = i32::from(section.height());
        let clip_top = (-y).max(0);
        let visible = (height - clip_top).min(i32::from(viewport) - y.max(0));
        if visible <= 0 {
            continue;
        }
        let target = Rect::new(
            area.x,
            area.y + y.max(0) as u16,
            area.width,
            visible as u16,
        );

        let dim = Style::default().add_modifier(Modifier::DIM);
        let lines: Vec<Line<'static>> = section
            .lines
            .into_iter()
            .enumerate()
            .map(|(i, line)| {
                let index = if section.kind == SectionKind::Staggered { i } else { 0 };
                let reveal = entrance.reveal(index, now, motion);
                if section.kind == SectionKind::Staggered && reveal <= 0.0 {
                    Line::from("")
                } else if reveal < 1.0 {
                    line.patch_style(dim)
                } else {
                    line
                }
            })
            .collect();

        if section.kind == SectionKind::Rail {
            page.layout.rail = Some(target);
            if clip_top == 0 && target.width >= CONTROL_WIDTH * 2 {
                page.layout.rail_prev = Some(Rect::new(target.x, target.y, CONTROL_WIDTH, HEADER_ROWS));
                page.layout.rail_next = Some(Rect::new(
                    target.right() - CONTROL_WIDTH,
                    target.y,
                    CONTROL_WIDTH,
                    HEADER_ROWS,
                ));
            }
        }

        let paragraph = Paragraph::new(lines).scroll((clip_top as u16, 0));
        frame.render_widget(paragraph, target);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use reelfront_core::{AppConfig, MotionGuard, MotionSetting, Route, SiteContent};

    use super::*;

    fn app(setting: MotionSetting) -> App {
        let mut app = App::new(
            Arc::new(AppConfig::default()),
            Arc::new(SiteContent::builtin().unwrap()),
            MotionGuard::new(setting),
            Instant::now(),
        );
        app.navigate(Route::Contact, app.now);
        app
    }

    fn numbered(count: usize) -> Vec<Line<'static>> {
        (0..count).map(|i| Line::from(format!("line {i}"))).collect()
    }

    fn draw(app: &mut App, sections: Vec<Section>) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(20, 10)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render(frame, area, app, sections);
            })
            .unwrap();
        let buffer = terminal.backend().buffer().clone();
        (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer[(x, y)].symbol().to_string())
                    .collect::<String>()
                    .trim_end()
                    .to_string()
            })
            .collect()
    }

    #[test]
    fn test_stacks_sections_with_gap() {
        let mut app = app(MotionSetting::Reduce);
        let rows = draw(
            &mut app,
            vec![Section::text(numbered(2)), Section::text(numbered(3))],
        );
        assert_eq!(rows[0], "line 0");
        assert_eq!(rows[2], "");
        assert_eq!(rows[3], "line 0");
        assert_eq!(app.page.layout.content_height, 6);
        assert_eq!(app.page.scenes.len(), 2);
    }

    #[test]
    fn test_scroll_clips_sections() {
        let mut app = app(MotionSetting::Reduce);
        draw(&mut app, vec![Section::text(numbered(30))]);
        assert_eq!(app.page.scroller.max_scroll(), 20);
        app.page.scroller.set(5);
        let rows = draw(&mut app, vec![Section::text(numbered(30))]);
        assert_eq!(rows[0], "line 5");
    }

    #[test]
    fn test_entrance_slides_in() {
        let mut app = app(MotionSetting::NoPreference);
        let rows = draw(&mut app, vec![Section::text(numbered(3))]);
        // Just triggered: still offset by the full slide
        assert_eq!(rows[ENTRANCE_SLIDE as usize], "line 0");
        assert!(app.page.scenes[0].entrance().has_started());

        app.now += Duration::from_secs(2);
        let rows = draw(&mut app, vec![Section::text(numbered(3))]);
        assert_eq!(rows[0], "line 0");
    }

    #[test]
    fn test_staggered_lines_hidden_before_entrance() {
        let mut app = app(MotionSetting::NoPreference);
        let rows = draw(
            &mut app,
            vec![Section::new(SectionKind::Staggered, numbered(3))],
        );
        assert!(rows.iter().all(|r| r.is_empty()));

        app.now += Duration::from_secs(2);
        let rows = draw(
            &mut app,
            vec![Section::new(SectionKind::Staggered, numbered(3))],
        );
        assert_eq!(rows[2], "line 2");
    }

    #[test]
    fn test_rail_section_records_controls() {
        let mut app = app(MotionSetting::Reduce);
        draw(
            &mut app,
            vec![Section::text(numbered(2)), Section::new(SectionKind::Rail, numbered(4))],
        );
        assert_eq!(app.page.layout.rail, Some(Rect::new(0, 3, 20, 4)));
        assert_eq!(app.page.layout.rail_prev, Some(Rect::new(0, 3, 3, 1)));
        assert_eq!(app.page.layout.rail_next, Some(Rect::new(17, 3, 3, 1)));
    }
}

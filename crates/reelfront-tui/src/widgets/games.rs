use std::sync::Arc;

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::Frame;

use crate::app::{App, Focus};
use crate::theme::Theme;
use crate::widgets::sections::{self, Section, SectionKind};
use crate::widgets::text::wrap;
use crate::widgets::{player, rail};

pub struct GamesPage;

impl GamesPage {
    pub fn render(frame: &mut Frame, area: Rect, app: &mut App) {
        let theme = app.theme.clone();
        let content = Arc::clone(&app.content);
        let text_width = usize::from(area.width.saturating_sub(4)).min(76);

        if content.games.is_empty() {
            let empty = vec![
                Line::from(""),
                Line::from(Span::styled(
                    "  Nothing announced yet.",
                    Style::default().fg(theme.muted),
                )),
            ];
            sections::render(frame, area, app, vec![Section::text(empty)]);
            return;
        }

        let list_focused = app.focus == Focus::GameList;
        let mut list = vec![Line::from(Span::styled(
            "  Our games",
            heading_style(&theme, list_focused),
        ))];
        list.extend(content.games.iter().enumerate().map(|(i, game)| {
            let selected = i == app.page.game;
            let style = if selected {
                Style::default().fg(theme.highlight).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.fg1)
            };
            Line::from(vec![
                Span::styled(
                    if selected { "  ▸ " } else { "    " },
                    Style::default().fg(theme.accent),
                ),
                Span::styled(game.title.clone(), style),
                Span::styled(format!("  {}", game.tagline), Style::default().fg(theme.muted)),
            ])
        }));

        let mut detail = Vec::new();
        if let Some(game) = content.games.get(app.page.game) {
            detail.push(Line::from(Span::styled(
                format!("  {}", game.title),
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
            )));
            detail.extend(
                wrap(&game.summary, text_width)
                    .into_iter()
                    .map(|l| Line::from(Span::styled(format!("  {l}"), Style::default().fg(theme.fg0)))),
            );
        }

        let clips = Self::clip_lines(app, &theme);
        let soundtrack = app
            .page
            .player
            .as_ref()
            .map(|p| player::lines(p, app.focus == Focus::Player, area.width, &theme))
            .unwrap_or_default();
        let reel = rail::lines(app, "Screenshots", area.width);

        sections::render(
            frame,
            area,
            app,
            vec![
                Section::new(SectionKind::Staggered, list),
                Section::text(detail),
                Section::new(SectionKind::Rail, reel),
                Section::text(clips),
                Section::text(soundtrack),
            ],
        );
    }

    fn clip_lines(app: &App, theme: &Theme) -> Vec<Line<'static>> {
        let Some(gallery) = app.page.clips.as_ref() else {
            return Vec::new();
        };
        if gallery.clips().is_empty() {
            return Vec::new();
        }
        let focused = app.focus == Focus::Clips;
        let mut out = vec![Line::from(Span::styled("  Clips", heading_style(theme, focused)))];
        out.extend(gallery.clips().iter().enumerate().map(|(i, clip)| {
            let selected = i == gallery.selected();
            let marker = match (selected, gallery.is_playing()) {
                (true, true) => "  ■ ",
                (true, false) => "  ▶ ",
                _ => "    ",
            };
            let style = if selected {
                Style::default().fg(theme.highlight)
            } else {
                Style::default().fg(theme.fg0)
            };
            Line::from(vec![
                Span::styled(marker, Style::default().fg(theme.accent)),
                Span::styled(clip.title.clone(), style),
            ])
        }));
        out
    }
}

fn heading_style(theme: &Theme, focused: bool) -> Style {
    let color = if focused { theme.accent } else { theme.fg1 };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

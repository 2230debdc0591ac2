use std::sync::Arc;

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::Frame;

use crate::app::App;
use crate::widgets::rail;
use crate::widgets::sections::{self, Section, SectionKind};

pub struct HomePage;

impl HomePage {
    pub fn render(frame: &mut Frame, area: Rect, app: &mut App) {
        let theme = app.theme.clone();
        let content = Arc::clone(&app.content);
        let studio = &content.studio;

        let (headline, caret) = match app.page.typewriter.as_ref() {
            Some(t) => (t.text(&app.motion).to_string(), t.caret_visible(app.now, &app.motion)),
            None => (String::new(), false),
        };

        let hero = vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("  {}", studio.name.to_uppercase()),
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("  {}", studio.tagline),
                Style::default().fg(theme.fg1),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("  > ", Style::default().fg(theme.muted)),
                Span::styled(headline, Style::default().fg(theme.highlight)),
                Span::styled(
                    if caret { "▌" } else { " " },
                    Style::default().fg(theme.highlight),
                ),
            ]),
        ];

        let stats = content
            .stats
            .iter()
            .map(|stat| {
                Line::from(vec![
                    Span::styled(
                        format!("  {:>10}  ", stat.value),
                        Style::default().fg(theme.accent_alt).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(stat.label.clone(), Style::default().fg(theme.fg1)),
                ])
            })
            .collect();

        let reel = rail::lines(app, "What players say", area.width);

        let cta = vec![Line::from(vec![
            Span::styled("  See the games ", Style::default().fg(theme.fg0)),
            Span::styled("[4]", Style::default().fg(theme.accent)),
            Span::styled("   Say hello ", Style::default().fg(theme.fg0)),
            Span::styled("[3]", Style::default().fg(theme.accent)),
        ])];

        sections::render(
            frame,
            area,
            app,
            vec![
                Section::new(SectionKind::Hero, hero),
                Section::new(SectionKind::Staggered, stats),
                Section::new(SectionKind::Rail, reel),
                Section::text(cta),
            ],
        );
    }
}

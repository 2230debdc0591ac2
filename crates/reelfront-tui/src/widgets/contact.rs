use std::sync::Arc;

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::Frame;

use crate::app::{App, Focus};
use crate::widgets::sections::{self, Section, SectionKind};

pub struct ContactPage;

impl ContactPage {
    pub fn render(frame: &mut Frame, area: Rect, app: &mut App) {
        let theme = app.theme.clone();
        let content = Arc::clone(&app.content);
        let focused = app.focus == Focus::Channels;

        let heading = vec![
            Line::from(""),
            Line::from(Span::styled(
                "  Get in touch",
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "  Press and partnerships, or just saying hi.",
                Style::default().fg(theme.fg1),
            )),
        ];

        let label_width = content
            .contact
            .iter()
            .map(|c| c.label.chars().count())
            .max()
            .unwrap_or(0);
        let channels = content
            .contact
            .iter()
            .enumerate()
            .map(|(i, channel)| {
                let selected = i == app.page.channel;
                let marker = if selected && focused { "▸ " } else { "  " };
                let label_style = if selected {
                    Style::default().fg(theme.highlight).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(theme.fg1)
                };
                let mut spans = vec![
                    Span::styled(format!("  {marker}"), Style::default().fg(theme.accent)),
                    Span::styled(format!("{:<label_width$}  ", channel.label), label_style),
                    Span::styled(channel.value.clone(), Style::default().fg(theme.fg0)),
                ];
                if channel.link.is_some() {
                    spans.push(Span::styled(" ↗", Style::default().fg(theme.muted)));
                }
                Line::from(spans)
            })
            .collect();

        let hint = vec![Line::from(Span::styled(
            "  Tab to the list, j/k to choose, Enter to open",
            Style::default().fg(theme.muted),
        ))];

        sections::render(
            frame,
            area,
            app,
            vec![
                Section::text(heading),
                Section::new(SectionKind::Staggered, channels),
                Section::text(hint),
            ],
        );
    }
}

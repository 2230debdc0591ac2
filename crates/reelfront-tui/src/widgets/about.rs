use std::sync::Arc;

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::Frame;

use crate::app::App;
use crate::widgets::rail;
use crate::widgets::sections::{self, Section, SectionKind};
use crate::widgets::text::wrap;

pub struct AboutPage;

impl AboutPage {
    pub fn render(frame: &mut Frame, area: Rect, app: &mut App) {
        let theme = app.theme.clone();
        let content = Arc::clone(&app.content);
        let text_width = usize::from(area.width.saturating_sub(4)).min(76);

        let mut blocks = vec![Section::text(vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("  About {}", content.studio.name),
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
            )),
        ])];

        // One scene per paragraph so they enter as they scroll in
        blocks.extend(content.studio.about.iter().map(|paragraph| {
            Section::text(
                wrap(paragraph, text_width)
                    .into_iter()
                    .map(|l| Line::from(Span::styled(format!("  {l}"), Style::default().fg(theme.fg0))))
                    .collect(),
            )
        }));

        blocks.push(Section::new(
            SectionKind::Rail,
            rail::lines(app, "Studio stills", area.width),
        ));

        sections::render(frame, area, app, blocks);
    }
}

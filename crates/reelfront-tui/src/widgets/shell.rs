use chrono::Datelike;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::App;
use crate::widgets::text::width;

/// Top navigation bar
pub struct NavBar;

impl NavBar {
    /// Draws the bar and records each entry's rect for clicks
    pub fn render(frame: &mut Frame, area: Rect, app: &mut App) {
        let theme = &app.theme;
        let current = app.page.route;
        let bar = Style::default().bg(theme.bg1);

        let brand = format!(" {} ", app.content.studio.name);
        let mut x = area.x + width(&brand) as u16;
        let mut spans = vec![Span::styled(
            brand,
            bar.fg(theme.accent).add_modifier(Modifier::BOLD),
        )];
        let mut rects = Vec::with_capacity(app.content.nav.len());

        for (i, item) in app.content.nav.iter().enumerate() {
            let label = format!(" {} {} ", i + 1, item.label);
            let cols = width(&label) as u16;
            if x + cols > area.right() {
                break;
            }
            let style = if item.route == current {
                bar.fg(theme.bg0).bg(theme.accent).add_modifier(Modifier::BOLD)
            } else {
                bar.fg(theme.fg1)
            };
            rects.push((Rect::new(x, area.y, cols, 1), item.route));
            spans.push(Span::styled(label, style));
            x += cols;
        }

        frame.render_widget(Paragraph::new(Line::from(spans)).style(bar), area);
        app.page.layout.nav = rects;
    }
}

/// Footer with the copyright line
pub struct Footer;

impl Footer {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let year = chrono::Local::now().year();
        let text = format!(" © {year} {}", app.content.studio.footer);
        let line = Line::from(Span::styled(text, Style::default().fg(app.theme.muted)));
        frame.render_widget(Paragraph::new(line), area);
    }
}

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::App;
use crate::input::Action;
use crate::widgets::text::centered_rect;

/// Actions listed in the help popup, in display order
const HELP_ENTRIES: [(Action, &str); 17] = [
    (Action::ScrollDown, "Scroll down / next item"),
    (Action::ScrollUp, "Scroll up / previous item"),
    (Action::ScrollHalfPageDown, "Half page down"),
    (Action::ScrollHalfPageUp, "Half page up"),
    (Action::JumpToTop, "Top of page"),
    (Action::JumpToBottom, "Bottom of page"),
    (Action::NextPage, "Next page"),
    (Action::PrevPage, "Previous page"),
    (Action::FocusNext, "Focus next section"),
    (Action::RailForward, "Rail forward"),
    (Action::RailBackward, "Rail back"),
    (Action::TogglePlay, "Play / pause"),
    (Action::SeekForward, "Seek +5s"),
    (Action::NextTrack, "Next track"),
    (Action::OpenLink, "Open contact link"),
    (Action::ToggleReducedMotion, "Toggle reduced motion"),
    (Action::Quit, "Quit"),
];

pub struct HelpPopup;

impl HelpPopup {
    pub fn render(frame: &mut Frame, app: &App) {
        let theme = &app.theme;
        let height = HELP_ENTRIES.len() as u16 + 4;
        let area = centered_rect(48, height, frame.area());

        let mut lines: Vec<Line> = HELP_ENTRIES
            .iter()
            .filter_map(|(action, label)| {
                let key = app.keymap.describe(*action)?;
                Some(Line::from(vec![
                    Span::styled(format!(" {key:>8}  "), Style::default().fg(theme.accent)),
                    Span::styled(*label, Style::default().fg(theme.fg0)),
                ]))
            })
            .collect();
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "    1-4 jump to a page, any key closes",
            Style::default().fg(theme.muted),
        )));

        let block = Block::default()
            .title(" Keys ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent))
            .style(Style::default().bg(theme.bg1))
            .title_style(Style::default().add_modifier(Modifier::BOLD));

        frame.render_widget(Clear, area);
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

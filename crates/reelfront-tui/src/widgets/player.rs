use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use reelfront_core::media::{AudioPlayer, PlaybackBackend};

use crate::theme::Theme;
use crate::widgets::text::truncate;

/// `mm:ss`
pub fn format_time(secs: f64) -> String {
    let total = if secs.is_finite() { secs.max(0.0) as u64 } else { 0 };
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Progress bar `cols` wide for `fraction` in `[0, 1]`
pub fn progress_bar(fraction: f64, cols: usize) -> (String, String) {
    let fraction = if fraction.is_finite() { fraction.clamp(0.0, 1.0) } else { 0.0 };
    let filled = (fraction * cols as f64).round() as usize;
    ("━".repeat(filled), "─".repeat(cols - filled))
}

/// Soundtrack block: track list, progress bar and times
pub fn lines<B: PlaybackBackend>(
    player: &AudioPlayer<B>,
    focused: bool,
    width: u16,
    theme: &Theme,
) -> Vec<Line<'static>> {
    let title_style = if focused {
        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.fg1).add_modifier(Modifier::BOLD)
    };
    let mut out = vec![Line::from(Span::styled("  Soundtrack", title_style))];

    if player.tracks().is_empty() {
        out.push(Line::from(Span::styled(
            "  No tracks yet",
            Style::default().fg(theme.muted),
        )));
        return out;
    }

    let cols = usize::from(width.saturating_sub(6));
    for (i, track) in player.tracks().iter().enumerate() {
        let selected = i == player.selected();
        let marker = match (selected, player.is_playing()) {
            (true, true) => "♪ ",
            (true, false) => "▸ ",
            _ => "  ",
        };
        let style = if selected {
            Style::default().fg(theme.highlight)
        } else {
            Style::default().fg(theme.fg0)
        };
        out.push(Line::from(vec![
            Span::styled(format!("  {marker}"), Style::default().fg(theme.accent)),
            Span::styled(truncate(&track.title, cols.saturating_sub(8)), style),
            Span::styled(
                format!("  {}", format_time(track.duration_secs)),
                Style::default().fg(theme.muted),
            ),
        ]));
    }

    let times = format!(
        " {} / {}",
        format_time(player.position()),
        format_time(player.duration())
    );
    let icon = if player.is_playing() { "⏸ " } else { "▶ " };
    let bar_cols = cols.saturating_sub(times.chars().count() + 2);
    let (done, rest) = progress_bar(player.progress(), bar_cols);
    out.push(Line::from(vec![
        Span::styled(format!("  {icon}"), Style::default().fg(theme.highlight)),
        Span::styled(done, Style::default().fg(theme.accent)),
        Span::styled(rest, Style::default().fg(theme.bg2)),
        Span::styled(times, Style::default().fg(theme.fg1)),
    ]));
    out
}

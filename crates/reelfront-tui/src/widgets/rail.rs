//! Rail rendering
//!
//! The rail is laid out once per frame as a strip of columns over the doubled
//! item sequence, then the visible window is cut out at the rail's position.
//! Testimonials use a two-row masonry: long quotes take a full column, short
//! ones stack in pairs. Images always take a full column.

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use reelfront_core::content::{MediaImage, QuoteLength, Testimonial};
use reelfront_core::rail::{LoopedSequence, PauseMode};

use crate::app::{App, Focus};
use crate::page::PageRail;
use crate::theme::Theme;
use crate::widgets::text::{pad, slice_spans, truncate, wrap};

const CARD_GAP: usize = 2;
const QUOTE_WIDTH: usize = 34;
const IMAGE_WIDTH: usize = 30;
/// Height of one masonry row
const ROW_HEIGHT: usize = 6;
/// Rows drawn below the header line
pub const STRIP_ROWS: usize = ROW_HEIGHT * 2 + 1;
/// Header line with the controls and state
pub const HEADER_ROWS: u16 = 1;
/// Width of each `[‹]` / `[›]` control
pub const CONTROL_WIDTH: u16 = 3;

type Cell = Vec<Span<'static>>;

struct Column {
    width: usize,
    rows: Vec<Cell>,
}

/// Horizontal strip of laid-out cards
struct Strip {
    rows: Vec<Cell>,
    width: usize,
}

impl Strip {
    fn from_columns(columns: Vec<Column>) -> Self {
        let mut rows: Vec<Cell> = vec![Vec::new(); STRIP_ROWS];
        let mut width = 0;
        for column in columns {
            for (row, cell) in rows.iter_mut().zip(column.rows) {
                row.extend(cell);
                row.push(Span::raw(" ".repeat(CARD_GAP)));
            }
            width += column.width + CARD_GAP;
        }
        Self { rows, width }
    }
}

/// A bordered card `width` x `height`, body lines clipped to fit
fn card(width: usize, height: usize, body: Vec<Span<'static>>, border: Style) -> Vec<Cell> {
    let inner = width.saturating_sub(4);
    let room = height.saturating_sub(2);
    let mut rows = Vec::with_capacity(height);
    rows.push(vec![Span::styled(
        format!("╭{}╮", "─".repeat(width.saturating_sub(2))),
        border,
    )]);
    let mut body = body.into_iter();
    for _ in 0..room {
        let span = body.next().unwrap_or_else(|| Span::raw(""));
        rows.push(vec![
            Span::styled("│ ", border),
            Span::styled(pad(&span.content, inner), span.style),
            Span::styled(" │", border),
        ]);
    }
    rows.push(vec![Span::styled(
        format!("╰{}╯", "─".repeat(width.saturating_sub(2))),
        border,
    )]);
    rows
}

fn blank(width: usize, height: usize) -> Vec<Cell> {
    vec![vec![Span::raw(" ".repeat(width))]; height]
}

fn testimonial_card(t: &Testimonial, height: usize, theme: &Theme, border: Style) -> Vec<Cell> {
    let inner = QUOTE_WIDTH - 4;
    // Leave the last body row for the attribution
    let quote_rows = height.saturating_sub(3);
    let mut quote = wrap(&t.quote, inner);
    if quote.len() > quote_rows {
        quote.truncate(quote_rows);
        if let Some(last) = quote.last_mut() {
            *last = truncate(&format!("{last} …"), inner);
        }
    }
    let mut body: Vec<Span<'static>> = quote
        .into_iter()
        .map(|l| Span::styled(l, Style::default().fg(theme.fg0)))
        .collect();
    body.resize(quote_rows, Span::raw(""));
    body.push(Span::styled(
        format!("- {}", t.attribution),
        Style::default().fg(theme.accent_alt).add_modifier(Modifier::ITALIC),
    ));
    card(QUOTE_WIDTH, height, body, border)
}

fn testimonial_columns(items: &LoopedSequence<Testimonial>, theme: &Theme, border: Style) -> Vec<Column> {
    let mut columns = Vec::new();
    let mut pending: Option<Vec<Cell>> = None;

    let flush = |pending: &mut Option<Vec<Cell>>, columns: &mut Vec<Column>| {
        if let Some(mut rows) = pending.take() {
            rows.extend(blank(QUOTE_WIDTH, STRIP_ROWS - ROW_HEIGHT));
            columns.push(Column {
                width: QUOTE_WIDTH,
                rows,
            });
        }
    };

    for (index, t) in items.iter().enumerate() {
        // Both halves must lay out identically for the loop to be seamless
        if index == items.period() {
            flush(&mut pending, &mut columns);
        }
        match t.length() {
            QuoteLength::Long => {
                flush(&mut pending, &mut columns);
                columns.push(Column {
                    width: QUOTE_WIDTH,
                    rows: testimonial_card(t, STRIP_ROWS, theme, border),
                });
            }
            QuoteLength::Short => match pending.take() {
                Some(mut rows) => {
                    rows.extend(blank(QUOTE_WIDTH, 1));
                    rows.extend(testimonial_card(t, ROW_HEIGHT, theme, border));
                    columns.push(Column {
                        width: QUOTE_WIDTH,
                        rows,
                    });
                }
                None => pending = Some(testimonial_card(t, ROW_HEIGHT, theme, border)),
            },
        }
    }
    flush(&mut pending, &mut columns);
    columns
}

fn image_columns(items: &LoopedSequence<MediaImage>, theme: &Theme, border: Style) -> Vec<Column> {
    let inner = IMAGE_WIDTH - 4;
    let picture_rows = STRIP_ROWS - 2 - 4;
    items
        .iter()
        .map(|image| {
            let caption = image.caption();
            let mut body: Vec<Span<'static>> = (0..picture_rows)
                .map(|row| {
                    let pattern = if row % 2 == 0 { "░▒" } else { "▒░" };
                    Span::styled(pattern.repeat(inner / 2), Style::default().fg(theme.bg2))
                })
                .collect();
            body.push(Span::styled(
                caption.title,
                Style::default().fg(theme.fg0).add_modifier(Modifier::BOLD),
            ));
            body.extend(
                wrap(&caption.caption, inner)
                    .into_iter()
                    .take(2)
                    .map(|l| Span::styled(l, Style::default().fg(theme.fg1))),
            );
            Column {
                width: IMAGE_WIDTH,
                rows: card(IMAGE_WIDTH, STRIP_ROWS, body, border),
            }
        })
        .collect()
}

/// Short state label for the rail header
fn state_label(app: &App, rail: &PageRail) -> String {
    if app.reduced_motion() {
        return "still (reduced motion)".to_string();
    }
    if rail.is_navigating() {
        return "moving".to_string();
    }
    match rail.pause_mode() {
        PauseMode::Running => "auto".to_string(),
        PauseMode::PausedSticky => "paused".to_string(),
        PauseMode::PausedTimed { deadline } => {
            let left = deadline.saturating_duration_since(app.now).as_secs_f64();
            format!("resumes in {left:.1}s")
        }
    }
}

/// Header plus strip lines for the mounted rail, `width` columns wide
///
/// Reports the measured strip to the rail before cutting the window.
pub fn lines(app: &mut App, title: &str, width: u16) -> Vec<Line<'static>> {
    let theme = app.theme.clone();
    let focused = app.focus == Focus::Rail;
    let border = if focused {
        Style::default().fg(theme.accent)
    } else {
        Style::default().fg(theme.muted)
    };

    let Some(rail) = app.page.rail.as_mut() else {
        return Vec::new();
    };
    let strip = Strip::from_columns(match rail {
        PageRail::Testimonials(r) => testimonial_columns(r.items(), &theme, border),
        PageRail::Gallery(r) => image_columns(r.items(), &theme, border),
    });
    rail.measure(strip.width as f64, f64::from(width));
    let start = rail.position().unwrap_or(0.0).max(0.0).floor() as usize;

    let cols = usize::from(width);
    let label = app
        .page
        .rail
        .as_ref()
        .map(|rail| state_label(app, rail))
        .unwrap_or_default();

    let control = Style::default().fg(theme.highlight).add_modifier(Modifier::BOLD);
    let control_width = usize::from(CONTROL_WIDTH);
    let middle = cols.saturating_sub(control_width * 2);
    let heading = format!(" {title} · {label}");
    let mut out = Vec::with_capacity(STRIP_ROWS + 1);
    out.push(Line::from(vec![
        Span::styled("[‹]", control),
        Span::styled(
            pad(&heading, middle),
            Style::default().fg(theme.fg1).add_modifier(if focused {
                Modifier::BOLD
            } else {
                Modifier::empty()
            }),
        ),
        Span::styled("[›]", control),
    ]));
    out.extend(strip.rows.iter().map(|row| slice_spans(row, start, cols)));
    out
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Instant;

    use reelfront_core::{AppConfig, MotionGuard, MotionSetting, SiteContent};

    use super::*;

    fn testimonial(len: usize) -> Testimonial {
        Testimonial {
            quote: "word ".repeat(len / 5),
            attribution: "Player".to_string(),
        }
    }

    fn columns_for(items: Vec<Testimonial>) -> Vec<Column> {
        let seq = LoopedSequence::new(Arc::from(items));
        testimonial_columns(&seq, &Theme::default(), Style::default())
    }

    #[test]
    fn test_masonry_pairs_short_quotes() {
        let columns = columns_for(vec![testimonial(40), testimonial(40), testimonial(300)]);
        // [short+short][long] per half
        assert_eq!(columns.len(), 4);
        assert!(columns.iter().all(|c| c.rows.len() == STRIP_ROWS));
    }

    #[test]
    fn test_halves_lay_out_identically() {
        let columns = columns_for(vec![testimonial(40), testimonial(300), testimonial(40)]);
        // An odd short at the end of a half is not paired across the seam
        assert_eq!(columns.len(), 6);
        let strip = Strip::from_columns(columns);
        assert_eq!(strip.width % 2, 0);
        assert_eq!(strip.width, 6 * (QUOTE_WIDTH + CARD_GAP));
    }

    #[test]
    fn test_lines_measure_rail() {
        let content = SiteContent::builtin().unwrap();
        let mut app = App::new(
            Arc::new(AppConfig::default()),
            Arc::new(content),
            MotionGuard::new(MotionSetting::NoPreference),
            Instant::now(),
        );
        let lines = lines(&mut app, "Players", 80);
        assert_eq!(lines.len(), STRIP_ROWS + 1);
        assert!(lines.iter().all(|l| l.width() == 80));
        assert_eq!(app.page.rail.as_ref().unwrap().position(), Some(0.0));
        let header: String = lines[0].spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(header.contains("auto"));
    }
}

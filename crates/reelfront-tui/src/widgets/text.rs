//! Column-aware text helpers shared by the widgets

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub fn width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Cut `s` to at most `max` columns, ending in an ellipsis when shortened
pub fn truncate(s: &str, max: usize) -> String {
    if width(s) <= max {
        return s.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

/// Exactly `cols` columns: truncated or padded with spaces
pub fn pad(s: &str, cols: usize) -> String {
    let mut out = truncate(s, cols);
    let used = width(&out);
    out.extend(std::iter::repeat(' ').take(cols.saturating_sub(used)));
    out
}

/// Greedy word wrap; words longer than a line are hard-split
pub fn wrap(text: &str, cols: usize) -> Vec<String> {
    let cols = cols.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut used = 0;

    for word in text.split_whitespace() {
        let w = width(word);
        if used > 0 && used + 1 + w <= cols {
            current.push(' ');
            current.push_str(word);
            used += 1 + w;
            continue;
        }
        if used > 0 {
            lines.push(std::mem::take(&mut current));
            used = 0;
        }
        if w <= cols {
            current.push_str(word);
            used = w;
            continue;
        }
        for c in word.chars() {
            let cw = c.width().unwrap_or(0);
            if used + cw > cols {
                lines.push(std::mem::take(&mut current));
                used = 0;
            }
            current.push(c);
            used += cw;
        }
    }
    if used > 0 {
        lines.push(current);
    }
    lines
}

/// Columns `[start, start + cols)` of a styled row, padded to `cols`
///
/// A wide character cut by either edge becomes a space.
pub fn slice_spans(spans: &[Span<'static>], start: usize, cols: usize) -> Line<'static> {
    let end = start + cols;
    let mut out: Vec<Span<'static>> = Vec::new();
    let mut column = 0;
    let mut filled = 0;

    for span in spans {
        if column >= end {
            break;
        }
        let mut piece = String::new();
        for c in span.content.chars() {
            let w = c.width().unwrap_or(0);
            let (from, to) = (column, column + w);
            column = to;
            if to <= start || w == 0 {
                continue;
            }
            if from >= end {
                break;
            }
            if from < start || to > end {
                let visible = to.min(end) - from.max(start);
                piece.extend(std::iter::repeat(' ').take(visible));
                filled += visible;
            } else {
                piece.push(c);
                filled += w;
            }
        }
        if !piece.is_empty() {
            out.push(Span::styled(piece, span.style));
        }
    }
    if filled < cols {
        out.push(Span::raw(" ".repeat(cols - filled)));
    }
    Line::from(out)
}

/// Rect of at most `width` x `height` centred in `area`
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flatten(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 6), "hello…");
        assert_eq!(truncate("日本語テキスト", 5), "日本…");
        assert_eq!(truncate("abc", 0), "");
    }

    #[test]
    fn test_pad() {
        assert_eq!(pad("ab", 4), "ab  ");
        assert_eq!(pad("abcdef", 4), "abc…");
        assert_eq!(width(&pad("日本", 5)), 5);
    }

    #[test]
    fn test_wrap() {
        assert_eq!(
            wrap("the quick brown fox jumps", 10),
            vec!["the quick", "brown fox", "jumps"]
        );
        assert_eq!(wrap("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        assert!(wrap("   ", 4).is_empty());
    }

    #[test]
    fn test_slice_spans() {
        let spans = vec![Span::raw("abc"), Span::raw("def")];
        assert_eq!(flatten(&slice_spans(&spans, 2, 3)), "cde");
        assert_eq!(flatten(&slice_spans(&spans, 4, 5)), "ef   ");
        assert_eq!(flatten(&slice_spans(&spans, 10, 2)), "  ");
    }

    #[test]
    fn test_slice_splits_wide_chars() {
        let spans = vec![Span::raw("a日b")];
        assert_eq!(flatten(&slice_spans(&spans, 2, 2)), " b");
        assert_eq!(flatten(&slice_spans(&spans, 0, 2)), "a ");
    }

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(centered_rect(50, 20, area), Rect::new(25, 10, 50, 20));
        assert_eq!(centered_rect(200, 20, area).width, 100);
    }
}

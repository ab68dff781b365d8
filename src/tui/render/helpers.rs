use ratatui::layout::Rect;
use ratatui::text::Span;

use crate::util::unicode;

/// Compute total display width of a slice of spans
pub(super) fn spans_width(spans: &[Span]) -> usize {
    spans
        .iter()
        .map(|s| unicode::display_width(&s.content))
        .sum()
}

/// A `width` x `height` rectangle centered in `area`, clipped to it
pub(super) fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}

/// Spans for an input line with a block cursor, keeping the cursor in view
/// when the text is wider than `width`.
pub(super) fn input_spans<'a>(
    before: &'a str,
    after: &'a str,
    width: usize,
    text_style: ratatui::style::Style,
    cursor_style: ratatui::style::Style,
) -> Vec<Span<'a>> {
    let room = width.saturating_sub(1);
    let before = unicode::tail_to_width(before, room);
    let after_room = room.saturating_sub(unicode::display_width(before));
    let after = unicode::truncate_to_width(after, after_room);
    vec![
        Span::styled(before, text_style),
        Span::styled("\u{258C}", cursor_style),
        Span::styled(after, text_style),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Style;

    #[test]
    fn centered_rect_is_clipped() {
        let area = Rect::new(0, 0, 20, 10);
        assert_eq!(centered_rect_fixed(10, 4, area), Rect::new(5, 3, 10, 4));
        assert_eq!(centered_rect_fixed(40, 40, area), area);
    }

    #[test]
    fn long_input_keeps_cursor_visible() {
        let spans = input_spans("abcdefghij", "", 5, Style::default(), Style::default());
        assert_eq!(spans[0].content, "ghij");
        assert_eq!(spans_width(&spans), 5);
    }
}

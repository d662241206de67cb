//! Stack columns
//!
//! One column per stack: a header with the element count, then one bar per
//! element from the top down. Rows past the bottom of the area are dropped.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
};
use stackscope_core::{Scale, Stack};

use super::COLUMN_INDENT;

const BAR_GLYPH: &str = "|";

/// One column to draw.
pub struct Column<'a> {
    /// Header name, e.g. `Stack A`.
    pub name: &'a str,
    /// Stack to draw.
    pub stack: &'a Stack,
    /// Bar color.
    pub color: Color,
}

/// Render `column` into `area`, header on the first row.
///
/// `bar_width` is the length of the longest bar.
pub fn render(frame: &mut Frame, column: &Column<'_>, scale: Scale, bar_width: u16, area: Rect) {
    let inner = Rect {
        x: area.x + COLUMN_INDENT.min(area.width),
        width: area.width.saturating_sub(COLUMN_INDENT),
        ..area
    };
    if inner.height == 0 {
        return;
    }

    let header = format!("{} ({})", column.name, column.stack.len());
    frame.render_widget(Paragraph::new(header), Rect { height: 1, ..inner });

    let style = Style::default().fg(column.color);
    let items: Vec<ListItem> = column
        .stack
        .iter()
        .take(usize::from(inner.height - 1))
        .map(|value| {
            let bars = BAR_GLYPH.repeat(usize::from(scale.bar_len(value, bar_width)));
            ListItem::new(Line::from(vec![Span::raw(format!("{value} ")), Span::raw(bars)]))
                .style(style)
        })
        .collect();

    let bars_area = Rect { y: inner.y + 1, height: inner.height - 1, ..inner };
    frame.render_widget(List::new(items), bars_area);
}

//! Title row
//!
//! Shows the start prompt or the last command, plus an ops counter on the
//! right edge when it fits.

use ratatui::{Frame, layout::Rect, text::Line, widgets::Paragraph};
use stackscope_core::{App, RunState};

use super::COLUMN_INDENT;

const START_PROMPT: &str = "Visualizer - Press SPACE to Start";
const COMMAND_PREFIX: &str = "Visualizer - Last Command: ";

/// Title text for the current state.
pub fn title_text(app: &App) -> String {
    match app.state() {
        RunState::AwaitingStart => START_PROMPT.to_string(),
        _ => format!("{COMMAND_PREFIX}{}", app.last_command()),
    }
}

/// Render the title row.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let title = Line::from(title_text(app));
    let title_end = usize::from(COLUMN_INDENT) + title.width();

    let title_area = Rect {
        x: area.x + COLUMN_INDENT.min(area.width),
        width: area.width.saturating_sub(COLUMN_INDENT),
        ..area
    };
    frame.render_widget(Paragraph::new(title), title_area);

    let ops = Line::from(format!("ops: {}", app.applied()));
    let ops_width = u16::try_from(ops.width()).unwrap_or(u16::MAX);
    if title_end + 1 + usize::from(ops_width) <= usize::from(area.width) {
        let ops_area = Rect { x: area.right() - ops_width, width: ops_width, ..area };
        frame.render_widget(Paragraph::new(ops), ops_area);
    }
}

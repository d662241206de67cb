//! UI rendering
//!
//! Rendering functions that convert App state into terminal output using
//! ratatui widgets. All functions are pure (no I/O).
//!
//! Layout, top to bottom:
//!
//! - row 0: title and ops counter
//! - row 1: horizontal rule
//! - row 2 onward: two columns, A on the left half and B on the right

mod stacks;
mod title;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Color,
    widgets::Paragraph,
};
use stackscope_core::{App, Scale};

pub use title::title_text;

/// Smallest usable height.
pub const MIN_ROWS: u16 = 15;

/// Smallest usable width.
pub const MIN_COLS: u16 = 32;

/// Columns reserved for the value label in front of each bar.
pub const LABEL_MARGIN: u16 = 10;

/// Left padding inside the title row and each column.
pub(crate) const COLUMN_INDENT: u16 = 2;

const TOO_SMALL: &str = "Window too small!";
const TOO_SMALL_OFFSET: u16 = 20;
const RULE_GLYPH: &str = "-";

/// Render the entire UI.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    if area.height < MIN_ROWS || area.width < MIN_COLS {
        render_too_small(frame, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Min(0)])
        .split(area);

    let [title_area, rule_area, body_area] = chunks.as_ref() else {
        return;
    };

    title::render(frame, app, *title_area);
    frame.render_widget(Paragraph::new(RULE_GLYPH.repeat(usize::from(rule_area.width))), *rule_area);
    render_columns(frame, app, *body_area);
}

/// Render both stacks side by side over a shared scale.
fn render_columns(frame: &mut Frame, app: &App, area: Rect) {
    let col_width = area.width / 2;
    let bar_width = col_width.saturating_sub(LABEL_MARGIN);
    let scale = Scale::for_pair(app.stacks());

    let left = Rect { width: col_width, ..area };
    let right = Rect { x: area.x + col_width, width: area.width - col_width, ..area };

    let a = stacks::Column { name: "Stack A", stack: app.stacks().a(), color: Color::Green };
    let b = stacks::Column { name: "Stack B", stack: app.stacks().b(), color: Color::Cyan };
    stacks::render(frame, &a, scale, bar_width, left);
    stacks::render(frame, &b, scale, bar_width, right);
}

/// Placeholder for terminals below the minimum size.
fn render_too_small(frame: &mut Frame, area: Rect) {
    let x = area.x + area.width.saturating_sub(TOO_SMALL_OFFSET) / 2;
    let y = area.y + area.height / 2;
    let width = u16::try_from(TOO_SMALL.len()).unwrap_or(u16::MAX);
    let target = Rect::new(x, y, width, 1).intersection(area);
    frame.render_widget(Paragraph::new(TOO_SMALL), target);
}

#[cfg(test)]
mod tests {
    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};
    use stackscope_core::{AppEvent, StackPair, Token};

    use super::*;

    fn draw(app: &App, width: u16, height: u16) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        terminal.backend().buffer().clone()
    }

    fn row(buffer: &Buffer, y: u16) -> String {
        (0..buffer.area.width).map(|x| buffer[(x, y)].symbol()).collect::<String>()
    }

    fn run(app: &mut App, tokens: &[&str]) {
        for token in tokens {
            app.handle(AppEvent::Command(Token::new(token.as_bytes())));
        }
    }

    #[test]
    fn small_terminal_shows_placeholder_only() {
        let app = App::new(StackPair::new([3, 1, 2]), true);
        let buffer = draw(&app, 20, 10);

        assert_eq!(row(&buffer, 5).trim_end(), TOO_SMALL);
        for y in (0..10).filter(|&y| y != 5) {
            assert!(row(&buffer, y).trim().is_empty(), "row {y} not blank");
        }
    }

    #[test]
    fn narrow_but_tall_is_still_too_small() {
        let app = App::new(StackPair::new([1]), false);
        let buffer = draw(&app, 31, 40);

        let line = row(&buffer, 20);
        assert_eq!(line.trim(), TOO_SMALL);
        assert!(line.starts_with("     W"));
    }

    #[test]
    fn awaiting_start_layout() {
        let app = App::new(StackPair::new([3, 1, 2]), true);
        let buffer = draw(&app, 40, 15);

        assert_eq!(row(&buffer, 0).trim_end(), "  Visualizer - Press SPACE to Start");
        assert_eq!(row(&buffer, 1), "-".repeat(40));
        assert_eq!(row(&buffer, 2).trim_end(), "  Stack A (3)         Stack B (0)");

        // Bar width is 20 - 10; values span 1..=3.
        assert_eq!(row(&buffer, 3).trim_end(), "  3 ||||||||||");
        assert_eq!(row(&buffer, 4).trim_end(), "  1 |");
        assert_eq!(row(&buffer, 5).trim_end(), "  2 |||||");
        assert!(row(&buffer, 6).trim().is_empty());
    }

    #[test]
    fn bars_are_colored_per_stack() {
        let mut app = App::new(StackPair::new([2, 1]), false);
        run(&mut app, &["pb"]);
        let buffer = draw(&app, 40, 15);

        assert_eq!(buffer[(2, 3)].fg, Color::Green);
        assert_eq!(buffer[(22, 3)].fg, Color::Cyan);
        assert_ne!(buffer[(2, 2)].fg, Color::Green);
    }

    #[test]
    fn running_title_shows_last_command_and_ops() {
        let mut app = App::new(StackPair::new([3, 1, 2]), false);
        run(&mut app, &["sa", "pb"]);
        let buffer = draw(&app, 60, 15);

        let title = row(&buffer, 0);
        assert!(title.starts_with("  Visualizer - Last Command: pb "));
        assert!(title.ends_with("ops: 2"));
        assert_eq!(row(&buffer, 2).trim_end(), "  Stack A (2)                   Stack B (1)");

        // Shared scale over both stacks: 1..=3, bar width 20.
        assert_eq!(row(&buffer, 3).trim_end(), "  3 ||||||||||||||||||||        1 |");
    }

    #[test]
    fn ops_counter_is_dropped_when_cramped() {
        let mut app = App::new(StackPair::new([1, 2]), false);
        run(&mut app, &["sa"]);
        let buffer = draw(&app, 32, 15);

        assert!(!row(&buffer, 0).contains("ops:"));
    }

    #[test]
    fn drained_title_reads_done() {
        let mut app = App::new(StackPair::new([1]), false);
        app.handle(AppEvent::EndOfStream);

        assert_eq!(title_text(&app), "Visualizer - Last Command: DONE");
    }

    #[test]
    fn tall_stacks_are_cut_at_the_bottom() {
        let app = App::new(StackPair::new(1..=40), false);
        let buffer = draw(&app, 40, 15);

        assert_eq!(row(&buffer, 3).trim_end(), "  1 |");
        assert_eq!(row(&buffer, 14).trim_end(), "  12 ||");
    }
}

//! Terminal driver for the TUI.
//!
//! Implements the [`Driver`] trait with crossterm for terminal modes and
//! ratatui for rendering. Input never flows through here: stdin and the
//! controlling terminal are read by [`crate::reader`] threads.

use std::io::{self, Stdout, stdout};

use crossterm::{
    ExecutableCommand,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use stackscope_core::{App, Driver};
use thiserror::Error;
use tracing::debug;

use crate::ui;

/// Terminal driver errors.
#[derive(Debug, Error)]
pub enum TerminalError {
    /// I/O error from terminal operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The controlling terminal could not be opened for the start gate.
    #[error("cannot open {path}: {source}")]
    TtyUnavailable {
        /// Terminal path that failed.
        path: &'static str,
        /// Underlying error.
        #[source]
        source: io::Error,
    },

    /// A signal handler could not be installed.
    #[error("cannot register signal handlers: {0}")]
    Signal(#[source] io::Error),
}

/// Terminal driver implementing the [`Driver`] trait.
///
/// Owns raw mode and the alternate screen from construction until
/// [`Driver::restore`] or drop, whichever comes first.
pub struct TerminalDriver {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    restored: bool,
}

impl TerminalDriver {
    /// Enter raw mode and the alternate screen.
    pub fn new() -> Result<Self, TerminalError> {
        enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;

        let backend = CrosstermBackend::new(stdout());
        let mut terminal = Terminal::new(backend)?;
        terminal.hide_cursor()?;
        terminal.clear()?;

        Ok(Self { terminal, restored: false })
    }
}

impl Driver for TerminalDriver {
    type Error = TerminalError;

    fn resize(&mut self) -> Result<(), Self::Error> {
        self.terminal.autoresize()?;
        self.terminal.clear()?;
        debug!("terminal resized");
        Ok(())
    }

    fn render(&mut self, app: &App) -> Result<(), Self::Error> {
        self.terminal.draw(|frame| {
            ui::render(frame, app);
        })?;
        Ok(())
    }

    fn restore(&mut self) {
        if self.restored {
            return;
        }
        self.restored = true;

        let _ = self.terminal.show_cursor();
        let _ = stdout().execute(LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

impl Drop for TerminalDriver {
    fn drop(&mut self) {
        self.restore();
    }
}

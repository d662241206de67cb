//! Driver trait for abstracting the display.
//!
//! The [`Driver`] trait decouples the run loop from a specific terminal
//! library. The terminal frontend implements it with crossterm and ratatui;
//! tests implement it by recording frames.

use crate::App;

/// Display surface the [`Runtime`](crate::Runtime) draws on.
///
/// # Contract
///
/// - `render` draws a complete frame from `app` and never mutates it.
/// - `resize` re-reads the display geometry. Data is untouched.
/// - `restore` returns the terminal to its normal mode. It is called exactly
///   once by the runtime on every exit path and must tolerate a display that
///   is already partly torn down.
pub trait Driver {
    /// Display error type.
    type Error: std::error::Error + Send + 'static;

    /// Re-read the display size and clear the frame.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be queried or cleared.
    fn resize(&mut self) -> Result<(), Self::Error>;

    /// Draw the application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the frame cannot be written.
    fn render(&mut self, app: &App) -> Result<(), Self::Error>;

    /// Restore the terminal to normal mode.
    fn restore(&mut self);
}

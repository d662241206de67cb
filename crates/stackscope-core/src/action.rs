//! Application side-effects.
//!
//! [`AppAction`] values are produced by the [`crate::App`] state machine for
//! the runtime to execute against the [`crate::Driver`].

/// Actions produced by the App state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    /// Redraw the frame from current state.
    Render,

    /// Re-read the display geometry and clear the frame.
    Resize,

    /// Hold the frame for the configured command delay.
    Pause,

    /// Leave the run loop and tear down.
    Quit,
}

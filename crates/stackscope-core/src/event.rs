//! Application input events.
//!
//! [`AppEvent`] is everything that drives the [`crate::App`] state machine:
//! tokens and end-of-stream from the primary source, the gate's start signal,
//! and the two out-of-band notifications.

use crate::Token;

/// Events processed by the App state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// The gate delivered its start byte (or closed).
    Start,

    /// A complete token from the primary source.
    Command(Token),

    /// The primary source closed.
    EndOfStream,

    /// The terminal changed size.
    Resize,

    /// The user asked to stop.
    Interrupt,
}

//! Signal registration.
//!
//! Handlers only set the atomic flags in [`Notifications`]; the run loop polls
//! and clears them. `SIGWINCH` maps to resize, `SIGINT` and `SIGTERM` map to
//! interrupt.

use std::io;

use signal_hook::{
    consts::{SIGINT, SIGTERM, SIGWINCH},
    flag,
};
use stackscope_core::Notifications;

/// Route process signals to `notifications`.
///
/// # Errors
///
/// Returns an error if a handler cannot be installed.
pub fn register(notifications: &Notifications) -> io::Result<()> {
    flag::register(SIGWINCH, notifications.resize_flag())?;
    for signal in [SIGINT, SIGTERM] {
        flag::register(signal, notifications.interrupt_flag())?;
    }
    Ok(())
}

//! Out-of-band notifications.
//!
//! Resize and interrupt requests arrive from signal handlers and watcher
//! threads at arbitrary times. Each is a single atomic flag: raising is
//! idempotent, so any number of raises between two polls is observed once.
//! Redraws may coalesce; the fact that a raise happened is never lost.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

/// Shared resize and interrupt flags.
///
/// Clones share the same flags. Only the run loop clears them.
#[derive(Debug, Clone, Default)]
pub struct Notifications {
    resize: Arc<AtomicBool>,
    interrupt: Arc<AtomicBool>,
}

impl Notifications {
    /// Create cleared flags.
    pub fn new() -> Self {
        Self::default()
    }

    /// Flag raised when the terminal changes size, for signal registration.
    pub fn resize_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.resize)
    }

    /// Flag raised when the user asks to stop, for signal registration.
    pub fn interrupt_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.interrupt)
    }

    /// Record a resize.
    pub fn raise_resize(&self) {
        self.resize.store(true, Ordering::SeqCst);
    }

    /// Record an interrupt request.
    pub fn raise_interrupt(&self) {
        self.interrupt.store(true, Ordering::SeqCst);
    }

    /// Clear the resize flag, returning whether it was set.
    pub fn take_resize(&self) -> bool {
        self.resize.swap(false, Ordering::SeqCst)
    }

    /// Whether an interrupt has been requested. Never cleared.
    pub fn interrupt_requested(&self) -> bool {
        self.interrupt.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resize_raises_coalesce() {
        let flags = Notifications::new();
        flags.raise_resize();
        flags.raise_resize();
        flags.raise_resize();

        assert!(flags.take_resize());
        assert!(!flags.take_resize());
    }

    #[test]
    fn clones_share_flags() {
        let flags = Notifications::new();
        let handler = flags.clone();

        handler.raise_interrupt();
        assert!(flags.interrupt_requested());
        assert!(flags.interrupt_requested());

        handler.resize_flag().store(true, Ordering::SeqCst);
        assert!(flags.take_resize());
    }
}

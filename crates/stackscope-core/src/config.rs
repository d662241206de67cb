//! Run-loop configuration.

use std::time::Duration;

/// Shortest wait the run loop performs per poll or sleep slice.
pub const MIN_WAIT: Duration = Duration::from_millis(1);

/// Timing and gating for the [`Runtime`](crate::Runtime).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Wait for the gate's start byte before applying commands.
    pub gated: bool,
    /// Longest wait on the primary source per iteration.
    pub poll_timeout: Duration,
    /// Longest wait on the gate per iteration.
    pub gate_poll_interval: Duration,
    /// Sleep between iterations once the primary source has closed.
    pub drained_interval: Duration,
    /// Hold after each applied command so the animation is visible.
    pub command_delay: Duration,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            gated: true,
            poll_timeout: Duration::from_millis(20),
            gate_poll_interval: Duration::from_millis(50),
            drained_interval: Duration::from_millis(100),
            command_delay: Duration::from_millis(500),
        }
    }
}

impl RunConfig {
    /// Raise every poll and idle interval to at least [`MIN_WAIT`] so the
    /// loop never spins. `command_delay` may be zero.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            poll_timeout: self.poll_timeout.max(MIN_WAIT),
            gate_poll_interval: self.gate_poll_interval.max(MIN_WAIT),
            drained_interval: self.drained_interval.max(MIN_WAIT),
            ..self
        }
    }
}

//! Run-loop state.

use std::fmt;

/// Controller state.
///
/// ```text
/// AwaitingStart --start byte--> Running --end-of-stream--> Drained
///       \                          |                          /
///        +------------------ interrupt ---------------------+--> Terminated
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Waiting for the gate's start byte. Only entered when gating is enabled.
    AwaitingStart,
    /// Applying commands from the primary source.
    Running,
    /// The primary source closed. Display and resize handling continue.
    Drained,
    /// Interrupted. Teardown follows.
    Terminated,
}

impl RunState {
    /// Initial state for the given gating mode.
    pub fn initial(gated: bool) -> Self {
        if gated { Self::AwaitingStart } else { Self::Running }
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::AwaitingStart => "awaiting-start",
            Self::Running => "running",
            Self::Drained => "drained",
            Self::Terminated => "terminated",
        };
        f.write_str(name)
    }
}

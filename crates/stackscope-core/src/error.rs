//! Run-loop errors.

use std::io;

use thiserror::Error;

/// Errors that end the run loop early.
///
/// The runtime restores the display before returning either variant.
#[derive(Debug, Error)]
pub enum RuntimeError<E: std::error::Error + 'static> {
    /// The display failed to draw, resize or clear.
    #[error("display error: {0}")]
    Driver(#[source] E),

    /// Polling or reading an input source failed with a non-transient error.
    #[error("input source failed: {0}")]
    Source(#[from] io::Error),
}

//! Terminal frontend for the stack visualizer
//!
//! A thin shell over [`stackscope_core::Runtime`] that provides the terminal
//! side: reader threads for stdin and the controlling terminal, signal flags,
//! and ratatui rendering. All run-loop logic lives in `stackscope-core`.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod args;
pub mod reader;
pub mod signals;
pub mod terminal;
pub mod ui;

pub use terminal::{TerminalDriver, TerminalError};

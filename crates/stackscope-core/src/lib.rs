//! Core of the two-stack sort visualizer
//!
//! Pure state machines and a generic runtime for animating a push/swap/rotate
//! command trace over two integer stacks. Terminal I/O lives behind the
//! [`Driver`] and [`ByteSource`] traits, so the same loop runs in production
//! and under test.
//!
//! # Components
//!
//! - [`StackPair`]: the two stacks and their primitive mutations
//! - [`Command`]: the eleven-command vocabulary
//! - [`InputMultiplexer`]: tokenizer over the primary source plus start gate
//! - [`App`]: run-state machine (awaiting start, running, drained)
//! - [`Runtime`]: polling loop driving App and Driver
//! - [`Notifications`]: resize and interrupt flags set from signal context

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod app;
mod command;
mod config;
mod driver;
mod error;
mod event;
mod input;
mod notify;
mod runtime;
mod scale;
mod source;
mod stack;
mod state;

pub use action::AppAction;
pub use app::{App, DONE_LABEL, LABEL_MAX_CHARS, START_LABEL};
pub use command::Command;
pub use config::{MIN_WAIT, RunConfig};
pub use driver::Driver;
pub use error::RuntimeError;
pub use event::AppEvent;
pub use input::{
    GATE_START_BYTE, GateSignal, InputMultiplexer, MAX_TOKEN_LEN, Token, TokenRead, is_delimiter,
};
pub use notify::Notifications;
pub use runtime::Runtime;
pub use scale::Scale;
pub use source::{ByteSource, ChannelSource, Chunk, Readiness};
pub use stack::{Bounds, Stack, StackPair};
pub use state::RunState;

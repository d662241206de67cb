//! Application state machine.
//!
//! [`App`] owns the two stacks and the run state. It consumes
//! [`crate::AppEvent`]s and produces [`crate::AppAction`]s for the runtime to
//! execute. No I/O happens here, so every transition is testable without a
//! terminal.
//!
//! # Responsibilities
//!
//! - Applies tokens to the [`StackPair`] while running.
//! - Fires `Running -> Drained` exactly once.
//! - Tracks the last-command label and the applied/ignored counters shown in
//!   the title row.

use tracing::{debug, info};

use crate::{AppAction, AppEvent, RunState, StackPair, Token};

/// Label shown before the first command.
pub const START_LABEL: &str = "START";

/// Label shown once the primary source has closed.
pub const DONE_LABEL: &str = "DONE";

/// Longest last-command label, in characters.
pub const LABEL_MAX_CHARS: usize = 9;

/// Visualizer state machine.
#[derive(Debug, Clone)]
pub struct App {
    /// Containers being animated.
    stacks: StackPair,
    /// Current run state.
    state: RunState,
    /// Last token seen, truncated for display.
    last_command: String,
    /// Tokens that matched a command.
    applied: u64,
    /// Tokens outside the vocabulary.
    ignored: u64,
}

impl App {
    /// Create an App over `stacks`. Starts in
    /// [`RunState::AwaitingStart`] when `gated`, else [`RunState::Running`].
    pub fn new(stacks: StackPair, gated: bool) -> Self {
        Self {
            stacks,
            state: RunState::initial(gated),
            last_command: START_LABEL.to_string(),
            applied: 0,
            ignored: 0,
        }
    }

    /// Process an event and return actions.
    pub fn handle(&mut self, event: AppEvent) -> Vec<AppAction> {
        match (self.state, event) {
            (RunState::Terminated, _) => vec![],
            (_, AppEvent::Interrupt) => {
                self.transition(RunState::Terminated);
                vec![AppAction::Quit]
            },
            (_, AppEvent::Resize) => vec![AppAction::Resize, AppAction::Render],
            (RunState::AwaitingStart, AppEvent::Start) => {
                self.transition(RunState::Running);
                vec![AppAction::Render]
            },
            (RunState::Running, AppEvent::Command(token)) => {
                self.apply(&token);
                vec![AppAction::Render, AppAction::Pause]
            },
            (RunState::Running, AppEvent::EndOfStream) => {
                self.transition(RunState::Drained);
                self.last_command = DONE_LABEL.to_string();
                vec![AppAction::Render]
            },
            (_, AppEvent::Start | AppEvent::Command(_) | AppEvent::EndOfStream) => vec![],
        }
    }

    fn apply(&mut self, token: &Token) {
        match self.stacks.execute(token.as_bytes()) {
            Some(command) => {
                self.applied += 1;
                debug!(%command, a = self.stacks.a().len(), b = self.stacks.b().len(), "applied");
            },
            None => {
                self.ignored += 1;
                debug!(%token, "ignored token outside the command vocabulary");
            },
        }
        self.last_command = token.text().chars().take(LABEL_MAX_CHARS).collect();
    }

    fn transition(&mut self, next: RunState) {
        info!(from = %self.state, to = %next, "state transition");
        self.state = next;
    }

    /// The two stacks.
    pub fn stacks(&self) -> &StackPair {
        &self.stacks
    }

    /// Current run state.
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Last-command label: [`START_LABEL`], a token, or [`DONE_LABEL`].
    pub fn last_command(&self) -> &str {
        &self.last_command
    }

    /// Number of tokens that matched a command.
    pub fn applied(&self) -> u64 {
        self.applied
    }

    /// Number of tokens outside the vocabulary.
    pub fn ignored(&self) -> u64 {
        self.ignored
    }
}

//! Generic runtime for the visualizer loop.
//!
//! The Runtime drives one iteration at a time, strictly alternating model
//! mutation and rendering on a single task:
//!
//! 1. Interrupt flag set: quit.
//! 2. Resize flag set: clear it, reinitialize the display and redraw.
//! 3. Per state: poll the gate, poll the primary source, or idle.
//! 4. Every wait is bounded, so steps 1 and 2 stay responsive.
//!
//! Teardown runs once on every exit path: the display is restored, then the
//! [`App`] (and both stacks) is handed back to the caller to drop.

use std::io;

use tokio::time::{Instant, sleep};
use tracing::{error, warn};

use crate::{
    App, AppAction, AppEvent, ByteSource, ChannelSource, Driver, GateSignal, InputMultiplexer,
    Notifications, Readiness, RunConfig, RunState, RuntimeError, TokenRead,
};

/// Runtime that orchestrates App, input and Driver.
///
/// # Type Parameters
///
/// - `D`: display driver
/// - `P`: primary command source
/// - `G`: gate source
pub struct Runtime<D, P, G = ChannelSource>
where
    D: Driver,
    P: ByteSource,
    G: ByteSource,
{
    driver: D,
    app: App,
    input: InputMultiplexer<P, G>,
    notifications: Notifications,
    config: RunConfig,
}

impl<D, P, G> Runtime<D, P, G>
where
    D: Driver,
    P: ByteSource,
    G: ByteSource,
{
    /// Create a runtime. `app` decides whether the gate is awaited.
    ///
    /// Intervals in `config` are raised to [`crate::MIN_WAIT`].
    pub fn new(
        driver: D,
        app: App,
        input: InputMultiplexer<P, G>,
        notifications: Notifications,
        config: RunConfig,
    ) -> Self {
        Self { driver, app, input, notifications, config: config.normalized() }
    }

    /// Run until interrupted, then tear down.
    ///
    /// Returns the final App so callers can inspect the stacks.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver fails or an input source fails with a
    /// non-transient error. The display is restored in both cases.
    pub async fn run(mut self) -> Result<App, RuntimeError<D::Error>> {
        let result = self.drive().await;
        if let Err(e) = &result {
            error!("run loop failed: {e}");
        }

        self.input.close_gate();
        self.driver.restore();
        result.map(|()| self.app)
    }

    async fn drive(&mut self) -> Result<(), RuntimeError<D::Error>> {
        self.render()?;

        loop {
            if self.notifications.interrupt_requested() {
                self.dispatch(AppEvent::Interrupt).await?;
                return Ok(());
            }

            if self.notifications.take_resize() && self.dispatch(AppEvent::Resize).await? {
                return Ok(());
            }

            let event = match self.app.state() {
                RunState::AwaitingStart => self.poll_gate().await?,
                RunState::Running => self.poll_primary().await?,
                RunState::Drained => {
                    sleep(self.config.drained_interval).await;
                    None
                },
                RunState::Terminated => return Ok(()),
            };

            if let Some(event) = event
                && self.dispatch(event).await?
            {
                return Ok(());
            }
        }
    }

    /// Wait on the gate. The gate is closed once it opens or ends.
    async fn poll_gate(&mut self) -> Result<Option<AppEvent>, RuntimeError<D::Error>> {
        let signal = match self.input.poll_gate(self.config.gate_poll_interval).await {
            Ok(signal) => signal,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match signal {
            GateSignal::Pending => Ok(None),
            GateSignal::Open => {
                self.input.close_gate();
                Ok(Some(AppEvent::Start))
            },
            GateSignal::Closed => {
                warn!("gate closed before the start byte; starting anyway");
                self.input.close_gate();
                Ok(Some(AppEvent::Start))
            },
        }
    }

    /// Wait on the primary source and read at most one token.
    async fn poll_primary(&mut self) -> Result<Option<AppEvent>, RuntimeError<D::Error>> {
        let readiness = match self.input.poll(self.config.poll_timeout).await {
            Ok(readiness) => readiness,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        if readiness == Readiness::Timeout {
            return Ok(None);
        }

        match self.input.read_token() {
            Ok(TokenRead::Token(token)) => Ok(Some(AppEvent::Command(token))),
            Ok(TokenRead::Incomplete) => Ok(None),
            Ok(TokenRead::EndOfStream) => Ok(Some(AppEvent::EndOfStream)),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Feed an event to the App and execute its actions.
    ///
    /// Returns `true` if the loop should quit.
    async fn dispatch(&mut self, event: AppEvent) -> Result<bool, RuntimeError<D::Error>> {
        for action in self.app.handle(event) {
            match action {
                AppAction::Render => self.render()?,
                AppAction::Resize => self.driver.resize().map_err(RuntimeError::Driver)?,
                AppAction::Pause => self.pause().await,
                AppAction::Quit => return Ok(true),
            }
        }
        Ok(false)
    }

    /// Hold the current frame for the command delay.
    ///
    /// Sleeps in slices no longer than the poll timeout and returns early on
    /// interrupt. A resize raised meanwhile is handled by the next iteration.
    async fn pause(&self) {
        let deadline = Instant::now() + self.config.command_delay;
        while !self.notifications.interrupt_requested() {
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            sleep((deadline - now).min(self.config.poll_timeout)).await;
        }
    }

    fn render(&mut self) -> Result<(), RuntimeError<D::Error>> {
        self.driver.render(&self.app).map_err(RuntimeError::Driver)
    }
}

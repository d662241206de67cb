//! Stackscope entry point.
//!
//! # Usage
//!
//! ```bash
//! # Wait for SPACE on the terminal, then animate the trace
//! ./push_swap 3 1 2 | stackscope 3 1 2
//!
//! # Start immediately, faster, with logs
//! ./push_swap $ARGS | stackscope --no-wait --delay-ms 50 --log-file trace.log $ARGS
//! ```

use std::{
    fs::File,
    io::{self, IsTerminal},
    path::PathBuf,
    sync::Mutex,
    time::Duration,
};

use clap::Parser;
use stackscope_core::{App, Notifications, RunConfig, Runtime, StackPair};
use stackscope_tui::{TerminalDriver, TerminalError, args::parse_numbers, reader, signals};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Two-stack sort trace visualizer
#[derive(Parser, Debug)]
#[command(name = "stackscope")]
#[command(about = "Animate a push/swap/rotate command trace read from stdin")]
#[command(version)]
struct Args {
    /// Initial values of stack A, top first
    ///
    /// Each argument may hold several whitespace-separated integers. Options
    /// go before the numbers.
    #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
    numbers: Vec<String>,

    /// Start immediately instead of waiting for SPACE
    #[arg(long)]
    no_wait: bool,

    /// Pause after each command, in milliseconds
    #[arg(long, default_value = "500")]
    delay_ms: u64,

    /// Input poll timeout, in milliseconds (at least 1)
    #[arg(long, default_value = "20", value_parser = clap::value_parser!(u64).range(1..))]
    poll_ms: u64,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

/// Install a file subscriber. Without a log file, logging stays off so the
/// display is never written over.
fn init_logging(args: &Args) -> io::Result<()> {
    let Some(path) = &args.log_file else {
        return Ok(());
    };

    let file = File::create(path)?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .with(filter)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(&args)?;

    let stacks = StackPair::new(parse_numbers(&args.numbers));
    let config = RunConfig {
        gated: !args.no_wait,
        poll_timeout: Duration::from_millis(args.poll_ms),
        command_delay: Duration::from_millis(args.delay_ms),
        ..RunConfig::default()
    };
    tracing::info!(values = stacks.a().len(), gated = config.gated, "stackscope starting");

    if io::stdin().is_terminal() {
        tracing::warn!("stdin is a terminal; pipe a command trace in");
    }

    let notifications = Notifications::new();
    signals::register(&notifications).map_err(TerminalError::Signal)?;

    let primary = reader::spawn_stdin()?;
    let driver = TerminalDriver::new()?;

    // Returning early drops the driver, which restores the terminal.
    let input = reader::select_input(primary, config.gated, || reader::spawn_tty(&notifications))?;

    let app = App::new(stacks, config.gated);
    let runtime = Runtime::new(driver, app, input, notifications, config);
    let app = runtime.run().await?;

    tracing::info!(applied = app.applied(), ignored = app.ignored(), "stackscope finished");
    Ok(())
}

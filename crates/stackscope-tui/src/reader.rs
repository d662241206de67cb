//! Reader threads.
//!
//! Each file descriptor gets a dedicated blocking thread that forwards chunks
//! into a [`ChannelSource`]. The run loop never blocks on a descriptor; it
//! only waits on channels with a timeout.
//!
//! - stdin: forwards until end-of-stream, then drops the sender.
//! - controlling terminal: forwards keystrokes for the start gate and raises
//!   the interrupt flag on Ctrl-C, which raw mode delivers as a plain byte.

use std::{
    fs::File,
    io::{self, Read},
    thread,
};

use stackscope_core::{ChannelSource, Chunk, InputMultiplexer, Notifications};
use tokio::sync::mpsc::Sender;
use tracing::{debug, warn};

use crate::TerminalError;

/// Path of the controlling terminal.
pub const TTY_PATH: &str = "/dev/tty";

/// Byte the terminal sends for Ctrl-C in raw mode.
pub const INTERRUPT_BYTE: u8 = 0x03;

const CHUNK_SIZE: usize = 256;
const CHANNEL_CAPACITY: usize = 64;

/// Start forwarding standard input.
///
/// # Errors
///
/// Returns an error if the reader thread cannot be spawned.
pub fn spawn_stdin() -> io::Result<ChannelSource> {
    spawn_reader("stdin-reader", io::stdin(), |_| {}, false)
}

/// Open the controlling terminal and start forwarding it.
///
/// The thread keeps watching for Ctrl-C after the returned source is dropped.
///
/// # Errors
///
/// Returns an error if the terminal cannot be opened or the thread cannot be
/// spawned.
pub fn spawn_tty(notifications: &Notifications) -> io::Result<ChannelSource> {
    let tty = File::open(TTY_PATH)?;
    let notifications = notifications.clone();
    spawn_reader("tty-reader", tty, move |bytes| watch_interrupt(&notifications, bytes), true)
}

/// Attach the terminal source from `open_tty` to `primary`.
///
/// When `gated`, the terminal is the start gate and failing to open it is
/// fatal. Otherwise the opened source is dropped right away, leaving its
/// thread watching for Ctrl-C, and an open failure only loses that watch.
///
/// # Errors
///
/// Returns [`TerminalError::TtyUnavailable`] when `gated` and `open_tty`
/// fails.
pub fn select_input<F>(
    primary: ChannelSource,
    gated: bool,
    open_tty: F,
) -> Result<InputMultiplexer<ChannelSource>, TerminalError>
where
    F: FnOnce() -> io::Result<ChannelSource>,
{
    match open_tty() {
        Ok(gate) if gated => Ok(InputMultiplexer::gated(primary, gate)),
        Ok(_keyboard) => Ok(InputMultiplexer::new(primary)),
        Err(source) if gated => Err(TerminalError::TtyUnavailable { path: TTY_PATH, source }),
        Err(e) => {
            warn!("Ctrl-C on {TTY_PATH} unavailable: {e}");
            Ok(InputMultiplexer::new(primary))
        },
    }
}

fn watch_interrupt(notifications: &Notifications, bytes: &[u8]) {
    if bytes.contains(&INTERRUPT_BYTE) {
        debug!("Ctrl-C on terminal");
        notifications.raise_interrupt();
    }
}

/// Spawn a named thread pumping `reader` into a new channel.
///
/// `inspect` sees every chunk before it is forwarded. With `keep_reading`,
/// the thread outlives the receiver and only stops forwarding.
pub(crate) fn spawn_reader<R, F>(
    name: &str,
    reader: R,
    inspect: F,
    keep_reading: bool,
) -> io::Result<ChannelSource>
where
    R: Read + Send + 'static,
    F: FnMut(&[u8]) + Send + 'static,
{
    let (tx, source) = ChannelSource::channel(CHANNEL_CAPACITY);
    let thread_name = name.to_string();
    thread::Builder::new()
        .name(thread_name.clone())
        .spawn(move || pump(&thread_name, reader, inspect, &tx, keep_reading))?;
    Ok(source)
}

fn pump<R, F>(name: &str, mut reader: R, mut inspect: F, tx: &Sender<Chunk>, keep_reading: bool)
where
    R: Read,
    F: FnMut(&[u8]),
{
    let mut buf = [0u8; CHUNK_SIZE];
    let mut forwarding = true;

    loop {
        match reader.read(&mut buf) {
            Ok(0) => {
                debug!("{name}: end of stream");
                return;
            },
            Ok(n) => {
                inspect(&buf[..n]);
                if forwarding && tx.blocking_send(Ok(buf[..n].to_vec())).is_err() {
                    if !keep_reading {
                        return;
                    }
                    forwarding = false;
                }
            },
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {},
            Err(e) => {
                warn!("{name}: read failed: {e}");
                let _ = tx.blocking_send(Err(e));
                return;
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{io::Cursor, time::Duration};

    use stackscope_core::{ByteSource, Readiness};

    use super::*;

    const WAIT: Duration = Duration::from_secs(5);

    /// Read everything until end-of-stream.
    async fn drain(source: &mut ChannelSource) -> io::Result<Vec<u8>> {
        let mut out = Vec::new();
        let mut buf = [0u8; 16];
        loop {
            if source.poll(WAIT).await? == Readiness::Timeout {
                continue;
            }
            match source.read(&mut buf) {
                Ok(0) => return Ok(out),
                Ok(n) => out.extend_from_slice(&buf[..n]),
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => {},
                Err(e) => return Err(e),
            }
        }
    }

    /// Reader that yields one transient error before its bytes.
    struct Flaky {
        interrupted: bool,
        inner: Cursor<Vec<u8>>,
    }

    impl Read for Flaky {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if !self.interrupted {
                self.interrupted = true;
                return Err(io::ErrorKind::Interrupted.into());
            }
            self.inner.read(buf)
        }
    }

    /// Reader that always fails.
    struct Broken;

    impl Read for Broken {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("device gone"))
        }
    }

    #[tokio::test]
    async fn forwards_bytes_then_end_of_stream() {
        let bytes = b"sa\npb\nrra\n".to_vec();
        let mut source = spawn_reader("test", Cursor::new(bytes.clone()), |_| {}, false).unwrap();

        assert_eq!(drain(&mut source).await.unwrap(), bytes);
    }

    #[tokio::test]
    async fn transient_errors_are_retried() {
        let reader = Flaky { interrupted: false, inner: Cursor::new(b"ra\n".to_vec()) };
        let mut source = spawn_reader("test", reader, |_| {}, false).unwrap();

        assert_eq!(drain(&mut source).await.unwrap(), b"ra\n");
    }

    #[tokio::test]
    async fn read_failure_is_forwarded() {
        let mut source = spawn_reader("test", Broken, |_| {}, false).unwrap();

        let err = drain(&mut source).await.unwrap_err();
        assert_eq!(err.to_string(), "device gone");
    }

    #[tokio::test]
    async fn interrupt_byte_raises_flag() {
        let notifications = Notifications::new();
        let watcher = notifications.clone();
        let mut source = spawn_reader(
            "test",
            Cursor::new(vec![b'x', INTERRUPT_BYTE]),
            move |bytes| watch_interrupt(&watcher, bytes),
            true,
        )
        .unwrap();

        assert_eq!(drain(&mut source).await.unwrap(), vec![b'x', INTERRUPT_BYTE]);
        assert!(notifications.interrupt_requested());
    }

    fn missing_tty() -> io::Result<ChannelSource> {
        Err(io::Error::new(io::ErrorKind::NotFound, "no controlling terminal"))
    }

    fn idle_source() -> ChannelSource {
        let (tx, source) = ChannelSource::channel(1);
        std::mem::forget(tx);
        source
    }

    #[test]
    fn gated_run_needs_the_terminal() {
        let result = select_input(idle_source(), true, missing_tty);

        match result {
            Err(TerminalError::TtyUnavailable { path, source }) => {
                assert_eq!(path, TTY_PATH);
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            },
            Err(e) => panic!("unexpected error: {e}"),
            Ok(_) => panic!("gated run started without a terminal"),
        }
    }

    #[test]
    fn ungated_run_survives_missing_terminal() {
        let input = select_input(idle_source(), false, missing_tty).unwrap();
        assert!(!input.has_gate());
    }

    #[test]
    fn gated_run_attaches_the_terminal() {
        let input = select_input(idle_source(), true, || Ok(idle_source())).unwrap();
        assert!(input.has_gate());
    }

    #[test]
    fn ungated_run_drops_the_terminal_source() {
        let (tty_tx, tty) = ChannelSource::channel(1);
        let input = select_input(idle_source(), false, move || Ok(tty)).unwrap();

        assert!(!input.has_gate());
        assert!(tty_tx.is_closed());
    }

    #[test]
    fn plain_keystrokes_do_not_interrupt() {
        let notifications = Notifications::new();
        watch_interrupt(&notifications, b" q\n");
        assert!(!notifications.interrupt_requested());
    }
}

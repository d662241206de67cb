//! Readiness-polled byte sources.
//!
//! [`ByteSource`] is the seam between the run loop and the operating system.
//! The terminal frontend feeds a [`ChannelSource`] from a dedicated reader
//! thread per file descriptor. Tests implement the trait over scripted bytes.

use std::{future::Future, io, time::Duration};

use tokio::sync::mpsc::{self, error::TryRecvError};

/// Outcome of a bounded readiness wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    /// At least one byte, or end-of-stream, can be read without blocking.
    Ready,
    /// Nothing arrived before the timeout.
    Timeout,
}

/// A byte stream that can be polled with a timeout.
///
/// # Contract
///
/// - `poll` never waits longer than `timeout`.
/// - After `poll` reports [`Readiness::Ready`], `read` does not block.
/// - `read` returns `Ok(0)` only at end-of-stream, and keeps returning it.
/// - `read` returns [`io::ErrorKind::WouldBlock`] when no byte is available.
/// - [`io::ErrorKind::Interrupted`] from either method is transient.
pub trait ByteSource: Send {
    /// Wait up to `timeout` for data or end-of-stream.
    fn poll(&mut self, timeout: Duration) -> impl Future<Output = io::Result<Readiness>> + Send;

    /// Read available bytes into `buf` without blocking.
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize>;
}

/// Chunk message sent by a reader thread.
pub type Chunk = io::Result<Vec<u8>>;

/// [`ByteSource`] fed through a channel.
///
/// Each message is a chunk of bytes or a read error. Dropping every sender
/// marks end-of-stream. Dropping the source closes the channel so the feeding
/// thread observes a failed send.
#[derive(Debug)]
pub struct ChannelSource {
    rx: mpsc::Receiver<Chunk>,
    pending: Vec<u8>,
    offset: usize,
    closed: bool,
}

impl ChannelSource {
    /// Wrap an existing receiver.
    pub fn new(rx: mpsc::Receiver<Chunk>) -> Self {
        Self { rx, pending: Vec::new(), offset: 0, closed: false }
    }

    /// Create a bounded channel and the source reading from it.
    pub fn channel(capacity: usize) -> (mpsc::Sender<Chunk>, Self) {
        let (tx, rx) = mpsc::channel(capacity);
        (tx, Self::new(rx))
    }

    fn has_pending(&self) -> bool {
        self.offset < self.pending.len()
    }

    fn stash(&mut self, chunk: Vec<u8>) {
        self.pending = chunk;
        self.offset = 0;
    }

    fn drain_into(&mut self, buf: &mut [u8]) -> usize {
        let available = &self.pending[self.offset..];
        let n = available.len().min(buf.len());
        buf[..n].copy_from_slice(&available[..n]);
        self.offset += n;
        n
    }
}

impl ByteSource for ChannelSource {
    async fn poll(&mut self, timeout: Duration) -> io::Result<Readiness> {
        if self.has_pending() || self.closed {
            return Ok(Readiness::Ready);
        }

        match tokio::time::timeout(timeout, self.rx.recv()).await {
            Err(_elapsed) => Ok(Readiness::Timeout),
            Ok(None) => {
                self.closed = true;
                Ok(Readiness::Ready)
            },
            Ok(Some(Ok(chunk))) if chunk.is_empty() => Ok(Readiness::Timeout),
            Ok(Some(Ok(chunk))) => {
                self.stash(chunk);
                Ok(Readiness::Ready)
            },
            Ok(Some(Err(e))) => Err(e),
        }
    }

    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        loop {
            if self.has_pending() {
                return Ok(self.drain_into(buf));
            }
            if self.closed {
                return Ok(0);
            }

            match self.rx.try_recv() {
                Ok(Ok(chunk)) => self.stash(chunk),
                Ok(Err(e)) => return Err(e),
                Err(TryRecvError::Empty) => return Err(io::ErrorKind::WouldBlock.into()),
                Err(TryRecvError::Disconnected) => self.closed = true,
            }
        }
    }
}

//! Token stream over polled byte sources.
//!
//! [`InputMultiplexer`] turns the primary [`ByteSource`] into whitespace
//! delimited [`Token`]s and, when a gate is attached, watches a second source
//! for the start byte.
//!
//! # Invariants
//!
//! - A token completes only at a delimiter byte. Bytes pending when the
//!   primary source closes are discarded.
//! - A token never exceeds [`MAX_TOKEN_LEN`] bytes. Bytes past the bound are
//!   dropped and the truncated token is still emitted at the next whitespace.
//! - Once the primary source reaches end-of-stream every later
//!   [`InputMultiplexer::read_token`] returns [`TokenRead::EndOfStream`].
//! - A closed gate is never polled again.

use std::{borrow::Cow, fmt, io, time::Duration};

use crate::{ByteSource, ChannelSource, Readiness};

/// Longest token kept, in bytes.
pub const MAX_TOKEN_LEN: usize = 99;

/// Byte on the gate source that starts the run.
pub const GATE_START_BYTE: u8 = b' ';

const READ_CHUNK: usize = 256;

/// A complete whitespace-delimited token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token(Vec<u8>);

impl Token {
    /// Create a token from raw bytes.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Token as text, replacing invalid UTF-8.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.0)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

/// Result of [`InputMultiplexer::read_token`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenRead {
    /// A complete token.
    Token(Token),
    /// Bytes were consumed but no token is complete yet.
    Incomplete,
    /// The primary source is closed.
    EndOfStream,
}

/// Result of [`InputMultiplexer::poll_gate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateSignal {
    /// The start byte arrived.
    Open,
    /// No start byte yet.
    Pending,
    /// No gate is attached, or the gate source reached end-of-stream.
    Closed,
}

/// Token delimiters: space, tab, newline, vertical tab, form feed, carriage
/// return.
pub fn is_delimiter(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\x0B' | b'\x0C' | b'\r')
}

/// Accumulates bytes into bounded tokens.
#[derive(Debug, Default)]
struct Tokenizer {
    buf: Vec<u8>,
}

impl Tokenizer {
    fn push(&mut self, byte: u8) -> Option<Token> {
        if is_delimiter(byte) {
            return self.finish();
        }
        if self.buf.len() < MAX_TOKEN_LEN {
            self.buf.push(byte);
        }
        None
    }

    fn discard(&mut self) {
        self.buf.clear();
    }

    fn finish(&mut self) -> Option<Token> {
        if self.buf.is_empty() {
            return None;
        }
        Some(Token(std::mem::take(&mut self.buf)))
    }
}

/// Multiplexes the primary command source and the optional start gate.
#[derive(Debug)]
pub struct InputMultiplexer<P, G = ChannelSource> {
    primary: P,
    gate: Option<G>,
    tokenizer: Tokenizer,
    scratch: [u8; READ_CHUNK],
    filled: usize,
    cursor: usize,
    eof: bool,
}

impl<P: ByteSource> InputMultiplexer<P> {
    /// Multiplexer without a gate.
    pub fn new(primary: P) -> Self {
        Self::build(primary, None)
    }
}

impl<P: ByteSource, G: ByteSource> InputMultiplexer<P, G> {
    /// Multiplexer that watches `gate` for [`GATE_START_BYTE`].
    pub fn gated(primary: P, gate: G) -> Self {
        Self::build(primary, Some(gate))
    }

    fn build(primary: P, gate: Option<G>) -> Self {
        Self {
            primary,
            gate,
            tokenizer: Tokenizer::default(),
            scratch: [0; READ_CHUNK],
            filled: 0,
            cursor: 0,
            eof: false,
        }
    }

    /// True while a gate is attached and not yet closed.
    pub fn has_gate(&self) -> bool {
        self.gate.is_some()
    }

    /// True once the primary source has reported end-of-stream.
    pub fn is_drained(&self) -> bool {
        self.eof
    }

    /// Wait up to `timeout` for the primary source.
    ///
    /// Ready immediately while buffered bytes remain or after end-of-stream.
    pub async fn poll(&mut self, timeout: Duration) -> io::Result<Readiness> {
        if self.eof || self.cursor < self.filled {
            return Ok(Readiness::Ready);
        }
        self.primary.poll(timeout).await
    }

    /// Consume bytes until a token completes or the available input runs out.
    ///
    /// Performs at most one read on the primary source. Bytes without a
    /// trailing delimiter at end-of-stream never form a token.
    pub fn read_token(&mut self) -> io::Result<TokenRead> {
        if self.eof {
            return Ok(TokenRead::EndOfStream);
        }

        if let Some(token) = self.scan() {
            return Ok(TokenRead::Token(token));
        }

        match self.primary.read(&mut self.scratch) {
            Ok(0) => {
                self.eof = true;
                self.tokenizer.discard();
                Ok(TokenRead::EndOfStream)
            },
            Ok(n) => {
                self.filled = n;
                self.cursor = 0;
                Ok(self.scan().map_or(TokenRead::Incomplete, TokenRead::Token))
            },
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => Ok(TokenRead::Incomplete),
            Err(e) => Err(e),
        }
    }

    /// Feed buffered bytes to the tokenizer until a token completes.
    fn scan(&mut self) -> Option<Token> {
        while self.cursor < self.filled {
            let byte = self.scratch[self.cursor];
            self.cursor += 1;
            if let Some(token) = self.tokenizer.push(byte) {
                return Some(token);
            }
        }
        None
    }

    /// Wait up to `timeout` for the gate's start byte.
    ///
    /// Other bytes are discarded.
    pub async fn poll_gate(&mut self, timeout: Duration) -> io::Result<GateSignal> {
        let Some(gate) = self.gate.as_mut() else {
            return Ok(GateSignal::Closed);
        };

        if gate.poll(timeout).await? == Readiness::Timeout {
            return Ok(GateSignal::Pending);
        }

        let mut buf = [0u8; 32];
        match gate.read(&mut buf) {
            Ok(0) => Ok(GateSignal::Closed),
            Ok(n) if buf[..n].contains(&GATE_START_BYTE) => Ok(GateSignal::Open),
            Ok(_) => Ok(GateSignal::Pending),
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => Ok(GateSignal::Pending),
            Err(e) => Err(e),
        }
    }

    /// Detach and drop the gate source.
    pub fn close_gate(&mut self) {
        self.gate = None;
    }
}

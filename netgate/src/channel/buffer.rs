//! Accumulates shell output and looks for prompts near its end.
//!
//! Prompts only ever appear at the end of what the device has sent, so only
//! the last `search_depth` bytes are scanned after each packet. Long outputs
//! such as a full interface table stay linear to read.

use bytes::BytesMut;
use regex::bytes::Regex;
use vte::{Parser, Perform};

/// Buffer for accumulating output and searching its tail for patterns.
///
/// ANSI escape sequences are stripped on the way in. The escape parser keeps
/// its state between `extend` calls, so a sequence split across two SSH
/// packets is still removed.
pub struct PatternBuffer {
    /// The accumulated, cleaned output.
    buffer: BytesMut,

    /// How many bytes from the end to search for patterns.
    search_depth: usize,

    parser: Parser,
}

impl PatternBuffer {
    pub fn new(search_depth: usize) -> Self {
        Self {
            buffer: BytesMut::with_capacity(4096),
            search_depth,
            parser: Parser::new(),
        }
    }

    /// Append raw channel data, minus terminal escape sequences.
    pub fn extend(&mut self, data: &[u8]) {
        let mut sink = Printable {
            out: &mut self.buffer,
        };
        self.parser.advance(&mut sink, data);
    }

    /// Search only the last `search_depth` bytes of the buffer.
    ///
    /// Offsets in the returned match are relative to the start of the
    /// searched region, not the full buffer.
    pub fn search_tail(&self, pattern: &Regex) -> Option<regex::bytes::Match<'_>> {
        pattern.find(self.tail())
    }

    pub fn tail_contains(&self, pattern: &Regex) -> bool {
        self.search_tail(pattern).is_some()
    }

    /// Everything after the final newline: the partial line the device is
    /// still writing, usually a prompt.
    pub fn last_line(&self) -> &[u8] {
        match memchr::memrchr(b'\n', &self.buffer) {
            Some(pos) => &self.buffer[pos + 1..],
            None => &self.buffer,
        }
    }

    /// Drain the buffer.
    pub fn take(&mut self) -> Vec<u8> {
        self.buffer.split().to_vec()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buffer
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    fn tail(&self) -> &[u8] {
        let start = self.buffer.len().saturating_sub(self.search_depth);
        &self.buffer[start..]
    }
}

impl Default for PatternBuffer {
    fn default() -> Self {
        Self::new(1000)
    }
}

impl std::fmt::Debug for PatternBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PatternBuffer")
            .field("len", &self.buffer.len())
            .field("search_depth", &self.search_depth)
            .finish()
    }
}

/// vte performer that keeps printable text and line control characters.
struct Printable<'a> {
    out: &'a mut BytesMut,
}

impl Perform for Printable<'_> {
    fn print(&mut self, c: char) {
        let mut utf8 = [0u8; 4];
        self.out
            .extend_from_slice(c.encode_utf8(&mut utf8).as_bytes());
    }

    fn execute(&mut self, byte: u8) {
        if matches!(byte, b'\n' | b'\r' | b'\t') {
            self.out.extend_from_slice(&[byte]);
        }
    }
}

//! PTY channel for interactive device sessions.

use std::time::Duration;

use log::trace;
use regex::bytes::Regex;
use russh::client::Msg;
use russh::{Channel, ChannelMsg};
use tokio::time::Instant;

use super::buffer::PatternBuffer;
use crate::error::{ChannelError, Result};

/// Default number of trailing bytes searched for a prompt.
pub const DEFAULT_SEARCH_DEPTH: usize = 1000;

/// Interactive shell channel with pattern-based reads.
///
/// Wraps a russh channel that already has a PTY and shell. Output is
/// accumulated in a [`PatternBuffer`] until the requested pattern shows up
/// in its tail.
pub struct PtyChannel {
    channel: Channel<Msg>,
    buffer: PatternBuffer,
}

impl PtyChannel {
    pub fn new(channel: Channel<Msg>) -> Self {
        Self::with_search_depth(channel, DEFAULT_SEARCH_DEPTH)
    }

    pub fn with_search_depth(channel: Channel<Msg>, search_depth: usize) -> Self {
        Self {
            channel,
            buffer: PatternBuffer::new(search_depth),
        }
    }

    /// Send a line of input followed by a newline.
    pub async fn send(&mut self, input: &str) -> Result<()> {
        let mut line = Vec::with_capacity(input.len() + 1);
        line.extend_from_slice(input.as_bytes());
        line.push(b'\n');

        self.channel
            .data(line.as_slice())
            .await
            .map_err(ChannelError::Ssh)?;
        Ok(())
    }

    /// Read until `pattern` matches the tail of the buffer.
    ///
    /// Returns everything accumulated up to and including the match; the
    /// buffer is left empty for the next command.
    pub async fn read_until_pattern(
        &mut self,
        pattern: &Regex,
        timeout: Duration,
    ) -> Result<Vec<u8>> {
        let deadline = Instant::now() + timeout;

        loop {
            if self.buffer.tail_contains(pattern) {
                return Ok(self.buffer.take());
            }

            let msg = tokio::time::timeout_at(deadline, self.channel.wait())
                .await
                .map_err(|_| ChannelError::PatternTimeout(timeout))?;

            match msg {
                Some(ChannelMsg::Data { ref data }) => {
                    trace!("read {} bytes", data.len());
                    self.buffer.extend(data);
                }
                Some(ChannelMsg::ExtendedData { ref data, .. }) => {
                    self.buffer.extend(data);
                }
                Some(ChannelMsg::Eof) | Some(ChannelMsg::Close) | None => {
                    return Err(ChannelError::Closed.into());
                }
                Some(_) => {}
            }
        }
    }

    /// Text received so far that hasn't been consumed by a read.
    pub fn pending(&self) -> &PatternBuffer {
        &self.buffer
    }

    /// Send EOF and close the channel.
    pub async fn close(self) -> Result<()> {
        let _ = self.channel.eof().await;
        self.channel.close().await.map_err(ChannelError::Ssh)?;
        Ok(())
    }
}

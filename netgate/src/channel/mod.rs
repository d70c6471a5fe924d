//! Channel layer for pattern matching and PTY operations.
//!
//! This module handles the interactive session: accumulating output,
//! stripping ANSI escapes and waiting for prompts.

mod buffer;
mod pty;

pub use buffer::PatternBuffer;
pub use pty::{DEFAULT_SEARCH_DEPTH, PtyChannel};

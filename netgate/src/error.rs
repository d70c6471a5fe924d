//! Errors raised while talking to a device.
//!
//! Each layer has its own enum; [`Error`] wraps whichever layer failed so
//! callers can match on the layer or just print the chain.

use std::io;
use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Channel error: {0}")]
    Channel(#[from] ChannelError),

    #[error("Driver error: {0}")]
    Driver(#[from] DriverError),

    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),
}

/// Reaching and logging in to the device.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("SSH error: {0}")]
    Ssh(#[from] russh::Error),

    #[error("Authentication failed for user '{user}'")]
    AuthenticationFailed { user: String },

    /// Strict checking is on and the host is not in known_hosts.
    #[error("{host}:{port} is not in known_hosts")]
    HostKeyUnknown { host: String, port: u16 },

    #[error("host key for {host}:{port} does not match known_hosts line {line}")]
    HostKeyChanged { host: String, port: u16, line: usize },

    #[error("known_hosts: {0}")]
    KnownHosts(String),

    /// Connect plus authentication took longer than the configured timeout.
    #[error("connect timed out after {0:?}")]
    Timeout(Duration),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// The interactive shell channel.
#[derive(Error, Debug)]
pub enum ChannelError {
    #[error("could not open shell channel: {0}")]
    PtyOpenFailed(russh::Error),

    /// No prompt (or other expected text) arrived in time.
    #[error("no prompt within {0:?}")]
    PatternTimeout(Duration),

    #[error("Channel closed")]
    Closed,

    #[error("SSH error on channel: {0}")]
    Ssh(russh::Error),
}

/// Driving the CLI: session state and mode changes.
#[derive(Error, Debug)]
pub enum DriverError {
    #[error("not connected")]
    NotConnected,

    #[error("already connected")]
    AlreadyConnected,

    /// A mode change was sent but the device ended up somewhere else.
    #[error("could not enter privilege level '{target}'")]
    PrivilegeAcquisitionFailed { target: String },

    #[error("invalid driver configuration: {message}")]
    InvalidConfig { message: String },

    #[error("prompt '{prompt}' matches no privilege level")]
    UnknownPrivilege { prompt: String },

    #[error("no route from privilege level '{from}' to '{to}'")]
    NoPrivilegePath { from: String, to: String },
}

/// Dialect lookup and definition problems.
#[derive(Error, Debug)]
pub enum PlatformError {
    #[error("unknown platform '{name}'")]
    UnknownPlatform { name: String },

    #[error("invalid platform definition: {message}")]
    InvalidDefinition { message: String },
}

pub type Result<T> = std::result::Result<T, Error>;

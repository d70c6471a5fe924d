//! SSH connection configuration.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

/// Host key verification mode, analogous to OpenSSH's `StrictHostKeyChecking`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HostKeyVerification {
    /// Reject unknown and changed keys. Connection fails if the host
    /// is not already in known_hosts.
    Strict,

    /// Accept and auto-learn unknown keys, but reject changed keys.
    #[default]
    AcceptNew,

    /// Accept all keys without checking. For lab use only.
    Disabled,
}

impl FromStr for HostKeyVerification {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "accept-new" | "accept_new" => Ok(Self::AcceptNew),
            "disabled" | "off" | "no" => Ok(Self::Disabled),
            other => Err(format!("unknown host key verification mode '{other}'")),
        }
    }
}

/// Everything needed to open one SSH session.
#[derive(Debug, Clone)]
pub struct SshConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub auth: AuthMethod,

    /// Bounds connect plus login, and each wait for a prompt.
    pub timeout: Duration,

    /// PTY size requested for the shell.
    pub terminal_width: u32,
    pub terminal_height: u32,

    pub host_key_verification: HostKeyVerification,

    /// `None` uses `~/.ssh/known_hosts`.
    pub known_hosts_path: Option<PathBuf>,
}

impl SshConfig {
    /// `host:port`, for logs and error messages.
    pub fn target(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// How to log in.
pub enum AuthMethod {
    Password(SecretString),
}

impl AuthMethod {
    /// The login password.
    ///
    /// Also used to answer `enable`-style escalation prompts.
    pub fn password(&self) -> &str {
        match self {
            AuthMethod::Password(secret) => secret.expose_secret(),
        }
    }
}

impl Clone for AuthMethod {
    fn clone(&self) -> Self {
        match self {
            AuthMethod::Password(secret) => {
                AuthMethod::Password(SecretString::from(secret.expose_secret().to_owned()))
            }
        }
    }
}

impl fmt::Debug for AuthMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthMethod::Password(_) => f.write_str("Password(<redacted>)"),
        }
    }
}

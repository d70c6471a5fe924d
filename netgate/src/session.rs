//! One-shot device sessions.
//!
//! Every call opens a fresh SSH session to the configured device, runs a
//! query or a configuration set, and closes the session before returning,
//! whether the operation succeeded or not. Nothing is pooled or reused.

use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

use log::{debug, info, warn};
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use crate::driver::{Driver, DriverBuilder, GenericDriver};
use crate::error::Error;
use crate::platform::Platform;
use crate::transport::HostKeyVerification;

/// Connect timeout and per-prompt read timeout unless configured otherwise.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// The single device this process talks to.
///
/// Built once at startup and shared read-only with every request.
#[derive(Debug)]
pub struct DeviceConfig {
    /// CLI dialect.
    pub platform: Platform,
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: SecretString,
    /// Connect timeout and per-prompt read timeout.
    pub timeout: Duration,
    pub host_key_verification: HostKeyVerification,
    pub known_hosts_path: Option<PathBuf>,
}

impl DeviceConfig {
    pub fn new(
        platform: Platform,
        host: impl Into<String>,
        username: impl Into<String>,
        password: SecretString,
    ) -> Self {
        Self {
            platform,
            host: host.into(),
            port: 22,
            username: username.into(),
            password,
            timeout: DEFAULT_TIMEOUT,
            host_key_verification: HostKeyVerification::default(),
            known_hosts_path: None,
        }
    }

    /// `host:port`, for logs and error messages.
    pub fn target(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    fn driver(&self) -> Result<GenericDriver, Error> {
        let mut builder = DriverBuilder::new(&self.host)
            .port(self.port)
            .username(&self.username)
            .password(self.password.expose_secret())
            .platform(self.platform)
            .timeout(self.timeout)
            .host_key_verification(self.host_key_verification);

        if let Some(ref path) = self.known_hosts_path {
            builder = builder.known_hosts_path(path);
        }

        builder.build()
    }
}

/// What went wrong in a device session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionErrorKind {
    /// Could not reach, authenticate to, or get a prompt from the device.
    Connection,
    /// The session was up but a command could not be completed.
    Command,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("connection to {target} failed: {source}")]
    Connection {
        target: String,
        #[source]
        source: Error,
    },

    #[error("command failed on {target}: {source}")]
    Command {
        target: String,
        #[source]
        source: Error,
    },
}

impl SessionError {
    pub fn kind(&self) -> SessionErrorKind {
        match self {
            SessionError::Connection { .. } => SessionErrorKind::Connection,
            SessionError::Command { .. } => SessionErrorKind::Command,
        }
    }
}

/// Runs CLI commands against the device.
///
/// The HTTP layer depends on this trait rather than on SSH directly, so a
/// fake can stand in for the device in tests.
pub trait DeviceAdapter: Send + Sync + 'static {
    /// Run one operational command and return its output.
    fn run_query(&self, command: &str) -> impl Future<Output = Result<String, SessionError>> + Send;

    /// Run commands in configuration mode, in order, and return the
    /// combined session text.
    ///
    /// A command the device rejects does not stop the sequence; its error
    /// text ends up in the returned output.
    fn run_config_set(
        &self,
        commands: &[String],
    ) -> impl Future<Output = Result<String, SessionError>> + Send;
}

/// [`DeviceAdapter`] over SSH.
#[derive(Debug)]
pub struct SshDeviceAdapter {
    config: DeviceConfig,
}

impl SshDeviceAdapter {
    pub fn new(config: DeviceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }

    /// Connect and wait for the device to be ready for commands.
    ///
    /// On failure anything already opened is torn down before returning.
    async fn open_session(&self) -> Result<DeviceSession, SessionError> {
        let target = self.config.target();
        let connection_error = |source| SessionError::Connection {
            target: target.clone(),
            source,
        };

        let mut driver = self.config.driver().map_err(connection_error)?;

        if let Err(e) = driver.open().await {
            if let Err(close_err) = driver.close().await {
                debug!("{}: close after failed open: {}", target, close_err);
            }
            return Err(connection_error(e));
        }

        debug!("{}: session open", target);
        Ok(DeviceSession {
            driver,
            target: target.clone(),
        })
    }
}

impl DeviceAdapter for SshDeviceAdapter {
    async fn run_query(&self, command: &str) -> Result<String, SessionError> {
        let mut session = self.open_session().await?;

        let outcome = session.driver.send_command(command).await;
        let target = session.release().await;

        let response = outcome.map_err(|source| SessionError::Command { target, source })?;
        if let Some(ref failure) = response.failure_message {
            warn!("query {:?} rejected by device: {}", command, failure);
        }

        info!(
            "query {:?} completed in {:?} ({} bytes)",
            command,
            response.elapsed,
            response.result.len()
        );
        Ok(response.result)
    }

    async fn run_config_set(&self, commands: &[String]) -> Result<String, SessionError> {
        let mut session = self.open_session().await?;

        let commands: Vec<&str> = commands.iter().map(String::as_str).collect();
        let outcome = session.driver.send_config(&commands).await;
        let target = session.release().await;

        let output = outcome.map_err(|source| SessionError::Command { target, source })?;
        info!("config set of {} commands applied", commands.len());
        Ok(output)
    }
}

/// An open device session. Must be given back with [`release`](Self::release).
struct DeviceSession {
    driver: GenericDriver,
    target: String,
}

impl DeviceSession {
    /// Close the session. Close failures are logged, never returned, so
    /// they can't mask the result of the operation that ran.
    async fn release(mut self) -> String {
        if let Err(e) = self.driver.close().await {
            warn!("{}: error closing session: {}", self.target, e);
        } else {
            debug!("{}: session closed", self.target);
        }
        self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ChannelError, TransportError};
    use crate::testing::{Behavior, FakeRouter};

    fn loopback(address: &str) -> Vec<String> {
        ["interface Loopback5", &format!("ip address {address}"), "commit", "exit"]
            .iter()
            .map(|line| line.to_string())
            .collect()
    }

    fn config() -> DeviceConfig {
        DeviceConfig::new(
            Platform::CiscoIosXr,
            "sandbox-iosxr-1.cisco.com",
            "admin",
            SecretString::from("hunter2".to_string()),
        )
    }

    #[test]
    fn test_device_config_defaults() {
        let config = config();
        assert_eq!(config.port, 22);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert_eq!(config.target(), "sandbox-iosxr-1.cisco.com:22");
        assert!(!format!("{:?}", config).contains("hunter2"));
    }

    #[test]
    fn test_driver_from_config() {
        let driver = config().driver().unwrap();
        assert_eq!(driver.platform().name, "cisco_iosxr");
        assert!(!driver.is_open());
    }

    #[test]
    fn test_error_kinds() {
        let err = SessionError::Connection {
            target: "r1:22".to_string(),
            source: TransportError::AuthenticationFailed {
                user: "admin".to_string(),
            }
            .into(),
        };
        assert_eq!(err.kind(), SessionErrorKind::Connection);
        assert_eq!(
            err.to_string(),
            "connection to r1:22 failed: Transport error: Authentication failed for user 'admin'"
        );

        let err = SessionError::Command {
            target: "r1:22".to_string(),
            source: ChannelError::Closed.into(),
        };
        assert_eq!(err.kind(), SessionErrorKind::Command);
    }

    #[tokio::test]
    async fn test_unreachable_device_is_connection_error() {
        // Nothing listens on port 1 of the loopback address
        let mut config = config();
        config.host = "127.0.0.1".to_string();
        config.port = 1;
        config.timeout = Duration::from_secs(5);

        let adapter = SshDeviceAdapter::new(config);
        let err = adapter.run_query("show version").await.unwrap_err();
        assert_eq!(err.kind(), SessionErrorKind::Connection);

        let err = adapter
            .run_config_set(&["interface Loopback5".to_string()])
            .await
            .unwrap_err();
        assert_eq!(err.kind(), SessionErrorKind::Connection);
    }

    #[tokio::test]
    async fn test_query_over_ssh() {
        let router = FakeRouter::start(Behavior::default()).await;
        let adapter = SshDeviceAdapter::new(router.device_config());

        let output = adapter.run_query("show ip interface brief").await.unwrap();
        assert!(output.starts_with("Interface"));
        assert!(output.contains("Loopback0                      10.0.0.1"));
        assert!(!output.contains("RP/0/RP0/CPU0:router#"));

        assert_eq!(
            router.received(),
            vec!["terminal length 0", "terminal width 511", "show ip interface brief"]
        );
        assert!(router.wait_idle(Duration::from_secs(2)).await);
    }

    #[tokio::test]
    async fn test_wrong_password_is_connection_error() {
        let router = FakeRouter::start(Behavior::default()).await;
        let mut config = router.device_config();
        config.password = SecretString::from("wrong".to_string());

        let err = SshDeviceAdapter::new(config)
            .run_query("show ip interface brief")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), SessionErrorKind::Connection);
        assert!(err.to_string().contains("Authentication failed for user 'admin'"));
        assert!(router.received().is_empty());
    }

    #[tokio::test]
    async fn test_rejected_address_does_not_stop_config_set() {
        let router = FakeRouter::start(Behavior::default()).await;
        let adapter = SshDeviceAdapter::new(router.device_config());

        let output = adapter.run_config_set(&loopback("bogus")).await.unwrap();
        assert!(output.contains("% Invalid input detected at '^' marker."));

        // Lines after the rejected one still reach the device
        let received = router.received();
        let rejected = received.iter().position(|l| l == "ip address bogus").unwrap();
        assert_eq!(
            &received[rejected..],
            ["ip address bogus", "commit", "exit", "end"]
        );
        assert!(router.wait_idle(Duration::from_secs(2)).await);
    }

    #[tokio::test]
    async fn test_failed_commit_returns_device_text() {
        let router = FakeRouter::start(Behavior {
            fail_commit: true,
            ..Default::default()
        })
        .await;
        let adapter = SshDeviceAdapter::new(router.device_config());

        let output = adapter
            .run_config_set(&loopback("10.0.0.1 255.255.255.255"))
            .await
            .unwrap();
        assert!(output.contains("% Failed to commit"));
        assert!(output.contains("Uncommitted changes found"));
        assert!(output.trim_end().ends_with("RP/0/RP0/CPU0:router#"));

        let received = router.received();
        assert_eq!(&received[received.len() - 2..], ["end", "no"]);
        assert!(router.wait_idle(Duration::from_secs(2)).await);
    }

    #[tokio::test]
    async fn test_exit_with_staged_changes_is_answered() {
        let router = FakeRouter::start(Behavior {
            fail_commit: true,
            ..Default::default()
        })
        .await;
        let adapter = SshDeviceAdapter::new(router.device_config());

        // The second exit leaves configuration mode itself, so no end follows
        let mut commands = loopback("10.0.0.1/32");
        commands.push("exit".to_string());
        let output = adapter.run_config_set(&commands).await.unwrap();
        assert!(output.contains("Uncommitted changes found"));

        let received = router.received();
        assert_eq!(&received[received.len() - 3..], ["exit", "exit", "no"]);
    }

    #[tokio::test]
    async fn test_channel_drop_mid_sequence_closes_session() {
        let router = FakeRouter::start(Behavior {
            drop_on: Some("commit".to_string()),
            ..Default::default()
        })
        .await;
        let adapter = SshDeviceAdapter::new(router.device_config());

        let err = adapter
            .run_config_set(&loopback("10.0.0.1 255.255.255.255"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), SessionErrorKind::Command);
        assert!(matches!(
            err,
            SessionError::Command {
                source: Error::Channel(ChannelError::Closed),
                ..
            }
        ));

        assert_eq!(router.received().last().map(String::as_str), Some("commit"));
        assert!(router.wait_idle(Duration::from_secs(2)).await);
    }

    #[tokio::test]
    async fn test_refused_channel_is_connection_error() {
        let router = FakeRouter::start(Behavior {
            refuse_channel: true,
            ..Default::default()
        })
        .await;
        let adapter = SshDeviceAdapter::new(router.device_config());

        let err = adapter.run_query("show ip interface brief").await.unwrap_err();
        assert_eq!(err.kind(), SessionErrorKind::Connection);
        assert!(matches!(
            err,
            SessionError::Connection {
                source: Error::Channel(ChannelError::PtyOpenFailed(_)),
                ..
            }
        ));
        assert!(router.wait_idle(Duration::from_secs(2)).await);
    }
}

//! Configuration for the server and its device.
//!
//! Loaded once at startup from built-in defaults, YAML files and the
//! environment.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use config::builder::DefaultState;
use config::{Config as ConfigLoader, ConfigBuilder, ConfigError, Environment, File};
use netgate::{DEFAULT_TIMEOUT, DeviceConfig, HostKeyVerification, Platform};
use secrecy::SecretString;
use serde::Deserialize;

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub device: DeviceSettings,
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// The device every request is sent to.
#[derive(Clone, Deserialize)]
pub struct DeviceSettings {
    /// CLI dialect, e.g. `cisco_xr`.
    pub device_type: Platform,
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub timeout_secs: u64,
    pub host_key_verification: HostKeyVerification,
    #[serde(default)]
    pub known_hosts_path: Option<PathBuf>,
}

impl DeviceSettings {
    pub fn into_device_config(self) -> DeviceConfig {
        let mut device = DeviceConfig::new(
            self.device_type,
            self.host,
            self.username,
            SecretString::from(self.password),
        );
        device.port = self.port;
        device.timeout = Duration::from_secs(self.timeout_secs);
        device.host_key_verification = self.host_key_verification;
        device.known_hosts_path = self.known_hosts_path;
        device
    }
}

impl fmt::Debug for DeviceSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceSettings")
            .field("device_type", &self.device_type)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("timeout_secs", &self.timeout_secs)
            .field("host_key_verification", &self.host_key_verification)
            .field("known_hosts_path", &self.known_hosts_path)
            .finish()
    }
}

impl Config {
    /// Load configuration from files and environment.
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (NETGATE__*)
    /// 2. config/local.yaml (if exists)
    /// 3. config/default.yaml (if exists)
    /// 4. Built-in defaults
    pub fn load() -> Result<Self, ConfigError> {
        Self::with_defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(
                Environment::with_prefix("NETGATE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Loader pre-populated with the built-in defaults.
    fn with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        ConfigLoader::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 5000)?
            .set_default("device.device_type", "cisco_xr")?
            .set_default("device.host", "sandbox-iosxr-1.cisco.com")?
            .set_default("device.port", 22)?
            .set_default("device.username", "USER")?
            .set_default("device.password", "PASSWORD")?
            .set_default("device.timeout_secs", DEFAULT_TIMEOUT.as_secs())?
            .set_default("device.host_key_verification", "accept-new")
    }
}

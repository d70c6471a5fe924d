//! # Netgate
//!
//! Async SSH CLI sessions against a single network device.
//!
//! The [`session`] module is the entry point for applications: a
//! [`DeviceConfig`] describes the device, and a [`DeviceAdapter`] runs either
//! one operational command or an ordered configuration set over a fresh SSH
//! session per call.
//!
//! Underneath, the [`driver`] layer talks to the device's interactive shell:
//! it waits for prompts, tracks the CLI mode and moves between modes using
//! the dialect's [`platform`] definition.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use netgate::{DeviceAdapter, DeviceConfig, Platform, SshDeviceAdapter};
//! use secrecy::SecretString;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), netgate::SessionError> {
//!     let config = DeviceConfig::new(
//!         Platform::CiscoIosXr,
//!         "sandbox-iosxr-1.cisco.com",
//!         "admin",
//!         SecretString::from("secret".to_string()),
//!     );
//!     let adapter = SshDeviceAdapter::new(config);
//!
//!     let output = adapter.run_query("show ip interface brief").await?;
//!     println!("{output}");
//!     Ok(())
//! }
//! ```

pub mod channel;
pub mod driver;
pub mod error;
pub mod platform;
pub mod session;
pub mod transport;

#[cfg(test)]
mod testing;

pub use driver::{ConfigSession, Driver, DriverBuilder, GenericDriver, Response};
pub use error::Error;
pub use platform::{Confirmation, Platform, PlatformDefinition, PrivilegeLevel};
pub use session::{
    DEFAULT_TIMEOUT, DeviceAdapter, DeviceConfig, SessionError, SessionErrorKind, SshDeviceAdapter,
};
pub use transport::{AuthMethod, HostKeyVerification, SshConfig};

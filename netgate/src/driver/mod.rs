//! High-level driver for device interaction.
//!
//! The driver layer provides the main API for sending commands
//! and moving between CLI modes on a network device.

mod builder;
pub mod config_session;
mod generic;
mod privilege;
pub(crate) mod response;

pub use builder::DriverBuilder;
pub use config_session::ConfigSession;
pub use generic::GenericDriver;
pub use privilege::{PrivilegeManager, Transition};
pub use response::Response;

use std::future::Future;

use crate::error::Result;

/// Trait for device drivers.
pub trait Driver: Send {
    /// Open the connection to the device.
    fn open(&mut self) -> impl Future<Output = Result<()>> + Send;

    /// Close the connection.
    fn close(&mut self) -> impl Future<Output = Result<()>> + Send;

    /// Send a command and wait for the prompt.
    fn send_command(&mut self, command: &str) -> impl Future<Output = Result<Response>> + Send;

    /// Send commands in configuration mode.
    ///
    /// Enters configuration mode, sends every command in order, then returns
    /// to the starting privilege level. Commands the device rejects are
    /// logged and the sequence continues. Returns the raw session text.
    ///
    /// ```rust,no_run
    /// use netgate::driver::Driver;
    ///
    /// # async fn example(driver: &mut impl Driver) -> Result<(), netgate::Error> {
    /// let output = driver.send_config(&[
    ///     "interface Loopback5",
    ///     "ip address 10.0.0.1 255.255.255.255",
    ///     "commit",
    /// ]).await?;
    /// # Ok(())
    /// # }
    /// ```
    fn send_config(&mut self, commands: &[&str]) -> impl Future<Output = Result<String>> + Send;

    /// Move to a privilege level, returning the raw transition text.
    fn acquire_privilege(&mut self, privilege: &str)
    -> impl Future<Output = Result<String>> + Send;

    /// Check if the driver is connected.
    fn is_open(&self) -> bool;

    /// Check if the underlying SSH session is still alive.
    ///
    /// Returns `false` if the driver was never opened, the server
    /// disconnected, or the inactivity timeout killed the session.
    fn is_alive(&self) -> bool;

    /// Get the current privilege level name.
    fn current_privilege(&self) -> Option<&str>;
}

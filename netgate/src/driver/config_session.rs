//! Configuration mode as a scoped guard.
//!
//! The guard holds `&mut GenericDriver`, so nothing else can use the driver
//! while configuration mode is active, and [`ConfigSession::end`] consumes
//! the guard so it can only be ended once.
//!
//! A command the device rejects does not end the session: the rejection is
//! logged, recorded on the [`Response`], and the caller decides whether to
//! keep going.
//!
//! # Example
//!
//! ```rust,no_run
//! use netgate::{Driver, DriverBuilder, Platform};
//!
//! # async fn example() -> Result<(), netgate::Error> {
//! let mut driver = DriverBuilder::new("192.168.1.1")
//!     .username("admin")
//!     .password("secret")
//!     .platform(Platform::CiscoIosXr)
//!     .build()?;
//! driver.open().await?;
//!
//! let mut session = driver.config_session().await?;
//! session.send_command("interface Loopback5").await?;
//! session.send_command("commit").await?;
//! let transcript = session.end().await?;
//! println!("{transcript}");
//!
//! driver.close().await?;
//! # Ok(())
//! # }
//! ```

use log::{debug, warn};

use super::Driver;
use super::generic::GenericDriver;
use super::response::Response;
use crate::error::Result;

/// Guard for an active configuration mode.
///
/// Accumulates the raw session text (mode entry, every command with its
/// echo and prompt, mode exit) so callers can return the full exchange.
pub struct ConfigSession<'a> {
    driver: &'a mut GenericDriver,
    original_privilege: String,
    transcript: String,
    ended: bool,
}

impl<'a> ConfigSession<'a> {
    /// Save the current privilege level and escalate to the platform's
    /// configuration level.
    pub async fn new(driver: &'a mut GenericDriver) -> Result<Self> {
        let config_privilege = driver.platform().config_privilege.clone();
        let original_privilege = driver.current_privilege().unwrap_or_default().to_string();
        debug!(
            "entering config session (from {:?})",
            original_privilege
        );

        let transcript = driver.acquire_privilege(&config_privilege).await?;

        Ok(Self {
            driver,
            original_privilege,
            transcript,
            ended: false,
        })
    }

    /// Send a command inside configuration mode.
    pub async fn send_command(&mut self, cmd: &str) -> Result<Response> {
        let response = self.driver.send_command(cmd).await?;
        self.transcript.push_str(&response.raw_result);
        self.transcript.push('\n');

        if let Some(ref failure) = response.failure_message {
            warn!("config command {:?} rejected by device: {}", cmd, failure);
        }

        Ok(response)
    }

    /// Leave configuration mode and return the full transcript.
    ///
    /// Returns to the level the session started from. If a command in the
    /// session already left configuration mode (e.g. a trailing `exit`),
    /// this is a no-op.
    pub async fn end(mut self) -> Result<String> {
        self.ended = true;
        if !self.original_privilege.is_empty() {
            let exit = self
                .driver
                .acquire_privilege(&self.original_privilege)
                .await?;
            self.transcript.push_str(&exit);
        }
        debug!("config session ended");
        Ok(std::mem::take(&mut self.transcript))
    }
}

impl Drop for ConfigSession<'_> {
    fn drop(&mut self) {
        if !self.ended {
            warn!("ConfigSession dropped without end(); device left in configuration mode");
        }
    }
}

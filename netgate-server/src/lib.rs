//! HTTP front end for a single network device.
//!
//! Each endpoint turns a JSON request into CLI commands, runs them over a
//! fresh SSH session through a [`netgate::DeviceAdapter`] and returns the
//! device output as a list of trimmed, non-empty lines.

pub mod api;
pub mod config;
pub mod error;
pub mod logging;

pub use api::create_router;
pub use config::Config;
pub use error::{ApiError, ApiResult};

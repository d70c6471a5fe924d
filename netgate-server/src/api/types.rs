//! Request and response types for the API.

use serde::{Deserialize, Serialize};

/// Body of `POST /network_interaction`.
#[derive(Debug, Clone, Deserialize)]
pub struct RunCommandRequest {
    pub command: String,
}

/// Body of `POST /configure_loopback`.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigureLoopbackRequest {
    pub loopback_number: u32,
    pub ip_address: String,
}

/// Body of `POST /delete_loopback`.
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteLoopbackRequest {
    pub loopback_number: u32,
}

/// Successful response: the device output split into lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceOutput {
    pub netmiko_response: Vec<String>,
}

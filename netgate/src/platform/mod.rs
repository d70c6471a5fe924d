//! Platform definitions for the supported CLI dialects.
//!
//! A platform describes prompt patterns, privilege levels, failure strings
//! and session setup commands for one device family.

mod definition;
mod privilege_level;
pub mod vendors;

pub use definition::{Confirmation, PlatformDefinition};
pub use privilege_level::{ModeEntry, PrivilegeLevel};

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::PlatformError;

/// Supported CLI dialects.
///
/// Parses from the dialect identifiers used in device inventories, e.g.
/// `cisco_xr` or `cisco_iosxr`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum Platform {
    #[serde(rename = "cisco_iosxr", alias = "cisco_xr")]
    CiscoIosXr,

    #[serde(rename = "cisco_iosxe", alias = "cisco_ios", alias = "cisco_xe")]
    CiscoIosXe,
}

impl Platform {
    /// Canonical dialect name.
    pub fn name(&self) -> &'static str {
        match self {
            Platform::CiscoIosXr => vendors::cisco_iosxr::PLATFORM_NAME,
            Platform::CiscoIosXe => vendors::cisco_iosxe::PLATFORM_NAME,
        }
    }

    /// Build the full definition for this dialect.
    pub fn definition(&self) -> PlatformDefinition {
        match self {
            Platform::CiscoIosXr => vendors::cisco_iosxr::platform(),
            Platform::CiscoIosXe => vendors::cisco_iosxe::platform(),
        }
    }
}

impl FromStr for Platform {
    type Err = PlatformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cisco_xr" | "cisco_iosxr" => Ok(Platform::CiscoIosXr),
            "cisco_ios" | "cisco_iosxe" | "cisco_xe" => Ok(Platform::CiscoIosXe),
            _ => Err(PlatformError::UnknownPlatform {
                name: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

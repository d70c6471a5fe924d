//! Cisco IOS / IOS-XE platform definition.
//!
//! ```text
//! router>                  # exec
//! router#                  # privilege_exec
//! router(config)#          # configuration
//! router(config-if)#       # configuration sub-mode
//! ```
//!
//! Changes apply immediately; there is no candidate configuration to commit.

use crate::platform::{PlatformDefinition, PrivilegeLevel};

pub const PLATFORM_NAME: &str = "cisco_iosxe";

/// Create the Cisco IOS-XE platform definition.
pub fn platform() -> PlatformDefinition {
    let exec = PrivilegeLevel::new("exec", r"(?mi)^[\w.\-@/:]{1,63}>\s?$").unwrap();

    let privilege_exec = PrivilegeLevel::new("privilege_exec", r"(?mi)^[\w.\-@/:]{1,63}#\s?$")
        .unwrap()
        .entered_from("exec", "enable", "disable")
        .with_password_prompt(r"(?mi)^(?:enable\s)?password:\s?$")
        .unwrap()
        .excluding("(config");

    let configuration = PrivilegeLevel::new(
        "configuration",
        r"(?mi)^[\w.\-@/:]{1,63}\(config[\w.\-@/:+]{0,32}\)#\s?$",
    )
    .unwrap()
    .entered_from("privilege_exec", "configure terminal", "end");

    PlatformDefinition::new(PLATFORM_NAME, [exec, privilege_exec, configuration])
        .default_privilege("privilege_exec")
        .failures(&[
            "% Invalid input detected",
            "% Incomplete command",
            "% Ambiguous command",
            "% Unknown command",
        ])
        .on_open(&["terminal length 0", "terminal width 511"])
}

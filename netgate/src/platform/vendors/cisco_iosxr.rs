//! Cisco IOS-XR platform definition.
//!
//! IOS-XR logs users straight into privileged EXEC and stages configuration
//! in a candidate that only takes effect on an explicit `commit`.
//!
//! # Prompt Examples
//!
//! ```text
//! RP/0/RP0/CPU0:router#                    # privilege_exec
//! RP/0/RP0/CPU0:router(config)#            # configuration
//! RP/0/RP0/CPU0:router(config-if)#         # configuration sub-mode
//! ```
//!
//! # Privilege Graph
//!
//! ```text
//! ┌────────────────┐  configure terminal  ┌───────────────┐
//! │ privilege_exec ├──────────────────────► configuration │
//! │       #        │        end           │  (config*)#   │
//! └────────────────┘◄─────────────────────┴───────────────┘
//! ```
//!
//! Leaving configuration mode with staged but uncommitted changes (for
//! example after a failed `commit`) asks before discarding them:
//!
//! ```text
//! Uncommitted changes found, commit them before exiting(yes/no/cancel)? [cancel]:
//! ```
//!
//! The driver answers `no`, which drops the candidate and returns to EXEC.

use crate::platform::{PlatformDefinition, PrivilegeLevel};

pub const PLATFORM_NAME: &str = "cisco_iosxr";

const UNCOMMITTED_CHANGES: &str = r"(?mi)^uncommitted changes found.*\?\s*\[\w+\]:\s?$";

/// Create the Cisco IOS-XR platform definition.
pub fn platform() -> PlatformDefinition {
    let privilege_exec =
        PrivilegeLevel::new("privilege_exec", r"(?mi)^[\w.\-@/:]{1,63}#\s?$")
            .unwrap()
            .excluding("(config");

    let configuration = PrivilegeLevel::new(
        "configuration",
        r"(?mi)^[\w.\-@/:]{1,63}\(config[\w.\-@/:+]{0,63}\)#\s?$",
    )
    .unwrap()
    .entered_from("privilege_exec", "configure terminal", "end");

    PlatformDefinition::new(PLATFORM_NAME, [privilege_exec, configuration])
        .failures(&[
            "% Invalid input detected",
            "% Incomplete command",
            "% Ambiguous command",
            "% Failed to commit",
            "% This command is not authorized",
        ])
        .on_open(&["terminal length 0", "terminal width 511"])
        .confirm(UNCOMMITTED_CHANGES, "no")
        .unwrap()
}

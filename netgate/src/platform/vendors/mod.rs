//! Built-in dialect definitions.

pub mod cisco_iosxe;
pub mod cisco_iosxr;

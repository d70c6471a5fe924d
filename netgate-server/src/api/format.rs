//! Turns raw device text into response lines.

use super::types::DeviceOutput;

/// Split on `\n`, trim each line and drop the ones left empty.
///
/// Order is preserved. `\r` counts as whitespace, so CRLF output comes out
/// clean too.
pub fn format_response(raw: &str) -> DeviceOutput {
    let netmiko_response = raw
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect();

    DeviceOutput { netmiko_response }
}

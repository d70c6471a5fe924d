//! CLI command builders for each endpoint.

/// Operational command behind `/device_interfaces`.
pub const SHOW_INTERFACES: &str = "show ip interface brief";

/// Create a loopback and assign it an address.
///
/// The device stages the change until `commit`, then `exit` leaves the
/// interface submode.
pub fn configure_loopback(loopback_number: u32, ip_address: &str) -> Vec<String> {
    vec![
        format!("interface Loopback{}", loopback_number),
        format!("ip address {}", ip_address),
        "commit".to_string(),
        "exit".to_string(),
    ]
}

/// Remove a loopback interface.
pub fn delete_loopback(loopback_number: u32) -> Vec<String> {
    vec![
        format!("no interface Loopback{}", loopback_number),
        "commit".to_string(),
        "exit".to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configure_loopback_sequence() {
        assert_eq!(
            configure_loopback(5, "10.0.0.1"),
            vec!["interface Loopback5", "ip address 10.0.0.1", "commit", "exit"]
        );
    }

    #[test]
    fn test_delete_loopback_sequence() {
        assert_eq!(
            delete_loopback(5),
            vec!["no interface Loopback5", "commit", "exit"]
        );
    }

    #[test]
    fn test_address_passed_through_verbatim() {
        // The device validates the address, not us
        let commands = configure_loopback(0, "10.0.0.1 255.255.255.255");
        assert_eq!(commands[1], "ip address 10.0.0.1 255.255.255.255");
    }
}

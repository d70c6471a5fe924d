//! Logging setup for the server.

use env_logger::{Builder, Env};

const DEFAULT_FILTER: &str = "netgate=info,netgate_server=info,tower_http=info";

/// Initialize env_logger.
///
/// Reads the filter from `RUST_LOG`, falling back to
/// `netgate=info,netgate_server=info,tower_http=info`. Request spans from
/// tower-http arrive through tracing's `log` bridge.
pub fn init() {
    Builder::from_env(Env::default().default_filter_or(DEFAULT_FILTER))
        .format_timestamp_millis()
        .init();
}

/// Initialize logging for tests.
#[cfg(test)]
pub fn init_test() {
    let _ = Builder::from_env(Env::default().default_filter_or("netgate=debug,netgate_server=debug"))
        .is_test(true)
        .try_init();
}

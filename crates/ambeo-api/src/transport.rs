// Shared transport configuration for building the reqwest::Client.
//
// The soundbar serves plain HTTP on its LAN address, so unlike a cloud
// API there is no TLS or cookie state to carry: only the bounded timeout
// that doubles as the sole cancellation mechanism for a device call.

use std::time::Duration;

use crate::error::Error;

/// Default per-request timeout. The device either answers quickly or not at all.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl TransportConfig {
    /// Config with a custom timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Build a `reqwest::Client` from this config.
    ///
    /// Proxies are disabled: the soundbar is always a LAN peer and an
    /// environment proxy would rewrite the literal-IP Host header.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("ambeo/", env!("CARGO_PKG_VERSION")))
            .no_proxy()
            .build()
            .map_err(Error::Transport)
    }
}

// ── Runtime adapter configuration ──
//
// Describes *where* the soundbar is and how hard to poll it. Never
// touches disk: the host (CLI, or `ambeo-config` on its behalf) builds an
// `AdapterConfig` and hands it in.

use std::collections::HashMap;
use std::time::Duration;

use ambeo_api::client::{DEFAULT_PORT, DEFAULT_ROW_WINDOW};
use ambeo_api::transport::DEFAULT_TIMEOUT;
use ambeo_api::{Endpoint, TransportConfig};

/// How long the soundbar needs after an input switch before it answers reads.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_secs(1);

/// Default periodic poll interval.
pub const DEFAULT_UPDATE_INTERVAL: Duration = Duration::from_secs(5);

/// Configuration for a single soundbar adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterConfig {
    /// Hostname or IP. Empty means unconfigured.
    pub host: String,
    pub port: u16,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Periodic poll interval. Zero disables the background loop.
    pub update_interval: Duration,
    /// Pause after an input switch before the next device call.
    pub settle_delay: Duration,
    /// `getRows` upper bound for catalog fetches.
    pub row_window: u32,
    /// Display-name overrides keyed by input identifier.
    pub custom_names: HashMap<String, String>,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: DEFAULT_PORT,
            timeout: DEFAULT_TIMEOUT,
            update_interval: DEFAULT_UPDATE_INTERVAL,
            settle_delay: DEFAULT_SETTLE_DELAY,
            row_window: DEFAULT_ROW_WINDOW,
            custom_names: HashMap::new(),
        }
    }
}

impl AdapterConfig {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ..Self::default()
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.host.trim().is_empty()
    }

    pub fn endpoint(&self) -> Endpoint {
        Endpoint::new(self.host.trim()).with_port(self.port)
    }

    pub fn transport(&self) -> TransportConfig {
        TransportConfig::with_timeout(self.timeout)
    }

    /// Custom display name for an input, if one is set and non-blank.
    pub fn custom_name(&self, identifier: &str) -> Option<&str> {
        self.custom_names
            .get(identifier)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_host_is_unconfigured() {
        assert!(!AdapterConfig::default().is_configured());
        assert!(!AdapterConfig::new("   ").is_configured());
        assert!(AdapterConfig::new("192.168.1.40").is_configured());
    }

    #[test]
    fn blank_custom_name_is_ignored() {
        let mut cfg = AdapterConfig::new("soundbar");
        cfg.custom_names.insert("hdmi1".into(), "TV".into());
        cfg.custom_names.insert("hdmi2".into(), "  ".into());
        assert_eq!(cfg.custom_name("hdmi1"), Some("TV"));
        assert_eq!(cfg.custom_name("hdmi2"), None);
        assert_eq!(cfg.custom_name("optical"), None);
    }
}

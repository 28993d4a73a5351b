// ── Core error types ──
//
// `CoreError` is what a host sees when an entry point cannot run at all.
// `SkipReason` is why an entry point ran but changed nothing: a failed
// read, an index without a catalog entry, a device identifier the catalog
// does not know. Skips are ordinary outcomes, not errors; they are returned
// inside `CommandOutcome` / `PollReport` so tests and traces can see them.

use serde::Serialize;
use thiserror::Error;

use crate::adapter::AdapterState;
use crate::catalog::CatalogList;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("No soundbar host configured")]
    NotConfigured,

    #[error("Cannot connect to soundbar at {endpoint}: {reason}")]
    ConnectionFailed { endpoint: String, reason: String },

    #[error("Adapter is not active (state: {state})")]
    NotActive { state: AdapterState },

    // ── Command errors ───────────────────────────────────────────────
    #[error("Invalid command for {control}: {message}")]
    InvalidCommand { control: String, message: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<ambeo_api::Error> for CoreError {
    fn from(err: ambeo_api::Error) -> Self {
        match err {
            ambeo_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid soundbar address: {e}"),
            },
            ambeo_api::Error::Transport(ref e) => CoreError::ConnectionFailed {
                endpoint: e
                    .url()
                    .and_then(|u| u.host_str().map(String::from))
                    .unwrap_or_default(),
                reason: err.to_string(),
            },
            ambeo_api::Error::Timeout { .. }
            | ambeo_api::Error::Status { .. }
            | ambeo_api::Error::Device { .. }
            | ambeo_api::Error::Deserialization { .. } => CoreError::ConnectionFailed {
                endpoint: String::new(),
                reason: err.to_string(),
            },
        }
    }
}

// ── Skip reasons ─────────────────────────────────────────────────────

/// Why a command or a poll field was a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    /// The device call failed: unreachable, timed out, malformed reply,
    /// or an explicit device error. Deliberately not distinguished here.
    #[error("no data from {path}")]
    NoData { path: String },

    /// The index has no entry in the current catalog.
    #[error("index {index} has no {list} entry")]
    UnknownIndex { list: CatalogList, index: i64 },

    /// The device reported an identifier the current catalog does not hold.
    #[error("{list} identifier '{identifier}' is not in the catalog")]
    StaleIdentifier { list: CatalogList, identifier: String },

    /// The entry exists but the device gave no path to activate it.
    #[error("{list} entry {index} has no write target")]
    NoWriteTarget { list: CatalogList, index: i64 },
}

impl SkipReason {
    pub(crate) fn no_data(path: &str) -> Self {
        Self::NoData {
            path: path.to_owned(),
        }
    }
}

use thiserror::Error;

/// Top-level error type for the `ambeo-api` crate.
///
/// Distinguishes every way a device call can fail so the cause shows up in
/// traces. `ambeo-core` deliberately collapses all of them into a single
/// "no data" outcome: above this crate, a failed read is skipped, not
/// diagnosed.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, reset, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Request exceeded the transport timeout.
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// URL construction failed (malformed host string).
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Non-success HTTP status without a device error body.
    #[error("HTTP {status} for {path}")]
    Status { status: u16, path: String },

    // ── Device ──────────────────────────────────────────────────────
    /// The JSON body carried an `error` field.
    #[error("Device rejected {path}: {message}")]
    Device { path: String, message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// Body was not JSON or lacked the expected shape, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if the device could not be reached at all
    /// (as opposed to answering with something unusable).
    pub fn is_unreachable(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_connect() || e.is_timeout() || e.is_request(),
            Self::Timeout { .. } | Self::InvalidUrl(_) => true,
            _ => false,
        }
    }

    /// Returns `true` if the device answered with an explicit error.
    pub fn is_device_error(&self) -> bool {
        matches!(self, Self::Device { .. })
    }
}

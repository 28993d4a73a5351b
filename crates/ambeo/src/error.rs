//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors
//! with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use ambeo_config::ConfigError;
use ambeo_core::{CoreError, SkipReason};

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const CONFIG: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to soundbar at {endpoint}")]
    #[diagnostic(
        code(ambeo::connection_failed),
        help(
            "Check that the soundbar is powered on and on the same network.\n\
             Endpoint: {endpoint}\n\
             Try: ambeo --host <ip> info"
        )
    )]
    ConnectionFailed {
        endpoint: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Soundbar session is not active ({state})")]
    #[diagnostic(code(ambeo::not_active), help("Run: ambeo info"))]
    NotActive { state: String },

    // ── Commands ─────────────────────────────────────────────────────
    #[error("{control} was not changed: {reason}")]
    #[diagnostic(code(ambeo::not_applied), help("{hint}"))]
    NotApplied {
        control: String,
        reason: SkipReason,
        hint: String,
    },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(ambeo::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(ambeo::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: ambeo config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No soundbar configured")]
    #[diagnostic(
        code(ambeo::no_config),
        help(
            "Create a profile with: ambeo config init\n\
             Or pass --host <ip>. Expected config at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error("Configuration error: {0}")]
    #[diagnostic(code(ambeo::config))]
    Config(String),

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::NotActive { .. } => exit_code::CONNECTION,
            Self::Validation { .. } => exit_code::USAGE,
            Self::NoConfig { .. } | Self::ProfileNotFound { .. } | Self::Config(_) => {
                exit_code::CONFIG
            }
            Self::NotApplied { reason, .. } => match reason {
                SkipReason::UnknownIndex { .. } | SkipReason::StaleIdentifier { .. } => {
                    exit_code::NOT_FOUND
                }
                SkipReason::NoData { .. } | SkipReason::NoWriteTarget { .. } => {
                    exit_code::GENERAL
                }
            },
            Self::Io(_) => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NotConfigured => CliError::NoConfig {
                path: ambeo_config::config_path().display().to_string(),
            },
            CoreError::ConnectionFailed { endpoint, reason } => CliError::ConnectionFailed {
                endpoint,
                source: reason.into(),
            },
            CoreError::NotActive { state } => CliError::NotActive {
                state: state.to_string(),
            },
            CoreError::InvalidCommand { control, message } => CliError::Validation {
                field: control,
                reason: message,
            },
            CoreError::Config { message } => CliError::Config(message),
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::ProfileNotFound { name } => CliError::ProfileNotFound {
                name,
                available: "(none)".into(),
            },
            ConfigError::Io(e) => CliError::Io(e),
            other => CliError::Config(other.to_string()),
        }
    }
}

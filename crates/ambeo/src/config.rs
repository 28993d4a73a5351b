//! CLI configuration: thin wrapper around `ambeo_config` shared types.
//!
//! Adds resolution that respects `GlobalOpts` flag overrides
//! (--host, --port, --timeout, --interval).

use std::time::Duration;

use ambeo_core::AdapterConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use ambeo_config::{
    Config, Profile, config_path, load_config, load_config_or_default, save_config,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    config.active_profile_name(global.profile.as_deref())
}

/// Build the `AdapterConfig` for this invocation.
///
/// Flag > env > profile > defaults. A `--host` with no matching profile
/// is enough on its own.
pub fn build_adapter_config(global: &GlobalOpts) -> Result<AdapterConfig, CliError> {
    let cfg = load_config()?;
    let profile_name = active_profile_name(global, &cfg);

    let mut profile = match (cfg.profiles.get(&profile_name), &global.host) {
        (Some(profile), _) => profile.clone(),
        (None, Some(host)) if global.profile.is_none() => Profile::new(host.clone()),
        (None, _) if global.profile.is_some() => {
            return Err(CliError::ProfileNotFound {
                name: profile_name,
                available: available_profiles(&cfg),
            });
        }
        (None, _) => {
            return Err(CliError::NoConfig {
                path: config_path().display().to_string(),
            });
        }
    };
    if let Some(ref host) = global.host {
        profile.host.clone_from(host);
    }

    let mut adapter = ambeo_config::profile_to_adapter_config(&profile, &cfg.defaults)?;
    if let Some(port) = global.port {
        adapter.port = port;
    }
    if let Some(secs) = global.timeout {
        adapter.timeout = Duration::from_secs(secs);
    }
    if let Some(secs) = global.interval {
        adapter.update_interval = Duration::from_secs(secs);
    }
    Ok(adapter)
}

pub fn available_profiles(cfg: &Config) -> String {
    if cfg.profiles.is_empty() {
        "(none)".into()
    } else {
        cfg.profile_names()
    }
}

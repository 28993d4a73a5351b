//! Shared configuration for the AMBEO tools.
//!
//! TOML profiles (one per soundbar), `AMBEO_*` environment overrides, and
//! translation to `ambeo_core::AdapterConfig`. The CLI layers its flag
//! overrides on top.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use ambeo_core::AdapterConfig;

/// Environment variable that overrides the config file location.
pub const CONFIG_PATH_ENV: &str = "AMBEO_CONFIG";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("profile '{name}' not found")]
    ProfileNotFound { name: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when none is named on the command line.
    pub default_profile: Option<String>,

    #[serde(default)]
    pub defaults: Defaults,

    /// Named soundbar profiles.
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Name of the profile to use: explicit choice, then `default_profile`,
    /// then `"default"`.
    pub fn active_profile_name(&self, explicit: Option<&str>) -> String {
        explicit
            .map(str::to_owned)
            .or_else(|| self.default_profile.clone())
            .unwrap_or_else(|| "default".into())
    }

    pub fn profile(&self, name: &str) -> Result<&Profile, ConfigError> {
        self.profiles
            .get(name)
            .ok_or_else(|| ConfigError::ProfileNotFound { name: name.into() })
    }

    /// Comma-separated profile names, for error hints.
    pub fn profile_names(&self) -> String {
        self.profiles.keys().cloned().collect::<Vec<_>>().join(", ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Poll interval in seconds for `watch`.
    #[serde(default = "default_update_interval")]
    pub update_interval: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            timeout: default_timeout(),
            update_interval: default_update_interval(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    5
}
fn default_update_interval() -> u64 {
    5
}

/// One soundbar.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Profile {
    /// Hostname or IP address.
    pub host: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    /// Override `defaults.timeout`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,

    /// Override `defaults.update_interval`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_interval: Option<u64>,

    /// Pause after an input switch, in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settle_delay_ms: Option<u64>,

    /// Display names keyed by input identifier (`hdmi1 = "TV"`).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub custom_names: BTreeMap<String, String>,
}

impl Profile {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ..Self::default()
        }
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path: `$AMBEO_CONFIG`, then platform conventions.
pub fn config_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_PATH_ENV).filter(|p| !p.is_empty()) {
        return PathBuf::from(path);
    }
    ProjectDirs::from("com", "ambeo", "ambeo").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("ambeo");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from a specific file, merged over defaults and under `AMBEO_*` env.
///
/// Nested keys use a double underscore: `AMBEO_DEFAULTS__TIMEOUT=10`.
/// A missing file is not an error.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("AMBEO_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if loading fails.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Resolution ──────────────────────────────────────────────────────

/// Build an `AdapterConfig` from a profile and the global defaults.
pub fn profile_to_adapter_config(
    profile: &Profile,
    defaults: &Defaults,
) -> Result<AdapterConfig, ConfigError> {
    let host = profile.host.trim();
    if host.is_empty() {
        return Err(ConfigError::Validation {
            field: "host".into(),
            reason: "must not be empty".into(),
        });
    }
    if host.contains('/') || host.contains("://") {
        return Err(ConfigError::Validation {
            field: "host".into(),
            reason: format!("expected a hostname or IP address, got '{host}'"),
        });
    }

    let mut config = AdapterConfig::new(host);
    if let Some(port) = profile.port {
        config.port = port;
    }
    config.timeout = Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout));
    config.update_interval =
        Duration::from_secs(profile.update_interval.unwrap_or(defaults.update_interval));
    if let Some(ms) = profile.settle_delay_ms {
        config.settle_delay = Duration::from_millis(ms);
    }
    config.custom_names = profile
        .custom_names
        .iter()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();

    Ok(config)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg.default_profile.as_deref(), Some("default"));
        assert_eq!(cfg.defaults.timeout, 5);
        assert!(cfg.profiles.is_empty());
    }

    #[test]
    fn reads_profiles_and_custom_names() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
default_profile = "living-room"

[defaults]
timeout = 3

[profiles.living-room]
host = "192.168.1.40"
update_interval = 10

[profiles.living-room.custom_names]
hdmi1 = "TV"
"#,
        )
        .unwrap();

        let cfg = load_config_from(&path).unwrap();
        let name = cfg.active_profile_name(None);
        assert_eq!(name, "living-room");

        let adapter = profile_to_adapter_config(cfg.profile(&name).unwrap(), &cfg.defaults).unwrap();
        assert_eq!(adapter.host, "192.168.1.40");
        assert_eq!(adapter.port, 80);
        assert_eq!(adapter.timeout, Duration::from_secs(3));
        assert_eq!(adapter.update_interval, Duration::from_secs(10));
        assert_eq!(adapter.custom_name("hdmi1"), Some("TV"));
    }

    #[test]
    fn save_then_load_keeps_profile() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        let mut profile = Profile::new("soundbar.lan");
        profile.settle_delay_ms = Some(1500);
        cfg.profiles.insert("default".into(), profile.clone());
        save_config_to(&cfg, &path).unwrap();

        let loaded = load_config_from(&path).unwrap();
        assert_eq!(loaded.profile("default").unwrap(), &profile);
    }

    #[test]
    fn explicit_profile_wins() {
        let cfg = Config::default();
        assert_eq!(cfg.active_profile_name(Some("kitchen")), "kitchen");
        assert_eq!(cfg.active_profile_name(None), "default");
        assert!(matches!(
            cfg.profile("kitchen"),
            Err(ConfigError::ProfileNotFound { .. })
        ));
    }

    #[test]
    fn rejects_blank_or_url_host() {
        let defaults = Defaults::default();
        assert!(profile_to_adapter_config(&Profile::new("  "), &defaults).is_err());
        assert!(profile_to_adapter_config(&Profile::new("http://10.0.0.5"), &defaults).is_err());
        let cfg = profile_to_adapter_config(&Profile::new(" 10.0.0.5 "), &defaults).unwrap();
        assert_eq!(cfg.host, "10.0.0.5");
    }
}

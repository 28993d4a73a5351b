// ── Dialect detection and strategies ──
//
// AMBEO soundbars speak one of two control dialects. Popcorn models
// (Plus, Mini) publish their input and preset lists over `getRows`;
// Espresso models (Max) do not, so their catalog is fixed. The dialect is
// chosen once per connection from the product name and held for the
// session; nothing re-evaluates it mid-session.

mod espresso;
mod popcorn;

use async_trait::async_trait;
use serde::Serialize;
use strum::Display;
use tracing::{info, warn};

use ambeo_api::paths::{self, tag};
use ambeo_api::{SoundbarClient, TypedValue};

use crate::catalog::{Catalog, InputEntry, PresetEntry};
use crate::config::AdapterConfig;
use crate::error::CoreError;

pub use espresso::Espresso;
pub use popcorn::Popcorn;

/// Model name used when the device answers without one.
pub const UNKNOWN_MODEL: &str = "Unknown";

/// The control dialect a soundbar speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
pub enum Dialect {
    /// Catalog-driven API (AMBEO Plus, AMBEO Mini).
    Popcorn,
    /// Static API (AMBEO Max).
    Espresso,
}

impl Dialect {
    pub fn strategy(self) -> &'static dyn DialectStrategy {
        match self {
            Self::Popcorn => &Popcorn,
            Self::Espresso => &Espresso,
        }
    }
}

/// Where a write for a catalog entry goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteTarget {
    /// Fire-and-forget `activate` on a path; followed by the settle delay.
    Activate { path: String },
    /// Plain `value` write.
    Value {
        path: &'static str,
        value: TypedValue,
    },
}

/// Per-dialect behavior, selected once per session.
#[async_trait]
pub trait DialectStrategy: Send + Sync {
    fn dialect(&self) -> Dialect;

    /// Does this dialect apply to the given product name?
    fn applies_to(&self, model: &str) -> bool;

    /// Build the session catalog. Never fails: an unreachable list yields
    /// an empty one, and every index against it is a no-op.
    async fn build_catalog(&self, client: &SoundbarClient, config: &AdapterConfig) -> Catalog;

    /// Write target for selecting an input, if the entry has one.
    fn source_target(&self, entry: &InputEntry) -> Option<WriteTarget>;

    /// Write target for selecting a preset.
    fn preset_target(&self, entry: &PresetEntry) -> WriteTarget {
        WriteTarget::Value {
            path: paths::AUDIO_PRESET,
            value: TypedValue::Tagged {
                tag: tag::AUDIO_PRESET,
                value: entry.key.clone(),
            },
        }
    }
}

/// Strategies that must positively match. Anything else is Espresso.
static MATCHED: [&dyn DialectStrategy; 1] = [&Popcorn];

/// Classify a product name. Unrecognized models fall back to Espresso,
/// which needs no catalog fetch and is always safe to assume.
pub fn classify(model: &str) -> Dialect {
    MATCHED
        .iter()
        .find(|s| s.applies_to(model))
        .map_or(Dialect::Espresso, |s| s.dialect())
}

/// What the device said it is, and the dialect that implies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceIdentity {
    pub dialect: Dialect,
    pub model: String,
}

/// Read the product name and classify the device.
///
/// A failed read is an error (the device is not reachable or not an
/// AMBEO); a reachable device with no model string is `Unknown`/Espresso.
pub async fn detect(client: &SoundbarClient) -> Result<DeviceIdentity, CoreError> {
    let value = client.get_data(paths::PRODUCT_NAME).await.map_err(|e| {
        warn!(endpoint = %client.endpoint(), error = %e, "dialect detection failed");
        CoreError::ConnectionFailed {
            endpoint: client.endpoint().to_string(),
            reason: e.to_string(),
        }
    })?;

    let model = value
        .as_string()
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .unwrap_or(UNKNOWN_MODEL)
        .to_owned();
    let dialect = classify(&model);
    info!(%model, %dialect, "detected soundbar model");

    Ok(DeviceIdentity { model, dialect })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plus_and_mini_are_popcorn() {
        assert_eq!(classify("AMBEO Plus"), Dialect::Popcorn);
        assert_eq!(classify("AMBEO Soundbar Plus"), Dialect::Popcorn);
        assert_eq!(classify("AMBEO Mini"), Dialect::Popcorn);
    }

    #[test]
    fn everything_else_is_espresso() {
        assert_eq!(classify("AMBEO Max"), Dialect::Espresso);
        assert_eq!(classify(UNKNOWN_MODEL), Dialect::Espresso);
        assert_eq!(classify(""), Dialect::Espresso);
    }

    #[test]
    fn match_is_case_sensitive_substring() {
        assert_eq!(classify("AMBEO PLUS"), Dialect::Espresso);
        assert_eq!(classify("MiniPlus"), Dialect::Popcorn);
    }

    #[test]
    fn strategy_reports_own_dialect() {
        assert_eq!(Dialect::Popcorn.strategy().dialect(), Dialect::Popcorn);
        assert_eq!(Dialect::Espresso.strategy().dialect(), Dialect::Espresso);
    }
}

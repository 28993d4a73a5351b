// ── Host-facing control vocabulary ──
//
// The eight controls a host sees, independent of dialect. Scalar controls
// map to one fixed device path each; Source and Preset are indices into
// the current catalog and never carry raw device identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use ambeo_api::paths;

/// A user-facing control.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum Control {
    Volume,
    Mute,
    Source,
    Preset,
    NightMode,
    #[strum(serialize = "AMBEOMode")]
    #[serde(rename = "AMBEOMode")]
    AmbeoMode,
    VoiceEnhancement,
    SoundFeedback,
}

/// What kind of value a control holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
pub enum ValueKind {
    Integer,
    Boolean,
    /// Integer index into a catalog list.
    Enumeration,
}

impl Control {
    pub fn kind(self) -> ValueKind {
        match self {
            Self::Volume => ValueKind::Integer,
            Self::Source | Self::Preset => ValueKind::Enumeration,
            Self::Mute
            | Self::NightMode
            | Self::AmbeoMode
            | Self::VoiceEnhancement
            | Self::SoundFeedback => ValueKind::Boolean,
        }
    }

    /// Human caption for UIs.
    pub fn caption(self) -> &'static str {
        match self {
            Self::Volume => "Volume",
            Self::Mute => "Mute",
            Self::Source => "Input",
            Self::Preset => "Audio preset",
            Self::NightMode => "Night mode",
            Self::AmbeoMode => "AMBEO mode",
            Self::VoiceEnhancement => "Voice enhancement",
            Self::SoundFeedback => "Sound feedback",
        }
    }

    /// Fixed device path for scalar controls; `None` for catalog-backed ones.
    pub fn scalar_path(self) -> Option<&'static str> {
        match self {
            Self::Volume => Some(paths::VOLUME),
            Self::Mute => Some(paths::MUTE),
            Self::NightMode => Some(paths::NIGHT_MODE),
            Self::AmbeoMode => Some(paths::AMBEO_MODE),
            Self::VoiceEnhancement => Some(paths::VOICE_ENHANCEMENT),
            Self::SoundFeedback => Some(paths::SOUND_FEEDBACK),
            Self::Source | Self::Preset => None,
        }
    }
}

// ── ControlValue ─────────────────────────────────────────────────

/// A control's value as the host sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ControlValue {
    Int(i64),
    Bool(bool),
}

impl ControlValue {
    /// Integer view; booleans coerce to 0/1 the way the host casts them.
    pub fn as_int(self) -> i64 {
        match self {
            Self::Int(v) => v,
            Self::Bool(b) => i64::from(b),
        }
    }

    /// Boolean view; any non-zero integer is `true`.
    pub fn as_bool(self) -> bool {
        match self {
            Self::Int(v) => v != 0,
            Self::Bool(b) => b,
        }
    }
}

impl From<i64> for ControlValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for ControlValue {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<bool> for ControlValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl fmt::Display for ControlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Bool(true) => f.write_str("on"),
            Self::Bool(false) => f.write_str("off"),
        }
    }
}

/// Error returned when a string is neither an integer nor a boolean word.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected an integer or on/off, got '{0}'")]
pub struct ParseControlValueError(String);

impl FromStr for ControlValue {
    type Err = ParseControlValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(v) = s.parse::<i64>() {
            return Ok(Self::Int(v));
        }
        match s.to_ascii_lowercase().as_str() {
            "true" | "on" | "yes" => Ok(Self::Bool(true)),
            "false" | "off" | "no" => Ok(Self::Bool(false)),
            _ => Err(ParseControlValueError(s.to_owned())),
        }
    }
}

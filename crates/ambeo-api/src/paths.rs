//! Device paths, value-type tags and request roles.
//!
//! Paths are opaque to the device client; they are collected here so the
//! core crate and the tests agree on a single spelling.

// ── Identity ────────────────────────────────────────────────────────

pub const PRODUCT_NAME: &str = "settings:/system/productName";

// ── Scalar controls ─────────────────────────────────────────────────

pub const VOLUME: &str = "player:volume";
pub const MUTE: &str = "settings:/mediaPlayer/mute";
pub const NIGHT_MODE: &str = "settings:/popcorn/audio/nightModeStatus";
pub const AMBEO_MODE: &str = "settings:/popcorn/audio/ambeoModeStatus";
pub const VOICE_ENHANCEMENT: &str = "settings:/popcorn/audio/voiceEnhancement";
pub const SOUND_FEEDBACK: &str = "settings:/popcorn/ux/soundFeedbackStatus";

// ── Inputs ──────────────────────────────────────────────────────────

/// Row list of selectable inputs (`{id, title, path, disabled}`).
pub const INPUTS: &str = "ui:/inputs";
/// Currently selected input identifier.
pub const SELECTED_INPUT: &str = "popcorn:inputChange/selected";

// ── Audio presets ───────────────────────────────────────────────────

/// Row list of presets (`{title, value: {popcornAudioPreset}}`).
pub const AUDIO_PRESET_VALUES: &str = "settings:/popcorn/audio/audioPresetValues";
/// Currently active preset key (read and write).
pub const AUDIO_PRESET: &str = "settings:/popcorn/audio/audioPresets/audioPreset";

/// Value-type tags used inside `{"type": tag, tag: value}` payloads.
pub mod tag {
    pub const I32: &str = "i32_";
    pub const BOOL: &str = "bool_";
    pub const STRING: &str = "string_";
    pub const INPUT_ID: &str = "popcornInputId";
    pub const AUDIO_PRESET: &str = "popcornAudioPreset";
}

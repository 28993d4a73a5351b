// ── Wire types for the soundbar API ──
//
// `getData` answers `{"value": {"type": tag, tag: v}}`, `getRows` answers
// `{"rows": [...]}`, and `setData` takes the same tagged object as its
// `value` query parameter. Values stay loosely typed (`DataValue`) until a
// caller asks for the tag it expects.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::paths::tag;

// ── Reads ───────────────────────────────────────────────────────────

/// A tagged value object as returned inside `getData` / `getRows`.
///
/// The object usually carries a `type` field naming the tag, but only the
/// tag-keyed field itself is relied upon.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct DataValue(Map<String, Value>);

impl DataValue {
    /// The declared type tag, if the device sent one.
    pub fn type_tag(&self) -> Option<&str> {
        self.0.get("type").and_then(Value::as_str)
    }

    /// Raw access to the field stored under `tag`.
    pub fn get(&self, tag: &str) -> Option<&Value> {
        self.0.get(tag)
    }

    pub fn as_i32(&self) -> Option<i32> {
        self.get(tag::I32)
            .and_then(Value::as_i64)
            .and_then(|v| i32::try_from(v).ok())
    }

    pub fn as_bool(&self) -> Option<bool> {
        self.get(tag::BOOL).and_then(Value::as_bool)
    }

    pub fn as_string(&self) -> Option<&str> {
        self.get(tag::STRING).and_then(Value::as_str)
    }

    /// An identifier-like field under `tag`, normalized to a string.
    ///
    /// Preset keys have been seen both as strings and as integers
    /// depending on firmware, so numbers are stringified.
    pub fn key(&self, tag: &str) -> Option<String> {
        match self.get(tag)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

impl From<Map<String, Value>> for DataValue {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Envelope of a successful `getData` call.
#[derive(Debug, Deserialize)]
pub(crate) struct DataResponse {
    pub value: DataValue,
}

/// One row of a `getRows` listing.
///
/// Input rows carry `id`/`title`/`path`/`disabled`; preset rows carry
/// `title` and a tagged `value`. Everything is optional on the wire.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Row {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub disabled: Option<bool>,
    #[serde(default)]
    pub value: Option<DataValue>,
}

impl Row {
    pub fn is_disabled(&self) -> bool {
        self.disabled.unwrap_or(false)
    }
}

/// Envelope of a successful `getRows` call.
#[derive(Debug, Deserialize)]
pub(crate) struct RowsResponse {
    pub rows: Vec<Row>,
}

// ── Writes ──────────────────────────────────────────────────────────

/// A value to write via `setData`, carrying its own type tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypedValue {
    I32(i32),
    Bool(bool),
    /// Vendor-specific tag with a string payload (input ids, preset keys).
    Tagged { tag: &'static str, value: String },
}

impl TypedValue {
    pub fn tag(&self) -> &'static str {
        match self {
            Self::I32(_) => tag::I32,
            Self::Bool(_) => tag::BOOL,
            Self::Tagged { tag, .. } => *tag,
        }
    }

    /// The `{"type": tag, tag: value}` object sent as the `value` parameter.
    pub fn payload(&self) -> Value {
        let tag = self.tag();
        let inner = match self {
            Self::I32(v) => json!(v),
            Self::Bool(v) => json!(v),
            Self::Tagged { value, .. } => json!(value),
        };
        json!({ "type": tag, tag: inner })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn value(v: Value) -> DataValue {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn reads_scalar_tags() {
        let v = value(json!({"type": "i32_", "i32_": 42}));
        assert_eq!(v.type_tag(), Some("i32_"));
        assert_eq!(v.as_i32(), Some(42));
        assert_eq!(v.as_bool(), None);

        let v = value(json!({"type": "bool_", "bool_": true}));
        assert_eq!(v.as_bool(), Some(true));
    }

    #[test]
    fn key_accepts_strings_and_numbers() {
        let v = value(json!({"popcornAudioPreset": "music"}));
        assert_eq!(v.key(tag::AUDIO_PRESET).as_deref(), Some("music"));

        let v = value(json!({"popcornAudioPreset": 3}));
        assert_eq!(v.key(tag::AUDIO_PRESET).as_deref(), Some("3"));

        let v = value(json!({"popcornAudioPreset": null}));
        assert_eq!(v.key(tag::AUDIO_PRESET), None);
    }

    #[test]
    fn out_of_range_i32_is_rejected() {
        let v = value(json!({"i32_": 5_000_000_000_i64}));
        assert_eq!(v.as_i32(), None);
    }

    #[test]
    fn payload_repeats_tag_as_key() {
        assert_eq!(
            TypedValue::I32(30).payload(),
            json!({"type": "i32_", "i32_": 30})
        );
        assert_eq!(
            TypedValue::Bool(false).payload(),
            json!({"type": "bool_", "bool_": false})
        );
        assert_eq!(
            TypedValue::Tagged {
                tag: tag::AUDIO_PRESET,
                value: "movies".into()
            }
            .payload(),
            json!({"type": "popcornAudioPreset", "popcornAudioPreset": "movies"})
        );
    }

    #[test]
    fn row_defaults_to_enabled() {
        let row: Row = serde_json::from_value(json!({"id": "hdmi1", "title": "HDMI 1"})).unwrap();
        assert!(!row.is_disabled());
        let row: Row =
            serde_json::from_value(json!({"id": "spotify", "disabled": true})).unwrap();
        assert!(row.is_disabled());
    }
}

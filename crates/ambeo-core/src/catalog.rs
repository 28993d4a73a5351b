// ── Catalog cache ──
//
// The ordered input and preset lists for the current session. An index
// the host sees is a position in these lists *after* disabled inputs are
// removed, so it is only meaningful against the catalog instance that
// produced it. Catalogs are immutable once built; a reconnect builds a new
// one and swaps it in whole.

use serde::Serialize;
use strum::Display;
use tracing::debug;

use ambeo_api::Row;
use ambeo_api::paths::tag;

use crate::config::AdapterConfig;
use crate::error::SkipReason;

/// Which catalog list an index or identifier refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CatalogList {
    Inputs,
    Presets,
}

/// A selectable input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputEntry {
    pub id: String,
    pub title: String,
    /// Device path to activate. Espresso entries use a fixed path.
    pub path: Option<String>,
}

/// A selectable audio preset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PresetEntry {
    pub key: String,
    pub title: String,
}

/// One `(index, title)` pair for rendering a dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogOption {
    pub index: usize,
    pub title: String,
}

/// The indexed input and preset lists for one session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Catalog {
    inputs: Vec<InputEntry>,
    presets: Vec<PresetEntry>,
}

impl Catalog {
    pub fn new(inputs: Vec<InputEntry>, presets: Vec<PresetEntry>) -> Self {
        Self { inputs, presets }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from raw `getRows` results.
    ///
    /// Disabled inputs are dropped before indices are assigned. Rows with no
    /// identifier can never be matched back from a device read and are
    /// dropped too. Custom names replace the device title here, once, so
    /// lookups never consult the name map.
    pub fn from_rows(input_rows: &[Row], preset_rows: &[Row], config: &AdapterConfig) -> Self {
        let inputs = input_rows
            .iter()
            .filter(|row| !row.is_disabled())
            .filter_map(|row| {
                let Some(id) = row.id.clone() else {
                    debug!(?row, "input row without id dropped");
                    return None;
                };
                let title = config
                    .custom_name(&id)
                    .map(str::to_owned)
                    .or_else(|| row.title.clone())
                    .unwrap_or_else(|| id.clone());
                Some(InputEntry {
                    id,
                    title,
                    path: row.path.clone(),
                })
            })
            .collect();

        let presets = preset_rows
            .iter()
            .filter_map(|row| {
                let Some(key) = row.value.as_ref().and_then(|v| v.key(tag::AUDIO_PRESET)) else {
                    debug!(?row, "preset row without key dropped");
                    return None;
                };
                let title = row.title.clone().unwrap_or_else(|| key.clone());
                Some(PresetEntry { key, title })
            })
            .collect();

        Self { inputs, presets }
    }

    pub fn inputs(&self) -> &[InputEntry] {
        &self.inputs
    }

    pub fn presets(&self) -> &[PresetEntry] {
        &self.presets
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty() && self.presets.is_empty()
    }

    pub fn len(&self, list: CatalogList) -> usize {
        match list {
            CatalogList::Inputs => self.inputs.len(),
            CatalogList::Presets => self.presets.len(),
        }
    }

    // ── Lookups ──────────────────────────────────────────────────

    pub fn input(&self, index: i64) -> Result<&InputEntry, SkipReason> {
        lookup(&self.inputs, index).ok_or(SkipReason::UnknownIndex {
            list: CatalogList::Inputs,
            index,
        })
    }

    pub fn preset(&self, index: i64) -> Result<&PresetEntry, SkipReason> {
        lookup(&self.presets, index).ok_or(SkipReason::UnknownIndex {
            list: CatalogList::Presets,
            index,
        })
    }

    /// Index → input identifier or preset key.
    pub fn index_to_identifier(&self, list: CatalogList, index: i64) -> Result<&str, SkipReason> {
        match list {
            CatalogList::Inputs => self.input(index).map(|e| e.id.as_str()),
            CatalogList::Presets => self.preset(index).map(|e| e.key.as_str()),
        }
    }

    /// Input identifier or preset key → index.
    pub fn identifier_to_index(&self, list: CatalogList, identifier: &str) -> Result<i64, SkipReason> {
        let position = match list {
            CatalogList::Inputs => self.inputs.iter().position(|e| e.id == identifier),
            CatalogList::Presets => self.presets.iter().position(|e| e.key == identifier),
        };
        position
            .and_then(|p| i64::try_from(p).ok())
            .ok_or_else(|| SkipReason::StaleIdentifier {
                list,
                identifier: identifier.to_owned(),
            })
    }

    /// Ordered `(index, title)` options for a list.
    pub fn options(&self, list: CatalogList) -> Vec<CatalogOption> {
        let titles: Vec<&str> = match list {
            CatalogList::Inputs => self.inputs.iter().map(|e| e.title.as_str()).collect(),
            CatalogList::Presets => self.presets.iter().map(|e| e.title.as_str()).collect(),
        };
        titles
            .into_iter()
            .enumerate()
            .map(|(index, title)| CatalogOption {
                index,
                title: title.to_owned(),
            })
            .collect()
    }
}

fn lookup<T>(items: &[T], index: i64) -> Option<&T> {
    usize::try_from(index).ok().and_then(|i| items.get(i))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn rows(v: serde_json::Value) -> Vec<Row> {
        serde_json::from_value(v).unwrap()
    }

    fn sample_inputs() -> Vec<Row> {
        rows(json!([
            {"id": "hdmi1", "title": "HDMI 1", "path": "ui:/inputs/hdmi1"},
            {"id": "spotify", "title": "Spotify", "disabled": true},
            {"id": "hdmi2", "title": "HDMI 2", "path": "ui:/inputs/hdmi2"}
        ]))
    }

    fn sample_presets() -> Vec<Row> {
        rows(json!([
            {"title": "Movies", "value": {"popcornAudioPreset": "movies"}},
            {"title": "Music", "value": {"popcornAudioPreset": "music"}}
        ]))
    }

    #[test]
    fn disabled_inputs_take_no_index() {
        let cat = Catalog::from_rows(&sample_inputs(), &[], &AdapterConfig::default());

        assert_eq!(cat.index_to_identifier(CatalogList::Inputs, 0).unwrap(), "hdmi1");
        assert_eq!(cat.index_to_identifier(CatalogList::Inputs, 1).unwrap(), "hdmi2");
        assert_eq!(
            cat.index_to_identifier(CatalogList::Inputs, 2),
            Err(SkipReason::UnknownIndex {
                list: CatalogList::Inputs,
                index: 2
            })
        );
        assert_eq!(
            cat.identifier_to_index(CatalogList::Inputs, "spotify"),
            Err(SkipReason::StaleIdentifier {
                list: CatalogList::Inputs,
                identifier: "spotify".into()
            })
        );
    }

    #[test]
    fn lookups_are_mutual_inverses() {
        let cat = Catalog::from_rows(&sample_inputs(), &sample_presets(), &AdapterConfig::default());
        for list in [CatalogList::Inputs, CatalogList::Presets] {
            for i in 0..i64::try_from(cat.len(list)).unwrap() {
                let id = cat.index_to_identifier(list, i).unwrap();
                assert_eq!(cat.identifier_to_index(list, id).unwrap(), i);
            }
        }
    }

    #[test]
    fn custom_name_replaces_device_title() {
        let mut cfg = AdapterConfig::new("soundbar");
        cfg.custom_names.insert("hdmi1".into(), "TV".into());
        let cat = Catalog::from_rows(&sample_inputs(), &[], &cfg);

        assert_eq!(cat.input(0).unwrap().title, "TV");
        assert_eq!(cat.input(1).unwrap().title, "HDMI 2");
    }

    #[test]
    fn negative_index_is_unknown() {
        let cat = Catalog::from_rows(&sample_inputs(), &sample_presets(), &AdapterConfig::default());
        assert!(matches!(
            cat.preset(-1),
            Err(SkipReason::UnknownIndex { index: -1, .. })
        ));
    }

    #[test]
    fn presets_keep_device_order_and_keys() {
        let cat = Catalog::from_rows(&[], &sample_presets(), &AdapterConfig::default());
        assert_eq!(cat.preset(1).unwrap().key, "music");
        assert_eq!(cat.identifier_to_index(CatalogList::Presets, "movies").unwrap(), 0);
    }

    #[test]
    fn rows_without_identifiers_are_dropped() {
        let inputs = rows(json!([
            {"title": "Ghost"},
            {"id": "optical", "title": "Optical"}
        ]));
        let presets = rows(json!([{"title": "Broken"}]));
        let cat = Catalog::from_rows(&inputs, &presets, &AdapterConfig::default());

        assert_eq!(cat.inputs().len(), 1);
        assert_eq!(cat.input(0).unwrap().id, "optical");
        assert!(cat.presets().is_empty());
    }

    #[test]
    fn options_follow_index_order() {
        let cat = Catalog::from_rows(&sample_inputs(), &[], &AdapterConfig::default());
        let opts = cat.options(CatalogList::Inputs);
        assert_eq!(
            opts,
            vec![
                CatalogOption { index: 0, title: "HDMI 1".into() },
                CatalogOption { index: 1, title: "HDMI 2".into() },
            ]
        );
    }

    #[test]
    fn empty_catalog_resolves_nothing() {
        let cat = Catalog::empty();
        assert!(cat.is_empty());
        assert!(cat.input(0).is_err());
        assert!(cat.preset(0).is_err());
    }
}

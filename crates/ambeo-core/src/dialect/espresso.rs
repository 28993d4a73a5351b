// Espresso dialect (AMBEO Max): fixed catalog, no list fetch.

use async_trait::async_trait;

use ambeo_api::SoundbarClient;

use super::{Dialect, DialectStrategy, WriteTarget};
use crate::catalog::{Catalog, InputEntry, PresetEntry};
use crate::config::AdapterConfig;

/// `(identifier, title)` of the fixed inputs, in index order.
const INPUTS: [(&str, &str); 4] = [
    ("hdmi1", "HDMI 1"),
    ("hdmi2", "HDMI 2"),
    ("optical", "Optical"),
    ("bluetooth", "Bluetooth"),
];

/// `(preset key, title)` of the fixed presets, in index order.
const PRESETS: [(&str, &str); 5] = [
    ("neutral", "Neutral"),
    ("movies", "Movies"),
    ("sport", "Sport"),
    ("news", "News"),
    ("music", "Music"),
];

fn input_path(id: &str) -> String {
    format!("ui:/inputs/{id}")
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Espresso;

impl Espresso {
    /// The fixed catalog. Custom names do not apply to Espresso inputs.
    pub fn catalog() -> Catalog {
        let inputs = INPUTS
            .iter()
            .map(|(id, title)| InputEntry {
                id: (*id).to_owned(),
                title: (*title).to_owned(),
                path: Some(input_path(id)),
            })
            .collect();
        let presets = PRESETS
            .iter()
            .map(|(key, title)| PresetEntry {
                key: (*key).to_owned(),
                title: (*title).to_owned(),
            })
            .collect();
        Catalog::new(inputs, presets)
    }
}

#[async_trait]
impl DialectStrategy for Espresso {
    fn dialect(&self) -> Dialect {
        Dialect::Espresso
    }

    fn applies_to(&self, _model: &str) -> bool {
        true
    }

    async fn build_catalog(&self, _client: &SoundbarClient, _config: &AdapterConfig) -> Catalog {
        Self::catalog()
    }

    fn source_target(&self, entry: &InputEntry) -> Option<WriteTarget> {
        Some(WriteTarget::Activate {
            path: entry.path.clone().unwrap_or_else(|| input_path(&entry.id)),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::CatalogList;

    #[test]
    fn fixed_catalog_shape() {
        let cat = Espresso::catalog();
        assert_eq!(cat.inputs().len(), 4);
        assert_eq!(cat.presets().len(), 5);
        assert_eq!(cat.index_to_identifier(CatalogList::Inputs, 2).unwrap(), "optical");
        assert_eq!(cat.preset(4).unwrap().title, "Music");
    }

    #[test]
    fn inputs_map_to_fixed_paths() {
        let cat = Espresso::catalog();
        let target = Espresso.source_target(cat.input(3).unwrap());
        assert_eq!(
            target,
            Some(WriteTarget::Activate {
                path: "ui:/inputs/bluetooth".into()
            })
        );
    }
}

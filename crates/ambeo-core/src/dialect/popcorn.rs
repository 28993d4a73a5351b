// Popcorn dialect (AMBEO Plus / Mini): catalog fetched from the device.

use async_trait::async_trait;
use tracing::{debug, warn};

use ambeo_api::{SoundbarClient, paths};

use super::{Dialect, DialectStrategy, WriteTarget};
use crate::catalog::{Catalog, InputEntry};
use crate::config::AdapterConfig;

const MODEL_MARKERS: [&str; 2] = ["Plus", "Mini"];

#[derive(Debug, Clone, Copy, Default)]
pub struct Popcorn;

#[async_trait]
impl DialectStrategy for Popcorn {
    fn dialect(&self) -> Dialect {
        Dialect::Popcorn
    }

    fn applies_to(&self, model: &str) -> bool {
        MODEL_MARKERS.iter().any(|m| model.contains(m))
    }

    async fn build_catalog(&self, client: &SoundbarClient, config: &AdapterConfig) -> Catalog {
        let window = config.row_window;

        // Sequential on purpose: the device handles one request at a time.
        let inputs = match client.get_rows(paths::INPUTS, 0, window).await {
            Ok(rows) => rows,
            Err(e) => {
                warn!(error = %e, "input list unavailable, catalog has no inputs");
                Vec::new()
            }
        };
        let presets = match client.get_rows(paths::AUDIO_PRESET_VALUES, 0, window).await {
            Ok(rows) => rows,
            Err(e) => {
                warn!(error = %e, "preset list unavailable, catalog has no presets");
                Vec::new()
            }
        };

        let catalog = Catalog::from_rows(&inputs, &presets, config);
        debug!(
            inputs = catalog.inputs().len(),
            presets = catalog.presets().len(),
            "built popcorn catalog"
        );
        catalog
    }

    fn source_target(&self, entry: &InputEntry) -> Option<WriteTarget> {
        entry
            .path
            .clone()
            .map(|path| WriteTarget::Activate { path })
    }
}

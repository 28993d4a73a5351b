//! `ambeo sources` / `ambeo presets`: the current catalog with indices.

use tabled::Tabled;

use ambeo_core::{Adapter, AdapterConfig, CatalogList, CatalogOption};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct OptionRow {
    #[tabled(rename = "Index")]
    index: usize,
    #[tabled(rename = "Name")]
    title: String,
}

impl From<&CatalogOption> for OptionRow {
    fn from(o: &CatalogOption) -> Self {
        Self {
            index: o.index,
            title: o.title.clone(),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    list: CatalogList,
    config: AdapterConfig,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let options =
        Adapter::oneshot(config, |adapter| async move { Ok(adapter.options(list)) }).await?;

    if options.is_empty() && !global.quiet {
        eprintln!("The soundbar reported no {list}.");
    }
    let out = output::render_list(&global.output, &options, |o| OptionRow::from(o), |o| {
        o.title.clone()
    });
    output::print_output(&out, global.quiet);
    Ok(())
}

//! `ambeo status`: every control's current value.

use tabled::Tabled;

use ambeo_core::{Adapter, AdapterConfig};

use super::util::{self, StatusEntry};
use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
pub struct StatusRow {
    #[tabled(rename = "Control")]
    control: String,
    #[tabled(rename = "Value")]
    value: String,
}

impl From<&StatusEntry> for StatusRow {
    fn from(e: &StatusEntry) -> Self {
        Self {
            control: e.control.caption().to_owned(),
            value: match e.label {
                Some(ref label) => format!("{} ({label})", e.value),
                None => e.value.to_string(),
            },
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(config: AdapterConfig, global: &GlobalOpts) -> Result<(), CliError> {
    let entries = Adapter::oneshot(config, |adapter| async move {
        Ok(util::status_entries(&adapter.controls(), &adapter.catalog()))
    })
    .await?;

    let out = output::render_list(&global.output, &entries, |e| StatusRow::from(e), |e| {
        format!("{}={}", e.control, e.value)
    });
    output::print_output(&out, global.quiet);
    Ok(())
}

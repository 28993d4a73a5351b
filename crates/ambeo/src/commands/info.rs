//! `ambeo info`: model, dialect and connection state.

use serde::Serialize;

use ambeo_core::{Adapter, AdapterConfig, AdapterState, Dialect};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Debug, Serialize)]
struct InfoView {
    endpoint: String,
    model: String,
    dialect: Dialect,
    state: AdapterState,
    inputs: usize,
    presets: usize,
}

fn detail(info: &InfoView, color: bool) -> String {
    [
        format!("Endpoint:  {}", info.endpoint),
        format!("Model:     {}", info.model),
        format!("Dialect:   {}", info.dialect),
        format!("State:     {}", output::paint_state(info.state, color)),
        format!("Inputs:    {}", info.inputs),
        format!("Presets:   {}", info.presets),
    ]
    .join("\n")
}

pub async fn handle(config: AdapterConfig, global: &GlobalOpts) -> Result<(), CliError> {
    let endpoint = config.endpoint().to_string();
    let info = Adapter::oneshot(config, |adapter| async move {
        let identity = adapter.identity().ok_or_else(|| ambeo_core::CoreError::NotActive {
            state: adapter.state(),
        })?;
        let catalog = adapter.catalog();
        Ok(InfoView {
            endpoint,
            model: identity.model.clone(),
            dialect: identity.dialect,
            state: adapter.state(),
            inputs: catalog.inputs().len(),
            presets: catalog.presets().len(),
        })
    })
    .await?;

    let color = output::should_color(&global.color);
    let out = output::render_single(
        &global.output,
        &info,
        |i| detail(i, color),
        |i| i.model.clone(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}

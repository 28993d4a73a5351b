//! Shared helpers for command handlers.

use serde::Serialize;

use ambeo_core::{Catalog, Control, ControlState, ControlValue};

/// One control's value, with the catalog title for Source and Preset.
#[derive(Debug, Serialize)]
pub struct StatusEntry {
    pub control: Control,
    pub value: ControlValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Catalog title for an index-valued control.
pub fn label_for(control: Control, value: ControlValue, catalog: &Catalog) -> Option<String> {
    let index = value.as_int();
    match control {
        Control::Source => catalog.input(index).ok().map(|e| e.title.clone()),
        Control::Preset => catalog.preset(index).ok().map(|e| e.title.clone()),
        _ => None,
    }
}

/// `1 (HDMI 2)` for catalog controls, the bare value otherwise.
pub fn display_value(control: Control, value: ControlValue, catalog: &Catalog) -> String {
    match label_for(control, value, catalog) {
        Some(label) => format!("{value} ({label})"),
        None => value.to_string(),
    }
}

pub fn status_entries(state: &ControlState, catalog: &Catalog) -> Vec<StatusEntry> {
    state
        .iter()
        .map(|(control, value)| StatusEntry {
            control,
            value,
            label: label_for(control, value, catalog),
        })
        .collect()
}

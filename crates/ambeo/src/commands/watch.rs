//! `ambeo watch`: keep polling and print each control change.

use chrono::{DateTime, Local, Utc};
use serde::Serialize;
use tracing::debug;

use ambeo_core::config::DEFAULT_UPDATE_INTERVAL;
use ambeo_core::{Adapter, AdapterConfig, Catalog, Control, ControlState, ControlValue};

use super::util;
use crate::cli::{GlobalOpts, OutputFormat, WatchArgs};
use crate::error::CliError;
use crate::output;

/// One change, for structured output (one JSON document per line).
#[derive(Debug, Serialize)]
struct ChangeEvent {
    at: DateTime<Utc>,
    control: Control,
    value: ControlValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<String>,
}

fn changes(previous: &ControlState, current: &ControlState) -> Vec<(Control, ControlValue)> {
    current
        .iter()
        .filter(|(control, value)| previous.get(*control) != Some(*value))
        .collect()
}

fn print_changes(
    global: &GlobalOpts,
    color: bool,
    previous: &ControlState,
    changed: &[(Control, ControlValue)],
    catalog: &Catalog,
) {
    let structured = matches!(
        global.output,
        OutputFormat::Json | OutputFormat::JsonCompact | OutputFormat::Yaml
    );
    for &(control, value) in changed {
        let line = if structured {
            output::render_json_compact(&ChangeEvent {
                at: Utc::now(),
                control,
                value,
                label: util::label_for(control, value, catalog),
            })
        } else {
            let old = previous
                .get(control)
                .map(|v| util::display_value(control, v, catalog));
            let new = util::display_value(control, value, catalog);
            format!(
                "[{}] {}",
                Local::now().format("%H:%M:%S"),
                output::paint_change(control.caption(), old.as_deref(), &new, color)
            )
        };
        output::print_output(&line, global.quiet);
    }
}

pub async fn handle(
    args: WatchArgs,
    mut config: AdapterConfig,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    if config.update_interval.is_zero() {
        config.update_interval = DEFAULT_UPDATE_INTERVAL;
    }
    let interval = config.update_interval;

    let adapter = Adapter::new(config);
    adapter.connect().await?;

    let color = output::should_color(&global.color);
    let mut rx = adapter.subscribe_controls();
    let mut previous = rx.borrow_and_update().clone();

    // Initial values count as changes from nothing
    let initial = changes(&ControlState::default(), &previous);
    print_changes(global, color, &ControlState::default(), &initial, &adapter.catalog());
    if !global.quiet {
        eprintln!("Watching every {}s, Ctrl-C to stop", interval.as_secs());
    }

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    let mut seen = 0usize;

    loop {
        tokio::select! {
            _ = &mut ctrl_c => {
                debug!("interrupted");
                break;
            }
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let current = rx.borrow_and_update().clone();
                let diff = changes(&previous, &current);
                print_changes(global, color, &previous, &diff, &adapter.catalog());
                seen += diff.len();
                previous = current;

                if args.count.is_some_and(|n| seen >= n) {
                    break;
                }
            }
        }
    }

    adapter.shutdown().await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_changes_between_equal_snapshots() {
        let state = ControlState::default();
        assert!(changes(&state, &state).is_empty());
    }
}

//! `ambeo set <control> <value>`.

use ambeo_core::{Adapter, AdapterConfig, CatalogList, Command, CommandOutcome, SkipReason};

use super::util;
use crate::cli::{GlobalOpts, OutputFormat, SetArgs};
use crate::error::CliError;
use crate::output;

/// Soundbar volume scale.
const VOLUME_RANGE: std::ops::RangeInclusive<i32> = 0..=100;

fn hint(reason: &SkipReason) -> String {
    match reason {
        SkipReason::UnknownIndex {
            list: CatalogList::Inputs,
            ..
        } => "Run: ambeo sources".into(),
        SkipReason::UnknownIndex {
            list: CatalogList::Presets,
            ..
        } => "Run: ambeo presets".into(),
        _ => "Run with -v for details".into(),
    }
}

pub async fn handle(
    args: SetArgs,
    config: AdapterConfig,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    // Validate before touching the network
    let command = Command::from_host_name(&args.control, args.value)?;
    if let Command::SetVolume { volume } = command {
        if !VOLUME_RANGE.contains(&volume) {
            return Err(CliError::Validation {
                field: "Volume".into(),
                reason: format!("{volume} is outside 0-100"),
            });
        }
    }

    let (outcome, catalog) = Adapter::oneshot(config, |adapter| async move {
        let outcome = adapter.execute(command).await?;
        Ok((outcome, adapter.catalog()))
    })
    .await?;

    match outcome {
        CommandOutcome::Applied { control, value } => {
            let out = match global.output {
                OutputFormat::Table | OutputFormat::Plain => format!(
                    "{} set to {}",
                    control.caption(),
                    util::display_value(control, value, &catalog)
                ),
                _ => output::render_single(
                    &global.output,
                    &outcome,
                    |_| String::new(),
                    |_| String::new(),
                ),
            };
            output::print_output(&out, global.quiet);
            Ok(())
        }
        CommandOutcome::Skipped { control, reason } => Err(CliError::NotApplied {
            control: control.to_string(),
            hint: hint(&reason),
            reason,
        }),
    }
}

// ── Control mapper ──
//
// Turns a validated `Command` into device writes against the session's
// catalog and strategy. Write-through: on success the store gets exactly
// the requested value, with no read-back.

use std::time::Duration;

use tracing::{debug, warn};

use ambeo_api::TypedValue;

use crate::adapter::Session;
use crate::catalog::CatalogList;
use crate::command::{Command, CommandOutcome};
use crate::dialect::WriteTarget;
use crate::error::SkipReason;
use crate::store::ControlStore;

/// Apply one command. The caller holds the session lock for the duration,
/// including the settle delay after an activate write.
pub(crate) async fn apply(
    session: &Session,
    store: &ControlStore,
    settle: Duration,
    command: Command,
) -> CommandOutcome {
    let control = command.control();
    match resolve_and_write(session, settle, command).await {
        Ok(()) => {
            let value = command.value();
            store.publish(control, value);
            debug!(%control, %value, "command applied");
            CommandOutcome::Applied { control, value }
        }
        Err(reason) => {
            debug!(%control, %reason, "command skipped");
            CommandOutcome::Skipped { control, reason }
        }
    }
}

async fn resolve_and_write(
    session: &Session,
    settle: Duration,
    command: Command,
) -> Result<(), SkipReason> {
    let target = match command {
        Command::SetVolume { volume } => scalar_target(command, TypedValue::I32(volume))?,
        Command::SetSwitch { on, .. } => scalar_target(command, TypedValue::Bool(on))?,
        Command::SetSource { index } => {
            let entry = session.catalog.input(index)?;
            session
                .strategy
                .source_target(entry)
                .ok_or(SkipReason::NoWriteTarget {
                    list: CatalogList::Inputs,
                    index,
                })?
        }
        Command::SetPreset { index } => {
            let entry = session.catalog.preset(index)?;
            session.strategy.preset_target(entry)
        }
    };
    write(session, settle, target).await
}

fn scalar_target(command: Command, value: TypedValue) -> Result<WriteTarget, SkipReason> {
    let control = command.control();
    let path = control.scalar_path().ok_or(SkipReason::NoData {
        path: control.to_string(),
    })?;
    Ok(WriteTarget::Value { path, value })
}

async fn write(session: &Session, settle: Duration, target: WriteTarget) -> Result<(), SkipReason> {
    match target {
        WriteTarget::Value { path, value } => {
            session.client.set_data(path, &value).await.map_err(|e| {
                warn!(path, rejected = e.is_device_error(), error = %e, "device write failed");
                SkipReason::no_data(path)
            })
        }
        WriteTarget::Activate { path } => {
            session.client.activate(&path).await.map_err(|e| {
                warn!(path = %path, error = %e, "activate write could not be issued");
                SkipReason::no_data(&path)
            })?;
            // The device cannot answer reads while it switches inputs.
            tokio::time::sleep(settle).await;
            Ok(())
        }
    }
}

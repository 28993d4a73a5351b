// ── Sync loop body ──
//
// One pass over every tracked control. Each read is independent: a failed
// or unmappable read skips that control only, leaving its previous value
// in place. There is no device snapshot; values reflect different read
// instants.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use strum::IntoEnumIterator;
use tracing::debug;

use ambeo_api::paths::{self, tag};
use ambeo_api::{DataValue, SoundbarClient};

use crate::adapter::Session;
use crate::catalog::CatalogList;
use crate::control::{Control, ControlValue};
use crate::error::SkipReason;
use crate::store::ControlStore;

/// Outcome of one sync pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PollReport {
    pub polled_at: DateTime<Utc>,
    /// Controls whose value was read and published (changed or not).
    pub updated: Vec<Control>,
    pub skipped: BTreeMap<Control, SkipReason>,
}

impl PollReport {
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

pub(crate) async fn poll_all(session: &Session, store: &ControlStore) -> PollReport {
    let mut report = PollReport {
        polled_at: Utc::now(),
        ..PollReport::default()
    };

    for control in Control::iter() {
        match read_control(session, control).await {
            Ok(value) => {
                store.publish(control, value);
                report.updated.push(control);
            }
            Err(reason) => {
                debug!(%control, %reason, "poll skipped control");
                report.skipped.insert(control, reason);
            }
        }
    }

    debug!(
        updated = report.updated.len(),
        skipped = report.skipped.len(),
        "poll complete"
    );
    report
}

async fn read_control(session: &Session, control: Control) -> Result<ControlValue, SkipReason> {
    let client = &session.client;
    match control {
        Control::Volume => {
            let v = read(client, paths::VOLUME).await?;
            v.as_i32()
                .map(ControlValue::from)
                .ok_or_else(|| SkipReason::no_data(paths::VOLUME))
        }
        Control::Source => {
            let v = read(client, paths::SELECTED_INPUT).await?;
            let id = v
                .key(tag::INPUT_ID)
                .ok_or_else(|| SkipReason::no_data(paths::SELECTED_INPUT))?;
            session
                .catalog
                .identifier_to_index(CatalogList::Inputs, &id)
                .map(ControlValue::Int)
        }
        Control::Preset => {
            let v = read(client, paths::AUDIO_PRESET).await?;
            let key = v
                .key(tag::AUDIO_PRESET)
                .ok_or_else(|| SkipReason::no_data(paths::AUDIO_PRESET))?;
            session
                .catalog
                .identifier_to_index(CatalogList::Presets, &key)
                .map(ControlValue::Int)
        }
        Control::Mute
        | Control::NightMode
        | Control::AmbeoMode
        | Control::VoiceEnhancement
        | Control::SoundFeedback => {
            let path = control
                .scalar_path()
                .ok_or_else(|| SkipReason::no_data(<&'static str>::from(control)))?;
            let v = read(client, path).await?;
            v.as_bool()
                .map(ControlValue::Bool)
                .ok_or_else(|| SkipReason::no_data(path))
        }
    }
}

async fn read(client: &SoundbarClient, path: &str) -> Result<DataValue, SkipReason> {
    client.get_data(path).await.map_err(|e| {
        debug!(path, unreachable = e.is_unreachable(), error = %e, "read failed");
        SkipReason::no_data(path)
    })
}

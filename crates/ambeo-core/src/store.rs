// ── Host-visible control state ──
//
// The last known value of every control. Values are overwritten wholesale
// by each successful read or write (last-read-wins). Subscribers are only
// woken when a value actually changes, so an idempotent poll is silent.

use std::collections::BTreeMap;

use serde::Serialize;
use tokio::sync::watch;

use crate::control::{Control, ControlValue};

/// Snapshot of all known control values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ControlState(BTreeMap<Control, ControlValue>);

impl ControlState {
    pub fn get(&self, control: Control) -> Option<ControlValue> {
        self.0.get(&control).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Control, ControlValue)> + '_ {
        self.0.iter().map(|(c, v)| (*c, *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Publishes `ControlState` through a `watch` channel.
#[derive(Debug)]
pub struct ControlStore {
    tx: watch::Sender<ControlState>,
}

impl Default for ControlStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ControlStore {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(ControlState::default());
        Self { tx }
    }

    pub fn snapshot(&self) -> ControlState {
        self.tx.borrow().clone()
    }

    pub fn get(&self, control: Control) -> Option<ControlValue> {
        self.tx.borrow().get(control)
    }

    pub fn subscribe(&self) -> watch::Receiver<ControlState> {
        self.tx.subscribe()
    }

    /// Overwrite one control. Returns `true` if the value changed.
    pub(crate) fn publish(&self, control: Control, value: ControlValue) -> bool {
        self.tx.send_if_modified(|state| {
            let previous = state.0.insert(control, value);
            previous != Some(value)
        })
    }

    /// Forget everything, e.g. when the device changes.
    pub(crate) fn clear(&self) {
        self.tx.send_if_modified(|state| {
            let had_values = !state.0.is_empty();
            state.0.clear();
            had_values
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publish_reports_changes_only() {
        let store = ControlStore::new();
        assert!(store.publish(Control::Volume, ControlValue::Int(20)));
        assert!(!store.publish(Control::Volume, ControlValue::Int(20)));
        assert!(store.publish(Control::Volume, ControlValue::Int(21)));
        assert_eq!(store.get(Control::Volume), Some(ControlValue::Int(21)));
    }

    #[test]
    fn subscribers_see_changes() {
        let store = ControlStore::new();
        let mut rx = store.subscribe();
        store.publish(Control::Mute, ControlValue::Bool(true));
        assert!(rx.has_changed().unwrap_or(false));
        assert_eq!(rx.borrow_and_update().get(Control::Mute), Some(ControlValue::Bool(true)));

        store.publish(Control::Mute, ControlValue::Bool(true));
        assert!(!rx.has_changed().unwrap_or(true));
    }

    #[test]
    fn clear_empties_state() {
        let store = ControlStore::new();
        store.publish(Control::Source, ControlValue::Int(1));
        store.clear();
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn serializes_as_name_map() {
        let store = ControlStore::new();
        store.publish(Control::AmbeoMode, ControlValue::Bool(false));
        store.publish(Control::Volume, ControlValue::Int(30));
        let json = serde_json::to_value(store.snapshot()).unwrap_or_default();
        assert_eq!(json, serde_json::json!({"Volume": 30, "AMBEOMode": false}));
    }
}

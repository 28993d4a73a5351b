// ── Host commands ──
//
// The "apply user command" entry point receives a control name and a
// loosely typed value. `Command::from_host` coerces it the way the host
// would cast it; the mapper turns the result into device writes.

use serde::Serialize;

use crate::control::{Control, ControlValue, ValueKind};
use crate::error::{CoreError, SkipReason};

/// A validated write request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    SetVolume { volume: i32 },
    /// Any boolean control (Mute, NightMode, AMBEOMode, ...).
    SetSwitch { control: Control, on: bool },
    /// Catalog index into the input list.
    SetSource { index: i64 },
    /// Catalog index into the preset list.
    SetPreset { index: i64 },
}

impl Command {
    /// Coerce a host value for `control`.
    ///
    /// Integers and booleans are interchangeable (`0`/`1`, `false`/`true`).
    /// Volume is passed through unclamped; it only has to fit the device's
    /// 32-bit integer tag.
    pub fn from_host(control: Control, value: ControlValue) -> Result<Self, CoreError> {
        match control {
            Control::Volume => {
                let raw = value.as_int();
                let volume = i32::try_from(raw).map_err(|_| CoreError::InvalidCommand {
                    control: control.to_string(),
                    message: format!("volume {raw} out of range"),
                })?;
                Ok(Self::SetVolume { volume })
            }
            Control::Source => Ok(Self::SetSource {
                index: value.as_int(),
            }),
            Control::Preset => Ok(Self::SetPreset {
                index: value.as_int(),
            }),
            Control::Mute
            | Control::NightMode
            | Control::AmbeoMode
            | Control::VoiceEnhancement
            | Control::SoundFeedback => Ok(Self::SetSwitch {
                control,
                on: value.as_bool(),
            }),
        }
    }

    /// Parse a host control name, then coerce the value.
    pub fn from_host_name(name: &str, value: ControlValue) -> Result<Self, CoreError> {
        let control = name.parse::<Control>().map_err(|_| CoreError::InvalidCommand {
            control: name.to_owned(),
            message: "unknown control".into(),
        })?;
        Self::from_host(control, value)
    }

    pub fn control(&self) -> Control {
        match self {
            Self::SetVolume { .. } => Control::Volume,
            Self::SetSwitch { control, .. } => *control,
            Self::SetSource { .. } => Control::Source,
            Self::SetPreset { .. } => Control::Preset,
        }
    }

    /// The value the host will see once the write is applied.
    pub fn value(&self) -> ControlValue {
        match self {
            Self::SetVolume { volume } => ControlValue::from(*volume),
            Self::SetSwitch { on, .. } => ControlValue::Bool(*on),
            Self::SetSource { index } | Self::SetPreset { index } => ControlValue::Int(*index),
        }
    }

    /// Reject a hand-built `SetSwitch` naming a non-boolean control.
    pub(crate) fn validate(&self) -> Result<(), CoreError> {
        match self {
            Self::SetSwitch { control, .. } if control.kind() != ValueKind::Boolean => {
                Err(CoreError::InvalidCommand {
                    control: control.to_string(),
                    message: "not a switch".into(),
                })
            }
            _ => Ok(()),
        }
    }
}

/// What happened to a command.
///
/// `Skipped` is the lenient no-op: host-visible state is untouched and the
/// reason is kept for tracing and tests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CommandOutcome {
    Applied {
        control: Control,
        value: ControlValue,
    },
    Skipped {
        control: Control,
        reason: SkipReason,
    },
}

impl CommandOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }

    pub fn control(&self) -> Control {
        match self {
            Self::Applied { control, .. } | Self::Skipped { control, .. } => *control,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn switches_accept_integers() {
        let cmd = Command::from_host(Control::Mute, ControlValue::Int(1)).unwrap();
        assert_eq!(
            cmd,
            Command::SetSwitch {
                control: Control::Mute,
                on: true
            }
        );
        let cmd = Command::from_host(Control::NightMode, ControlValue::Int(0)).unwrap();
        assert_eq!(cmd.value(), ControlValue::Bool(false));
    }

    #[test]
    fn indices_accept_booleans() {
        let cmd = Command::from_host(Control::Source, ControlValue::Bool(true)).unwrap();
        assert_eq!(cmd, Command::SetSource { index: 1 });
    }

    #[test]
    fn volume_must_fit_device_integer() {
        let err = Command::from_host(Control::Volume, ControlValue::Int(i64::MAX)).unwrap_err();
        assert!(matches!(err, CoreError::InvalidCommand { .. }));
        let cmd = Command::from_host(Control::Volume, ControlValue::Int(42)).unwrap();
        assert_eq!(cmd, Command::SetVolume { volume: 42 });
    }

    #[test]
    fn unknown_name_is_invalid() {
        let err = Command::from_host_name("Bass", ControlValue::Int(3)).unwrap_err();
        match err {
            CoreError::InvalidCommand { control, .. } => assert_eq!(control, "Bass"),
            other => panic!("unexpected: {other:?}"),
        }
        let cmd = Command::from_host_name("AMBEOMode", ControlValue::Bool(true)).unwrap();
        assert_eq!(cmd.control(), Control::AmbeoMode);
    }

    #[test]
    fn hand_built_switch_on_catalog_control_is_rejected() {
        let cmd = Command::SetSwitch {
            control: Control::Preset,
            on: true,
        };
        assert!(cmd.validate().is_err());
        let cmd = Command::SetSwitch {
            control: Control::Volume,
            on: true,
        };
        assert!(cmd.validate().is_err());
        assert!(Command::SetVolume { volume: 5 }.validate().is_ok());
    }
}

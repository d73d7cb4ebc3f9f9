// Receiver contract - the capability a command acts upon
//
// The engine never looks inside a receiver. It only needs a forward operation
// and its inverse, which for switches are turn_on() and turn_off().

use serde::{Deserialize, Serialize};
use std::fmt;

/// Result type for receiver operations
pub type ReceiverResult<T> = Result<T, ReceiverError>;

/// Faults reported by a receiver itself
///
/// The controller passes these through to its caller untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReceiverError {
    #[error("{label} is unavailable")]
    Unavailable { label: String },

    #[error("{label} rejected the operation: {reason}")]
    Rejected { label: String, reason: String },
}

/// Power state of a switchable receiver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PowerState {
    On,
    #[default]
    Off,
}

impl PowerState {
    pub fn is_on(self) -> bool {
        self == PowerState::On
    }
}

impl fmt::Display for PowerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PowerState::On => write!(f, "ON"),
            PowerState::Off => write!(f, "OFF"),
        }
    }
}

/// Minimal receiver capability
///
/// `turn_on` and `turn_off` are the documented inverse pair: calling one
/// after the other must bring the receiver back to where it started, as long
/// as nothing else touched it in between.
///
/// # Example
/// ```
/// use switchboard::receiver::{PowerState, ReceiverResult, Switchable};
///
/// struct Heater {
///     power: PowerState,
/// }
///
/// impl Switchable for Heater {
///     fn label(&self) -> &str {
///         "Heater"
///     }
///
///     fn power(&self) -> PowerState {
///         self.power
///     }
///
///     fn turn_on(&mut self) -> ReceiverResult<()> {
///         self.power = PowerState::On;
///         Ok(())
///     }
///
///     fn turn_off(&mut self) -> ReceiverResult<()> {
///         self.power = PowerState::Off;
///         Ok(())
///     }
/// }
/// ```
pub trait Switchable: Send {
    /// Human-readable name, used in command descriptions and logs
    fn label(&self) -> &str;

    /// Current power state
    fn power(&self) -> PowerState;

    /// Forward operation
    fn turn_on(&mut self) -> ReceiverResult<()>;

    /// Inverse of `turn_on`
    fn turn_off(&mut self) -> ReceiverResult<()>;

    /// Whether the receiver can currently perform its operations
    fn is_online(&self) -> bool {
        true
    }

    /// Change availability; receivers that cannot go offline ignore this
    fn set_online(&mut self, _online: bool) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_power_state_default_is_off() {
        assert_eq!(PowerState::default(), PowerState::Off);
        assert!(!PowerState::default().is_on());
    }

    #[test]
    fn test_power_state_display() {
        assert_eq!(PowerState::On.to_string(), "ON");
        assert_eq!(PowerState::Off.to_string(), "OFF");
    }

    struct AlwaysOn;

    impl Switchable for AlwaysOn {
        fn label(&self) -> &str {
            "Pilot"
        }

        fn power(&self) -> PowerState {
            PowerState::On
        }

        fn turn_on(&mut self) -> ReceiverResult<()> {
            Ok(())
        }

        fn turn_off(&mut self) -> ReceiverResult<()> {
            Err(ReceiverError::Rejected {
                label: "Pilot".into(),
                reason: "cannot be switched off".into(),
            })
        }
    }

    #[test]
    fn test_default_availability_hook_is_noop() {
        let mut pilot = AlwaysOn;
        assert!(pilot.is_online());
        pilot.set_online(false);
        assert!(pilot.is_online());
        assert!(pilot.turn_off().is_err());
    }

    #[test]
    fn test_receiver_error_messages() {
        let err = ReceiverError::Unavailable {
            label: "Fan".into(),
        };
        assert_eq!(err.to_string(), "Fan is unavailable");

        let err = ReceiverError::Rejected {
            label: "Light".into(),
            reason: "bulb missing".into(),
        };
        assert_eq!(err.to_string(), "Light rejected the operation: bulb missing");
    }
}

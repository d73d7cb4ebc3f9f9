// Sample receivers: lights and fans

use crate::receiver::{PowerState, ReceiverError, ReceiverResult, Switchable};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

/// Kind of sample device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceKind {
    Light,
    Fan,
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceKind::Light => write!(f, "Light"),
            DeviceKind::Fan => write!(f, "Fan"),
        }
    }
}

/// A simple on/off device
///
/// Starts switched off and online. While offline, both operations fail with
/// [`ReceiverError::Unavailable`] and the power state is left untouched.
#[derive(Debug, Clone)]
pub struct SwitchDevice {
    kind: DeviceKind,
    label: String,
    power: PowerState,
    online: bool,
}

impl SwitchDevice {
    pub fn new(kind: DeviceKind, label: impl Into<String>) -> Self {
        Self {
            kind,
            label: label.into(),
            power: PowerState::Off,
            online: true,
        }
    }

    /// Create a light labelled "Light"
    pub fn light() -> Self {
        Self::new(DeviceKind::Light, "Light")
    }

    /// Create a fan labelled "Fan"
    pub fn fan() -> Self {
        Self::new(DeviceKind::Fan, "Fan")
    }

    /// Builder-style initial power state, applied without going through a command
    pub fn with_power(mut self, power: PowerState) -> Self {
        self.power = power;
        self
    }

    pub fn kind(&self) -> DeviceKind {
        self.kind
    }

    fn switch(&mut self, power: PowerState) -> ReceiverResult<()> {
        if !self.online {
            return Err(ReceiverError::Unavailable {
                label: self.label.clone(),
            });
        }

        self.power = power;
        info!(device = %self.label, kind = %self.kind, state = %power, "{} is {}", self.label, power);
        Ok(())
    }
}

impl Switchable for SwitchDevice {
    fn label(&self) -> &str {
        &self.label
    }

    fn power(&self) -> PowerState {
        self.power
    }

    fn turn_on(&mut self) -> ReceiverResult<()> {
        self.switch(PowerState::On)
    }

    fn turn_off(&mut self) -> ReceiverResult<()> {
        self.switch(PowerState::Off)
    }

    fn is_online(&self) -> bool {
        self.online
    }

    fn set_online(&mut self, online: bool) {
        self.online = online;
    }
}

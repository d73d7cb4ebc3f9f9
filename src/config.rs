// Scene configuration loaded from RON

use crate::devices::DeviceKind;
use crate::receiver::PowerState;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("RON error: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("Duplicate device label: {0}")]
    DuplicateDevice(String),

    #[error("Script refers to unknown device: {0}")]
    UnknownDevice(String),
}

/// Which observer the scene's controller reports through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ObserverKind {
    #[default]
    Tracing,
    Silent,
}

/// One receiver to create when the scene is built
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceConfig {
    pub label: String,
    pub kind: DeviceKind,
    /// Applied directly to the device, not through a command
    #[serde(default)]
    pub initial: PowerState,
    #[serde(default = "default_online")]
    pub online: bool,
}

fn default_online() -> bool {
    true
}

impl DeviceConfig {
    pub fn new(label: impl Into<String>, kind: DeviceKind) -> Self {
        Self {
            label: label.into(),
            kind,
            initial: PowerState::Off,
            online: true,
        }
    }
}

/// One scripted request against the controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScriptStep {
    On(String),
    Off(String),
    Undo,
    /// Undo until history is empty
    UndoAll,
}

impl ScriptStep {
    fn device(&self) -> Option<&str> {
        match self {
            ScriptStep::On(label) | ScriptStep::Off(label) => Some(label.as_str()),
            ScriptStep::Undo | ScriptStep::UndoAll => None,
        }
    }
}

/// Devices plus a script to run against them
///
/// # Example
/// ```
/// use switchboard::config::SceneConfig;
///
/// let config = SceneConfig::from_ron_str(
///     r#"(
///         devices: [(label: "Porch", kind: Light)],
///         script: [On("Porch"), Undo],
///     )"#,
/// )
/// .unwrap();
/// assert_eq!(config.devices.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SceneConfig {
    #[serde(default)]
    pub observer: ObserverKind,
    #[serde(default)]
    pub devices: Vec<DeviceConfig>,
    #[serde(default)]
    pub script: Vec<ScriptStep>,
}

impl SceneConfig {
    /// The light and fan scenario: four switches, then undo everything
    pub fn default_scene() -> Self {
        Self {
            observer: ObserverKind::Tracing,
            devices: vec![
                DeviceConfig::new("Light", DeviceKind::Light),
                DeviceConfig::new("Fan", DeviceKind::Fan),
            ],
            script: vec![
                ScriptStep::On("Light".into()),
                ScriptStep::On("Fan".into()),
                ScriptStep::Off("Light".into()),
                ScriptStep::Off("Fan".into()),
                ScriptStep::Undo,
                ScriptStep::Undo,
                ScriptStep::Undo,
                ScriptStep::Undo,
            ],
        }
    }

    /// Parse and validate a RON document
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        let config: SceneConfig = ron::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a RON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = fs::read_to_string(path)?;
        Self::from_ron_str(&source)
    }

    /// Check that labels are unique and the script only names known devices
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut labels = HashSet::new();
        for device in &self.devices {
            if !labels.insert(device.label.as_str()) {
                return Err(ConfigError::DuplicateDevice(device.label.clone()));
            }
        }

        for step in &self.script {
            if let Some(label) = step.device() {
                if !labels.contains(label) {
                    return Err(ConfigError::UnknownDevice(label.to_string()));
                }
            }
        }

        Ok(())
    }

    /// Serialize to pretty-printed RON
    pub fn to_ron_string(&self) -> Result<String, ron::Error> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
    }
}

// Scene - assembly layer wiring devices, registry and controller together

use crate::command::{CommandError, Controller, SwitchCommand, UndoStatus, UndoableCommand};
use crate::config::{ConfigError, ObserverKind, SceneConfig, ScriptStep};
use crate::devices::SwitchDevice;
use crate::observer::{CommandObserver, NullObserver, TracingObserver};
use crate::receiver::{PowerState, Switchable};
use crate::registry::{ReceiverId, ReceiverRegistry};
use std::collections::HashMap;

/// Errors raised while driving a scene
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Command(#[from] CommandError),

    #[error("Unknown device: {0}")]
    UnknownDevice(String),
}

/// What a single scripted action did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Executed(String),
    Undone(String),
    NothingToUndo,
}

/// Owns the receivers and the controller acting on them
///
/// Receivers live in the registry for as long as the scene does, so no
/// command in history can outlive the receiver it refers to.
pub struct Scene {
    registry: ReceiverRegistry,
    devices: HashMap<String, ReceiverId>,
    controller: Controller<SwitchCommand>,
}

impl Scene {
    /// Build an empty scene reporting through the given observer
    pub fn new(observer: impl CommandObserver + 'static) -> Self {
        Self {
            registry: ReceiverRegistry::new(),
            devices: HashMap::new(),
            controller: Controller::with_observer(observer),
        }
    }

    /// Build a scene from a validated configuration
    pub fn build(config: &SceneConfig) -> Result<Self, SceneError> {
        config.validate()?;

        let mut scene = match config.observer {
            ObserverKind::Tracing => Self::new(TracingObserver),
            ObserverKind::Silent => Self::new(NullObserver),
        };

        for device in &config.devices {
            let mut receiver =
                SwitchDevice::new(device.kind, device.label.clone()).with_power(device.initial);
            receiver.set_online(device.online);
            scene.add_device(receiver)?;
        }

        Ok(scene)
    }

    /// Register a device under its label
    pub fn add_device(&mut self, device: SwitchDevice) -> Result<ReceiverId, SceneError> {
        let label = device.label().to_string();
        if self.devices.contains_key(&label) {
            return Err(ConfigError::DuplicateDevice(label).into());
        }

        let id = self.registry.register(device);
        self.devices.insert(label, id);
        Ok(id)
    }

    pub fn device_id(&self, label: &str) -> Result<ReceiverId, SceneError> {
        self.devices
            .get(label)
            .copied()
            .ok_or_else(|| SceneError::UnknownDevice(label.to_string()))
    }

    /// Execute a switch command through the controller
    pub fn execute(&mut self, command: SwitchCommand) -> Result<String, SceneError> {
        let description = command.describe_with(&self.registry);
        self.controller.execute_command(command, &mut self.registry)?;
        Ok(description)
    }

    pub fn switch_on(&mut self, label: &str) -> Result<String, SceneError> {
        let id = self.device_id(label)?;
        self.execute(SwitchCommand::TurnOn(id))
    }

    pub fn switch_off(&mut self, label: &str) -> Result<String, SceneError> {
        let id = self.device_id(label)?;
        self.execute(SwitchCommand::TurnOff(id))
    }

    /// Undo the most recent command
    pub fn undo(&mut self) -> Result<StepOutcome, SceneError> {
        match self.controller.undo_last_command(&mut self.registry)? {
            UndoStatus::UndoPerformed { description } => Ok(StepOutcome::Undone(description)),
            UndoStatus::NothingToUndo => Ok(StepOutcome::NothingToUndo),
        }
    }

    /// Run a script, stopping at the first failing step
    pub fn run_script(&mut self, script: &[ScriptStep]) -> Result<Vec<StepOutcome>, SceneError> {
        let mut outcomes = Vec::with_capacity(script.len());

        for step in script {
            match step {
                ScriptStep::On(label) => {
                    outcomes.push(StepOutcome::Executed(self.switch_on(label)?))
                }
                ScriptStep::Off(label) => {
                    outcomes.push(StepOutcome::Executed(self.switch_off(label)?))
                }
                ScriptStep::Undo => outcomes.push(self.undo()?),
                ScriptStep::UndoAll => loop {
                    match self.undo()? {
                        StepOutcome::NothingToUndo => break,
                        outcome => outcomes.push(outcome),
                    }
                },
            }
        }

        Ok(outcomes)
    }

    pub fn power(&self, label: &str) -> Result<PowerState, SceneError> {
        let id = self.device_id(label)?;
        Ok(self.registry.power_of(id)?)
    }

    /// Label-based descriptions of the history, oldest first
    pub fn history(&self) -> Vec<String> {
        self.controller
            .commands()
            .map(|cmd| cmd.describe_with(&self.registry))
            .collect()
    }

    pub fn snapshot(&self) -> Vec<(String, PowerState)> {
        self.registry.snapshot()
    }

    pub fn controller(&self) -> &Controller<SwitchCommand> {
        &self.controller
    }

    pub fn registry(&self) -> &ReceiverRegistry {
        &self.registry
    }

    /// Take a device offline or bring it back, bypassing the controller
    pub fn set_online(&mut self, label: &str, online: bool) -> Result<(), SceneError> {
        let id = self.device_id(label)?;
        self.registry.get_mut(id)?.set_online(online);
        Ok(())
    }
}

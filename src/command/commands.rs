// Concrete command implementations

use crate::command::trait_def::{CommandResult, UndoableCommand};
use crate::registry::{ReceiverId, ReceiverRegistry};
use std::fmt;

/// Command that switches a registered receiver on or off
///
/// The set of switch operations is closed, so this is a plain enum with one
/// `match` per operation. Each variant only carries the receiver handle; the
/// registry keeps ownership of the receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwitchCommand {
    TurnOn(ReceiverId),
    TurnOff(ReceiverId),
}

impl SwitchCommand {
    /// The receiver this command is bound to
    pub fn target(&self) -> ReceiverId {
        match *self {
            SwitchCommand::TurnOn(id) | SwitchCommand::TurnOff(id) => id,
        }
    }

    /// The command performing the opposite operation on the same receiver
    pub fn inverse(&self) -> Self {
        match *self {
            SwitchCommand::TurnOn(id) => SwitchCommand::TurnOff(id),
            SwitchCommand::TurnOff(id) => SwitchCommand::TurnOn(id),
        }
    }

    fn verb(&self) -> &'static str {
        match self {
            SwitchCommand::TurnOn(_) => "On",
            SwitchCommand::TurnOff(_) => "Off",
        }
    }

    fn apply(registry: &mut ReceiverRegistry, id: ReceiverId, on: bool) -> CommandResult<()> {
        let receiver = registry.get_mut(id)?;
        if on {
            receiver.turn_on()?;
        } else {
            receiver.turn_off()?;
        }
        Ok(())
    }
}

impl UndoableCommand for SwitchCommand {
    type Target = ReceiverRegistry;

    fn execute(&self, registry: &mut ReceiverRegistry) -> CommandResult<()> {
        match *self {
            SwitchCommand::TurnOn(id) => Self::apply(registry, id, true),
            SwitchCommand::TurnOff(id) => Self::apply(registry, id, false),
        }
    }

    fn undo(&self, registry: &mut ReceiverRegistry) -> CommandResult<()> {
        match *self {
            SwitchCommand::TurnOn(id) => Self::apply(registry, id, false),
            SwitchCommand::TurnOff(id) => Self::apply(registry, id, true),
        }
    }

    fn description(&self) -> String {
        format!("Turn {} {}", self.verb(), self.target())
    }

    /// Uses the receiver label, e.g. "Light On"
    ///
    /// Falls back to the handle-based description if the receiver is gone.
    fn describe_with(&self, registry: &ReceiverRegistry) -> String {
        match registry.label_of(self.target()) {
            Ok(label) => format!("{} {}", label, self.verb()),
            Err(_) => self.description(),
        }
    }
}

type Operation<T> = Box<dyn Fn(&mut T) -> CommandResult<()> + Send>;

/// Command built from a forward closure and its inverse
///
/// For receivers outside the closed [`SwitchCommand`] set. The closures
/// must not capture mutable state of their own; everything they change
/// should live in the target.
pub struct ClosureCommand<T: ?Sized> {
    description: String,
    forward: Operation<T>,
    inverse: Operation<T>,
}

impl<T: ?Sized> ClosureCommand<T> {
    pub fn new<F, I>(description: impl Into<String>, forward: F, inverse: I) -> Self
    where
        F: Fn(&mut T) -> CommandResult<()> + Send + 'static,
        I: Fn(&mut T) -> CommandResult<()> + Send + 'static,
    {
        Self {
            description: description.into(),
            forward: Box::new(forward),
            inverse: Box::new(inverse),
        }
    }
}

impl<T: ?Sized> UndoableCommand for ClosureCommand<T> {
    type Target = T;

    fn execute(&self, target: &mut T) -> CommandResult<()> {
        (self.forward)(target)
    }

    fn undo(&self, target: &mut T) -> CommandResult<()> {
        (self.inverse)(target)
    }

    fn description(&self) -> String {
        self.description.clone()
    }
}

impl<T: ?Sized> fmt::Debug for ClosureCommand<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClosureCommand")
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

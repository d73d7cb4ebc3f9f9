// UndoableCommand trait definition

use crate::receiver::ReceiverError;
use crate::registry::ReceiverId;

/// Result type for command operations
pub type CommandResult<T> = Result<T, CommandError>;

/// Errors that can occur during command execution
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    /// The receiver refused or could not perform the operation
    #[error(transparent)]
    Receiver(#[from] ReceiverError),

    /// The command's receiver handle no longer refers to a live receiver
    #[error("Receiver {0} is no longer registered")]
    StaleReceiver(ReceiverId),

    /// Command execution failed
    #[error("Execution failed: {0}")]
    ExecutionFailed(String),

    /// Undo operation failed
    #[error("Undo failed: {0}")]
    UndoFailed(String),
}

/// Trait for commands that can be executed and undone
///
/// A command is an immutable binding between a target and a pair of inverse
/// operations. `execute` performs the forward one and `undo` the inverse one;
/// neither mutates the command itself.
///
/// `undo` must bring the target back to the state it had right before the
/// matching `execute`, provided nothing else mutated it in between. The
/// controller does not check this.
///
/// # Example
/// ```
/// use switchboard::command::trait_def::{CommandResult, UndoableCommand};
///
/// struct Increment(i64);
///
/// impl UndoableCommand for Increment {
///     type Target = i64;
///
///     fn execute(&self, counter: &mut i64) -> CommandResult<()> {
///         *counter += self.0;
///         Ok(())
///     }
///
///     fn undo(&self, counter: &mut i64) -> CommandResult<()> {
///         *counter -= self.0;
///         Ok(())
///     }
///
///     fn description(&self) -> String {
///         format!("Increment by {}", self.0)
///     }
/// }
/// ```
pub trait UndoableCommand {
    /// What the command operates on (a registry, a single receiver, ...)
    type Target: ?Sized;

    /// Perform the forward operation
    fn execute(&self, target: &mut Self::Target) -> CommandResult<()>;

    /// Perform the inverse of `execute`
    fn undo(&self, target: &mut Self::Target) -> CommandResult<()>;

    /// Human-readable description, used for logs and history listings
    fn description(&self) -> String;

    /// Description that may use the target, e.g. a receiver's label
    ///
    /// This is what the controller reports. Defaults to `description`.
    fn describe_with(&self, _target: &Self::Target) -> String {
        self.description()
    }
}

impl<C: UndoableCommand + ?Sized> UndoableCommand for Box<C> {
    type Target = C::Target;

    fn execute(&self, target: &mut Self::Target) -> CommandResult<()> {
        (**self).execute(target)
    }

    fn undo(&self, target: &mut Self::Target) -> CommandResult<()> {
        (**self).undo(target)
    }

    fn description(&self) -> String {
        (**self).description()
    }

    fn describe_with(&self, target: &Self::Target) -> String {
        (**self).describe_with(target)
    }
}

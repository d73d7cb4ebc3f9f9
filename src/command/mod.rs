// Command Pattern with undo history
//
// Architecture:
// - UndoableCommand trait: execute(), undo(), description()
// - Concrete commands: SwitchCommand (closed set over registered receivers)
//   and ClosureCommand (arbitrary forward/inverse pair)
// - Controller: executes commands and keeps the LIFO undo history
// - SharedController: Controller plus its target behind one lock

pub mod commands;
pub mod manager;
pub mod shared;
pub mod trait_def;

pub use commands::{ClosureCommand, SwitchCommand};
pub use manager::{Controller, UndoStatus};
pub use shared::SharedController;
pub use trait_def::{CommandError, CommandResult, UndoableCommand};

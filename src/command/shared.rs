// SharedController - controller and target behind a single lock
//
// For callers on several threads. Each operation holds the lock for the whole
// execute+push or pop+undo pair, so history order always matches the order
// in which the receivers were mutated.

use crate::command::manager::{Controller, UndoStatus};
use crate::command::trait_def::{CommandResult, UndoableCommand};
use parking_lot::Mutex;
use std::sync::Arc;

struct Inner<C: UndoableCommand>
where
    C::Target: Sized,
{
    controller: Controller<C>,
    target: C::Target,
}

/// Cloneable, thread-safe handle to a controller and the target it drives
pub struct SharedController<C: UndoableCommand>
where
    C::Target: Sized,
{
    inner: Arc<Mutex<Inner<C>>>,
}

impl<C: UndoableCommand> SharedController<C>
where
    C::Target: Sized,
{
    pub fn new(controller: Controller<C>, target: C::Target) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner { controller, target })),
        }
    }

    pub fn execute_command(&self, command: C) -> CommandResult<()> {
        let mut guard = self.inner.lock();
        let Inner { controller, target } = &mut *guard;
        controller.execute_command(command, target)
    }

    pub fn undo_last_command(&self) -> CommandResult<UndoStatus> {
        let mut guard = self.inner.lock();
        let Inner { controller, target } = &mut *guard;
        controller.undo_last_command(target)
    }

    pub fn history_len(&self) -> usize {
        self.inner.lock().controller.history_len()
    }

    pub fn history(&self) -> Vec<String> {
        self.inner.lock().controller.history()
    }

    /// Run a read-only closure against the target
    pub fn with_target<R>(&self, f: impl FnOnce(&C::Target) -> R) -> R {
        f(&self.inner.lock().target)
    }
}

impl<C: UndoableCommand> Clone for SharedController<C>
where
    C::Target: Sized,
{
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

// Controller - executes commands and drives undo

use crate::command::trait_def::{CommandResult, UndoableCommand};
use crate::observer::{CommandObserver, TracingObserver};

/// Outcome of an undo request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UndoStatus {
    /// The most recent command was undone and popped
    UndoPerformed { description: String },
    /// History was empty; nothing changed
    NothingToUndo,
}

impl UndoStatus {
    pub fn is_performed(&self) -> bool {
        matches!(self, UndoStatus::UndoPerformed { .. })
    }
}

/// Executes commands and keeps the history needed to undo them
///
/// History is a stack whose entries, bottom to top, are the successfully
/// executed commands that have not been undone yet, in the order they ran.
/// It changes in exactly two ways:
/// 1. `execute_command` pushes after a successful execute
/// 2. `undo_last_command` undoes the top entry and pops it once that succeeds
///
/// There is no redo: an undone command is dropped. Dropping the controller
/// drops any remaining history without touching the receivers.
pub struct Controller<C: UndoableCommand> {
    /// Executed commands, most recent at the back
    history: Vec<C>,

    /// Where transitions are reported
    observer: Box<dyn CommandObserver>,
}

impl<C: UndoableCommand> Controller<C> {
    /// Create a controller reporting through [`TracingObserver`]
    pub fn new() -> Self {
        Self::with_observer(TracingObserver)
    }

    /// Create a controller reporting through the given observer
    pub fn with_observer(observer: impl CommandObserver + 'static) -> Self {
        Self {
            history: Vec::new(),
            observer: Box::new(observer),
        }
    }

    /// Execute a command and record it
    ///
    /// The command is pushed only if `execute` succeeds.
    ///
    /// # Errors
    /// Returns the command's own error unchanged; history is left as it was.
    pub fn execute_command(&mut self, command: C, target: &mut C::Target) -> CommandResult<()> {
        if let Err(err) = command.execute(target) {
            self.observer.execute_failed(&command.describe_with(target), &err);
            return Err(err);
        }

        self.observer.executed(&command.describe_with(target));
        self.history.push(command);
        Ok(())
    }

    /// Undo the most recently executed command
    ///
    /// Returns [`UndoStatus::NothingToUndo`] on an empty history; that is not
    /// an error. The entry is popped only after its `undo` succeeds, so a
    /// failed undo leaves it on top and the request can be retried.
    ///
    /// # Errors
    /// Returns the command's undo error unchanged.
    pub fn undo_last_command(&mut self, target: &mut C::Target) -> CommandResult<UndoStatus> {
        let Some(command) = self.history.last() else {
            self.observer.nothing_to_undo();
            return Ok(UndoStatus::NothingToUndo);
        };

        let description = command.describe_with(target);
        if let Err(err) = command.undo(target) {
            self.observer.undo_failed(&description, &err);
            return Err(err);
        }

        self.history.pop();
        self.observer.undone(&description);
        Ok(UndoStatus::UndoPerformed { description })
    }

    /// Check if there are commands that can be undone
    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Number of executed, not yet undone commands
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Description of the command the next undo would revert
    pub fn undo_description(&self) -> Option<String> {
        self.history.last().map(|cmd| cmd.description())
    }

    /// Descriptions of the history, oldest first
    pub fn history(&self) -> Vec<String> {
        self.history.iter().map(|cmd| cmd.description()).collect()
    }

    /// Iterate over the recorded commands, oldest first
    pub fn commands(&self) -> impl Iterator<Item = &C> {
        self.history.iter()
    }
}

impl<C: UndoableCommand> Default for Controller<C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::trait_def::CommandError;
    use crate::observer::NullObserver;
    use std::sync::{Arc, Mutex};

    /// Appends its value on execute, removes it on undo
    struct PushValue {
        value: i32,
        fail_execute: bool,
    }

    impl PushValue {
        fn new(value: i32) -> Self {
            Self {
                value,
                fail_execute: false,
            }
        }

        fn failing(value: i32) -> Self {
            Self {
                value,
                fail_execute: true,
            }
        }
    }

    impl UndoableCommand for PushValue {
        type Target = Vec<i32>;

        fn execute(&self, log: &mut Vec<i32>) -> CommandResult<()> {
            if self.fail_execute {
                return Err(CommandError::ExecutionFailed(format!("refused {}", self.value)));
            }
            log.push(self.value);
            Ok(())
        }

        fn undo(&self, log: &mut Vec<i32>) -> CommandResult<()> {
            match log.last() {
                Some(&v) if v == self.value => {
                    log.pop();
                    Ok(())
                }
                Some(&v) => {
                    // Drop the stray value so a retry can succeed
                    log.pop();
                    Err(CommandError::UndoFailed(format!("{} was popped", v)))
                }
                None => Err(CommandError::UndoFailed("log is empty".into())),
            }
        }

        fn description(&self) -> String {
            format!("Push {}", self.value)
        }
    }

    #[derive(Clone, Default)]
    struct RecordingObserver {
        events: Arc<Mutex<Vec<String>>>,
    }

    impl CommandObserver for RecordingObserver {
        fn executed(&mut self, description: &str) {
            self.events.lock().unwrap().push(format!("executed {}", description));
        }

        fn execute_failed(&mut self, description: &str, _error: &CommandError) {
            self.events.lock().unwrap().push(format!("failed {}", description));
        }

        fn undone(&mut self, description: &str) {
            self.events.lock().unwrap().push(format!("undone {}", description));
        }

        fn nothing_to_undo(&mut self) {
            self.events.lock().unwrap().push("nothing".to_string());
        }
    }

    fn controller() -> Controller<PushValue> {
        Controller::with_observer(NullObserver)
    }

    #[test]
    fn test_execute_command() {
        let mut controller = controller();
        let mut log = Vec::new();

        controller.execute_command(PushValue::new(42), &mut log).unwrap();

        assert_eq!(log, vec![42]);
        assert_eq!(controller.history_len(), 1);
        assert!(controller.can_undo());
        assert_eq!(controller.undo_description().as_deref(), Some("Push 42"));
    }

    #[test]
    fn test_undo() {
        let mut controller = controller();
        let mut log = Vec::new();
        controller.execute_command(PushValue::new(42), &mut log).unwrap();

        let status = controller.undo_last_command(&mut log).unwrap();
        assert_eq!(
            status,
            UndoStatus::UndoPerformed {
                description: "Push 42".into()
            }
        );
        assert!(log.is_empty());
        assert!(controller.is_empty());
    }

    #[test]
    fn test_undo_with_empty_history() {
        let mut controller = controller();
        let mut log = vec![7];

        let status = controller.undo_last_command(&mut log).unwrap();
        assert_eq!(status, UndoStatus::NothingToUndo);
        assert!(!status.is_performed());
        assert_eq!(log, vec![7]);
        assert_eq!(controller.history_len(), 0);
    }

    #[test]
    fn test_undo_order_is_lifo() {
        let mut controller = controller();
        let mut log = Vec::new();
        for value in [1, 2, 3] {
            controller.execute_command(PushValue::new(value), &mut log).unwrap();
        }
        assert_eq!(controller.history(), vec!["Push 1", "Push 2", "Push 3"]);

        let mut undone = Vec::new();
        while let UndoStatus::UndoPerformed { description } =
            controller.undo_last_command(&mut log).unwrap()
        {
            undone.push(description);
        }

        assert_eq!(undone, vec!["Push 3", "Push 2", "Push 1"]);
        assert!(log.is_empty());
    }

    #[test]
    fn test_failed_execute_is_not_recorded() {
        let mut controller = controller();
        let mut log = Vec::new();
        controller.execute_command(PushValue::new(1), &mut log).unwrap();

        let err = controller
            .execute_command(PushValue::failing(2), &mut log)
            .unwrap_err();
        assert_eq!(err, CommandError::ExecutionFailed("refused 2".into()));
        assert_eq!(controller.history_len(), 1);

        // Next undo targets the last successful command
        let status = controller.undo_last_command(&mut log).unwrap();
        assert_eq!(
            status,
            UndoStatus::UndoPerformed {
                description: "Push 1".into()
            }
        );
    }

    #[test]
    fn test_failed_undo_keeps_entry() {
        let mut controller = controller();
        let mut log = Vec::new();
        controller.execute_command(PushValue::new(1), &mut log).unwrap();

        // Out-of-band mutation breaks the undo precondition
        log.push(99);

        let err = controller.undo_last_command(&mut log).unwrap_err();
        assert_eq!(err, CommandError::UndoFailed("99 was popped".into()));
        assert_eq!(controller.history_len(), 1);
        assert_eq!(controller.undo_description().as_deref(), Some("Push 1"));

        // The stray value is gone, so retrying undoes the same entry
        let status = controller.undo_last_command(&mut log).unwrap();
        assert!(status.is_performed());
        assert!(controller.is_empty());
        assert!(log.is_empty());
    }

    #[test]
    fn test_observer_sees_every_transition() {
        let observer = RecordingObserver::default();
        let events = observer.events.clone();
        let mut controller = Controller::with_observer(observer);
        let mut log = Vec::new();

        controller.execute_command(PushValue::new(1), &mut log).unwrap();
        let _ = controller.execute_command(PushValue::failing(2), &mut log);
        controller.undo_last_command(&mut log).unwrap();
        controller.undo_last_command(&mut log).unwrap();

        assert_eq!(
            *events.lock().unwrap(),
            vec!["executed Push 1", "failed Push 2", "undone Push 1", "nothing"]
        );
    }

    #[test]
    fn test_boxed_commands_share_history() {
        let mut controller: Controller<Box<dyn UndoableCommand<Target = Vec<i32>>>> =
            Controller::with_observer(NullObserver);
        let mut log = Vec::new();

        controller
            .execute_command(Box::new(PushValue::new(5)), &mut log)
            .unwrap();
        controller
            .execute_command(
                Box::new(crate::command::commands::ClosureCommand::new(
                    "Push 6",
                    |log: &mut Vec<i32>| {
                        log.push(6);
                        Ok(())
                    },
                    |log: &mut Vec<i32>| {
                        log.pop();
                        Ok(())
                    },
                )),
                &mut log,
            )
            .unwrap();

        assert_eq!(log, vec![5, 6]);
        assert_eq!(controller.history(), vec!["Push 5", "Push 6"]);

        controller.undo_last_command(&mut log).unwrap();
        controller.undo_last_command(&mut log).unwrap();
        assert!(log.is_empty());
    }
}

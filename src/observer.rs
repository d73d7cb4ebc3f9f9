// CommandObserver - logging capability handed to the controller
//
// The controller never logs through global state. Whatever it reports goes
// through the observer it was constructed with.

use crate::command::trait_def::CommandError;
use crate::messaging::channels::NotificationProducer;
use crate::messaging::notification::{Notification, NotificationCategory};
use ringbuf::traits::Producer;
use tracing::{debug, info, warn};

/// Receives a report for every controller transition
///
/// All methods default to doing nothing, so implementors only override what
/// they care about.
pub trait CommandObserver: Send {
    fn executed(&mut self, _description: &str) {}

    fn execute_failed(&mut self, _description: &str, _error: &CommandError) {}

    fn undone(&mut self, _description: &str) {}

    fn undo_failed(&mut self, _description: &str, _error: &CommandError) {}

    fn nothing_to_undo(&mut self) {}
}

/// Observer that discards every report
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl CommandObserver for NullObserver {}

/// Observer that emits `tracing` events
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl CommandObserver for TracingObserver {
    fn executed(&mut self, description: &str) {
        info!(target: "switchboard::controller", command = description, "executed");
    }

    fn execute_failed(&mut self, description: &str, error: &CommandError) {
        warn!(target: "switchboard::controller", command = description, %error, "execute failed");
    }

    fn undone(&mut self, description: &str) {
        info!(target: "switchboard::controller", command = description, "undone");
    }

    fn undo_failed(&mut self, description: &str, error: &CommandError) {
        warn!(target: "switchboard::controller", command = description, %error, "undo failed");
    }

    fn nothing_to_undo(&mut self) {
        debug!(target: "switchboard::controller", "no commands to undo");
    }
}

/// Observer that forwards reports as [`Notification`]s over a ringbuf channel
///
/// Notifications are dropped when the channel is full; the controller is
/// never blocked by a slow consumer.
pub struct NotificationObserver {
    sender: NotificationProducer,
    dropped: u64,
}

impl NotificationObserver {
    pub fn new(sender: NotificationProducer) -> Self {
        Self { sender, dropped: 0 }
    }

    /// Number of notifications lost because the channel was full
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    fn send(&mut self, notification: Notification) {
        if self.sender.try_push(notification).is_err() {
            self.dropped += 1;
        }
    }

    /// Receiver faults are device warnings; anything else is an error in `category`
    fn failure(
        category: NotificationCategory,
        error: &CommandError,
        message: String,
    ) -> Notification {
        match error {
            CommandError::Receiver(_) => {
                Notification::warning(NotificationCategory::Device, message)
            }
            _ => Notification::error(category, message),
        }
    }
}

impl CommandObserver for NotificationObserver {
    fn executed(&mut self, description: &str) {
        self.send(Notification::info(
            NotificationCategory::Execute,
            format!("Executed: {}", description),
        ));
    }

    fn execute_failed(&mut self, description: &str, error: &CommandError) {
        self.send(Self::failure(
            NotificationCategory::Execute,
            error,
            format!("{} failed: {}", description, error),
        ));
    }

    fn undone(&mut self, description: &str) {
        self.send(Notification::info(
            NotificationCategory::Undo,
            format!("Undone: {}", description),
        ));
    }

    fn undo_failed(&mut self, description: &str, error: &CommandError) {
        self.send(Self::failure(
            NotificationCategory::Undo,
            error,
            format!("Undo of {} failed: {}", description, error),
        ));
    }

    fn nothing_to_undo(&mut self) {
        self.send(Notification::info(
            NotificationCategory::Undo,
            "No commands to undo!".to_string(),
        ));
    }
}

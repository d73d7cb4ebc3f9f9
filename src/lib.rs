// Switchboard - Library exports for the binary, tests and benchmarks

pub mod command;
pub mod config;
pub mod devices;
pub mod messaging;
pub mod observer;
pub mod receiver;
pub mod registry;
pub mod scene;

// Re-export commonly used types for convenience
pub use command::{
    ClosureCommand, CommandError, CommandResult, Controller, SharedController, SwitchCommand,
    UndoStatus, UndoableCommand,
};
pub use config::{ConfigError, SceneConfig};
pub use devices::{DeviceKind, SwitchDevice};
pub use messaging::channels::create_notification_channel;
pub use observer::{CommandObserver, NotificationObserver, NullObserver, TracingObserver};
pub use receiver::{PowerState, ReceiverError, Switchable};
pub use registry::{ReceiverId, ReceiverRegistry};
pub use scene::{Scene, SceneError, StepOutcome};

// ReceiverRegistry - owns receivers and hands out non-owning handles
//
// Commands never hold a receiver directly. They carry a ReceiverId and look
// the receiver up at execute/undo time, so a removed receiver is detected
// instead of being used after it is gone.

use crate::command::trait_def::{CommandError, CommandResult};
use crate::receiver::{PowerState, Switchable};
use std::fmt;

/// Handle to a receiver stored in a [`ReceiverRegistry`]
///
/// The generation changes every time a slot is freed, which invalidates all
/// handles issued for the previous occupant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReceiverId {
    index: u32,
    generation: u32,
}

impl ReceiverId {
    pub fn index(self) -> u32 {
        self.index
    }

    pub fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Display for ReceiverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.index)?;
        if self.generation > 0 {
            write!(f, ".{}", self.generation)?;
        }
        Ok(())
    }
}

struct Slot {
    generation: u32,
    receiver: Option<Box<dyn Switchable>>,
}

/// Owner of every receiver the commands refer to
#[derive(Default)]
pub struct ReceiverRegistry {
    slots: Vec<Slot>,
    free: Vec<u32>,
}

impl ReceiverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of a receiver and return its handle
    ///
    /// Freed slots are reused first.
    pub fn register(&mut self, receiver: impl Switchable + 'static) -> ReceiverId {
        self.register_boxed(Box::new(receiver))
    }

    pub fn register_boxed(&mut self, receiver: Box<dyn Switchable>) -> ReceiverId {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.receiver = Some(receiver);
            return ReceiverId {
                index,
                generation: slot.generation,
            };
        }

        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            receiver: Some(receiver),
        });
        ReceiverId {
            index,
            generation: 0,
        }
    }

    /// Remove a receiver, invalidating every handle that points at it
    pub fn remove(&mut self, id: ReceiverId) -> Option<Box<dyn Switchable>> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }

        let receiver = slot.receiver.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        Some(receiver)
    }

    pub fn contains(&self, id: ReceiverId) -> bool {
        self.get(id).is_ok()
    }

    /// Look up a receiver
    ///
    /// # Errors
    /// Returns [`CommandError::StaleReceiver`] if the handle was never issued
    /// or its receiver has been removed.
    pub fn get(&self, id: ReceiverId) -> CommandResult<&(dyn Switchable + 'static)> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.receiver.as_deref())
            .ok_or(CommandError::StaleReceiver(id))
    }

    pub fn get_mut(&mut self, id: ReceiverId) -> CommandResult<&mut (dyn Switchable + 'static)> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.receiver.as_deref_mut())
            .ok_or(CommandError::StaleReceiver(id))
    }

    pub fn power_of(&self, id: ReceiverId) -> CommandResult<PowerState> {
        self.get(id).map(|receiver| receiver.power())
    }

    pub fn label_of(&self, id: ReceiverId) -> CommandResult<&str> {
        self.get(id).map(|receiver| receiver.label())
    }

    /// Number of live receivers
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Labels and power states of live receivers, in slot order
    pub fn snapshot(&self) -> Vec<(String, PowerState)> {
        self.slots
            .iter()
            .filter_map(|slot| slot.receiver.as_deref())
            .map(|receiver| (receiver.label().to_string(), receiver.power()))
            .collect()
    }
}

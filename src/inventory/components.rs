use bevy::prelude::*;
use thiserror::Error;

/// Resource names shown by the HUD and used by the stock recipes, in display order.
pub const RESOURCE_NAMES: [&str; 5] = ["Wood", "Stone", "Coal", "Metal", "Fiber"];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InventoryError {
    #[error("resource `{0}` is not tracked by the inventory")]
    UnknownResource(String),
    #[error("cannot take {requested} {resource}, only {available} left")]
    Underflow {
        resource: String,
        requested: u32,
        available: u32,
    },
}

/// Quantity queries and mutations the crafting workflow needs from an inventory.
pub trait InventoryService {
    /// Current quantity; resources the inventory does not track count as zero.
    fn quantity(&self, resource: &str) -> u32;

    /// Removes `amount` of `resource`, returning what is left.
    fn decrement(&mut self, resource: &str, amount: u32) -> Result<u32, InventoryError>;
}

/// A single resource stack.
#[derive(Clone, Debug, PartialEq)]
pub struct ResourceSlot {
    pub name: String,
    pub count: u32,
}

/// Message published whenever a resource quantity changes.
#[derive(Message, Clone, Debug, PartialEq)]
pub struct InventoryChanged {
    pub resource: String,
    pub count: u32,
}

/// The player's shared resource stock.
#[derive(Resource, Debug, Default)]
pub struct Inventory {
    slots: Vec<ResourceSlot>,
    pending: Vec<InventoryChanged>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_counts<'a>(counts: impl IntoIterator<Item = (&'a str, u32)>) -> Self {
        let mut inventory = Self::new();
        for (name, count) in counts {
            inventory.add(name, count);
        }
        inventory
    }

    /// Adds `amount` to a resource, creating the slot if it does not exist yet.
    pub fn add(&mut self, resource: &str, amount: u32) -> u32 {
        let count = match self.slot_mut(resource) {
            Some(slot) => {
                slot.count = slot.count.saturating_add(amount);
                slot.count
            }
            None => {
                self.slots.push(ResourceSlot {
                    name: resource.to_string(),
                    count: amount,
                });
                amount
            }
        };
        self.record(resource, count);
        count
    }

    pub fn contains(&self, resource: &str) -> bool {
        self.slots.iter().any(|s| s.name == resource)
    }

    /// Name/quantity pairs in insertion order.
    pub fn snapshot(&self) -> Vec<(String, u32)> {
        self.slots
            .iter()
            .map(|s| (s.name.clone(), s.count))
            .collect()
    }

    /// Takes the notifications recorded since the last drain.
    pub fn drain_changes(&mut self) -> Vec<InventoryChanged> {
        std::mem::take(&mut self.pending)
    }

    fn slot_mut(&mut self, resource: &str) -> Option<&mut ResourceSlot> {
        self.slots.iter_mut().find(|s| s.name == resource)
    }

    fn record(&mut self, resource: &str, count: u32) {
        self.pending.push(InventoryChanged {
            resource: resource.to_string(),
            count,
        });
    }
}

impl InventoryService for Inventory {
    fn quantity(&self, resource: &str) -> u32 {
        self.slots
            .iter()
            .find(|s| s.name == resource)
            .map_or(0, |s| s.count)
    }

    fn decrement(&mut self, resource: &str, amount: u32) -> Result<u32, InventoryError> {
        let slot = self
            .slot_mut(resource)
            .ok_or_else(|| InventoryError::UnknownResource(resource.to_string()))?;
        if slot.count < amount {
            return Err(InventoryError::Underflow {
                resource: resource.to_string(),
                requested: amount,
                available: slot.count,
            });
        }
        slot.count -= amount;
        let count = slot.count;
        self.record(resource, count);
        Ok(count)
    }
}

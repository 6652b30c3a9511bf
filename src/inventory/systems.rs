use bevy::prelude::*;

use super::components::{Inventory, InventoryChanged};

/// Publishes the inventory's recorded mutations as `InventoryChanged` messages.
pub fn publish_inventory_changes(
    mut inventory: ResMut<Inventory>,
    mut changed: MessageWriter<InventoryChanged>,
) {
    // Draining is bookkeeping, not a content change.
    let changes = inventory.bypass_change_detection().drain_changes();
    for change in changes {
        debug!("{} -> {}", change.resource, change.count);
        changed.write(change);
    }
}

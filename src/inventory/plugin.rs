use bevy::prelude::*;

use super::components::{Inventory, InventoryChanged};
use super::systems::publish_inventory_changes;
use crate::sets::GameSet;

pub struct InventoryPlugin;

impl Plugin for InventoryPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Inventory>()
            .add_message::<InventoryChanged>()
            .add_systems(
                Update,
                publish_inventory_changes.in_set(GameSet::Notify),
            );
    }
}

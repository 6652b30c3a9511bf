use bevy::prelude::*;

use super::effect::{animate_puffs, spawn_placement_effects};
use super::registry::RecipeRegistry;
use super::scene::{CraftMenuToggled, PlacementEffectTriggered, setup_placement_assets};
use super::station::{CraftStation, configure_station};
use super::systems::{
    CraftRequested, ItemPlaced, confirm_on_click, craft_hotkeys, follow_cursor,
    handle_craft_requests,
};
use crate::registry::AppState;
use crate::registry::placement::PlacementConfig;
use crate::sets::GameSet;

pub struct CraftingPlugin;

impl Plugin for CraftingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<RecipeRegistry>()
            .init_resource::<CraftStation>()
            .add_message::<CraftRequested>()
            .add_message::<ItemPlaced>()
            .add_message::<PlacementEffectTriggered>()
            .add_message::<CraftMenuToggled>()
            .add_systems(Startup, setup_placement_assets)
            .add_systems(
                Update,
                configure_station
                    .run_if(
                        resource_changed::<RecipeRegistry>
                            .or(resource_exists_and_changed::<PlacementConfig>),
                    )
                    .run_if(in_state(AppState::InGame))
                    .before(GameSet::Input),
            )
            .add_systems(
                Update,
                craft_hotkeys
                    .in_set(GameSet::Input)
                    .run_if(in_state(AppState::InGame)),
            )
            .add_systems(
                Update,
                (handle_craft_requests, follow_cursor, confirm_on_click)
                    .chain()
                    .in_set(GameSet::Crafting)
                    .run_if(in_state(AppState::InGame)),
            )
            .add_systems(
                Update,
                (spawn_placement_effects, animate_puffs).in_set(GameSet::Effects),
            );
    }
}

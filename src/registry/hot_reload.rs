//! Hot-reload systems for config assets.

use bevy::asset::AssetEvent;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use super::RegistryHandles;
use super::assets::RecipeBookAsset;
use super::placement::PlacementConfig;
use crate::crafting::RecipeRegistry;

pub(crate) fn hot_reload_recipes(
    mut events: MessageReader<AssetEvent<RecipeBookAsset>>,
    handles: Res<RegistryHandles>,
    assets: Res<Assets<RecipeBookAsset>>,
    mut registry: ResMut<RecipeRegistry>,
) {
    for event in events.read() {
        if let AssetEvent::Modified { id } = event
            && *id == handles.recipes.id()
            && let Some(asset) = assets.get(&handles.recipes)
        {
            *registry = RecipeRegistry::from_recipes(asset.recipes.clone());
            info!("Hot-reloaded RecipeRegistry ({} recipes)", asset.recipes.len());
        }
    }
}

pub(crate) fn hot_reload_placement(
    mut events: MessageReader<AssetEvent<PlacementConfig>>,
    handles: Res<RegistryHandles>,
    assets: Res<Assets<PlacementConfig>>,
    mut config: ResMut<PlacementConfig>,
) {
    for event in events.read() {
        if let AssetEvent::Modified { id } = event
            && *id == handles.placement.id()
            && let Some(asset) = assets.get(&handles.placement)
        {
            // Starting inventory only applies on first load. Other fields are
            // picked up by systems watching the config resource.
            *config = asset.clone();
            info!(
                "Hot-reloaded PlacementConfig: max_distance={}, effect_scaling={}",
                asset.max_distance, asset.effect_scaling
            );
        }
    }
}

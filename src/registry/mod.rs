pub mod assets;
pub mod hot_reload;
pub mod loader;
pub mod placement;

use bevy::prelude::*;

use assets::RecipeBookAsset;
use loader::RonLoader;
use placement::PlacementConfig;

use crate::crafting::RecipeRegistry;
use crate::inventory::Inventory;

/// Application state: Loading waits for assets, InGame runs gameplay.
#[derive(States, Default, Debug, Clone, Eq, PartialEq, Hash)]
pub enum AppState {
    #[default]
    Loading,
    InGame,
}

/// Handles for assets being loaded.
#[derive(Resource)]
struct LoadingAssets {
    recipes: Handle<RecipeBookAsset>,
    placement: Handle<PlacementConfig>,
}

/// Keeps config handles alive for hot-reload detection.
#[derive(Resource)]
pub(crate) struct RegistryHandles {
    pub(crate) recipes: Handle<RecipeBookAsset>,
    pub(crate) placement: Handle<PlacementConfig>,
}

pub struct RegistryPlugin;

impl Plugin for RegistryPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<AppState>()
            .init_asset::<RecipeBookAsset>()
            .init_asset::<PlacementConfig>()
            .register_asset_loader(RonLoader::<RecipeBookAsset>::new(&["registry.ron"]))
            .register_asset_loader(RonLoader::<PlacementConfig>::new(&["config.ron"]))
            .add_systems(Startup, start_loading)
            .add_systems(Update, check_loading.run_if(in_state(AppState::Loading)))
            .add_systems(
                Update,
                (hot_reload::hot_reload_recipes, hot_reload::hot_reload_placement)
                    .run_if(in_state(AppState::InGame)),
            );
    }
}

fn start_loading(mut commands: Commands, asset_server: Res<AssetServer>) {
    let recipes = asset_server.load::<RecipeBookAsset>("data/recipes.registry.ron");
    let placement = asset_server.load::<PlacementConfig>("data/placement.config.ron");
    commands.insert_resource(LoadingAssets { recipes, placement });
}

fn check_loading(
    mut commands: Commands,
    loading: Res<LoadingAssets>,
    recipe_assets: Res<Assets<RecipeBookAsset>>,
    placement_assets: Res<Assets<PlacementConfig>>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    let (Some(book), Some(placement)) = (
        recipe_assets.get(&loading.recipes),
        placement_assets.get(&loading.placement),
    ) else {
        return; // not loaded yet
    };

    let registry = RecipeRegistry::from_recipes(book.recipes.clone());
    if registry.is_empty() {
        warn!("Recipe book is empty, nothing can be crafted");
    }
    commands.insert_resource(registry);
    commands.insert_resource(starting_inventory(placement));
    commands.insert_resource(placement.clone());

    // Keep handles alive for hot-reload
    commands.insert_resource(RegistryHandles {
        recipes: loading.recipes.clone(),
        placement: loading.placement.clone(),
    });

    commands.remove_resource::<LoadingAssets>();
    next_state.set(AppState::InGame);
    info!(
        "Config loaded: {} recipes, {} menu entries",
        book.recipes.len(),
        placement.menu.len()
    );
}

pub fn starting_inventory(config: &PlacementConfig) -> Inventory {
    Inventory::from_counts(
        config
            .starting_inventory
            .iter()
            .map(|(name, count)| (name.as_str(), *count)),
    )
}

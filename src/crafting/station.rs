use bevy::prelude::*;

use super::registry::RecipeRegistry;
use super::workflow::{ConfigurationError, CraftPlacementWorkflow};
use crate::inventory::Inventory;
use crate::registry::placement::PlacementConfig;
use crate::ui::craft_menu::CraftMenu;

pub type Workflow = CraftPlacementWorkflow<Entity, Handle<StandardMaterial>>;

/// The player's crafting bench: the workflow plus the recipes it may craft.
#[derive(Resource, Debug, Default)]
pub struct CraftStation {
    pub workflow: Workflow,
    /// Recipe ids that passed validation, in menu order.
    pub menu: Vec<String>,
    /// Set when a missing collaborator disables crafting entirely.
    pub disabled: Option<ConfigurationError>,
}

impl CraftStation {
    pub fn offers(&self, recipe_id: &str) -> bool {
        self.disabled.is_none() && self.menu.iter().any(|id| id == recipe_id)
    }
}

/// Splits configured menu ids into usable ones and configuration errors.
pub fn validate_menu(
    menu: &[String],
    registry: &RecipeRegistry,
) -> (Vec<String>, Vec<ConfigurationError>) {
    let mut usable = Vec::new();
    let mut errors = Vec::new();
    for id in menu {
        match registry.get(id) {
            None => errors.push(ConfigurationError::MissingRecipe(id.clone())),
            Some(recipe) if recipe.model.is_none() => {
                errors.push(ConfigurationError::MissingItemModel(id.clone()))
            }
            Some(_) => usable.push(id.clone()),
        }
    }
    (usable, errors)
}

/// Resources named by menu recipes that the inventory has no stack for.
pub fn untracked_resources(
    menu: &[String],
    registry: &RecipeRegistry,
    inventory: &Inventory,
) -> Vec<String> {
    let mut missing: Vec<String> = Vec::new();
    for recipe in menu.iter().filter_map(|id| registry.get(id)) {
        for (resource, _) in recipe.requirements() {
            if !inventory.contains(resource) && !missing.iter().any(|m| m == resource) {
                missing.push(resource.to_string());
            }
        }
    }
    missing
}

/// Validates the station against the loaded config. Runs on load and after
/// hot reloads; problems are logged once per (re)configuration.
pub fn configure_station(
    mut station: ResMut<CraftStation>,
    registry: Res<RecipeRegistry>,
    config: Res<PlacementConfig>,
    inventory: Res<Inventory>,
    menus: Query<(), With<CraftMenu>>,
) {
    station.workflow.set_tuning(config.tuning());

    if menus.is_empty() {
        let err = ConfigurationError::MissingCraftMenu;
        error!("{err}");
        station.menu.clear();
        station.disabled = Some(err);
        return;
    }

    let (usable, errors) = validate_menu(&config.menu, &registry);
    for err in &errors {
        error!("Craft menu entry disabled: {err}");
    }
    for missing in untracked_resources(&usable, &registry, &inventory) {
        warn!("Recipes need {missing}, which the inventory does not track");
    }
    info!("Craft station ready with {} recipes", usable.len());
    station.menu = usable;
    station.disabled = None;
}

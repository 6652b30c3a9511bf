use bevy::prelude::*;
use bevy::reflect::TypePath;
use serde::Deserialize;

use crate::crafting::CraftRecipe;

/// Asset loaded from recipes.registry.ron
#[derive(Asset, TypePath, Debug, Deserialize)]
pub struct RecipeBookAsset {
    pub recipes: Vec<CraftRecipe>,
}

use std::fmt;

use bevy::prelude::*;
use serde::Deserialize;

use crate::interaction::CollisionLayer;
use crate::inventory::InventoryService;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum ModelShape {
    #[default]
    Cuboid,
    Sphere,
    Cylinder,
}

fn default_model_size() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

fn default_model_color() -> [f32; 3] {
    [0.8, 0.8, 0.8]
}

/// Placeable item model a recipe produces.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ItemModel {
    #[serde(default)]
    pub shape: ModelShape,
    #[serde(default = "default_model_size")]
    pub size: [f32; 3],
    #[serde(default = "default_model_color")]
    pub color: [f32; 3],
    #[serde(default)]
    pub layer: CollisionLayer,
}

impl ItemModel {
    pub fn size(&self) -> Vec3 {
        Vec3::from_array(self.size)
    }

    pub fn color(&self) -> Color {
        let [r, g, b] = self.color;
        Color::srgb(r, g, b)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Ingredient {
    pub resource: String,
    pub count: u32,
}

/// Immutable crafting recipe: resource costs plus the item it places.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CraftRecipe {
    pub id: String,
    pub display_name: String,
    pub ingredients: Vec<Ingredient>,
    pub model: Option<ItemModel>,
}

/// One unmet requirement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shortfall {
    pub resource: String,
    pub required: u32,
    pub available: u32,
}

impl fmt::Display for Shortfall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}/{}", self.resource, self.available, self.required)
    }
}

impl CraftRecipe {
    /// Total required amount per resource, merging repeated ingredients.
    pub fn requirements(&self) -> Vec<(&str, u32)> {
        let mut totals: Vec<(&str, u32)> = Vec::with_capacity(self.ingredients.len());
        for ing in &self.ingredients {
            match totals.iter_mut().find(|(name, _)| *name == ing.resource) {
                Some((_, total)) => *total = total.saturating_add(ing.count),
                None => totals.push((&ing.resource, ing.count)),
            }
        }
        totals
    }

    /// Every requirement the inventory cannot cover, in ingredient order.
    pub fn shortfalls<V: InventoryService + ?Sized>(&self, inventory: &V) -> Vec<Shortfall> {
        self.requirements()
            .into_iter()
            .filter_map(|(resource, required)| {
                let available = inventory.quantity(resource);
                (available < required).then(|| Shortfall {
                    resource: resource.to_string(),
                    required,
                    available,
                })
            })
            .collect()
    }

    pub fn is_craftable<V: InventoryService + ?Sized>(&self, inventory: &V) -> bool {
        self.shortfalls(inventory).is_empty()
    }
}

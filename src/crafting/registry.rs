use std::collections::HashMap;

use bevy::prelude::*;

use super::recipe::CraftRecipe;
use crate::inventory::InventoryService;

#[derive(Resource, Debug, Default)]
pub struct RecipeRegistry {
    recipes: HashMap<String, CraftRecipe>,
    order: Vec<String>,
}

impl RecipeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_recipes(recipes: Vec<CraftRecipe>) -> Self {
        let mut reg = Self::new();
        for recipe in recipes {
            reg.add(recipe);
        }
        reg
    }

    /// Inserts or replaces a recipe. Replacements keep their menu position.
    pub fn add(&mut self, recipe: CraftRecipe) {
        if !self.recipes.contains_key(&recipe.id) {
            self.order.push(recipe.id.clone());
        }
        self.recipes.insert(recipe.id.clone(), recipe);
    }

    pub fn get(&self, id: &str) -> Option<&CraftRecipe> {
        self.recipes.get(id)
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Recipes in the order they were loaded.
    pub fn iter(&self) -> impl Iterator<Item = &CraftRecipe> {
        self.order.iter().filter_map(|id| self.recipes.get(id))
    }

    /// Get all recipes that can be crafted with current inventory.
    pub fn craftable_recipes<V>(&self, inventory: &V) -> Vec<&CraftRecipe>
    where
        V: InventoryService + ?Sized,
    {
        self.iter().filter(|r| r.is_craftable(inventory)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crafting::recipe::Ingredient;
    use crate::inventory::Inventory;

    fn recipe(id: &str, wood: u32) -> CraftRecipe {
        CraftRecipe {
            id: id.into(),
            display_name: id.into(),
            ingredients: vec![Ingredient {
                resource: "Wood".into(),
                count: wood,
            }],
            model: None,
        }
    }

    #[test]
    fn registry_keeps_load_order() {
        let reg = RecipeRegistry::from_recipes(vec![recipe("b", 1), recipe("a", 1)]);

        let ids: Vec<_> = reg.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["b", "a"]);
    }

    #[test]
    fn replacing_a_recipe_keeps_its_slot() {
        let mut reg = RecipeRegistry::from_recipes(vec![recipe("a", 1), recipe("b", 1)]);
        reg.add(recipe("a", 9));

        assert_eq!(reg.len(), 2);
        let first = reg.iter().next().unwrap();
        assert_eq!((first.id.as_str(), first.ingredients[0].count), ("a", 9));
    }

    #[test]
    fn registry_filters_craftable() {
        let reg = RecipeRegistry::from_recipes(vec![recipe("cheap", 2), recipe("pricey", 20)]);
        let inv = Inventory::from_counts([("Wood", 5)]);

        let craftable = reg.craftable_recipes(&inv);
        assert_eq!(craftable.len(), 1);
        assert_eq!(craftable[0].id, "cheap");
    }
}

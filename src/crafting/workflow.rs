//! Craft-then-place state machine.
//!
//! The workflow is `Idle` while its session slot is empty and `Placing` while it
//! holds a [`PlacementSession`]. Every world side effect goes through the
//! collaborator traits so the transitions can run without an engine.

use std::fmt;

use bevy::math::{Ray3d, Vec3};
use thiserror::Error;

use super::recipe::{CraftRecipe, ItemModel, Shortfall};
use crate::interaction::{CollisionLayer, PlacementSurfaceProbe};
use crate::inventory::{InventoryError, InventoryService};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("recipe `{0}` is not registered")]
    MissingRecipe(String),
    #[error("recipe `{0}` has no item model")]
    MissingItemModel(String),
    #[error("craft menu is missing, crafting disabled")]
    MissingCraftMenu,
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CraftError {
    #[error("a placement is already in progress")]
    AlreadyPlacing,
    #[error("not enough materials to craft {recipe}: {}", list_shortfalls(.shortfalls))]
    InsufficientMaterials {
        recipe: String,
        shortfalls: Vec<Shortfall>,
    },
    #[error("placement session has no live item")]
    MissingActiveItem,
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}

fn list_shortfalls(shortfalls: &[Shortfall]) -> String {
    shortfalls
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Tunables for ray length and the placement effect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementTuning {
    pub max_distance: f32,
    pub effect_scaling: f32,
    pub default_effect_scale: Vec3,
    pub neutral_position: Vec3,
}

impl Default for PlacementTuning {
    fn default() -> Self {
        Self {
            max_distance: 30.0,
            effect_scaling: 0.25,
            default_effect_scale: Vec3::ONE,
            neutral_position: Vec3::ZERO,
        }
    }
}

/// A freshly instantiated item with the look and layer it was created with.
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnedItem<I, A> {
    pub item: I,
    pub appearance: A,
    pub layer: CollisionLayer,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementEffect {
    pub position: Vec3,
    pub scale: Vec3,
}

/// World-side collaborator: owns crafted items and the effects around them.
pub trait PlacementScene {
    type Item: Copy + PartialEq + fmt::Debug;
    type Appearance: Clone;

    fn instantiate(
        &mut self,
        model: &ItemModel,
        position: Vec3,
    ) -> SpawnedItem<Self::Item, Self::Appearance>;
    fn preview_appearance(&self) -> Self::Appearance;
    fn set_appearance(&mut self, item: Self::Item, appearance: Self::Appearance);
    fn set_layer(&mut self, item: Self::Item, layer: CollisionLayer);
    fn set_position(&mut self, item: Self::Item, position: Vec3);
    fn is_alive(&self, item: Self::Item) -> bool;
    fn bounds_size(&self, item: Self::Item) -> Option<Vec3>;
    fn play_effect(&mut self, effect: PlacementEffect);
    /// Asks the craft menu to move out of (or back into) the way.
    fn toggle_craft_menu(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowState {
    Idle,
    Placing,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacementSession<I, A> {
    pub item: I,
    pub original_appearance: A,
    pub original_layer: CollisionLayer,
    pub position: Vec3,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CraftStarted<I> {
    pub recipe: String,
    pub item: I,
    /// Required resources the inventory does not track; nothing was taken for them.
    pub skipped: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    Idle,
    Moved(Vec3),
    Held(Vec3),
}

#[derive(Debug, Clone)]
pub struct CraftPlacementWorkflow<I, A> {
    tuning: PlacementTuning,
    session: Option<PlacementSession<I, A>>,
}

impl<I, A> Default for CraftPlacementWorkflow<I, A>
where
    I: Copy + PartialEq + fmt::Debug,
    A: Clone,
{
    fn default() -> Self {
        Self::new(PlacementTuning::default())
    }
}

impl<I, A> CraftPlacementWorkflow<I, A>
where
    I: Copy + PartialEq + fmt::Debug,
    A: Clone,
{
    pub fn new(tuning: PlacementTuning) -> Self {
        Self {
            tuning,
            session: None,
        }
    }

    pub fn tuning(&self) -> &PlacementTuning {
        &self.tuning
    }

    pub fn set_tuning(&mut self, tuning: PlacementTuning) {
        self.tuning = tuning;
    }

    pub fn state(&self) -> WorkflowState {
        if self.session.is_some() {
            WorkflowState::Placing
        } else {
            WorkflowState::Idle
        }
    }

    pub fn session(&self) -> Option<&PlacementSession<I, A>> {
        self.session.as_ref()
    }

    /// Consumes the recipe's resources and starts placing its item.
    pub fn request_craft<V, S>(
        &mut self,
        recipe: &CraftRecipe,
        inventory: &mut V,
        scene: &mut S,
    ) -> Result<CraftStarted<I>, CraftError>
    where
        V: InventoryService + ?Sized,
        S: PlacementScene<Item = I, Appearance = A> + ?Sized,
    {
        if self.session.is_some() {
            return Err(CraftError::AlreadyPlacing);
        }
        let model = recipe
            .model
            .as_ref()
            .ok_or_else(|| ConfigurationError::MissingItemModel(recipe.id.clone()))?;

        let shortfalls = recipe.shortfalls(inventory);
        if !shortfalls.is_empty() {
            return Err(CraftError::InsufficientMaterials {
                recipe: recipe.id.clone(),
                shortfalls,
            });
        }
        let skipped = consume(recipe, inventory);

        let spawned = scene.instantiate(model, self.tuning.neutral_position);
        let preview = scene.preview_appearance();
        scene.set_appearance(spawned.item, preview);
        scene.set_layer(spawned.item, CollisionLayer::NoCollision);

        self.session = Some(PlacementSession {
            item: spawned.item,
            original_appearance: spawned.appearance,
            original_layer: spawned.layer,
            position: self.tuning.neutral_position,
        });
        scene.toggle_craft_menu();

        Ok(CraftStarted {
            recipe: recipe.id.clone(),
            item: spawned.item,
            skipped,
        })
    }

    /// Follows the cursor ray with the item being placed. No ray (cursor
    /// outside the window) counts as a miss; the item is still checked.
    pub fn tick<P, S>(
        &mut self,
        ray: Option<Ray3d>,
        probe: &P,
        scene: &mut S,
    ) -> Result<TickOutcome, CraftError>
    where
        P: PlacementSurfaceProbe + ?Sized,
        S: PlacementScene<Item = I, Appearance = A> + ?Sized,
    {
        let Some(session) = self.session.as_mut() else {
            return Ok(TickOutcome::Idle);
        };
        if !scene.is_alive(session.item) {
            self.session = None;
            return Err(CraftError::MissingActiveItem);
        }

        let max_distance = self.tuning.max_distance;
        match ray.and_then(|ray| probe.cast_to_surface(ray, max_distance)) {
            Some(hit) => {
                session.position = hit;
                scene.set_position(session.item, hit);
                Ok(TickOutcome::Moved(hit))
            }
            None => Ok(TickOutcome::Held(session.position)),
        }
    }

    /// Drops the item where it is, restoring its look and layer.
    pub fn confirm_placement<S>(
        &mut self,
        scene: &mut S,
    ) -> Result<Option<PlacementEffect>, CraftError>
    where
        S: PlacementScene<Item = I, Appearance = A> + ?Sized,
    {
        let Some(session) = self.session.as_ref() else {
            return Ok(None);
        };
        if !scene.is_alive(session.item) {
            self.session = None;
            return Err(CraftError::MissingActiveItem);
        }

        scene.set_layer(session.item, session.original_layer);
        scene.set_appearance(session.item, session.original_appearance.clone());

        let scale = scene
            .bounds_size(session.item)
            .map_or(self.tuning.default_effect_scale, |size| {
                size * self.tuning.effect_scaling
            });
        let effect = PlacementEffect {
            position: session.position,
            scale,
        };
        scene.play_effect(effect);

        self.session = None;
        Ok(Some(effect))
    }
}

/// Takes every requirement out of the inventory. Caller has checked availability.
fn consume<V>(recipe: &CraftRecipe, inventory: &mut V) -> Vec<String>
where
    V: InventoryService + ?Sized,
{
    let mut skipped = Vec::new();
    for (resource, amount) in recipe.requirements() {
        match inventory.decrement(resource, amount) {
            Ok(_) => {}
            Err(InventoryError::UnknownResource(name)) => skipped.push(name),
            // Only reachable if the inventory disagrees with its own quantity().
            Err(err @ InventoryError::Underflow { .. }) => {
                bevy::log::error!("crafting {}: {err}", recipe.id);
            }
        }
    }
    skipped
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use bevy::math::Dir3;

    use super::*;
    use crate::crafting::recipe::{Ingredient, ModelShape};
    use crate::inventory::Inventory;

    #[derive(Debug, Clone, PartialEq)]
    struct FakeItem {
        appearance: &'static str,
        layer: CollisionLayer,
        position: Vec3,
        bounds: Option<Vec3>,
    }

    #[derive(Default)]
    struct FakeScene {
        items: HashMap<u32, FakeItem>,
        next_id: u32,
        bounds: Option<Vec3>,
        effects: Vec<PlacementEffect>,
        menu_toggles: u32,
        log: Vec<String>,
    }

    impl PlacementScene for FakeScene {
        type Item = u32;
        type Appearance = &'static str;

        fn instantiate(
            &mut self,
            _model: &ItemModel,
            position: Vec3,
        ) -> SpawnedItem<u32, &'static str> {
            let id = self.next_id;
            self.next_id += 1;
            self.items.insert(
                id,
                FakeItem {
                    appearance: "oak",
                    layer: CollisionLayer::Solid,
                    position,
                    bounds: self.bounds,
                },
            );
            self.log.push("instantiate".into());
            SpawnedItem {
                item: id,
                appearance: "oak",
                layer: CollisionLayer::Solid,
            }
        }

        fn preview_appearance(&self) -> &'static str {
            "ghost"
        }

        fn set_appearance(&mut self, item: u32, appearance: &'static str) {
            self.log.push(format!("appearance {appearance}"));
            if let Some(it) = self.items.get_mut(&item) {
                it.appearance = appearance;
            }
        }

        fn set_layer(&mut self, item: u32, layer: CollisionLayer) {
            self.log.push(format!("layer {layer:?}"));
            if let Some(it) = self.items.get_mut(&item) {
                it.layer = layer;
            }
        }

        fn set_position(&mut self, item: u32, position: Vec3) {
            if let Some(it) = self.items.get_mut(&item) {
                it.position = position;
            }
        }

        fn is_alive(&self, item: u32) -> bool {
            self.items.contains_key(&item)
        }

        fn bounds_size(&self, item: u32) -> Option<Vec3> {
            self.items.get(&item).and_then(|it| it.bounds)
        }

        fn play_effect(&mut self, effect: PlacementEffect) {
            self.log.push("effect".into());
            self.effects.push(effect);
        }

        fn toggle_craft_menu(&mut self) {
            self.menu_toggles += 1;
        }
    }

    struct FixedProbe(Option<Vec3>);

    impl PlacementSurfaceProbe for FixedProbe {
        fn cast_to_surface(&self, _ray: Ray3d, _max_distance: f32) -> Option<Vec3> {
            self.0
        }
    }

    type Workflow = CraftPlacementWorkflow<u32, &'static str>;

    fn recipe(costs: &[(&str, u32)]) -> CraftRecipe {
        CraftRecipe {
            id: "lantern".into(),
            display_name: "Lantern".into(),
            ingredients: costs
                .iter()
                .map(|(name, count)| Ingredient {
                    resource: (*name).into(),
                    count: *count,
                })
                .collect(),
            model: Some(ItemModel {
                shape: ModelShape::Cuboid,
                size: [1.0, 2.0, 1.0],
                color: [1.0, 1.0, 1.0],
                layer: CollisionLayer::Solid,
            }),
        }
    }

    fn ray() -> Option<Ray3d> {
        Some(Ray3d::new(Vec3::new(0.0, 10.0, 0.0), Dir3::NEG_Y))
    }

    fn placing(inventory: &mut Inventory, scene: &mut FakeScene) -> Workflow {
        let mut wf = Workflow::default();
        wf.request_craft(&recipe(&[("Wood", 5)]), inventory, scene)
            .unwrap();
        wf
    }

    #[test]
    fn craft_fails_when_any_resource_is_short() {
        let mut inv = Inventory::from_counts([("Wood", 10), ("Stone", 0)]);
        let mut scene = FakeScene::default();
        let mut wf = Workflow::default();

        let err = wf
            .request_craft(&recipe(&[("Wood", 5), ("Stone", 1)]), &mut inv, &mut scene)
            .unwrap_err();

        assert!(matches!(
            err,
            CraftError::InsufficientMaterials { ref shortfalls, .. } if shortfalls.len() == 1
        ));
        assert_eq!(inv.quantity("Wood"), 10);
        assert_eq!(inv.quantity("Stone"), 0);
        assert_eq!(wf.state(), WorkflowState::Idle);
        assert!(scene.items.is_empty());
        assert_eq!(scene.menu_toggles, 0);
    }

    #[test]
    fn craft_consumes_and_starts_placing() {
        let mut inv = Inventory::from_counts([("Wood", 10)]);
        let mut scene = FakeScene::default();
        let mut wf = Workflow::default();

        let started = wf
            .request_craft(&recipe(&[("Wood", 5)]), &mut inv, &mut scene)
            .unwrap();

        assert_eq!(inv.quantity("Wood"), 5);
        assert_eq!(wf.state(), WorkflowState::Placing);
        assert!(started.skipped.is_empty());
        assert_eq!(scene.menu_toggles, 1);

        let item = &scene.items[&started.item];
        assert_eq!(item.appearance, "ghost");
        assert_eq!(item.layer, CollisionLayer::NoCollision);
        assert_eq!(item.position, Vec3::ZERO);

        let session = wf.session().unwrap();
        assert_eq!(session.original_appearance, "oak");
        assert_eq!(session.original_layer, CollisionLayer::Solid);
    }

    #[test]
    fn untracked_zero_cost_resources_are_skipped_not_fatal() {
        let mut inv = Inventory::from_counts([("Wood", 10), ("Coal", 4)]);
        let mut scene = FakeScene::default();
        let mut wf = Workflow::default();

        let started = wf
            .request_craft(
                &recipe(&[("Wood", 5), ("Fiber", 0), ("Coal", 1)]),
                &mut inv,
                &mut scene,
            )
            .unwrap();

        assert_eq!(started.skipped, vec!["Fiber".to_string()]);
        assert_eq!(inv.quantity("Wood"), 5);
        assert_eq!(inv.quantity("Coal"), 3);
        assert!(!inv.contains("Fiber"));
    }

    #[test]
    fn second_craft_while_placing_is_a_no_op() {
        let mut inv = Inventory::from_counts([("Wood", 20)]);
        let mut scene = FakeScene::default();
        let mut wf = placing(&mut inv, &mut scene);
        let first = wf.session().unwrap().item;

        let err = wf
            .request_craft(&recipe(&[("Wood", 5)]), &mut inv, &mut scene)
            .unwrap_err();

        assert_eq!(err, CraftError::AlreadyPlacing);
        assert_eq!(inv.quantity("Wood"), 15);
        assert_eq!(scene.items.len(), 1);
        assert_eq!(wf.session().unwrap().item, first);
    }

    #[test]
    fn missing_model_is_a_configuration_error_and_consumes_nothing() {
        let mut inv = Inventory::from_counts([("Wood", 10)]);
        let mut scene = FakeScene::default();
        let mut wf = Workflow::default();
        let mut bare = recipe(&[("Wood", 5)]);
        bare.model = None;

        let err = wf.request_craft(&bare, &mut inv, &mut scene).unwrap_err();

        assert_eq!(
            err,
            CraftError::Configuration(ConfigurationError::MissingItemModel("lantern".into()))
        );
        assert_eq!(inv.quantity("Wood"), 10);
        assert_eq!(wf.state(), WorkflowState::Idle);
    }

    #[test]
    fn tick_moves_item_to_hit_point() {
        let mut inv = Inventory::from_counts([("Wood", 10)]);
        let mut scene = FakeScene::default();
        let mut wf = placing(&mut inv, &mut scene);
        let hit = Vec3::new(3.0, 0.0, -2.5);

        let outcome = wf.tick(ray(), &FixedProbe(Some(hit)), &mut scene).unwrap();

        assert_eq!(outcome, TickOutcome::Moved(hit));
        let item = wf.session().unwrap().item;
        assert_eq!(scene.items[&item].position, hit);
    }

    #[test]
    fn three_missed_ticks_leave_item_in_place() {
        let mut inv = Inventory::from_counts([("Wood", 10)]);
        let mut scene = FakeScene::default();
        let mut wf = placing(&mut inv, &mut scene);
        let last = Vec3::new(1.0, 0.0, 1.0);
        wf.tick(ray(), &FixedProbe(Some(last)), &mut scene).unwrap();
        let item = wf.session().unwrap().item;

        for _ in 0..3 {
            let outcome = wf.tick(ray(), &FixedProbe(None), &mut scene).unwrap();
            assert_eq!(outcome, TickOutcome::Held(last));
            assert_eq!(scene.items[&item].position, last);
        }
    }

    #[test]
    fn tick_while_idle_does_nothing() {
        let mut scene = FakeScene::default();
        let mut wf = Workflow::default();

        let outcome = wf
            .tick(ray(), &FixedProbe(Some(Vec3::ONE)), &mut scene)
            .unwrap();

        assert_eq!(outcome, TickOutcome::Idle);
    }

    #[test]
    fn tick_reports_lost_item_and_resyncs() {
        let mut inv = Inventory::from_counts([("Wood", 10)]);
        let mut scene = FakeScene::default();
        let mut wf = placing(&mut inv, &mut scene);
        scene.items.clear();

        let err = wf.tick(ray(), &FixedProbe(None), &mut scene).unwrap_err();

        assert_eq!(err, CraftError::MissingActiveItem);
        assert_eq!(wf.state(), WorkflowState::Idle);
    }

    #[test]
    fn tick_without_ray_holds_item_but_still_checks_it() {
        let mut inv = Inventory::from_counts([("Wood", 10)]);
        let mut scene = FakeScene::default();
        let mut wf = placing(&mut inv, &mut scene);

        let outcome = wf
            .tick(None, &FixedProbe(Some(Vec3::ONE)), &mut scene)
            .unwrap();
        assert_eq!(outcome, TickOutcome::Held(Vec3::ZERO));

        scene.items.clear();
        let err = wf
            .tick(None, &FixedProbe(Some(Vec3::ONE)), &mut scene)
            .unwrap_err();

        assert_eq!(err, CraftError::MissingActiveItem);
        assert_eq!(wf.state(), WorkflowState::Idle);
    }

    #[test]
    fn confirm_restores_look_and_layer_before_clearing() {
        let mut inv = Inventory::from_counts([("Wood", 10)]);
        let mut scene = FakeScene::default();
        let mut wf = placing(&mut inv, &mut scene);
        let item = wf.session().unwrap().item;
        scene.log.clear();

        let effect = wf.confirm_placement(&mut scene).unwrap();

        assert!(effect.is_some());
        assert_eq!(wf.state(), WorkflowState::Idle);
        assert_eq!(scene.items[&item].appearance, "oak");
        assert_eq!(scene.items[&item].layer, CollisionLayer::Solid);
        assert_eq!(scene.log, vec!["layer Solid", "appearance oak", "effect"]);
    }

    #[test]
    fn effect_scales_with_item_bounds() {
        let mut inv = Inventory::from_counts([("Wood", 10)]);
        let mut scene = FakeScene {
            bounds: Some(Vec3::new(2.0, 4.0, 2.0)),
            ..Default::default()
        };
        let mut wf = placing(&mut inv, &mut scene);
        let spot = Vec3::new(5.0, 0.0, 5.0);
        wf.tick(ray(), &FixedProbe(Some(spot)), &mut scene).unwrap();

        let effect = wf.confirm_placement(&mut scene).unwrap().unwrap();

        assert_eq!(effect.position, spot);
        assert_eq!(effect.scale, Vec3::new(0.5, 1.0, 0.5));
        assert_eq!(scene.effects, vec![effect]);
    }

    #[test]
    fn effect_falls_back_to_default_scale_without_bounds() {
        let mut inv = Inventory::from_counts([("Wood", 10)]);
        let mut scene = FakeScene::default();
        let mut wf = placing(&mut inv, &mut scene);

        let effect = wf.confirm_placement(&mut scene).unwrap().unwrap();

        assert_eq!(effect.scale, Vec3::ONE);
    }

    #[test]
    fn confirm_while_idle_is_ignored() {
        let mut scene = FakeScene::default();
        let mut wf = Workflow::default();

        assert_eq!(wf.confirm_placement(&mut scene), Ok(None));
        assert!(scene.effects.is_empty());
    }

    #[test]
    fn workflow_cycles_back_to_placing() {
        let mut inv = Inventory::from_counts([("Wood", 10)]);
        let mut scene = FakeScene::default();
        let mut wf = placing(&mut inv, &mut scene);
        wf.confirm_placement(&mut scene).unwrap();

        wf.request_craft(&recipe(&[("Wood", 5)]), &mut inv, &mut scene)
            .unwrap();

        assert_eq!(wf.state(), WorkflowState::Placing);
        assert_eq!(inv.quantity("Wood"), 0);
        assert_eq!(scene.items.len(), 2);
    }

    #[test]
    fn insufficient_materials_message_lists_shortfalls() {
        let err = CraftError::InsufficientMaterials {
            recipe: "lantern".into(),
            shortfalls: vec![Shortfall {
                resource: "Stone".into(),
                required: 1,
                available: 0,
            }],
        };

        assert_eq!(
            err.to_string(),
            "not enough materials to craft lantern: Stone 0/1"
        );
    }
}

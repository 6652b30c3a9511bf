pub mod fixtures {
    use bevy::prelude::*;

    use crate::camera::CameraFocus;
    use crate::crafting::scene::{CraftMenuToggled, PlacementAssets, PlacementEffectTriggered};
    use crate::crafting::station::Workflow;
    use crate::crafting::{
        CraftRecipe, CraftRequested, CraftStation, Ingredient, ItemModel, ItemPlaced, ModelShape,
        RecipeRegistry,
    };
    use crate::interaction::{CollisionLayer, CompanionProximity, CursorRay};
    use crate::inventory::InventoryChanged;
    use crate::progress::ProgressTracker;
    use crate::registry::placement::PlacementConfig;
    use crate::registry::starting_inventory;
    use crate::sets::configure_game_sets;

    /// Cuboid recipe with the given costs.
    pub fn test_recipe(id: &str, costs: &[(&str, u32)]) -> CraftRecipe {
        CraftRecipe {
            id: id.into(),
            display_name: id.into(),
            ingredients: costs
                .iter()
                .map(|(resource, count)| Ingredient {
                    resource: (*resource).into(),
                    count: *count,
                })
                .collect(),
            model: Some(ItemModel {
                shape: ModelShape::Cuboid,
                size: [1.0, 1.0, 1.0],
                color: [0.5, 0.4, 0.3],
                layer: CollisionLayer::Solid,
            }),
        }
    }

    /// lantern: 5 Wood, 0.6 x 1.2 x 0.6 cylinder. crate: 2 Wood + 1 Stone.
    pub fn test_recipe_registry() -> RecipeRegistry {
        let mut lantern = test_recipe("lantern", &[("Wood", 5)]);
        lantern.display_name = "Lantern".into();
        lantern.model = Some(ItemModel {
            shape: ModelShape::Cylinder,
            size: [0.6, 1.2, 0.6],
            color: [1.0, 0.8, 0.3],
            layer: CollisionLayer::Solid,
        });
        let mut crate_recipe = test_recipe("crate", &[("Wood", 2), ("Stone", 1)]);
        crate_recipe.display_name = "Crate".into();

        RecipeRegistry::from_recipes(vec![lantern, crate_recipe])
    }

    pub fn test_placement_config() -> PlacementConfig {
        PlacementConfig {
            max_distance: 30.0,
            effect_scaling: 0.25,
            default_effect_scale: [1.0, 1.0, 1.0],
            neutral_position: [0.0, 0.0, 0.0],
            progress_goal: 4,
            companion_radius: 3.0,
            menu: vec!["lantern".into(), "crate".into(), "ghost".into()],
            starting_inventory: vec![("Wood".into(), 10), ("Stone".into(), 0)],
        }
    }

    /// Headless app with every resource and message the gameplay systems
    /// touch. Systems under test are added by each test.
    pub fn test_app() -> App {
        let config = test_placement_config();
        let station = CraftStation {
            workflow: Workflow::new(config.tuning()),
            ..default()
        };

        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        configure_game_sets(&mut app);

        let mut meshes = Assets::<Mesh>::default();
        let mut materials = Assets::<StandardMaterial>::default();
        app.insert_resource(PlacementAssets {
            preview: materials.add(StandardMaterial::default()),
            puff_mesh: meshes.add(Sphere::new(0.5)),
            puff_material: materials.add(StandardMaterial::default()),
        });
        app.insert_resource(meshes);
        app.insert_resource(materials);

        app.insert_resource(test_recipe_registry());
        app.insert_resource(starting_inventory(&config));
        app.insert_resource(config);
        app.insert_resource(station);
        app.init_resource::<CursorRay>();
        app.init_resource::<CameraFocus>();
        app.init_resource::<ProgressTracker>();
        app.init_resource::<ButtonInput<KeyCode>>();
        app.init_resource::<ButtonInput<MouseButton>>();

        app.add_message::<InventoryChanged>()
            .add_message::<CraftRequested>()
            .add_message::<ItemPlaced>()
            .add_message::<PlacementEffectTriggered>()
            .add_message::<CraftMenuToggled>()
            .add_message::<CompanionProximity>();
        app
    }
}

//! ECS side of the placement workflow.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use super::recipe::{ItemModel, ModelShape};
use super::workflow::{PlacementEffect, PlacementScene, SpawnedItem};
use crate::interaction::CollisionLayer;

/// Marks entities produced by crafting.
#[derive(Component, Debug)]
pub struct CraftedItem;

/// Unscaled size of a crafted item's model.
#[derive(Component, Debug, Clone, Copy)]
pub struct ItemBounds(pub Vec3);

/// Fired once per confirmed placement.
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub struct PlacementEffectTriggered {
    pub position: Vec3,
    pub scale: Vec3,
}

/// Asks the craft menu to slide to its other position.
#[derive(Message, Debug, Clone, Copy, Default)]
pub struct CraftMenuToggled;

/// Shared handles for previews and effects.
#[derive(Resource, Debug, Clone)]
pub struct PlacementAssets {
    pub preview: Handle<StandardMaterial>,
    pub puff_mesh: Handle<Mesh>,
    pub puff_material: Handle<StandardMaterial>,
}

pub fn setup_placement_assets(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.insert_resource(PlacementAssets {
        preview: materials.add(StandardMaterial {
            base_color: Color::srgba(0.35, 0.85, 1.0, 0.45),
            alpha_mode: AlphaMode::Blend,
            unlit: true,
            ..default()
        }),
        puff_mesh: meshes.add(Sphere::new(0.5)),
        puff_material: materials.add(StandardMaterial {
            base_color: Color::srgba(0.9, 0.9, 0.88, 0.7),
            alpha_mode: AlphaMode::Blend,
            ..default()
        }),
    });
}

/// Size of the mesh [`model_mesh`] builds. Spheres take their diameter from
/// `size.x`; cylinders take diameter from `size.x` and height from `size.y`.
pub fn model_extent(model: &ItemModel) -> Vec3 {
    let size = model.size();
    match model.shape {
        ModelShape::Cuboid => size,
        ModelShape::Sphere => Vec3::splat(size.x),
        ModelShape::Cylinder => Vec3::new(size.x, size.y, size.x),
    }
}

/// Mesh for an item model, with its origin at the bottom centre so the item
/// rests on the point it is placed at.
pub fn model_mesh(model: &ItemModel) -> Mesh {
    let extent = model_extent(model);
    let mesh = match model.shape {
        ModelShape::Cuboid => Mesh::from(Cuboid::new(extent.x, extent.y, extent.z)),
        ModelShape::Sphere => Mesh::from(Sphere::new(extent.x / 2.0)),
        ModelShape::Cylinder => Mesh::from(Cylinder::new(extent.x / 2.0, extent.y)),
    };
    mesh.translated_by(Vec3::Y * extent.y / 2.0)
}

/// [`PlacementScene`] backed by the ECS world.
#[derive(SystemParam)]
pub struct WorldScene<'w, 's> {
    commands: Commands<'w, 's>,
    meshes: ResMut<'w, Assets<Mesh>>,
    materials: ResMut<'w, Assets<StandardMaterial>>,
    placement_assets: Res<'w, PlacementAssets>,
    items: Query<'w, 's, (&'static mut Transform, Option<&'static ItemBounds>), With<CraftedItem>>,
    effects: MessageWriter<'w, PlacementEffectTriggered>,
    menu: MessageWriter<'w, CraftMenuToggled>,
}

impl PlacementScene for WorldScene<'_, '_> {
    type Item = Entity;
    type Appearance = Handle<StandardMaterial>;

    fn instantiate(
        &mut self,
        model: &ItemModel,
        position: Vec3,
    ) -> SpawnedItem<Entity, Handle<StandardMaterial>> {
        let mesh = self.meshes.add(model_mesh(model));
        let material = self.materials.add(StandardMaterial {
            base_color: model.color(),
            ..default()
        });
        let entity = self
            .commands
            .spawn((
                CraftedItem,
                Mesh3d(mesh),
                MeshMaterial3d(material.clone()),
                Transform::from_translation(position),
                ItemBounds(model_extent(model)),
                model.layer,
            ))
            .id();
        SpawnedItem {
            item: entity,
            appearance: material,
            layer: model.layer,
        }
    }

    fn preview_appearance(&self) -> Handle<StandardMaterial> {
        self.placement_assets.preview.clone()
    }

    fn set_appearance(&mut self, item: Entity, appearance: Handle<StandardMaterial>) {
        self.commands.entity(item).insert(MeshMaterial3d(appearance));
    }

    fn set_layer(&mut self, item: Entity, layer: CollisionLayer) {
        self.commands.entity(item).insert(layer);
    }

    fn set_position(&mut self, item: Entity, position: Vec3) {
        if let Ok((mut transform, _)) = self.items.get_mut(item) {
            transform.translation = position;
        }
    }

    fn is_alive(&self, item: Entity) -> bool {
        self.items.contains(item)
    }

    fn bounds_size(&self, item: Entity) -> Option<Vec3> {
        let (transform, bounds) = self.items.get(item).ok()?;
        bounds.map(|b| b.0 * transform.scale)
    }

    fn play_effect(&mut self, effect: PlacementEffect) {
        self.effects.write(PlacementEffectTriggered {
            position: effect.position,
            scale: effect.scale,
        });
    }

    fn toggle_craft_menu(&mut self) {
        self.menu.write(CraftMenuToggled);
    }
}

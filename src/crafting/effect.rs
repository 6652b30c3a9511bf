use bevy::prelude::*;
use rand::Rng;

use super::scene::{PlacementAssets, PlacementEffectTriggered};

const PUFF_COUNT: usize = 6;
const PUFF_LIFETIME: f32 = 0.6;
const PUFF_GROWTH: f32 = 1.8;

/// One sphere of the dust cloud left behind by a placement.
#[derive(Component, Debug)]
pub struct Puff {
    pub age: f32,
    pub base_scale: Vec3,
}

/// Puff scale at a given age; `None` once it should be gone.
pub fn puff_scale(base: Vec3, age: f32) -> Option<Vec3> {
    if age >= PUFF_LIFETIME {
        return None;
    }
    let t = age / PUFF_LIFETIME;
    Some(base * (1.0 + (PUFF_GROWTH - 1.0) * t) * (1.0 - t * t))
}

pub fn spawn_placement_effects(
    mut commands: Commands,
    mut triggers: MessageReader<PlacementEffectTriggered>,
    assets: Res<PlacementAssets>,
) {
    let mut rng = rand::thread_rng();
    for trigger in triggers.read() {
        for _ in 0..PUFF_COUNT {
            let jitter = Vec3::new(
                rng.gen_range(-0.5..0.5),
                rng.gen_range(0.0..0.3),
                rng.gen_range(-0.5..0.5),
            ) * trigger.scale;
            commands.spawn((
                Puff {
                    age: 0.0,
                    base_scale: trigger.scale,
                },
                Mesh3d(assets.puff_mesh.clone()),
                MeshMaterial3d(assets.puff_material.clone()),
                Transform::from_translation(trigger.position + jitter)
                    .with_scale(trigger.scale),
            ));
        }
    }
}

pub fn animate_puffs(
    mut commands: Commands,
    time: Res<Time>,
    mut puffs: Query<(Entity, &mut Puff, &mut Transform)>,
) {
    let dt = time.delta_secs();
    for (entity, mut puff, mut transform) in &mut puffs {
        puff.age += dt;
        match puff_scale(puff.base_scale, puff.age) {
            Some(scale) => transform.scale = scale,
            None => commands.entity(entity).despawn(),
        }
    }
}

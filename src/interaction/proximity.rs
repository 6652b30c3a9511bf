use bevy::prelude::*;

use crate::camera::CameraFocus;
use crate::registry::placement::PlacementConfig;

/// NPC whose presence gates the dialogue box.
#[derive(Component, Debug)]
pub struct Companion {
    pub radius: f32,
    pub in_range: bool,
}

impl Companion {
    pub fn new(radius: f32) -> Self {
        Self {
            radius,
            in_range: false,
        }
    }
}

/// Raised only when the focus point crosses a companion's trigger radius.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompanionProximity {
    Entered(Entity),
    Exited(Entity),
}

/// New in-range flag if it changed (pure function for testing).
pub fn proximity_change(in_range: bool, distance: f32, radius: f32) -> Option<bool> {
    let now = distance <= radius;
    (now != in_range).then_some(now)
}

pub fn detect_companion_proximity(
    focus: Res<CameraFocus>,
    mut companions: Query<(Entity, &GlobalTransform, &mut Companion)>,
    mut proximity: MessageWriter<CompanionProximity>,
) {
    for (entity, transform, mut companion) in &mut companions {
        // Height differences don't matter for a ground-level trigger.
        let distance = transform.translation().xz().distance(focus.0.xz());
        let Some(now) = proximity_change(companion.in_range, distance, companion.radius) else {
            continue;
        };
        companion.in_range = now;
        proximity.write(if now {
            CompanionProximity::Entered(entity)
        } else {
            CompanionProximity::Exited(entity)
        });
    }
}

/// Applies the configured trigger radius, including after hot reloads.
pub fn sync_companion_radius(
    config: Res<PlacementConfig>,
    mut companions: Query<&mut Companion>,
) {
    for mut companion in &mut companions {
        if companion.radius != config.companion_radius {
            companion.radius = config.companion_radius;
        }
    }
}

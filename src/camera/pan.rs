use bevy::prelude::*;

use super::{CAMERA_OFFSET, CameraFocus};

const PAN_SPEED: f32 = 8.0;

/// Pan direction on the ground plane from held keys (pure function for testing).
pub fn pan_direction(keys: &ButtonInput<KeyCode>) -> Vec3 {
    let mut dir = Vec3::ZERO;
    if keys.pressed(KeyCode::KeyW) || keys.pressed(KeyCode::ArrowUp) {
        dir.z -= 1.0;
    }
    if keys.pressed(KeyCode::KeyS) || keys.pressed(KeyCode::ArrowDown) {
        dir.z += 1.0;
    }
    if keys.pressed(KeyCode::KeyA) || keys.pressed(KeyCode::ArrowLeft) {
        dir.x -= 1.0;
    }
    if keys.pressed(KeyCode::KeyD) || keys.pressed(KeyCode::ArrowRight) {
        dir.x += 1.0;
    }
    dir.normalize_or_zero()
}

pub fn pan_camera(
    keys: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    mut focus: ResMut<CameraFocus>,
    mut camera_query: Query<&mut Transform, With<Camera3d>>,
) {
    let dir = pan_direction(&keys);
    if dir == Vec3::ZERO {
        return;
    }
    focus.0 += dir * PAN_SPEED * time.delta_secs();

    for mut transform in &mut camera_query {
        *transform =
            Transform::from_translation(focus.0 + CAMERA_OFFSET).looking_at(focus.0, Vec3::Y);
    }
}

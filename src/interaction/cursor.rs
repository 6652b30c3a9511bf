use bevy::prelude::*;
use bevy::window::PrimaryWindow;

/// World-space ray under the mouse cursor, refreshed every frame.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct CursorRay(pub Option<Ray3d>);

pub fn update_cursor_ray(
    windows: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&Camera, &GlobalTransform), With<Camera3d>>,
    mut cursor_ray: ResMut<CursorRay>,
) {
    cursor_ray.0 = (|| {
        let window = windows.single().ok()?;
        let cursor_pos = window.cursor_position()?;
        let (camera, camera_gt) = camera_query.single().ok()?;
        camera.viewport_to_world(camera_gt, cursor_pos).ok()
    })();
}

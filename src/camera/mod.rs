pub mod pan;

use bevy::prelude::*;

use crate::sets::GameSet;

/// Camera position relative to the point it looks at.
pub const CAMERA_OFFSET: Vec3 = Vec3::new(0.0, 12.0, 14.0);

/// Ground point the camera orbits; proximity triggers measure from here.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct CameraFocus(pub Vec3);

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CameraFocus>()
            .add_systems(Startup, spawn_camera)
            .add_systems(Update, pan::pan_camera.in_set(GameSet::Input));
    }
}

fn spawn_camera(mut commands: Commands, focus: Res<CameraFocus>) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_translation(focus.0 + CAMERA_OFFSET).looking_at(focus.0, Vec3::Y),
    ));
}

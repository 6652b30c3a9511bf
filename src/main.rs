mod camera;
mod crafting;
mod interaction;
mod inventory;
mod progress;
mod registry;
mod sets;
mod ui;

#[cfg(test)]
mod test_helpers;

use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use interaction::{CollisionLayer, Companion, PlacementSurface};
use registry::AppState;
use registry::placement::PlacementConfig;

const GROUND_SIZE: f32 = 40.0;
const COMPANION_SPOT: Vec3 = Vec3::new(6.0, 0.0, -4.0);

fn main() {
    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Hearthcraft".into(),
            resolution: (1280, 720).into(),
            ..default()
        }),
        ..default()
    }))
    .add_plugins(EguiPlugin::default())
    .add_plugins(FrameTimeDiagnosticsPlugin::default());

    sets::configure_game_sets(&mut app);

    app.add_plugins(registry::RegistryPlugin)
        .add_plugins(inventory::InventoryPlugin)
        .add_plugins(crafting::CraftingPlugin)
        .add_plugins(interaction::InteractionPlugin)
        .add_plugins(camera::CameraPlugin)
        .add_plugins(progress::ProgressPlugin)
        .add_plugins(ui::UiPlugin)
        .add_systems(Startup, setup)
        .add_systems(OnEnter(AppState::InGame), spawn_companion)
        .run();
}

fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(GROUND_SIZE, GROUND_SIZE))),
        MeshMaterial3d(materials.add(Color::srgb(0.36, 0.52, 0.3))),
        PlacementSurface {
            half_extents: Vec2::splat(GROUND_SIZE / 2.0),
        },
        CollisionLayer::Terrain,
        Transform::default(),
    ));

    commands.spawn((
        DirectionalLight {
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(8.0, 16.0, 6.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

fn spawn_companion(
    mut commands: Commands,
    config: Res<PlacementConfig>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        Name::new("Crow"),
        Companion::new(config.companion_radius),
        Mesh3d(meshes.add(Capsule3d::new(0.25, 0.4))),
        MeshMaterial3d(materials.add(Color::srgb(0.08, 0.08, 0.1))),
        Transform::from_translation(COMPANION_SPOT + Vec3::Y * 0.45),
    ));
}

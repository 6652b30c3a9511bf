use bevy::prelude::*;

use crate::inventory::{Inventory, InventoryChanged, InventoryService, RESOURCE_NAMES};
use crate::progress::ProgressTracker;

#[derive(Component)]
pub struct ResourceText;

#[derive(Component)]
pub struct ProgressText;

/// `"{count}x {name}"` for every HUD resource, three spaces apart.
pub fn format_resources<V: InventoryService + ?Sized>(inventory: &V) -> String {
    RESOURCE_NAMES
        .iter()
        .map(|name| format!("{}x {name}", inventory.quantity(name)))
        .collect::<Vec<_>>()
        .join("   ")
}

pub fn format_progress(progress: f32) -> String {
    format!("Progress: {}%", (progress * 100.0).round() as u32)
}

pub fn spawn_resource_hud(mut commands: Commands) {
    commands
        .spawn(Node {
            position_type: PositionType::Absolute,
            left: Val::Px(16.0),
            top: Val::Px(12.0),
            flex_direction: FlexDirection::Column,
            row_gap: Val::Px(4.0),
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                ResourceText,
                Text::new(""),
                TextFont {
                    font_size: 20.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
            parent.spawn((
                ProgressText,
                Text::new(""),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgba(1.0, 1.0, 1.0, 0.8)),
            ));
        });
}

/// Fills both lines once gameplay starts.
pub fn init_resource_hud(
    inventory: Res<Inventory>,
    tracker: Res<ProgressTracker>,
    mut resource_text: Query<&mut Text, (With<ResourceText>, Without<ProgressText>)>,
    mut progress_text: Query<&mut Text, (With<ProgressText>, Without<ResourceText>)>,
) {
    if let Ok(mut text) = resource_text.single_mut() {
        **text = format_resources(&*inventory);
    }
    if let Ok(mut text) = progress_text.single_mut() {
        **text = format_progress(tracker.progress());
    }
}

pub fn refresh_resource_text(
    mut changed: MessageReader<InventoryChanged>,
    inventory: Res<Inventory>,
    mut text_query: Query<&mut Text, With<ResourceText>>,
) {
    if changed.read().count() == 0 {
        return;
    }
    let Ok(mut text) = text_query.single_mut() else {
        return;
    };
    **text = format_resources(&*inventory);
}

pub fn refresh_progress_text(
    tracker: Res<ProgressTracker>,
    mut text_query: Query<&mut Text, With<ProgressText>>,
) {
    if !tracker.is_changed() {
        return;
    }
    let Ok(mut text) = text_query.single_mut() else {
        return;
    };
    **text = format_progress(tracker.progress());
}

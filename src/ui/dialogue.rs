use bevy::prelude::*;

use crate::interaction::CompanionProximity;

/// Companion chat box; hidden until the player talks to the companion.
#[derive(Component, Debug)]
pub struct DialogueBox;

/// Whether the player is close enough to the companion to talk.
#[derive(Resource, Debug, Default)]
pub struct DialogueGate {
    pub in_range: bool,
}

const GREETING: &str = "Caw! The camp looks better already. Keep building!";

pub fn spawn_dialogue_box(mut commands: Commands) {
    commands
        .spawn((
            DialogueBox,
            Visibility::Hidden,
            Node {
                position_type: PositionType::Absolute,
                bottom: Val::Px(24.0),
                left: Val::Percent(25.0),
                width: Val::Percent(50.0),
                padding: UiRect::all(Val::Px(12.0)),
                ..default()
            },
            BackgroundColor(Color::srgba(0.05, 0.05, 0.08, 0.9)),
        ))
        .with_child((
            Text::new(GREETING),
            TextFont {
                font_size: 18.0,
                ..default()
            },
        ));
}

pub fn track_companion_range(
    mut proximity: MessageReader<CompanionProximity>,
    mut gate: ResMut<DialogueGate>,
    mut boxes: Query<&mut Visibility, With<DialogueBox>>,
) {
    for event in proximity.read() {
        match event {
            CompanionProximity::Entered(_) => gate.in_range = true,
            CompanionProximity::Exited(_) => {
                gate.in_range = false;
                for mut visibility in &mut boxes {
                    *visibility = Visibility::Hidden;
                }
            }
        }
    }
}

/// E opens the dialogue box while the companion is in range.
pub fn open_dialogue(
    keys: Res<ButtonInput<KeyCode>>,
    gate: Res<DialogueGate>,
    mut boxes: Query<&mut Visibility, With<DialogueBox>>,
) {
    if !gate.in_range || !keys.just_pressed(KeyCode::KeyE) {
        return;
    }
    for mut visibility in &mut boxes {
        if *visibility == Visibility::Hidden {
            *visibility = Visibility::Inherited;
        }
    }
}

use bevy::prelude::*;

use crate::crafting::scene::CraftMenuToggled;
use crate::crafting::{CraftRequested, CraftStation, RecipeRegistry};

const DOCKED_RIGHT: f32 = 16.0;
const ASIDE_RIGHT: f32 = -200.0;

/// Recipe panel. Slides partly off screen while an item is being placed.
#[derive(Component, Debug, Default)]
pub struct CraftMenu {
    pub aside: bool,
}

#[derive(Component, Debug)]
pub struct CraftButton {
    pub recipe_id: String,
}

pub fn menu_offset(aside: bool) -> Val {
    Val::Px(if aside { ASIDE_RIGHT } else { DOCKED_RIGHT })
}

pub fn spawn_craft_menu(mut commands: Commands) {
    commands.spawn((
        CraftMenu::default(),
        Node {
            position_type: PositionType::Absolute,
            right: menu_offset(false),
            top: Val::Px(16.0),
            width: Val::Px(220.0),
            padding: UiRect::all(Val::Px(8.0)),
            flex_direction: FlexDirection::Column,
            row_gap: Val::Px(6.0),
            ..default()
        },
        BackgroundColor(Color::srgba(0.08, 0.08, 0.12, 0.85)),
    ));
}

/// Recreates the buttons from the station's validated menu.
pub fn rebuild_menu_buttons(
    mut commands: Commands,
    station: Res<CraftStation>,
    registry: Res<RecipeRegistry>,
    menus: Query<Entity, With<CraftMenu>>,
    buttons: Query<Entity, With<CraftButton>>,
) {
    let Ok(menu) = menus.single() else {
        return;
    };
    for button in &buttons {
        commands.entity(button).despawn();
    }

    commands.entity(menu).with_children(|parent| {
        for (index, id) in station.menu.iter().enumerate() {
            let Some(recipe) = registry.get(id) else {
                continue;
            };
            let cost = recipe
                .requirements()
                .into_iter()
                .filter(|(_, count)| *count > 0)
                .map(|(name, count)| format!("{count} {name}"))
                .collect::<Vec<_>>()
                .join(", ");
            parent
                .spawn((
                    CraftButton {
                        recipe_id: id.clone(),
                    },
                    Button,
                    Node {
                        padding: UiRect::all(Val::Px(6.0)),
                        flex_direction: FlexDirection::Column,
                        ..default()
                    },
                    BackgroundColor(Color::srgb(0.2, 0.22, 0.3)),
                ))
                .with_children(|button| {
                    button.spawn((
                        Text::new(format!("{}. {}", index + 1, recipe.display_name)),
                        TextFont {
                            font_size: 16.0,
                            ..default()
                        },
                        Pickable::IGNORE,
                    ));
                    button.spawn((
                        Text::new(cost),
                        TextFont {
                            font_size: 12.0,
                            ..default()
                        },
                        TextColor(Color::srgba(1.0, 1.0, 1.0, 0.6)),
                        Pickable::IGNORE,
                    ));
                })
                .observe(on_craft_button_click);
        }
    });
}

pub fn on_craft_button_click(
    trigger: On<Pointer<Click>>,
    buttons: Query<&CraftButton>,
    mut requests: MessageWriter<CraftRequested>,
) {
    let Ok(button) = buttons.get(trigger.event_target()) else {
        return;
    };
    requests.write(CraftRequested {
        recipe_id: button.recipe_id.clone(),
    });
}

pub fn slide_craft_menu(
    mut toggles: MessageReader<CraftMenuToggled>,
    mut menus: Query<(&mut CraftMenu, &mut Node)>,
) {
    for _ in toggles.read() {
        for (mut menu, mut node) in &mut menus {
            menu.aside = !menu.aside;
            node.right = menu_offset(menu.aside);
        }
    }
}

pub mod craft_menu;
pub mod debug_panel;
pub mod dialogue;
pub mod resource_hud;

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

use crate::crafting::RecipeRegistry;
use crate::registry::AppState;
use crate::registry::placement::PlacementConfig;
use crate::sets::GameSet;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<dialogue::DialogueGate>()
            .init_resource::<debug_panel::DebugUiState>()
            .add_systems(
                Startup,
                (
                    resource_hud::spawn_resource_hud,
                    craft_menu::spawn_craft_menu,
                    dialogue::spawn_dialogue_box,
                ),
            )
            .add_systems(OnEnter(AppState::InGame), resource_hud::init_resource_hud)
            .add_systems(
                Update,
                (
                    craft_menu::rebuild_menu_buttons.run_if(
                        resource_changed::<RecipeRegistry>
                            .or(resource_exists_and_changed::<PlacementConfig>),
                    ),
                    craft_menu::slide_craft_menu,
                    resource_hud::refresh_resource_text,
                    resource_hud::refresh_progress_text,
                    (dialogue::track_companion_range, dialogue::open_dialogue).chain(),
                    debug_panel::toggle_debug_panel,
                )
                    .in_set(GameSet::Ui)
                    .run_if(in_state(AppState::InGame)),
            )
            .add_systems(
                EguiPrimaryContextPass,
                debug_panel::draw_debug_panel.run_if(in_state(AppState::InGame)),
            );
    }
}

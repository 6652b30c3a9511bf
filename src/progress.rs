use bevy::prelude::*;

use crate::crafting::ItemPlaced;
use crate::registry::AppState;
use crate::registry::placement::PlacementConfig;
use crate::sets::GameSet;

/// How far the player is towards rebuilding the camp.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressTracker {
    pub placed: u32,
    pub goal: u32,
}

impl Default for ProgressTracker {
    fn default() -> Self {
        Self { placed: 0, goal: 1 }
    }
}

impl ProgressTracker {
    /// Fraction in [0, 1]; a zero goal counts as complete.
    pub fn progress(&self) -> f32 {
        if self.goal == 0 {
            return 1.0;
        }
        (self.placed as f32 / self.goal as f32).clamp(0.0, 1.0)
    }
}

pub struct ProgressPlugin;

impl Plugin for ProgressPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ProgressTracker>()
            .add_systems(OnEnter(AppState::InGame), sync_goal)
            .add_systems(
                Update,
                (
                    sync_goal.run_if(resource_exists_and_changed::<PlacementConfig>),
                    count_placements,
                )
                    .in_set(GameSet::Notify)
                    .run_if(in_state(AppState::InGame)),
            );
    }
}

fn sync_goal(config: Res<PlacementConfig>, mut tracker: ResMut<ProgressTracker>) {
    if tracker.goal != config.progress_goal {
        tracker.goal = config.progress_goal;
    }
}

pub fn count_placements(
    mut placed: MessageReader<ItemPlaced>,
    mut tracker: ResMut<ProgressTracker>,
) {
    let count = placed.read().count() as u32;
    if count > 0 {
        tracker.placed += count;
        info!("Progress {:.0}%", tracker.progress() * 100.0);
    }
}

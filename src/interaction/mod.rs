pub mod cursor;
pub mod proximity;
pub mod surface;

use bevy::prelude::*;

use crate::registry::AppState;
use crate::registry::placement::PlacementConfig;
use crate::sets::GameSet;

pub use cursor::CursorRay;
pub use proximity::{Companion, CompanionProximity};
pub use surface::{CollisionLayer, PlacementSurface, PlacementSurfaceProbe, SurfaceProbe};

pub struct InteractionPlugin;

impl Plugin for InteractionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CursorRay>()
            .add_message::<CompanionProximity>()
            .add_systems(
                Update,
                (
                    cursor::update_cursor_ray,
                    (
                        proximity::sync_companion_radius
                            .run_if(resource_exists_and_changed::<PlacementConfig>),
                        proximity::detect_companion_proximity,
                    )
                        .chain(),
                )
                    .in_set(GameSet::Input)
                    .run_if(in_state(AppState::InGame)),
            );
    }
}

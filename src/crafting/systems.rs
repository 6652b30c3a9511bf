use bevy::prelude::*;

use super::registry::RecipeRegistry;
use super::scene::WorldScene;
use super::station::CraftStation;
use super::workflow::{CraftError, TickOutcome, WorkflowState};
use crate::interaction::{CollisionLayer, CursorRay, PlacementSurface, SurfaceProbe};
use crate::inventory::Inventory;

/// Player asked to craft a recipe (menu button or number key).
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub struct CraftRequested {
    pub recipe_id: String,
}

/// A crafted item was dropped into the world.
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub struct ItemPlaced {
    pub position: Vec3,
}

fn report(err: &CraftError) {
    match err {
        CraftError::AlreadyPlacing => debug!("Craft ignored: {err}"),
        CraftError::InsufficientMaterials { .. } => warn!("{err}"),
        CraftError::MissingActiveItem | CraftError::Configuration(_) => error!("{err}"),
    }
}

/// Number keys 1-9 craft the matching menu entry.
pub fn craft_hotkeys(
    keys: Res<ButtonInput<KeyCode>>,
    station: Res<CraftStation>,
    mut requests: MessageWriter<CraftRequested>,
) {
    const DIGITS: [KeyCode; 9] = [
        KeyCode::Digit1,
        KeyCode::Digit2,
        KeyCode::Digit3,
        KeyCode::Digit4,
        KeyCode::Digit5,
        KeyCode::Digit6,
        KeyCode::Digit7,
        KeyCode::Digit8,
        KeyCode::Digit9,
    ];
    for (index, key) in DIGITS.iter().enumerate() {
        if keys.just_pressed(*key)
            && let Some(id) = station.menu.get(index)
        {
            requests.write(CraftRequested {
                recipe_id: id.clone(),
            });
        }
    }
}

pub fn handle_craft_requests(
    mut requests: MessageReader<CraftRequested>,
    mut station: ResMut<CraftStation>,
    registry: Res<RecipeRegistry>,
    mut inventory: ResMut<Inventory>,
    mut scene: WorldScene,
) {
    for request in requests.read() {
        if let Some(reason) = &station.disabled {
            debug!("Craft of {} ignored: {reason}", request.recipe_id);
            continue;
        }
        if !station.offers(&request.recipe_id) {
            warn!("Recipe {} is not on the craft menu", request.recipe_id);
            continue;
        }
        let Some(recipe) = registry.get(&request.recipe_id) else {
            warn!("Recipe {} vanished from the registry", request.recipe_id);
            continue;
        };

        match station
            .workflow
            .request_craft(recipe, &mut *inventory, &mut scene)
        {
            Ok(started) => {
                for resource in &started.skipped {
                    warn!(
                        "Crafting {}: inventory has no {resource} stack, nothing taken",
                        started.recipe
                    );
                }
                info!("Crafted {}, placing {:?}", started.recipe, started.item);
            }
            Err(err) => report(&err),
        }
    }
}

/// Moves the item being placed to where the cursor meets the ground.
pub fn follow_cursor(
    mut station: ResMut<CraftStation>,
    cursor: Res<CursorRay>,
    surfaces: Query<(&GlobalTransform, &PlacementSurface, &CollisionLayer)>,
    mut scene: WorldScene,
) {
    if station.workflow.state() != WorkflowState::Placing {
        return;
    }
    let probe = SurfaceProbe::collect(surfaces.iter());
    match station.workflow.tick(cursor.0, &probe, &mut scene) {
        Ok(TickOutcome::Moved(position)) => trace!("Placement preview at {position}"),
        Ok(TickOutcome::Held(position)) => trace!("Cursor off the ground, holding at {position}"),
        Ok(TickOutcome::Idle) => {}
        Err(err) => report(&err),
    }
}

pub fn confirm_on_click(
    mouse: Res<ButtonInput<MouseButton>>,
    mut station: ResMut<CraftStation>,
    mut scene: WorldScene,
    mut placed: MessageWriter<ItemPlaced>,
) {
    if !mouse.just_pressed(MouseButton::Left)
        || station.workflow.state() != WorkflowState::Placing
    {
        return;
    }

    match station.workflow.confirm_placement(&mut scene) {
        Ok(Some(effect)) => {
            info!("Placed item at {}", effect.position);
            placed.write(ItemPlaced {
                position: effect.position,
            });
        }
        Ok(None) => {}
        Err(err) => report(&err),
    }
}

use bevy::prelude::*;
use bevy::reflect::TypePath;
use serde::Deserialize;

use crate::crafting::PlacementTuning;

fn default_max_distance() -> f32 {
    30.0
}

fn default_effect_scaling() -> f32 {
    0.25
}

fn default_effect_scale() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

fn default_progress_goal() -> u32 {
    10
}

fn default_companion_radius() -> f32 {
    3.0
}

/// Placement and HUD tuning loaded from placement.config.ron.
#[derive(Asset, Resource, TypePath, Debug, Clone, PartialEq, Deserialize)]
pub struct PlacementConfig {
    #[serde(default = "default_max_distance")]
    pub max_distance: f32,
    #[serde(default = "default_effect_scaling")]
    pub effect_scaling: f32,
    #[serde(default = "default_effect_scale")]
    pub default_effect_scale: [f32; 3],
    #[serde(default)]
    pub neutral_position: [f32; 3],
    /// Placed items needed for 100% progress.
    #[serde(default = "default_progress_goal")]
    pub progress_goal: u32,
    #[serde(default = "default_companion_radius")]
    pub companion_radius: f32,
    /// Recipe ids shown in the craft menu, in order.
    pub menu: Vec<String>,
    #[serde(default)]
    pub starting_inventory: Vec<(String, u32)>,
}

impl PlacementConfig {
    pub fn tuning(&self) -> PlacementTuning {
        PlacementTuning {
            max_distance: self.max_distance,
            effect_scaling: self.effect_scaling,
            default_effect_scale: Vec3::from_array(self.default_effect_scale),
            neutral_position: Vec3::from_array(self.neutral_position),
        }
    }
}

pub mod effect;
pub mod plugin;
pub mod recipe;
pub mod registry;
pub mod scene;
pub mod station;
pub mod systems;
pub mod workflow;

pub use plugin::CraftingPlugin;
pub use recipe::*;
pub use registry::*;
pub use station::CraftStation;
pub use systems::{CraftRequested, ItemPlaced};
pub use workflow::*;

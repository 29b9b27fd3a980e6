//! Game logic: mob AI, archetypes, and the ECS world that drives them.

pub mod ai;
pub mod components;
pub mod error;
pub mod game_world;
pub mod level;
pub mod mob_registry;

pub use error::GameError;
pub use game_world::{GameEvent, GameWorld};
pub use level::{Arena, Level};

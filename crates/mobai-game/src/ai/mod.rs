//! Mob AI: the state machine, its movement and perception primitives, and the ECS tick.

pub mod brain;
pub mod mob;
pub mod movement;
pub mod perception;
pub mod state;
pub mod system;
pub mod tuning;

#[cfg(test)]
pub(crate) mod testing;

pub use brain::{Brain, StateHooks};
pub use mob::{Mob, MobProfile, Walker};
pub use movement::{heading, move_mob};
pub use perception::player_seen;
pub use state::{HuntState, MobState, SearchState, StateKind, Transition};
pub use tuning::AiTuning;

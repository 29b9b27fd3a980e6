//! The level view AI code reads: collision geometry plus the player.

use bevy_ecs::prelude::*;
use glam::Vec2;
use mobai_world::{Collisions, TileGrid};

/// Read-only level surface consumed by mob states.
pub trait Level {
    fn collisions(&self) -> &dyn Collisions;

    fn player_position(&self) -> Vec2;
}

/// Tile-grid level shared by every mob in a [`crate::game_world::GameWorld`].
#[derive(Resource, Debug, Clone)]
pub struct Arena {
    pub grid: TileGrid,
    pub player: Vec2,
}

impl Arena {
    pub fn new(grid: TileGrid, player: Vec2) -> Self {
        Self { grid, player }
    }
}

impl Level for Arena {
    fn collisions(&self) -> &dyn Collisions {
        &self.grid
    }

    fn player_position(&self) -> Vec2 {
        self.player
    }
}

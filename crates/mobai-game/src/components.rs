//! ECS components for AI-driven mobs.

use bevy_ecs::prelude::*;
use glam::Vec2;

use crate::ai::mob::MobProfile;

/// Stable identity handed out by [`crate::game_world::EntityIdAllocator`].
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId(pub u64);

/// Center of the mob in world units.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Position(pub Vec2);

/// Axis-aligned hitbox, centered on [`Position`].
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Hitbox {
    pub half_extents: Vec2,
}

/// Speed, senses, patience and waypoints (copied from the archetype at spawn time).
#[derive(Component, Debug, Clone, PartialEq)]
pub struct MobStats(pub MobProfile);

/// Archetype key, e.g. `"stalker"`.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct MobKind(pub String);

/// Marker: this entity is driven by the AI tick.
#[derive(Component, Debug)]
pub struct Mob;

//! Collision-corrected movement for mobs.

use glam::Vec2;
use tracing::trace;

use super::mob::Mob;
use crate::level::Level;

/// Move `mob` along `desired`, corrected against the level geometry.
///
/// Only the vector returned by the collision query is applied; a zero
/// correction is a valid result (the mob is blocked), not an error.
pub fn move_mob<M, L>(mob: &mut M, desired: Vec2, level: &L, padding: Vec2)
where
    M: Mob + ?Sized,
    L: Level + ?Sized,
{
    let bounds = mob.bounds().to_scalars();
    let corrected = level.collisions().fix_move(bounds, desired, padding);
    if corrected != desired {
        trace!(?desired, ?corrected, "move corrected by geometry");
    }
    let to = mob.position() + corrected;
    mob.relocate(to);
}

/// Velocity of magnitude `speed` from `from` toward `to`.
///
/// Returns zero when the points coincide instead of a NaN direction.
pub fn heading(from: Vec2, to: Vec2, speed: f32) -> Vec2 {
    (to - from).normalize_or_zero() * speed
}

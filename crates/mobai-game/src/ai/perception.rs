//! Shared perception predicates.

use glam::Vec2;

use super::mob::Mob;
use crate::level::Level;

/// Whether the player is in line of sight and within the mob's detection radius.
pub fn player_seen<M, L>(mob: &M, level: &L, padding: Vec2) -> bool
where
    M: Mob + ?Sized,
    L: Level + ?Sized,
{
    let from = mob.position();
    let to = level.player_position();
    level.collisions().can_see(from, to, padding) && mob.detects(from.distance(to))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::testing::{test_mob, Correction, ScriptedLevel};

    const PAD: Vec2 = Vec2::splat(0.5);

    #[test]
    fn seen_when_visible_and_in_range() {
        let level = ScriptedLevel::new(Correction::PassThrough).with_player(Vec2::new(6.0, 8.0), true);
        let mob = test_mob(Vec2::ZERO, vec![]);
        assert!(player_seen(&mob, &level, PAD));
    }

    #[test]
    fn not_seen_when_blocked_in_range() {
        let level = ScriptedLevel::new(Correction::PassThrough).with_player(Vec2::new(1.0, 1.0), false);
        let mob = test_mob(Vec2::ZERO, vec![]);
        assert!(!player_seen(&mob, &level, PAD));
    }

    #[test]
    fn not_seen_when_visible_out_of_range() {
        let level = ScriptedLevel::new(Correction::PassThrough).with_player(Vec2::new(10.0, 0.1), true);
        let mob = test_mob(Vec2::ZERO, vec![]);
        assert!(!player_seen(&mob, &level, PAD));
    }

    #[test]
    fn not_seen_when_blocked_and_out_of_range() {
        let level = ScriptedLevel::new(Correction::PassThrough).with_player(Vec2::new(50.0, 50.0), false);
        let mob = test_mob(Vec2::ZERO, vec![]);
        assert!(!player_seen(&mob, &level, PAD));
    }

    #[test]
    fn range_boundary_inclusive() {
        // 3-4-5 triangle scaled to exactly the radius of 10
        let level = ScriptedLevel::new(Correction::PassThrough).with_player(Vec2::new(6.0, 8.0), true);
        let mut mob = test_mob(Vec2::ZERO, vec![]);
        mob.detection_radius = 10.0;
        assert!(player_seen(&mob, &level, PAD));
        mob.detection_radius = 9.99;
        assert!(!player_seen(&mob, &level, PAD));
    }

    #[test]
    fn never_moves_the_mob() {
        let level = ScriptedLevel::new(Correction::PassThrough).with_player(Vec2::new(1.0, 0.0), true);
        let mob = test_mob(Vec2::ZERO, vec![]);
        player_seen(&mob, &level, PAD);
        assert_eq!(mob.relocations, 0);
        assert!(level.collisions.calls.borrow().is_empty());
    }
}

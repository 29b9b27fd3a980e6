//! The capability set every AI-driven entity exposes.

use std::time::Duration;

use glam::Vec2;
use mobai_world::Rect;

/// Anything the state machine can drive.
///
/// `bounds` must always be derived from `position`; the only way to move a
/// mob is [`Mob::relocate`].
pub trait Mob {
    fn position(&self) -> Vec2;

    fn bounds(&self) -> Rect;

    /// World units moved per update.
    fn speed(&self) -> f32;

    fn detection_radius(&self) -> f32;

    /// Time without seeing the player after which a hunt is abandoned.
    fn bored_threshold(&self) -> Duration;

    /// Waypoints wandered between while searching. May be empty.
    fn search_pattern(&self) -> &[Vec2];

    /// Unconditionally overwrite the position.
    fn relocate(&mut self, to: Vec2);

    /// Inclusive: exactly reaching the threshold counts as bored.
    fn is_bored(&self, since_contact: Duration) -> bool {
        since_contact >= self.bored_threshold()
    }

    /// Inclusive: a player exactly at the radius is detected.
    fn detects(&self, distance: f32) -> bool {
        distance <= self.detection_radius()
    }
}

/// The per-mob numbers the AI reads, independent of where the mob lives.
#[derive(Debug, Clone, PartialEq)]
pub struct MobProfile {
    pub speed: f32,
    pub detection_radius: f32,
    pub bored_threshold: Duration,
    pub search_pattern: Vec<Vec2>,
}

/// A standalone mob: position, hitbox half extents, and a profile.
#[derive(Debug, Clone, PartialEq)]
pub struct Walker {
    pub position: Vec2,
    pub half_extents: Vec2,
    pub profile: MobProfile,
}

impl Walker {
    pub fn new(position: Vec2, half_extents: Vec2, profile: MobProfile) -> Self {
        Self {
            position,
            half_extents,
            profile,
        }
    }
}

impl Mob for Walker {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn bounds(&self) -> Rect {
        Rect::from_center(self.position, self.half_extents)
    }

    fn speed(&self) -> f32 {
        self.profile.speed
    }

    fn detection_radius(&self) -> f32 {
        self.profile.detection_radius
    }

    fn bored_threshold(&self) -> Duration {
        self.profile.bored_threshold
    }

    fn search_pattern(&self) -> &[Vec2] {
        &self.profile.search_pattern
    }

    fn relocate(&mut self, to: Vec2) {
        self.position = to;
    }
}

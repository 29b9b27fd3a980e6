//! Mob archetype definitions.
//!
//! Provides a registry of known archetypes with their stats and hitbox dimensions.
//! Ships a few built-ins and accepts custom ones (e.g. from a scenario file).

use std::time::Duration;

use glam::Vec2;
use serde::Deserialize;

use crate::ai::mob::MobProfile;

/// Definition of a mob archetype.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MobDefinition {
    /// Lookup key, e.g. `"stalker"`.
    pub kind: String,
    /// Display name, e.g. `"Stalker"`.
    #[serde(default)]
    pub display_name: String,
    /// World units per update.
    pub speed: f32,
    pub detection_radius: f32,
    /// Milliseconds without contact before a hunt is abandoned.
    pub bored_after_ms: u64,
    /// Hitbox half width and half height.
    pub half_extents: Vec2,
}

impl MobDefinition {
    /// The AI profile for a mob of this archetype walking `pattern`.
    pub fn profile(&self, pattern: Vec<Vec2>) -> MobProfile {
        MobProfile {
            speed: self.speed,
            detection_radius: self.detection_radius,
            bored_threshold: Duration::from_millis(self.bored_after_ms),
            search_pattern: pattern,
        }
    }
}

/// Registry of supported mob archetypes.
pub struct MobRegistry {
    mobs: Vec<MobDefinition>,
}

impl Default for MobRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl MobRegistry {
    /// Build the registry with the built-in archetypes.
    pub fn new() -> Self {
        Self {
            mobs: vec![
                MobDefinition {
                    kind: "stalker".into(),
                    display_name: "Stalker".into(),
                    speed: 0.2,
                    detection_radius: 8.0,
                    bored_after_ms: 3000,
                    half_extents: Vec2::new(0.3, 0.3),
                },
                MobDefinition {
                    kind: "sentry".into(),
                    display_name: "Sentry".into(),
                    speed: 0.1,
                    detection_radius: 12.0,
                    bored_after_ms: 6000,
                    half_extents: Vec2::new(0.4, 0.4),
                },
                MobDefinition {
                    kind: "drifter".into(),
                    display_name: "Drifter".into(),
                    speed: 0.3,
                    detection_radius: 5.0,
                    bored_after_ms: 1500,
                    half_extents: Vec2::new(0.25, 0.25),
                },
            ],
        }
    }

    /// Look up an archetype by its kind key.
    pub fn get(&self, kind: &str) -> Option<&MobDefinition> {
        self.mobs.iter().find(|m| m.kind == kind)
    }

    /// All known archetypes.
    pub fn all(&self) -> &[MobDefinition] {
        &self.mobs
    }

    /// Register a custom archetype. Replaces an existing one with the same kind.
    pub fn register_mob(&mut self, def: MobDefinition) {
        match self.mobs.iter_mut().find(|m| m.kind == def.kind) {
            Some(existing) => *existing = def,
            None => self.mobs.push(def),
        }
    }
}

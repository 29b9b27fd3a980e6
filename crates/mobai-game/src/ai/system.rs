//! AI tick system: runs every mob's brain against the arena and records the outcome.

use std::time::Duration;

use bevy_ecs::prelude::*;
use glam::Vec2;
use mobai_world::Rect;
use tracing::debug_span;

use crate::components::{self, EntityId, Hitbox, MobStats, Position};
use crate::game_world::{AiSettings, GameEvent, OutgoingEvents};
use crate::level::Arena;

use super::brain::Brain;
use super::mob::{Mob, MobProfile};

/// A mob's ECS components, borrowed for one brain tick.
pub struct MobBody<'a> {
    pub position: &'a mut Vec2,
    pub half_extents: Vec2,
    pub stats: &'a MobProfile,
}

impl Mob for MobBody<'_> {
    fn position(&self) -> Vec2 {
        *self.position
    }

    fn bounds(&self) -> Rect {
        Rect::from_center(*self.position, self.half_extents)
    }

    fn speed(&self) -> f32 {
        self.stats.speed
    }

    fn detection_radius(&self) -> f32 {
        self.stats.detection_radius
    }

    fn bored_threshold(&self) -> Duration {
        self.stats.bored_threshold
    }

    fn search_pattern(&self) -> &[Vec2] {
        &self.stats.search_pattern
    }

    fn relocate(&mut self, to: Vec2) {
        *self.position = to;
    }
}

/// Runs one brain tick for every mob.
///
/// The arena is taken out of the world for the duration of the pass, so
/// every mob sees the same player position and geometry. Brains run
/// without hooks; each transition is queued as `GameEvent::StateChanged`.
pub fn system_ai_tick(world: &mut World, delta: Duration) {
    let tuning = world.resource::<AiSettings>().0;

    world.resource_scope(|world, arena: Mut<Arena>| {
        let mut events = Vec::new();
        let mut query = world.query_filtered::<
            (&EntityId, &mut Position, &Hitbox, &MobStats, &mut Brain),
            With<components::Mob>,
        >();

        for (id, mut position, hitbox, stats, mut brain) in query.iter_mut(world) {
            let _span = debug_span!("mob", id = id.0).entered();
            let before = position.0;
            let mut body = MobBody {
                position: &mut position.0,
                half_extents: hitbox.half_extents,
                stats: &stats.0,
            };
            let changed = brain.tick(&mut body, delta, &*arena, &tuning, &mut ());

            if let Some((from, to)) = changed {
                events.push(GameEvent::StateChanged { id: id.0, from, to });
            }
            if position.0 != before {
                events.push(GameEvent::MobMoved {
                    id: id.0,
                    position: position.0,
                });
            }
        }

        world.resource_mut::<OutgoingEvents>().events.extend(events);
    });
}

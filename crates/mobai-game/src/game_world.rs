//! ECS game world: bevy_ecs World, mob management, the AI tick, and event bus.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use bevy_ecs::prelude::*;
use glam::Vec2;
use tracing::{debug, info};

use crate::ai::brain::Brain;
use crate::ai::state::StateKind;
use crate::ai::system::{system_ai_tick, MobBody};
use crate::ai::tuning::AiTuning;
use crate::components::{self, EntityId, Hitbox, MobKind, MobStats, Position};
use crate::error::GameError;
use crate::level::Arena;
use crate::mob_registry::MobRegistry;

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

/// Outgoing events queued by ECS operations for whoever drives the world.
#[derive(Resource, Default)]
pub struct OutgoingEvents {
    pub events: Vec<GameEvent>,
}

/// Number of completed ticks.
#[derive(Resource, Default)]
pub struct TickCounter(pub u64);

/// Tuning shared by every mob's brain.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct AiSettings(pub AiTuning);

/// Thread-safe entity ID allocator.
#[derive(Resource)]
pub struct EntityIdAllocator {
    next: AtomicU64,
}

impl EntityIdAllocator {
    pub fn new(start: u64) -> Self {
        Self {
            next: AtomicU64::new(start),
        }
    }

    /// Allocate the next entity ID.
    pub fn allocate(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }

    /// Current value (next ID that will be allocated).
    pub fn current(&self) -> u64 {
        self.next.load(Ordering::Relaxed)
    }
}

// ---------------------------------------------------------------------------
// Game events
// ---------------------------------------------------------------------------

/// Events produced by the game world.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    MobSpawned {
        id: u64,
        kind: String,
        position: Vec2,
    },
    /// Position after a tick that moved the mob.
    MobMoved { id: u64, position: Vec2 },
    /// The active state kind changed during a tick.
    StateChanged {
        id: u64,
        from: StateKind,
        to: StateKind,
    },
}

// ---------------------------------------------------------------------------
// GameWorld
// ---------------------------------------------------------------------------

/// The ECS game world.
pub struct GameWorld {
    pub world: World,
    pub mob_registry: MobRegistry,
}

impl GameWorld {
    /// Create a world around `arena`, with entity IDs starting at 1.
    pub fn new(arena: Arena, tuning: AiTuning) -> Self {
        let mut world = World::new();
        world.insert_resource(OutgoingEvents::default());
        world.insert_resource(TickCounter::default());
        world.insert_resource(EntityIdAllocator::new(1));
        world.insert_resource(AiSettings(tuning));
        world.insert_resource(arena);

        Self {
            world,
            mob_registry: MobRegistry::new(),
        }
    }

    /// Run one tick of `delta` simulated time.
    pub fn tick(&mut self, delta: Duration) {
        self.world.resource_mut::<TickCounter>().0 += 1;
        system_ai_tick(&mut self.world, delta);
    }

    /// Drain all pending outgoing events.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.world.resource_mut::<OutgoingEvents>().events)
    }

    /// Return the current tick count.
    pub fn current_tick(&self) -> u64 {
        self.world.resource::<TickCounter>().0
    }

    pub fn tuning(&self) -> AiTuning {
        self.world.resource::<AiSettings>().0
    }

    pub fn arena(&self) -> &Arena {
        self.world.resource::<Arena>()
    }

    pub fn player_position(&self) -> Vec2 {
        self.arena().player
    }

    /// Move the player. Mobs see the new position from the next tick on.
    pub fn set_player_position(&mut self, position: Vec2) {
        self.world.resource_mut::<Arena>().player = position;
    }

    /// Spawn a mob of archetype `kind` walking `pattern`. Returns its ID.
    ///
    /// The brain is started here, so the initial idle state is entered
    /// before the first tick.
    pub fn spawn_mob(&mut self, kind: &str, position: Vec2, pattern: Vec<Vec2>) -> Result<u64, GameError> {
        let def = self
            .mob_registry
            .get(kind)
            .ok_or_else(|| GameError::UnknownMob(kind.to_string()))?
            .clone();
        let id = self.world.resource::<EntityIdAllocator>().allocate();
        let stats = def.profile(pattern);

        let mut brain = Brain::new();
        {
            let _span = tracing::debug_span!("mob", id).entered();
            let mut at = position;
            let mut body = MobBody {
                position: &mut at,
                half_extents: def.half_extents,
                stats: &stats,
            };
            // Spawn reports no StateChanged; the first tick does.
            brain.start(&mut body, &mut ());
        }

        self.world.spawn((
            EntityId(id),
            Position(position),
            Hitbox {
                half_extents: def.half_extents,
            },
            MobStats(stats),
            MobKind(def.kind.clone()),
            components::Mob,
            brain,
        ));

        info!(id, kind, x = position.x, y = position.y, "mob spawned");
        self.world
            .resource_mut::<OutgoingEvents>()
            .events
            .push(GameEvent::MobSpawned {
                id,
                kind: def.kind,
                position,
            });

        Ok(id)
    }

    /// Remove a mob. Returns `true` if found and removed.
    pub fn remove_mob(&mut self, id: u64) -> bool {
        match self.find_mob_entity(id) {
            Some(entity) => {
                debug!(id, "mob removed");
                self.world.despawn(entity)
            }
            None => false,
        }
    }

    /// Get a mob's position by ID.
    pub fn mob_position(&mut self, id: u64) -> Option<Vec2> {
        let entity = self.find_mob_entity(id)?;
        self.world.get::<Position>(entity).map(|p| p.0)
    }

    /// Get the kind of a mob's active state by ID.
    pub fn mob_state(&mut self, id: u64) -> Option<StateKind> {
        let entity = self.find_mob_entity(id)?;
        self.world.get::<Brain>(entity).map(Brain::kind)
    }

    /// Get a mob's archetype key by ID.
    pub fn mob_kind(&mut self, id: u64) -> Option<String> {
        let entity = self.find_mob_entity(id)?;
        self.world.get::<MobKind>(entity).map(|k| k.0.clone())
    }

    /// IDs of all live mobs, ascending.
    pub fn mob_ids(&mut self) -> Vec<u64> {
        let mut ids: Vec<u64> = self
            .world
            .query_filtered::<&EntityId, With<components::Mob>>()
            .iter(&self.world)
            .map(|eid| eid.0)
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Find a mob entity by ID.
    fn find_mob_entity(&mut self, id: u64) -> Option<Entity> {
        let mut query = self
            .world
            .query_filtered::<(Entity, &EntityId), With<components::Mob>>();
        query
            .iter(&self.world)
            .find(|(_, eid)| eid.0 == id)
            .map(|(entity, _)| entity)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

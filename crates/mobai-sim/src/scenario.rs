//! Builds a game world from a scenario file and steps it frame by frame.

use std::f32::consts::TAU;
use std::time::Duration;

use glam::Vec2;
use mobai_game::ai::state::StateKind;
use mobai_game::{Arena, GameEvent, GameWorld};
use mobai_world::{Collisions, Rect, TileGrid};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, trace, warn};

use crate::config::{ConfigError, PlayerSection, ScenarioConfig};

/// Half extents of the player's hitbox.
const PLAYER_HALF_EXTENTS: Vec2 = Vec2::splat(0.3);

/// Seeded random walk for the player.
struct PlayerWalk {
    enabled: bool,
    speed: f32,
    turn_chance: f64,
    heading: Vec2,
    rng: StdRng,
}

impl PlayerWalk {
    fn new(section: &PlayerSection, turn_chance: f64, seed: u64) -> Self {
        Self {
            enabled: section.random_walk && section.speed > 0.0,
            speed: section.speed,
            turn_chance,
            heading: Vec2::ZERO,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn turn(&mut self) {
        self.heading = Vec2::from_angle(self.rng.gen_range(0.0..TAU));
    }

    /// Next player position. Turns away after bumping into a wall.
    fn step(&mut self, grid: &TileGrid, from: Vec2, tile: Vec2) -> Vec2 {
        if !self.enabled {
            return from;
        }
        if self.heading == Vec2::ZERO || self.rng.gen_bool(self.turn_chance) {
            self.turn();
        }
        let desired = self.heading * self.speed;
        let bounds = Rect::from_center(from, PLAYER_HALF_EXTENTS).to_scalars();
        let moved = grid.fix_move(bounds, desired, tile);
        if moved.length_squared() < desired.length_squared() * 0.25 {
            self.turn();
        }
        from + moved
    }
}

/// Where a mob ended up after the run.
#[derive(Debug, Clone, PartialEq)]
pub struct MobSummary {
    pub id: u64,
    pub kind: String,
    pub state: StateKind,
    pub position: Vec2,
}

pub struct Scenario {
    pub world: GameWorld,
    player: PlayerWalk,
    tile: Vec2,
    frames: u32,
    frame: Duration,
    transitions: usize,
}

impl Scenario {
    pub fn build(config: &ScenarioConfig) -> Result<Self, ConfigError> {
        let tuning = config.resolved_tuning()?;
        let turn_chance = config.turn_chance()?;
        let grid = TileGrid::parse(config.map.rows.as_slice())?;
        let tile = tuning.padding;
        let player_start = player_start(config, &grid, tile);

        let mut mob_markers = grid
            .markers()
            .iter()
            .filter(|m| m.glyph == 'M')
            .map(|m| TileGrid::tile_center(m.col, m.row, tile))
            .collect::<Vec<_>>()
            .into_iter();

        let mut world = GameWorld::new(Arena::new(grid, player_start), tuning);
        for def in &config.archetypes {
            debug!(kind = %def.kind, "registering archetype");
            world.mob_registry.register_mob(def.clone());
        }

        for (index, mob) in config.mobs.iter().enumerate() {
            let Some(position) = mob.position.or_else(|| mob_markers.next()) else {
                warn!(index, archetype = %mob.archetype, "no position and no free M marker, skipping mob");
                continue;
            };
            world.spawn_mob(&mob.archetype, position, mob.pattern.clone())?;
        }

        info!(
            mobs = config.mobs.len(),
            frames = config.sim.frames,
            frame_ms = config.sim.frame_ms,
            seed = config.sim.seed,
            "scenario ready"
        );

        Ok(Self {
            world,
            player: PlayerWalk::new(&config.player, turn_chance, config.sim.seed),
            tile,
            frames: config.sim.frames,
            frame: config.frame_duration(),
            transitions: 0,
        })
    }

    /// Advance one frame: move the player, then tick every mob.
    pub fn step(&mut self) -> Vec<GameEvent> {
        let from = self.world.player_position();
        let to = self.player.step(&self.world.arena().grid, from, self.tile);
        if to != from {
            self.world.set_player_position(to);
        }

        self.world.tick(self.frame);
        let events = self.world.drain_events();
        for event in &events {
            match event {
                GameEvent::StateChanged { id, from, to } => {
                    self.transitions += 1;
                    info!(tick = self.world.current_tick(), id, %from, %to, "state changed");
                }
                GameEvent::MobMoved { id, position } => {
                    trace!(id, x = position.x, y = position.y, "mob moved");
                }
                GameEvent::MobSpawned { .. } => {}
            }
        }
        events
    }

    /// Run every configured frame and summarize the mobs.
    pub fn run(&mut self) -> Vec<MobSummary> {
        for _ in 0..self.frames {
            self.step();
        }
        info!(
            ticks = self.world.current_tick(),
            transitions = self.transitions,
            "run finished"
        );
        self.summary()
    }

    pub fn summary(&mut self) -> Vec<MobSummary> {
        let mut out = Vec::new();
        for id in self.world.mob_ids() {
            let (Some(kind), Some(state), Some(position)) = (
                self.world.mob_kind(id),
                self.world.mob_state(id),
                self.world.mob_position(id),
            ) else {
                continue;
            };
            out.push(MobSummary {
                id,
                kind,
                state,
                position,
            });
        }
        out
    }
}

fn player_start(config: &ScenarioConfig, grid: &TileGrid, tile: Vec2) -> Vec2 {
    if let Some(start) = config.player.start {
        return start;
    }
    match grid.markers().iter().find(|m| m.glyph == 'P') {
        Some(m) => TileGrid::tile_center(m.col, m.row, tile),
        None => Vec2::new(grid.width() as f32, grid.height() as f32) * tile * 0.5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(toml_str: &str) -> ScenarioConfig {
        toml::from_str(toml_str).unwrap()
    }

    const CORRIDOR: &str = r#"
        [sim]
        frames = 50
        frame_ms = 100
        seed = 3

        [map]
        tile_size = [1.0, 1.0]
        rows = [
            '############',
            '#P........M#',
            '#..........#',
            '#M.........#',
            '############',
        ]

        [player]
        random_walk = false

        [[mob]]
        archetype = "stalker"
        pattern = [[10.5, 3.5], [1.5, 3.5]]

        [[mob]]
        archetype = "drifter"
    "#;

    #[test]
    fn mobs_fill_markers_in_order() {
        let mut scenario = Scenario::build(&config(CORRIDOR)).unwrap();
        let summary = scenario.summary();
        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].kind, "stalker");
        assert_eq!(summary[0].position, Vec2::new(10.5, 1.5));
        assert_eq!(summary[1].kind, "drifter");
        assert_eq!(summary[1].position, Vec2::new(1.5, 3.5));
        assert!(summary.iter().all(|m| m.state == StateKind::Idle));
        assert_eq!(scenario.world.player_position(), Vec2::new(1.5, 1.5));
    }

    #[test]
    fn mobs_without_position_are_skipped_when_markers_run_out() {
        let cfg = config(
            r#"
            [map]
            tile_size = [1.0, 1.0]
            rows = ['#.M.#']

            [[mob]]
            archetype = "sentry"

            [[mob]]
            archetype = "sentry"
            "#,
        );
        let mut scenario = Scenario::build(&cfg).unwrap();
        assert_eq!(scenario.summary().len(), 1);
    }

    #[test]
    fn unknown_archetype_fails_build() {
        let cfg = config(
            r#"
            [map]
            rows = ["...."]

            [[mob]]
            archetype = "dragon"
            position = [0.5, 0.5]
            "#,
        );
        assert!(matches!(
            Scenario::build(&cfg),
            Err(ConfigError::Spawn(_))
        ));
    }

    #[test]
    fn custom_archetype_is_spawnable() {
        let cfg = config(
            r#"
            [map]
            rows = ["...."]

            [[archetype]]
            kind = "lurker"
            speed = 0.05
            detection_radius = 3.0
            bored_after_ms = 500
            half_extents = [0.1, 0.1]

            [[mob]]
            archetype = "lurker"
            position = [0.25, 0.25]
            "#,
        );
        let mut scenario = Scenario::build(&cfg).unwrap();
        assert_eq!(scenario.summary()[0].kind, "lurker");
    }

    #[test]
    fn ragged_map_fails_build() {
        let cfg = config(
            r#"
            [map]
            rows = ["....", "..."]
            "#,
        );
        assert!(matches!(Scenario::build(&cfg), Err(ConfigError::Map(_))));
    }

    #[test]
    fn nan_turn_chance_fails_build() {
        let cfg = config(
            r#"
            [map]
            rows = ["...."]

            [player]
            turn_chance = nan
            "#,
        );
        assert!(matches!(
            Scenario::build(&cfg),
            Err(ConfigError::InvalidTurnChance(c)) if c.is_nan()
        ));
    }

    #[test]
    fn run_spots_the_player_across_the_room() {
        let mut scenario = Scenario::build(&config(CORRIDOR)).unwrap();
        let summary = scenario.run();
        assert_eq!(scenario.world.current_tick(), 50);
        // The drifter starts 2 tiles from the stationary player
        let drifter = summary.iter().find(|m| m.kind == "drifter").unwrap();
        assert_eq!(drifter.state, StateKind::Hunt);
        assert!(scenario.transitions >= 3);
    }

    #[test]
    fn seeded_walk_is_deterministic_and_stays_inside() {
        let cfg_text = r#"
            [sim]
            frames = 200
            seed = 99

            [map]
            tile_size = [1.0, 1.0]
            rows = [
                '########',
                '#......#',
                '#..##..#',
                '#......#',
                '########',
            ]

            [player]
            start = [1.5, 1.5]
            speed = 0.3
        "#;
        let run = || {
            let mut scenario = Scenario::build(&config(cfg_text)).unwrap();
            let mut trail = Vec::new();
            for _ in 0..200 {
                scenario.step();
                trail.push(scenario.world.player_position());
            }
            trail
        };
        let a = run();
        let b = run();
        assert_eq!(a, b);

        let grid = TileGrid::parse(&[
            "########", "#......#", "#..##..#", "#......#", "########",
        ])
        .unwrap();
        for p in &a {
            let bounds = Rect::from_center(*p, PLAYER_HALF_EXTENTS);
            for (col, row) in bounds.intersecting_tiles(Vec2::ONE) {
                assert!(!grid.is_solid(col, row), "player inside wall at {p:?}");
            }
        }
        assert!(a.iter().any(|p| *p != Vec2::new(1.5, 1.5)));
    }
}

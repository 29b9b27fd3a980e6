use std::path::Path;
use std::time::Duration;

use glam::Vec2;
use mobai_game::ai::tuning::{
    AiTuning, DEFAULT_ARRIVAL_RADIUS, DEFAULT_MAX_HISTORY, DEFAULT_PADDING,
};
use mobai_game::mob_registry::MobDefinition;
use mobai_game::GameError;
use mobai_world::tile_grid::checked_tile_size;
use mobai_world::WorldError;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid scenario file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid map: {0}")]
    Map(#[from] WorldError),

    #[error("map tile size {tile} does not match tuning padding {padding}")]
    PaddingMismatch { tile: Vec2, padding: Vec2 },

    #[error("player turn_chance must be within 0..=1, got {0}")]
    InvalidTurnChance(f64),

    #[error(transparent)]
    Spawn(#[from] GameError),
}

#[derive(Debug, Deserialize)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub logging: LoggingSection,
    #[serde(default)]
    pub sim: SimSection,
    pub map: MapSection,
    #[serde(default)]
    pub tuning: TuningSection,
    #[serde(default)]
    pub player: PlayerSection,
    #[serde(default, rename = "archetype")]
    pub archetypes: Vec<MobDefinition>,
    #[serde(default, rename = "mob")]
    pub mobs: Vec<MobSection>,
}

#[derive(Debug, Deserialize)]
pub struct LoggingSection {
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".into(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SimSection {
    #[serde(default = "default_frames")]
    pub frames: u32,
    /// Simulated milliseconds per frame.
    #[serde(default = "default_frame_ms")]
    pub frame_ms: u64,
    #[serde(default)]
    pub seed: u64,
}

fn default_frames() -> u32 {
    600
}

fn default_frame_ms() -> u64 {
    50
}

impl Default for SimSection {
    fn default() -> Self {
        Self {
            frames: default_frames(),
            frame_ms: default_frame_ms(),
            seed: 0,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct MapSection {
    /// Glyph rows, top to bottom.
    pub rows: Vec<String>,
    /// World size of one tile. Defaults to the tuning padding.
    #[serde(default)]
    pub tile_size: Option<Vec2>,
}

/// AI tuning as written in the file. An absent padding follows the tile size.
#[derive(Debug, Deserialize)]
pub struct TuningSection {
    #[serde(default = "default_arrival_radius")]
    pub arrival_radius: f32,
    #[serde(default)]
    pub padding: Option<Vec2>,
    #[serde(default = "default_max_history")]
    pub max_history: usize,
}

fn default_arrival_radius() -> f32 {
    DEFAULT_ARRIVAL_RADIUS
}

fn default_max_history() -> usize {
    DEFAULT_MAX_HISTORY
}

impl Default for TuningSection {
    fn default() -> Self {
        Self {
            arrival_radius: default_arrival_radius(),
            padding: None,
            max_history: default_max_history(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PlayerSection {
    /// Falls back to the `P` marker, then the middle of the map.
    #[serde(default)]
    pub start: Option<Vec2>,
    #[serde(default = "default_player_speed")]
    pub speed: f32,
    #[serde(default = "default_random_walk")]
    pub random_walk: bool,
    /// Chance per frame of picking a new heading.
    #[serde(default = "default_turn_chance")]
    pub turn_chance: f64,
}

fn default_player_speed() -> f32 {
    0.15
}

fn default_random_walk() -> bool {
    true
}

fn default_turn_chance() -> f64 {
    0.05
}

impl Default for PlayerSection {
    fn default() -> Self {
        Self {
            start: None,
            speed: default_player_speed(),
            random_walk: default_random_walk(),
            turn_chance: default_turn_chance(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct MobSection {
    pub archetype: String,
    /// Falls back to the next unused `M` marker.
    #[serde(default)]
    pub position: Option<Vec2>,
    #[serde(default)]
    pub pattern: Vec<Vec2>,
}

impl ScenarioConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }

    pub fn frame_duration(&self) -> Duration {
        Duration::from_millis(self.sim.frame_ms)
    }

    /// Tuning with the padding pinned to the map's tile size.
    ///
    /// The tile grid reads the padding pair as its tile dimensions, so an
    /// explicit padding must equal the tile size. With neither set both
    /// fall back to the default padding.
    pub fn resolved_tuning(&self) -> Result<AiTuning, ConfigError> {
        let requested = self.map.tile_size.or(self.tuning.padding).unwrap_or(DEFAULT_PADDING);
        let tile = checked_tile_size(requested.x, requested.y)?;
        if let Some(padding) = self.tuning.padding {
            if padding != tile {
                return Err(ConfigError::PaddingMismatch { tile, padding });
            }
        }
        Ok(AiTuning {
            arrival_radius: self.tuning.arrival_radius,
            padding: tile,
            max_history: self.tuning.max_history,
        })
    }

    /// The player's per-frame turn chance, rejected unless it is a
    /// probability.
    pub fn turn_chance(&self) -> Result<f64, ConfigError> {
        let chance = self.player.turn_chance;
        if (0.0..=1.0).contains(&chance) {
            Ok(chance)
        } else {
            Err(ConfigError::InvalidTurnChance(chance))
        }
    }
}

//! Tunable constants shared by every mob state.

use glam::Vec2;
use serde::Deserialize;

/// Distance under which a search waypoint counts as reached.
pub const DEFAULT_ARRIVAL_RADIUS: f32 = 2.0;

/// Pair handed to every collision query.
pub const DEFAULT_PADDING: Vec2 = Vec2::splat(0.5);

/// Suspended states a brain keeps for pop transitions.
pub const DEFAULT_MAX_HISTORY: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct AiTuning {
    /// Strict: a mob exactly `arrival_radius` away has not arrived.
    pub arrival_radius: f32,
    /// Passed through to `fix_move` and `can_see` unchanged.
    pub padding: Vec2,
    /// 0 disables history; popping then always falls back to a fresh search.
    pub max_history: usize,
}

impl Default for AiTuning {
    fn default() -> Self {
        Self {
            arrival_radius: DEFAULT_ARRIVAL_RADIUS,
            padding: DEFAULT_PADDING,
            max_history: DEFAULT_MAX_HISTORY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let t = AiTuning::default();
        assert_eq!(t.arrival_radius, 2.0);
        assert_eq!(t.padding, Vec2::new(0.5, 0.5));
        assert_eq!(t.max_history, 4);
    }

    #[test]
    fn partial_table_keeps_other_defaults() {
        let t: AiTuning = toml::from_str("max_history = 0").unwrap();
        assert_eq!(t.max_history, 0);
        assert_eq!(t.arrival_radius, DEFAULT_ARRIVAL_RADIUS);
        assert_eq!(t.padding, DEFAULT_PADDING);
    }
}

//! Solid/empty tile grid implementing [`Collisions`].
//!
//! Row 0 of the source text is tile row 0, so world Y grows downward the
//! same way the map reads. Anything outside the grid counts as solid.

use glam::Vec2;

use crate::collisions::Collisions;
use crate::error::WorldError;
use crate::geometry::{tile_span, Rect, EDGE_EPS};

/// Glyph for a solid tile.
pub const SOLID: char = '#';

/// Glyphs parsed as empty floor.
const FLOOR: [char; 2] = ['.', ' '];

/// Glyphs parsed as empty floor that also mark a spawn point.
const MARKERS: [char; 2] = ['P', 'M'];

/// A spawn hint left in the map text (`P` for the player, `M` for a mob).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker {
    pub glyph: char,
    pub col: i32,
    pub row: i32,
}

/// Rectangular grid of solid and empty tiles.
#[derive(Debug, Clone)]
pub struct TileGrid {
    width: usize,
    height: usize,
    solid: Vec<bool>,
    markers: Vec<Marker>,
}

impl TileGrid {
    /// An all-floor grid of the given size.
    pub fn open(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            solid: vec![false; width * height],
            markers: Vec::new(),
        }
    }

    /// Parse glyph rows: `#` solid, `.`/space floor, `P`/`M` floor with a marker.
    pub fn parse<S: AsRef<str>>(rows: &[S]) -> Result<Self, WorldError> {
        let first = rows.first().ok_or(WorldError::EmptyMap)?;
        let width = first.as_ref().chars().count();
        if width == 0 {
            return Err(WorldError::EmptyMap);
        }

        let mut solid = Vec::with_capacity(width * rows.len());
        let mut markers = Vec::new();
        for (row, line) in rows.iter().enumerate() {
            let line = line.as_ref();
            let actual = line.chars().count();
            if actual != width {
                return Err(WorldError::RaggedRow {
                    row,
                    expected: width,
                    actual,
                });
            }
            for (col, glyph) in line.chars().enumerate() {
                if glyph == SOLID {
                    solid.push(true);
                } else if FLOOR.contains(&glyph) {
                    solid.push(false);
                } else if MARKERS.contains(&glyph) {
                    solid.push(false);
                    markers.push(Marker {
                        glyph,
                        col: col as i32,
                        row: row as i32,
                    });
                } else {
                    return Err(WorldError::UnknownTile { glyph, row, col });
                }
            }
        }

        Ok(Self {
            width,
            height: rows.len(),
            solid,
            markers,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Whether the tile at `(col, row)` blocks movement and sight.
    pub fn is_solid(&self, col: i32, row: i32) -> bool {
        if col < 0 || row < 0 || col as usize >= self.width || row as usize >= self.height {
            return true;
        }
        self.solid[row as usize * self.width + col as usize]
    }

    /// World-space center of a tile.
    pub fn tile_center(col: i32, row: i32, tile: Vec2) -> Vec2 {
        Vec2::new((col as f32 + 0.5) * tile.x, (row as f32 + 0.5) * tile.y)
    }

    fn solid_at(&self, p: Vec2, tile: Vec2) -> bool {
        self.is_solid((p.x / tile.x).floor() as i32, (p.y / tile.y).floor() as i32)
    }

    /// Clip a one-axis move of `rect` to the nearest solid tile line.
    fn clip_axis(&self, rect: &Rect, delta: f32, axis: usize, tile: Vec2) -> f32 {
        if delta == 0.0 || !delta.is_finite() {
            return 0.0;
        }
        let other = 1 - axis;
        let (o0, o1) = tile_span(rect.min[other], rect.max[other], tile[other]);
        let size = tile[axis];
        let blocked = |line: i32| {
            (o0..=o1).any(|o| {
                if axis == 0 {
                    self.is_solid(line, o)
                } else {
                    self.is_solid(o, line)
                }
            })
        };

        if delta > 0.0 {
            let first = ((rect.max[axis] - EDGE_EPS) / size).floor() as i32 + 1;
            let last = ((rect.max[axis] + delta - EDGE_EPS) / size).floor() as i32;
            for line in first..=last {
                if blocked(line) {
                    return (line as f32 * size - rect.max[axis]).clamp(0.0, delta);
                }
            }
        } else {
            let first = ((rect.min[axis] + EDGE_EPS) / size).floor() as i32 - 1;
            let last = ((rect.min[axis] + delta) / size).floor() as i32;
            for line in (last..=first).rev() {
                if blocked(line) {
                    return ((line + 1) as f32 * size - rect.min[axis]).clamp(delta, 0.0);
                }
            }
        }
        delta
    }
}

/// Fall back to unit tiles when the caller passes a degenerate size.
fn tile_size(pad: Vec2) -> Vec2 {
    if pad.x > 0.0 && pad.y > 0.0 {
        pad
    } else {
        Vec2::ONE
    }
}

/// Validate a configured tile size.
pub fn checked_tile_size(x: f32, y: f32) -> Result<Vec2, WorldError> {
    if x > 0.0 && y > 0.0 && x.is_finite() && y.is_finite() {
        Ok(Vec2::new(x, y))
    } else {
        Err(WorldError::InvalidTileSize { x, y })
    }
}

impl Collisions for TileGrid {
    /// Sweeps X first, then Y from the X-shifted box, so a mob pushing into
    /// a wall diagonally slides along it.
    fn fix_move(&self, bounds: [f32; 4], desired: Vec2, pad: Vec2) -> Vec2 {
        let tile = tile_size(pad);
        let rect = Rect::from_scalars(bounds);
        let dx = self.clip_axis(&rect, desired.x, 0, tile);
        let rect = rect.translated(Vec2::new(dx, 0.0));
        let dy = self.clip_axis(&rect, desired.y, 1, tile);
        Vec2::new(dx, dy)
    }

    fn can_see(&self, from: Vec2, to: Vec2, pad: Vec2) -> bool {
        let tile = tile_size(pad);
        let delta = to - from;
        let step = tile.min_element() * 0.25;
        let steps = (delta.length() / step).ceil() as usize;
        if steps == 0 {
            return !self.solid_at(from, tile);
        }
        (0..=steps).all(|i| {
            let p = from + delta * (i as f32 / steps as f32);
            !self.solid_at(p, tile)
        })
    }
}

//! Axis-aligned rectangles and tile-overlap helpers.

use glam::Vec2;

/// Edge epsilon: a box whose edge lies on (or within rounding of) a tile
/// boundary does not touch the tile on the far side of it.
pub const EDGE_EPS: f32 = 0.001;

/// Axis-aligned bounding rectangle in world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Build the rectangle centered on `center` extending `half_extents` along each axis.
    pub fn from_center(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// The four scalars `(min_x, min_y, max_x, max_y)` collision queries take.
    pub fn to_scalars(&self) -> [f32; 4] {
        [self.min.x, self.min.y, self.max.x, self.max.y]
    }

    /// Inverse of [`Rect::to_scalars`].
    pub fn from_scalars(s: [f32; 4]) -> Self {
        Self {
            min: Vec2::new(s[0], s[1]),
            max: Vec2::new(s[2], s[3]),
        }
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// The same rectangle shifted by `delta`.
    pub fn translated(&self, delta: Vec2) -> Self {
        Self {
            min: self.min + delta,
            max: self.max + delta,
        }
    }

    /// Iterate all `(column, row)` tile coordinates this rectangle overlaps,
    /// for tiles of size `tile` world units.
    pub fn intersecting_tiles(&self, tile: Vec2) -> impl Iterator<Item = (i32, i32)> {
        let (c0, c1) = tile_span(self.min.x, self.max.x, tile.x);
        let (r0, r1) = tile_span(self.min.y, self.max.y, tile.y);
        (r0..=r1).flat_map(move |row| (c0..=c1).map(move |col| (col, row)))
    }
}

/// Inclusive range of tile indices covered by `[lo, hi]` along one axis.
pub fn tile_span(lo: f32, hi: f32, tile: f32) -> (i32, i32) {
    let first = ((lo + EDGE_EPS) / tile).floor() as i32;
    let last = ((hi - EDGE_EPS) / tile).floor() as i32;
    (first, last.max(first))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_center_extents() {
        let r = Rect::from_center(Vec2::new(2.0, 3.0), Vec2::new(0.5, 1.0));
        assert_eq!(r.to_scalars(), [1.5, 2.0, 2.5, 4.0]);
        assert_eq!(r.center(), Vec2::new(2.0, 3.0));
        assert_eq!(r.size(), Vec2::new(1.0, 2.0));
    }

    #[test]
    fn scalars_roundtrip() {
        let r = Rect::new(Vec2::new(-1.0, 0.0), Vec2::new(1.0, 2.0));
        assert_eq!(Rect::from_scalars(r.to_scalars()), r);
    }

    #[test]
    fn translated_moves_both_corners() {
        let r = Rect::from_center(Vec2::ZERO, Vec2::splat(0.5)).translated(Vec2::new(3.0, -1.0));
        assert_eq!(r.min, Vec2::new(2.5, -1.5));
        assert_eq!(r.max, Vec2::new(3.5, -0.5));
    }

    #[test]
    fn tiles_inside_single_cell() {
        let r = Rect::from_center(Vec2::new(0.5, 0.5), Vec2::splat(0.3));
        let tiles: Vec<_> = r.intersecting_tiles(Vec2::ONE).collect();
        assert_eq!(tiles, vec![(0, 0)]);
    }

    #[test]
    fn tiles_straddling_boundary() {
        // x: 0.7..1.3 covers columns 0 and 1
        let r = Rect::from_center(Vec2::new(1.0, 0.5), Vec2::splat(0.3));
        let tiles: Vec<_> = r.intersecting_tiles(Vec2::ONE).collect();
        assert_eq!(tiles, vec![(0, 0), (1, 0)]);
    }

    #[test]
    fn exact_edge_no_extra_tile() {
        // x: 0.0..1.0 ends on the boundary, must not touch column 1
        let r = Rect::new(Vec2::ZERO, Vec2::new(1.0, 1.0));
        let tiles: Vec<_> = r.intersecting_tiles(Vec2::ONE).collect();
        assert_eq!(tiles, vec![(0, 0)]);
    }

    #[test]
    fn min_edge_rounded_below_boundary_no_extra_tile() {
        // 1.3 - 0.3 rounds to just under 1.0 in f32
        let r = Rect::new(Vec2::new(0.9999999, 0.2), Vec2::new(1.6, 0.8));
        let tiles: Vec<_> = r.intersecting_tiles(Vec2::ONE).collect();
        assert_eq!(tiles, vec![(1, 0)]);
    }

    #[test]
    fn negative_coords() {
        let r = Rect::from_center(Vec2::new(-0.5, -0.5), Vec2::splat(0.3));
        assert!(r.intersecting_tiles(Vec2::ONE).all(|t| t == (-1, -1)));
    }

    #[test]
    fn scaled_tiles() {
        // Half-unit tiles: 0.0..1.0 spans columns 0 and 1
        let r = Rect::new(Vec2::ZERO, Vec2::new(1.0, 0.4));
        let tiles: Vec<_> = r.intersecting_tiles(Vec2::splat(0.5)).collect();
        assert_eq!(tiles, vec![(0, 0), (1, 0)]);
    }
}

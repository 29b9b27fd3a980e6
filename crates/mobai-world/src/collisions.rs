//! The collision query surface AI code consumes.

use glam::Vec2;

/// Line-of-sight and move-correction queries against level geometry.
///
/// `pad` is passed through untouched from the caller; its meaning belongs
/// to the implementation ([`crate::tile_grid::TileGrid`] reads it as the
/// tile size along each axis).
pub trait Collisions {
    /// Correct `desired` so a box with `bounds` (`min_x, min_y, max_x, max_y`)
    /// can travel along it. Returns `desired` unchanged when nothing is in
    /// the way, a shortened or zeroed vector otherwise.
    fn fix_move(&self, bounds: [f32; 4], desired: Vec2, pad: Vec2) -> Vec2;

    /// Whether `to` is visible from `from`.
    fn can_see(&self, from: Vec2, to: Vec2, pad: Vec2) -> bool;
}

/// Geometry with no walls: every move succeeds and everything is visible.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenField;

impl Collisions for OpenField {
    fn fix_move(&self, _bounds: [f32; 4], desired: Vec2, _pad: Vec2) -> Vec2 {
        desired
    }

    fn can_see(&self, _from: Vec2, _to: Vec2, _pad: Vec2) -> bool {
        true
    }
}

impl<C: Collisions + ?Sized> Collisions for &C {
    fn fix_move(&self, bounds: [f32; 4], desired: Vec2, pad: Vec2) -> Vec2 {
        (**self).fix_move(bounds, desired, pad)
    }

    fn can_see(&self, from: Vec2, to: Vec2, pad: Vec2) -> bool {
        (**self).can_see(from, to, pad)
    }
}

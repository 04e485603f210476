//! Axis-aligned rectangle geometry for sprites and the play field
//!
//! Screen coordinates: origin at the top-left, y grows downward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle (top-left corner + size)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// Rectangle of the given size centred on `center`
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self {
            pos: center - size / 2.0,
            size,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    pub fn set_center(&mut self, center: Vec2) {
        self.pos = center - self.size / 2.0;
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.pos += delta;
    }

    /// Exact overlap test. Rectangles that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

/// Per-axis containment of `rect` inside `field`: `(horizontal, vertical)`.
///
/// An axis is in bounds iff the rect's near edge is >= the field's near edge
/// and its far edge is <= the field's far edge.
pub fn in_bounds(rect: &Rect, field: &Rect) -> (bool, bool) {
    let horizontal = rect.left() >= field.left() && rect.right() <= field.right();
    let vertical = rect.top() >= field.top() && rect.bottom() <= field.bottom();
    (horizontal, vertical)
}

/// Both axes in bounds
#[inline]
pub fn fully_in_bounds(rect: &Rect, field: &Rect) -> bool {
    in_bounds(rect, field) == (true, true)
}

/// Unit vector from the centre of `origin` toward the centre of `target`.
///
/// Returns `None` when the centres coincide and no direction exists.
pub fn direction(origin: &Rect, target: &Rect) -> Option<Vec2> {
    let diff = target.center() - origin.center();
    let norm = diff.length();
    if norm == 0.0 || !norm.is_finite() {
        return None;
    }
    Some(diff / norm)
}

/// Bounding-box size of a `size` sprite rotated by `degrees`
pub fn rotated_bounds(size: Vec2, degrees: f32) -> Vec2 {
    let rad = degrees.to_radians();
    let (sin, cos) = (rad.sin().abs(), rad.cos().abs());
    Vec2::new(size.x * cos + size.y * sin, size.x * sin + size.y * cos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn field() -> Rect {
        Rect::new(0.0, 0.0, 1000.0, 600.0)
    }

    #[test]
    fn test_in_bounds_edges_are_inclusive() {
        let r = Rect::new(0.0, 0.0, 1000.0, 600.0);
        assert_eq!(in_bounds(&r, &field()), (true, true));

        let left_out = Rect::new(-1.0, 10.0, 20.0, 20.0);
        assert_eq!(in_bounds(&left_out, &field()), (false, true));

        let bottom_out = Rect::new(10.0, 590.0, 20.0, 20.0);
        assert_eq!(in_bounds(&bottom_out, &field()), (true, false));
    }

    #[test]
    fn test_overlap_excludes_shared_edges() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&b));

        let c = Rect::new(9.5, 9.5, 10.0, 10.0);
        assert!(a.overlaps(&c));
        assert!(c.overlaps(&a));
    }

    #[test]
    fn test_direction_points_at_target() {
        let origin = Rect::from_center(Vec2::new(0.0, 0.0), Vec2::splat(10.0));
        let target = Rect::from_center(Vec2::new(30.0, 40.0), Vec2::splat(50.0));
        let dir = direction(&origin, &target).unwrap();
        assert!((dir - Vec2::new(0.6, 0.8)).length() < 1e-6);
    }

    #[test]
    fn test_direction_coincident_centers() {
        let a = Rect::from_center(Vec2::new(5.0, 5.0), Vec2::splat(10.0));
        let b = Rect::from_center(Vec2::new(5.0, 5.0), Vec2::splat(40.0));
        assert!(direction(&a, &b).is_none());
    }

    #[test]
    fn test_rotated_bounds() {
        let size = Vec2::new(40.0, 10.0);
        assert!((rotated_bounds(size, 0.0) - size).length() < 1e-4);
        assert!((rotated_bounds(size, 90.0) - Vec2::new(10.0, 40.0)).length() < 1e-4);
        assert!((rotated_bounds(size, 180.0) - size).length() < 1e-4);
    }

    proptest! {
        #[test]
        fn prop_direction_is_unit_length(
            ox in -2000.0f32..2000.0, oy in -2000.0f32..2000.0,
            tx in -2000.0f32..2000.0, ty in -2000.0f32..2000.0,
        ) {
            let origin = Rect::from_center(Vec2::new(ox, oy), Vec2::splat(20.0));
            let target = Rect::from_center(Vec2::new(tx, ty), Vec2::splat(20.0));
            if let Some(dir) = direction(&origin, &target) {
                prop_assert!((dir.length() - 1.0).abs() < 1e-4);
            } else {
                prop_assert_eq!(origin.center(), target.center());
            }
        }

        #[test]
        fn prop_contained_rect_is_in_bounds(
            x in 0.0f32..900.0, y in 0.0f32..500.0,
            w in 1.0f32..100.0, h in 1.0f32..100.0,
        ) {
            let r = Rect::new(x, y, w, h);
            prop_assert!(fully_in_bounds(&r, &field()));
        }
    }
}

//! Shared behavior for straight-line movers (beams, bombs)

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::{Rect, fully_in_bounds};

/// Constant-speed motion along a unit direction fixed at creation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Motion {
    /// Unit direction (screen space)
    pub dir: Vec2,
    /// Pixels per tick
    pub speed: f32,
}

impl Motion {
    pub fn new(dir: Vec2, speed: f32) -> Self {
        Self { dir, speed }
    }

    /// Displacement for one tick
    #[inline]
    pub fn delta(&self) -> Vec2 {
        self.dir * self.speed
    }
}

/// Anything that flies in a straight line and is removed once it leaves the field
pub trait Projectile {
    fn rect(&self) -> &Rect;
    fn rect_mut(&mut self) -> &mut Rect;
    fn motion(&self) -> &Motion;

    /// Move one tick. Returns `false` when the projectile must be removed.
    fn advance(&mut self, field: &Rect) -> bool {
        let delta = self.motion().delta();
        self.rect_mut().translate(delta);
        fully_in_bounds(self.rect(), field)
    }
}

/// Advance every projectile and drop the ones that left the field
pub fn advance_all<P: Projectile>(items: &mut Vec<P>, field: &Rect) {
    items.retain_mut(|p| p.advance(field));
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Dot {
        rect: Rect,
        motion: Motion,
    }

    impl Projectile for Dot {
        fn rect(&self) -> &Rect {
            &self.rect
        }
        fn rect_mut(&mut self) -> &mut Rect {
            &mut self.rect
        }
        fn motion(&self) -> &Motion {
            &self.motion
        }
    }

    #[test]
    fn test_advance_moves_and_removes_off_field() {
        let field = Rect::new(0.0, 0.0, 100.0, 100.0);
        let mut dots = vec![
            Dot {
                rect: Rect::new(50.0, 50.0, 4.0, 4.0),
                motion: Motion::new(Vec2::X, 10.0),
            },
            Dot {
                rect: Rect::new(90.0, 50.0, 4.0, 4.0),
                motion: Motion::new(Vec2::X, 10.0),
            },
        ];
        advance_all(&mut dots, &field);
        assert_eq!(dots.len(), 1);
        assert_eq!(dots[0].rect.pos, Vec2::new(60.0, 50.0));
    }
}

pub mod immediate;
mod render;
pub mod retained;

pub use glam as math;
pub use render::*;

use math::Vec2;

/// An axis-aligned rectangle in absolute screen coordinates.
#[derive(Copy, Clone, PartialEq, Default, Debug)]
pub struct Rect {
    pub position: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const ZERO: Rect = Rect {
        position: Vec2::ZERO,
        size: Vec2::ZERO,
    };

    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Rect {
            position: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }
    pub fn from_size(size: Vec2) -> Self {
        Rect {
            position: Vec2::ZERO,
            size,
        }
    }

    pub fn x(&self) -> f32 {
        self.position.x
    }
    pub fn y(&self) -> f32 {
        self.position.y
    }
    pub fn width(&self) -> f32 {
        self.size.x
    }
    pub fn height(&self) -> f32 {
        self.size.y
    }

    // Inclusive of the left and top edges, exclusive of the right and bottom.
    // Hover detection and hit-testing both go through here so the two
    // interaction models agree on containment.
    pub fn contains(&self, position: Vec2) -> bool {
        position.x >= self.position.x
            && position.x < self.position.x + self.size.x
            && position.y >= self.position.y
            && position.y < self.position.y + self.size.y
    }
}

/// The pointer as sampled once per frame: where it is, and whether the
/// primary button changed state since the previous sample.
#[derive(Clone, Copy, Default, Debug)]
pub struct PointerSample {
    pub position: Vec2,
    pub just_pressed: bool,
    pub just_released: bool,
}

impl PointerSample {
    pub fn at(x: f32, y: f32) -> Self {
        PointerSample {
            position: Vec2::new(x, y),
            just_pressed: false,
            just_released: false,
        }
    }
    pub fn pressed(x: f32, y: f32) -> Self {
        PointerSample {
            just_pressed: true,
            ..Self::at(x, y)
        }
    }
    pub fn released(x: f32, y: f32) -> Self {
        PointerSample {
            just_released: true,
            ..Self::at(x, y)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_contains_is_half_open() {
        let rect = Rect::new(10.0, 10.0, 80.0, 40.0);
        assert!(rect.contains(Vec2::new(10.0, 10.0)));
        assert!(rect.contains(Vec2::new(89.9, 49.9)));
        assert!(!rect.contains(Vec2::new(90.0, 30.0)));
        assert!(!rect.contains(Vec2::new(50.0, 50.0)));
        assert!(!rect.contains(Vec2::new(9.9, 30.0)));
    }

    #[test]
    fn zero_size_rect_contains_nothing() {
        let rect = Rect::new(10.0, 10.0, 0.0, 0.0);
        assert!(!rect.contains(Vec2::new(10.0, 10.0)));
    }
}

/// Tile-space 2D vector.
///
/// Positions are continuous (tile units, tile centers at k + 0.5).
/// Directions are restricted to the five canonical unit/null vectors;
/// the opposite-direction test is `a == -b`.

use std::ops::{Add, AddAssign, Mul, Neg, Sub};

#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const NULL: Vec2 = Vec2 { x: 0.0, y: 0.0 };
    pub const LEFT: Vec2 = Vec2 { x: -1.0, y: 0.0 };
    pub const RIGHT: Vec2 = Vec2 { x: 1.0, y: 0.0 };
    pub const UP: Vec2 = Vec2 { x: 0.0, y: -1.0 };
    pub const DOWN: Vec2 = Vec2 { x: 0.0, y: 1.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Vec2 { x, y }
    }

    /// The tile this point falls in: (col, row) = (floor(x), floor(y)).
    pub fn tile(self) -> (i32, i32) {
        (self.x.floor() as i32, self.y.floor() as i32)
    }

    /// Squared Euclidean distance between tile coordinates.
    pub fn tile_dist_sq(a: (i32, i32), b: (i32, i32)) -> i64 {
        let dx = (a.0 - b.0) as i64;
        let dy = (a.1 - b.1) as i64;
        dx * dx + dy * dy
    }

    pub fn is_direction(self) -> bool {
        self == Vec2::NULL
            || self == Vec2::LEFT
            || self == Vec2::RIGHT
            || self == Vec2::UP
            || self == Vec2::DOWN
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    fn mul(self, s: f32) -> Vec2 {
        Vec2::new(self.x * s, self.y * s)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;
    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_is_negation() {
        assert_eq!(-Vec2::LEFT, Vec2::RIGHT);
        assert_eq!(-Vec2::UP, Vec2::DOWN);
        assert_eq!(-Vec2::NULL, Vec2::NULL);
    }

    #[test]
    fn tile_floors_coordinates() {
        assert_eq!(Vec2::new(13.9, 23.1).tile(), (13, 23));
        assert_eq!(Vec2::new(0.0, 0.5).tile(), (0, 0));
        assert_eq!(Vec2::new(-0.3, 14.5).tile(), (-1, 14));
    }

    #[test]
    fn canonical_directions_only() {
        assert!(Vec2::LEFT.is_direction());
        assert!(Vec2::NULL.is_direction());
        assert!(!Vec2::new(1.0, 1.0).is_direction());
    }
}

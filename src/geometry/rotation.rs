//! 2x2 rotation matrices

use super::Point;

/// Matrix components smaller than this are treated as exact zeros
const SNAP: f64 = 1e-12;

/// Counter-clockwise rotation `[[cos, -sin], [sin, cos]]` (clockwise on screen,
/// where y grows downwards)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation {
    degrees: f64,
    cos: f64,
    sin: f64,
}

impl Rotation {
    pub const IDENTITY: Self = Self {
        degrees: 0.0,
        cos: 1.0,
        sin: 0.0,
    };

    /// Build from an angle in degrees.
    ///
    /// Components that are zero up to rounding (cos 90°, sin 180°, ...) are snapped to
    /// zero so axis-aligned lattices stay on integer coordinates.
    pub fn from_degrees(degrees: f64) -> Self {
        let radians = degrees.to_radians();
        let snap = |v: f64| if v.abs() < SNAP { 0.0 } else { v };
        Self {
            degrees,
            cos: snap(radians.cos()),
            sin: snap(radians.sin()),
        }
    }

    #[inline]
    pub fn degrees(&self) -> f64 {
        self.degrees
    }

    #[inline]
    pub fn cos(&self) -> f64 {
        self.cos
    }

    #[inline]
    pub fn sin(&self) -> f64 {
        self.sin
    }

    /// Rotation by the opposite angle
    pub fn inverse(&self) -> Self {
        Self {
            degrees: -self.degrees,
            cos: self.cos,
            sin: -self.sin,
        }
    }

    #[inline]
    pub fn apply(&self, p: Point) -> Point {
        Point::new(
            self.cos * p.x - self.sin * p.y,
            self.sin * p.x + self.cos * p.y,
        )
    }
}

impl Default for Rotation {
    fn default() -> Self {
        Self::IDENTITY
    }
}

//! Straight lines in slope/intercept form
//!
//! Kernel edges and image diagonals are all represented as `y = slope * x + intercept`.
//! Vertical lines have no such form, so the x-difference is nudged by
//! [`VERTICAL_EPSILON`] and a vertical edge becomes a very steep one. This trades a
//! negligible error for a branch-free hot loop in the scanner.

use super::Point;

/// Added to the x-difference when computing a slope
pub const VERTICAL_EPSILON: f64 = 1e-8;

/// Default tolerance on the slope difference for [`Line::is_parallel`]
pub const PARALLEL_PRECISION: f64 = 1e-5;

/// Intersections this far away are as good as none
pub const FAR_AWAY: f64 = 1e10;

/// 2D straight line `y = slope * x + intercept`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub slope: f64,
    pub intercept: f64,
}

impl Line {
    #[inline]
    pub const fn new(slope: f64, intercept: f64) -> Self {
        Self { slope, intercept }
    }

    /// Line through two distinct points. The line passes exactly through `a`.
    pub fn through(a: Point, b: Point) -> Self {
        let slope = (a.y - b.y) / (a.x - b.x + VERTICAL_EPSILON);
        Self {
            slope,
            intercept: a.y - slope * a.x,
        }
    }

    /// Evaluate y at x
    #[inline]
    pub fn at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    pub fn is_parallel(&self, other: &Line) -> bool {
        self.is_parallel_within(other, PARALLEL_PRECISION)
    }

    pub fn is_parallel_within(&self, other: &Line, precision: f64) -> bool {
        (self.slope - other.slope).abs() < precision
    }

    /// Unique crossing point, `None` for parallel (or identical) lines
    pub fn intersection(&self, other: &Line) -> Option<Point> {
        if self.is_parallel(other) {
            return None;
        }
        let x = (other.intercept - self.intercept) / (self.slope - other.slope);
        Some(Point::new(x, self.at(x)))
    }

    /// The same line moved by `(dx, dy)`. The slope is carried over bit for bit.
    #[inline]
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self {
            slope: self.slope,
            intercept: self.intercept + dy - self.slope * dx,
        }
    }
}

/// Relative slack on strip bounds, see [`between`]
const STRIP_SLACK: f64 = 1e-9;

/// Whether `(x, y)` lies in the strip between two parallel lines, edges included.
///
/// Both bounds use `a`'s slope; `b` only contributes its intercept. The bounds are
/// widened by a slack relative to the magnitudes involved, so that a point lying
/// exactly on a steep edge is not lost to rounding in `slope * x + intercept`.
#[inline]
pub fn between(a: &Line, b: &Line, x: f64, y: f64) -> bool {
    let (low, high) = if a.intercept <= b.intercept {
        (a.intercept, b.intercept)
    } else {
        (b.intercept, a.intercept)
    };
    let base = a.slope * x;
    let slack = STRIP_SLACK * (base.abs() + low.abs().max(high.abs())).max(1.0);
    base + low - slack <= y && y <= base + high + slack
}

impl std::fmt::Display for Line {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "y = {:.2}x + {:.2}", self.slope, self.intercept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_through_and_at() {
        let line = Line::through(Point::new(0.0, 1.0), Point::new(2.0, 5.0));
        assert!((line.slope - 2.0).abs() < 1e-6);
        assert!((line.at(0.0) - 1.0).abs() < 1e-6);
        assert!((line.at(2.0) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_vertical_line_is_steep_not_nan() {
        let line = Line::through(Point::new(3.0, 0.0), Point::new(3.0, 10.0));
        assert!(line.slope.is_finite());
        assert!(line.slope.abs() > 1e8);
        // still passes through its first point
        assert!((line.at(3.0) - 0.0).abs() < 1e-3);
    }

    #[test]
    fn test_intersection() {
        let a = Line::through(Point::new(0.0, 0.0), Point::new(10.0, 10.0));
        let b = Line::through(Point::new(10.0, 0.0), Point::new(0.0, 10.0));
        let p = a.intersection(&b).expect("diagonals cross");
        assert!((p.x - 5.0).abs() < 1e-6);
        assert!((p.y - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_self_intersection_is_none() {
        let a = Line::through(Point::new(1.0, 2.0), Point::new(4.0, -3.0));
        assert!(a.intersection(&a).is_none());
        let shifted = a.translated(0.0, 5.0);
        assert!(a.intersection(&shifted).is_none());
    }

    #[test]
    fn test_near_parallel_has_no_intersection() {
        let a = Line::new(0.5, 0.0);
        let b = Line::new(0.5 + 1e-6, 3.0);
        assert!(a.intersection(&b).is_none());
    }

    #[test]
    fn test_is_parallel_symmetric() {
        let mut rng = rand::rng();
        for _ in 0..500 {
            let a = Line::new(rng.random_range(-10.0..10.0), rng.random_range(-50.0..50.0));
            let delta = rng.random_range(-2e-5..2e-5);
            let b = Line::new(a.slope + delta, rng.random_range(-50.0..50.0));
            assert_eq!(a.is_parallel(&b), b.is_parallel(&a));
        }
    }

    #[test]
    fn test_translated_keeps_slope() {
        let a = Line::through(Point::new(0.0, 0.0), Point::new(1.0, 3.0));
        let t = a.translated(2.0, 1.0);
        assert_eq!(t.slope, a.slope);
        assert!((t.at(2.0) - 1.0).abs() < 1e-6);
        assert!((t.at(3.0) - 4.0).abs() < 1e-6);
    }

    #[test]
    fn test_between_includes_edges() {
        let low = Line::new(0.0, 0.0);
        let high = Line::new(0.0, 10.0);
        assert!(between(&low, &high, 3.0, 0.0));
        assert!(between(&low, &high, 3.0, 10.0));
        assert!(between(&high, &low, 3.0, 5.0));
        assert!(!between(&low, &high, 3.0, 10.5));
        assert!(!between(&low, &high, 3.0, -0.5));
    }
}

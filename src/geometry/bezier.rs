//! Bezier curves of arbitrary degree, evaluated in Bernstein form

use super::Point;

/// Row `n` of Pascal's triangle (the binomial coefficients `C(n, i)`)
pub fn pascal_row(n: usize) -> Vec<f64> {
    let mut row = Vec::with_capacity(n + 1);
    let mut value = 1.0;
    row.push(value);
    for i in 1..=n {
        value = value * (n + 1 - i) as f64 / i as f64;
        row.push(value);
    }
    row
}

/// Point at parameter `t` on the curve with the given control points
pub fn point_at(control: &[Point], t: f64) -> Point {
    let Some(degree) = control.len().checked_sub(1) else {
        return Point::ORIGIN;
    };
    let coefficients = pascal_row(degree);
    let u = 1.0 - t;

    control
        .iter()
        .zip(coefficients)
        .enumerate()
        .fold(Point::ORIGIN, |acc, (i, (p, c))| {
            let weight = c * t.powi(i as i32) * u.powi((degree - i) as i32);
            acc + *p * weight
        })
}

/// Polygon whose outline is a chain of Bezier curves, each sampled at a fixed set of
/// parameters in `[0, 1]`
#[derive(Debug, Clone)]
pub struct BezierPolygon {
    ts: Vec<f64>,
    points: Vec<Point>,
}

impl BezierPolygon {
    /// `samples + 1` evenly spaced parameters per curve; zero is treated as one
    pub fn new(samples: usize) -> Self {
        let samples = samples.max(1);
        Self {
            ts: (0..=samples).map(|i| i as f64 / samples as f64).collect(),
            points: Vec::new(),
        }
    }

    /// Append the samples of the curve with these control points
    pub fn extend(&mut self, control: &[Point]) {
        if control.is_empty() {
            return;
        }
        self.points
            .extend(self.ts.iter().map(|&t| point_at(control, t)));
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Point> {
        self.points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pascal_rows() {
        assert_eq!(pascal_row(0), vec![1.0]);
        assert_eq!(pascal_row(3), vec![1.0, 3.0, 3.0, 1.0]);
        assert_eq!(pascal_row(4), vec![1.0, 4.0, 6.0, 4.0, 1.0]);
    }

    #[test]
    fn test_linear_curve_endpoints() {
        let control = [Point::new(0.0, 20.0), Point::new(50.0, 25.0)];
        assert_eq!(point_at(&control, 0.0), control[0]);
        assert_eq!(point_at(&control, 1.0), control[1]);
        let mid = point_at(&control, 0.5);
        assert!((mid.x - 25.0).abs() < 1e-9);
        assert!((mid.y - 22.5).abs() < 1e-9);
    }

    #[test]
    fn test_quadratic_midpoint() {
        let control = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 2.0),
            Point::new(2.0, 0.0),
        ];
        let mid = point_at(&control, 0.5);
        assert!((mid.x - 1.0).abs() < 1e-9);
        assert!((mid.y - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_polygon_extend_samples() {
        let mut polygon = BezierPolygon::new(4);
        polygon.extend(&[Point::new(0.0, 0.0), Point::new(4.0, 0.0)]);
        polygon.extend(&[]);
        let xs: Vec<f64> = polygon.points().iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
    }
}

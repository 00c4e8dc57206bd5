//! Fillable shapes

use super::Color;
use crate::geometry::{Point, Rect};

/// Shape trait for drawable primitives
pub trait Shape {
    /// Draw the shape onto a row-major pixel buffer
    fn rasterize(&self, width: u32, height: u32, pixels: &mut [Color]);

    /// Bounding box of the shape
    fn bounds(&self) -> Rect;
}

/// Closed polygon filled with the even-odd rule.
///
/// A pixel is painted when its center lies inside the outline. Coverage is binary;
/// edges are not anti-aliased.
#[derive(Debug, Clone)]
pub struct Polygon {
    pub points: Vec<Point>,
    pub color: Color,
}

impl Polygon {
    pub fn new(points: Vec<Point>, color: Color) -> Self {
        Self { points, color }
    }

    /// X coordinates where the horizontal line at `y` crosses the outline, sorted
    fn crossings(&self, y: f64) -> Vec<f64> {
        let n = self.points.len();
        let mut xs = Vec::new();
        for i in 0..n {
            let a = self.points[i];
            let b = self.points[(i + 1) % n];
            // half-open rule so shared vertices are counted once
            if (a.y <= y) != (b.y <= y) {
                xs.push(a.x + (y - a.y) * (b.x - a.x) / (b.y - a.y));
            }
        }
        xs.sort_by(f64::total_cmp);
        xs
    }
}

impl Shape for Polygon {
    fn rasterize(&self, width: u32, height: u32, pixels: &mut [Color]) {
        if self.points.len() < 3 || width == 0 || height == 0 {
            return;
        }

        let bounds = self.bounds();
        let min_y = (bounds.top().floor().max(0.0)) as u32;
        let max_y = bounds.bottom().ceil().min(f64::from(height)) as u32;

        for py in min_y..max_y {
            let xs = self.crossings(f64::from(py) + 0.5);
            for span in xs.chunks_exact(2) {
                // pixels whose centers fall in [span[0], span[1])
                let start = (span[0] - 0.5).ceil().max(0.0);
                let end = (span[1] - 0.5).ceil().min(f64::from(width));
                if end <= start {
                    continue;
                }
                let row = py as usize * width as usize;
                let (start, end) = (start as usize, end as usize);
                if let Some(slice) = pixels.get_mut(row + start..row + end) {
                    slice.fill(self.color);
                }
            }
        }
    }

    fn bounds(&self) -> Rect {
        Rect::enclosing(&self.points)
    }
}

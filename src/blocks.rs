//! Axis-aligned block rendering
//!
//! The image is cut into `k × k` cells without rotation. Each cell becomes a bar of
//! height `intensity * side` centred in its own `side × side` square of the output.

use image::GrayImage;
use rayon::prelude::*;
use tracing::debug;

use crate::assembly::Composition;
use crate::canvas::{Color, Polygon};
use crate::errors::{HalftoneError, Result};
use crate::geometry::{BezierPolygon, Point};

/// `1 - mean / 255` over the `k × k` cell at grid position `(col, row)`
pub fn cell_intensity(image: &GrayImage, kernel: u32, col: u32, row: u32) -> f64 {
    let (x0, y0) = (col * kernel, row * kernel);
    let mut sum = 0u64;
    for y in y0..y0 + kernel {
        for x in x0..x0 + kernel {
            sum += u64::from(image.get_pixel(x, y).0[0]);
        }
    }
    let count = u64::from(kernel) * u64::from(kernel);
    1.0 - (sum as f64 / count as f64) / 255.0
}

/// Outline of a bar spanning `[x0, x1] × [y0, y1]`, every side sampled as a straight
/// Bezier segment
fn bar(x0: f64, y0: f64, x1: f64, y1: f64, smoothness: usize) -> Vec<Point> {
    let mut polygon = BezierPolygon::new(smoothness);
    polygon.extend(&[Point::new(x0, y1), Point::new(x0, y0)]);
    polygon.extend(&[Point::new(x0, y0), Point::new(x1, y0)]);
    polygon.extend(&[Point::new(x1, y0), Point::new(x1, y1)]);
    polygon.extend(&[Point::new(x1, y1), Point::new(x0, y1)]);
    polygon.into_points()
}

/// Lay out one bar per whole cell. Partial cells at the right and bottom edges are
/// dropped.
pub fn compose_blocks(
    image: &GrayImage,
    kernel: u32,
    side: u32,
    smoothness: usize,
    foreground: Color,
) -> Result<Composition> {
    if kernel == 0 {
        return Err(HalftoneError::invalid("kernel", "must be a positive integer"));
    }
    let cols = image.width() / kernel;
    let rows = image.height() / kernel;
    let side_f = f64::from(side);

    let shapes: Vec<Polygon> = (0..rows)
        .into_par_iter()
        .flat_map_iter(|row| {
            (0..cols).filter_map(move |col| {
                let thickness = cell_intensity(image, kernel, col, row) * side_f;
                if thickness <= 0.0 {
                    return None;
                }
                let x0 = f64::from(col) * side_f;
                let y0 = f64::from(row) * side_f + (side_f - thickness) / 2.0;
                let points = bar(x0, y0, x0 + side_f, y0 + thickness, smoothness);
                Some(Polygon::new(points, foreground))
            })
        })
        .collect();

    debug!(cols, rows, bars = shapes.len(), "blocks laid out");
    Ok(Composition {
        width: cols * side,
        height: rows * side,
        shapes,
        offset: Point::ORIGIN,
    })
}

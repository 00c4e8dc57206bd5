//! Tilted square sampling windows

use crate::errors::{HalftoneError, Result};
use crate::geometry::{between, Line, Point, PARALLEL_PRECISION};

/// Integer pixel window `[min_x, max_x) × [min_y, max_y)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelBox {
    pub min_x: i64,
    pub min_y: i64,
    pub max_x: i64,
    pub max_y: i64,
}

impl PixelBox {
    /// Restrict to the pixels of a `width × height` image. May come out empty.
    pub fn clip(&self, width: u32, height: u32) -> PixelBox {
        PixelBox {
            min_x: self.min_x.max(0),
            min_y: self.min_y.max(0),
            max_x: self.max_x.min(i64::from(width)),
            max_y: self.max_y.min(i64::from(height)),
        }
    }

    pub fn width(&self) -> usize {
        (self.max_x - self.min_x).max(0) as usize
    }

    pub fn height(&self) -> usize {
        (self.max_y - self.min_y).max(0) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }
}

/// Tilted square given by four ordered vertices.
///
/// Vertex `v0` is the lattice anchor, `v1` follows the column direction, `v3` the row
/// direction and `v2` is opposite `v0`. Edges are stored as two parallel pairs:
/// `v0→v1` with `v3→v2`, and `v1→v2` with `v0→v3`.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    vertices: [Point; 4],
    edges: [Line; 4],
}

/// Whether two side vectors point along the same line.
///
/// The sine of the angle between them must stay below [`PARALLEL_PRECISION`]. Slopes
/// are not compared: a side a hair off vertical has a slope in the millions, and
/// rounding in the vertices moves it by more than the precision.
fn parallel_sides(a: Point, b: Point) -> bool {
    let cross = a.x * b.y - a.y * b.x;
    cross.abs() <= PARALLEL_PRECISION * a.distance(&Point::ORIGIN) * b.distance(&Point::ORIGIN)
}

impl Kernel {
    /// Build a kernel, rejecting vertex orders whose opposite sides are not parallel.
    ///
    /// The second line of each pair is the first one moved onto its vertex, so both
    /// bounds of a strip share one slope.
    pub fn new(vertices: [Point; 4]) -> Result<Self> {
        let [v0, v1, v2, v3] = vertices;

        if !parallel_sides(v1 - v0, v2 - v3) {
            return Err(HalftoneError::SkewedKernel {
                pair: "v0-v1/v3-v2",
                first: Line::through(v0, v1).slope,
                second: Line::through(v3, v2).slope,
            });
        }
        if !parallel_sides(v2 - v1, v3 - v0) {
            return Err(HalftoneError::SkewedKernel {
                pair: "v1-v2/v0-v3",
                first: Line::through(v1, v2).slope,
                second: Line::through(v0, v3).slope,
            });
        }

        let column_side = Line::through(v0, v1);
        let row_side = Line::through(v0, v3);
        let to_v3 = v3 - v0;
        let to_v1 = v1 - v0;
        let edges = [
            column_side,
            column_side.translated(to_v3.x, to_v3.y),
            row_side.translated(to_v1.x, to_v1.y),
            row_side,
        ];

        Ok(Self { vertices, edges })
    }

    /// The same kernel moved by `offset`.
    ///
    /// Edge lines are translated rather than rebuilt from the moved vertices, so their
    /// slopes stay exactly those checked in [`Kernel::new`].
    pub fn translated(&self, offset: Point) -> Kernel {
        Kernel {
            vertices: self.vertices.map(|v| v + offset),
            edges: self.edges.map(|e| e.translated(offset.x, offset.y)),
        }
    }

    /// Lattice anchor vertex
    pub fn anchor(&self) -> Point {
        self.vertices[0]
    }

    /// Edge from the anchor along the row direction. Every kernel in a lattice row
    /// shares this line.
    pub fn trailing_edge(&self) -> &Line {
        &self.edges[3]
    }

    /// `[floor(min), ceil(max))` on both axes over the four vertices
    pub fn bbox(&self) -> PixelBox {
        let xs = self.vertices.map(|v| v.x);
        let ys = self.vertices.map(|v| v.y);
        let fold_min = |vals: [f64; 4]| vals.into_iter().fold(f64::INFINITY, f64::min);
        let fold_max = |vals: [f64; 4]| vals.into_iter().fold(f64::NEG_INFINITY, f64::max);
        PixelBox {
            min_x: fold_min(xs).floor() as i64,
            min_y: fold_min(ys).floor() as i64,
            max_x: fold_max(xs).ceil() as i64,
            max_y: fold_max(ys).ceil() as i64,
        }
    }

    /// Point membership, edges included
    #[inline]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        between(&self.edges[0], &self.edges[1], x, y)
            && between(&self.edges[2], &self.edges[3], x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rotation;

    fn square(origin: Point, side: f64) -> [Point; 4] {
        [
            origin,
            origin + Point::new(0.0, side),
            origin + Point::new(side, side),
            origin + Point::new(side, 0.0),
        ]
    }

    #[test]
    fn test_axis_aligned_kernel() {
        let kernel = Kernel::new(square(Point::new(20.0, 20.0), 10.0)).expect("valid square");
        assert!(kernel.contains(25.0, 25.0));
        assert!(kernel.contains(20.0, 20.0));
        assert!(kernel.contains(20.0, 29.0));
        assert!(!kernel.contains(19.0, 25.0));
        assert!(!kernel.contains(25.0, 31.0));
        assert_eq!(
            kernel.bbox(),
            PixelBox {
                min_x: 20,
                min_y: 20,
                max_x: 30,
                max_y: 30
            }
        );
    }

    #[test]
    fn test_rotated_kernel_contains_center() {
        let r = Rotation::from_degrees(30.0);
        let vertices = square(Point::ORIGIN, 10.0).map(|v| r.apply(v));
        let kernel = Kernel::new(vertices)
            .expect("rotated square is valid")
            .translated(Point::new(50.0, 50.0));
        let center = r.apply(Point::new(5.0, 5.0)) + Point::new(50.0, 50.0);
        assert!(kernel.contains(center.x, center.y));
        assert!(!kernel.contains(50.0 - 1.0, 50.0 - 1.0));
    }

    #[test]
    fn test_skewed_vertex_order_is_rejected() {
        let [v0, v1, v2, v3] = square(Point::ORIGIN, 10.0);
        let err = Kernel::new([v0, v2, v1, v3]).expect_err("crossed vertices");
        assert!(matches!(err, HalftoneError::SkewedKernel { .. }));

        let kite = [v0, v1, Point::new(14.0, 12.0), v3];
        assert!(Kernel::new(kite).is_err());
    }

    #[test]
    fn test_steep_sides_are_accepted() {
        for degrees in [1e-5, 1e-7, 89.99999, 90.00001, 179.99999, 270.00001] {
            let r = Rotation::from_degrees(degrees);
            let kernel = Kernel::new(square(Point::ORIGIN, 10.0).map(|v| r.apply(v)))
                .unwrap_or_else(|e| panic!("{degrees}°: {e}"));
            let center = r.apply(Point::new(5.0, 5.0));
            assert!(kernel.contains(center.x, center.y), "{degrees}°");
            let outside = r.apply(Point::new(15.0, 5.0));
            assert!(!kernel.contains(outside.x, outside.y), "{degrees}°");
        }
    }

    #[test]
    fn test_translation_keeps_membership() {
        let template = Kernel::new(square(Point::ORIGIN, 4.0)).expect("valid square");
        let moved = template.translated(Point::new(100.0, -7.0));
        assert!(moved.contains(102.0, -5.0));
        assert!(!moved.contains(2.0, 2.0));
        assert_eq!(moved.anchor(), Point::new(100.0, -7.0));
        assert!((moved.trailing_edge().at(150.0) + 7.0).abs() < 1e-6);
    }

    #[test]
    fn test_bbox_clip() {
        let b = PixelBox {
            min_x: -5,
            min_y: 8,
            max_x: 5,
            max_y: 20,
        };
        let clipped = b.clip(4, 10);
        assert_eq!((clipped.width(), clipped.height()), (4, 2));
        assert!(b.clip(4, 8).is_empty());
    }
}

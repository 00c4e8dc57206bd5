//! Quadrant-wise walk over a rotated lattice of kernels
//!
//! The lattice is anchored at the image center and split into four quadrants by the
//! sign of the column and row directions. Each quadrant walks rows outwards and, inside
//! a row, columns outwards:
//!
//! ```text
//!          (-1,-1) │ (1,-1)
//!        ◄── cols  │  cols ──►
//!       ───────────┼───────────   rows grow away from this axis
//!          (-1, 1) │ (1, 1)
//! ```
//!
//! A row ends at the first kernel that selects nothing and cannot reach the image any
//! more; a quadrant ends at the first row that ends on its very first kernel.

use image::GrayImage;
use rayon::prelude::*;
use tracing::{debug, info};

use super::kernel::Kernel;
use super::rows::{CanvasRows, Sample};
use super::selection::SelectionMask;
use crate::errors::{HalftoneError, Result};
use crate::geometry::{Line, Point, Rotation, FAR_AWAY};

/// Direction signs of one lattice quadrant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Quadrant {
    pub h_sign: i8,
    pub v_sign: i8,
}

impl Quadrant {
    /// Scan order
    pub const ALL: [Quadrant; 4] = [
        Quadrant::new(1, -1),
        Quadrant::new(-1, -1),
        Quadrant::new(-1, 1),
        Quadrant::new(1, 1),
    ];

    pub const fn new(h_sign: i8, v_sign: i8) -> Self {
        Self { h_sign, v_sign }
    }

    /// Unrotated square at the origin, opening towards this quadrant
    pub fn template(&self, kernel_size: f64) -> [Point; 4] {
        let h = f64::from(self.h_sign) * kernel_size;
        let v = f64::from(self.v_sign) * kernel_size;
        [
            Point::ORIGIN,
            Point::new(0.0, v),
            Point::new(h, v),
            Point::new(h, 0.0),
        ]
    }

    /// Signed lattice column of the `col`-th kernel of a row
    pub fn column_key(&self, col: usize) -> i64 {
        signed_index(self.h_sign, col)
    }

    /// Signed lattice row of the `row`-th row
    pub fn row_key(&self, row: usize) -> i64 {
        signed_index(self.v_sign, row)
    }
}

impl std::fmt::Display for Quadrant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.h_sign, self.v_sign)
    }
}

/// `i` going forwards, `-(i + 1)` going backwards, so cells on either side of the axis
/// get distinct keys
fn signed_index(sign: i8, i: usize) -> i64 {
    if sign >= 0 {
        i as i64
    } else {
        -(i as i64) - 1
    }
}

/// How a row's column loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowScan {
    /// Column index at which the loop stopped; 0 means the row never reached the image
    pub stopped_at: usize,
    /// Kernels that selected at least one pixel
    pub recorded: usize,
}

/// Rotated lattice scanner over a grayscale image
#[derive(Debug)]
pub struct Scanner<'a> {
    image: &'a GrayImage,
    kernel_size: u32,
    rotation: Rotation,
    center: Point,
    /// `(0,0)→(w,h)` and `(w,0)→(0,h)`
    diagonals: [Line; 2],
    /// Upper bound on rows per quadrant and columns per row
    step_limit: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(image: &'a GrayImage, kernel_size: u32, rotation: Rotation) -> Result<Self> {
        if kernel_size == 0 {
            return Err(HalftoneError::invalid("kernel", "must be a positive integer"));
        }
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(HalftoneError::invalid("image", "has no pixels"));
        }

        let (w, h) = (f64::from(width), f64::from(height));
        // no kernel further than the image diagonal from the center can touch a pixel
        let step_limit = (w.hypot(h) / f64::from(kernel_size)).ceil() as usize + 2;

        Ok(Self {
            image,
            kernel_size,
            rotation,
            center: Point::new(f64::from(width / 2), f64::from(height / 2)),
            diagonals: [
                Line::through(Point::ORIGIN, Point::new(w, h)),
                Line::through(Point::new(w, 0.0), Point::new(0.0, h)),
            ],
            step_limit,
        })
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn step_limit(&self) -> usize {
        self.step_limit
    }

    /// Scan all four quadrants in parallel and merge their rows
    pub fn scan(&self) -> Result<CanvasRows> {
        let rows = Quadrant::ALL
            .par_iter()
            .map(|&quadrant| self.scan_quadrant(quadrant))
            .try_reduce(CanvasRows::new, |acc, rows| Ok(acc.merge(rows)))?;
        debug!(
            angle = self.rotation.degrees(),
            rows = rows.len(),
            samples = rows.sample_count(),
            "lattice scan complete"
        );
        Ok(rows)
    }

    /// Rotated template kernel of a quadrant, anchored at the origin
    pub fn template(&self, quadrant: Quadrant) -> Result<Kernel> {
        let vertices = quadrant
            .template(f64::from(self.kernel_size))
            .map(|v| self.rotation.apply(v));
        Kernel::new(vertices)
    }

    pub fn scan_quadrant(&self, quadrant: Quadrant) -> Result<CanvasRows> {
        info!("quadrant{quadrant}");
        let template = self.template(quadrant)?;
        let k = f64::from(self.kernel_size);
        let move_h = self.rotation.apply(Point::new(k, 0.0)) * f64::from(quadrant.h_sign);
        let move_v = self.rotation.apply(Point::new(0.0, k)) * f64::from(quadrant.v_sign);

        let mut rows = CanvasRows::new();
        for row in 0..self.step_limit {
            let origin = self.center + move_v * row as f64;
            let scan = self.scan_row(&template, quadrant, row, origin, move_h, &mut rows);
            debug!(
                quadrant = %quadrant,
                row,
                stopped_at = scan.stopped_at,
                recorded = scan.recorded,
                "row scanned"
            );
            if scan.stopped_at == 0 {
                break;
            }
        }
        Ok(rows)
    }

    /// Walk one lattice row outwards from `origin`, recording every kernel that
    /// selects pixels
    fn scan_row(
        &self,
        template: &Kernel,
        quadrant: Quadrant,
        row: usize,
        origin: Point,
        move_h: Point,
        rows: &mut CanvasRows,
    ) -> RowScan {
        let mut recorded = 0;
        let mut col = 0;
        while col < self.step_limit {
            let kernel = template.translated(origin + move_h * col as f64);
            let mask = self.select(&kernel);
            if let Some(intensity) = mask.intensity(self.image) {
                rows.record(
                    quadrant.row_key(row),
                    Sample {
                        column: quadrant.column_key(col),
                        intensity,
                        pixels: mask.count(),
                    },
                );
                recorded += 1;
            } else if !self.reaches_image(&kernel, move_h) {
                break;
            }
            col += 1;
        }
        RowScan {
            stopped_at: col,
            recorded,
        }
    }

    /// Pixels under a kernel
    pub fn select(&self, kernel: &Kernel) -> SelectionMask {
        let (width, height) = self.image.dimensions();
        SelectionMask::select(kernel, width, height)
    }

    /// Whether a kernel that selected nothing may still be followed by kernels that do.
    ///
    /// The row's line meets the image diagonal nearest to the kernel; the row is worth
    /// continuing when that point is inside the image and still ahead, i.e. on the side
    /// of the anchor that `step` points to.
    pub fn reaches_image(&self, kernel: &Kernel, step: Point) -> bool {
        let anchor = kernel.anchor();
        let edge = kernel.trailing_edge();
        let candidates = self.diagonals.map(|d| d.intersection(edge));
        match nearest_intersection(anchor, candidates) {
            Some(p) => {
                let ahead = p - anchor;
                !self.out_of_bounds(p) && ahead.x * step.x + ahead.y * step.y > 0.0
            }
            None => false,
        }
    }

    /// Outside the continuous image extent `[0, width] × [0, height]`
    pub fn out_of_bounds(&self, p: Point) -> bool {
        let (width, height) = self.image.dimensions();
        p.x < 0.0 || p.x > f64::from(width) || p.y < 0.0 || p.y > f64::from(height)
    }
}

/// Closer of two candidate points to `anchor`. Missing candidates count as
/// [`FAR_AWAY`]; ties go to the second. Far-away winners are discarded.
pub fn nearest_intersection(anchor: Point, candidates: [Option<Point>; 2]) -> Option<Point> {
    let distance = |p: &Option<Point>| p.map_or(FAR_AWAY, |p| anchor.distance(&p));
    let [first, second] = candidates;
    let winner = if distance(&first) < distance(&second) {
        first
    } else {
        second
    };
    winner.filter(|p| anchor.distance(p) < FAR_AWAY)
}

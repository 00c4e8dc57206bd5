//! Ribbon outlines with logistic width transitions

use tracing::trace;

use crate::canvas::{Canvas, Color, Polygon};
use crate::errors::{HalftoneError, Result};
use crate::geometry::{Point, Rect, Rotation};

/// Points of the logistic transition from `from` to `to`, one per parameter in `ts`.
///
/// `x` is interpolated linearly across the segment while `y` follows
/// `1 / (1 + exp(-t * steepness))`. A segment with no horizontal extent collapses to
/// its start point.
pub fn logistic_segment(from: Point, to: Point, ts: &[f64], steepness: f64) -> Vec<Point> {
    let dx = to.x - from.x;
    if dx == 0.0 {
        return vec![from];
    }
    let dy = to.y - from.y;
    ts.iter()
        .map(|&t| {
            Point::new(
                from.x + (t + 1.0) / 2.0 * dx,
                from.y + dy / (1.0 + (-t * steepness).exp()),
            )
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
enum Stage {
    Accumulating { top: Vec<Point>, bottom: Vec<Point> },
    Finalized(Vec<Point>),
}

/// Outline of one output row.
///
/// Samples go in left to right through [`SigmoidPolygon::height`]; the builder does not
/// sort them. [`SigmoidPolygon::finalize`] turns the two envelopes into a closed
/// outline, after which the ribbon can be rotated, translated and drawn.
#[derive(Debug, Clone)]
pub struct SigmoidPolygon {
    /// Top of the row band
    y: f64,
    /// Row thickness, also the width of one sample
    side: f64,
    /// Padding added above and below every sample
    alpha: f64,
    steepness: f64,
    ts: Vec<f64>,
    stage: Stage,
}

impl SigmoidPolygon {
    /// `smoothness` is the number of points per transition and must be at least 2
    pub fn new(y: f64, side: f64, alpha: f64, smoothness: usize, steepness: f64) -> Result<Self> {
        if smoothness < 2 {
            return Err(HalftoneError::invalid(
                "smoothness",
                format!("must be at least 2, got {smoothness}"),
            ));
        }
        if !(side.is_finite() && side > 0.0) {
            return Err(HalftoneError::invalid("side", format!("must be positive, got {side}")));
        }
        if !alpha.is_finite() {
            return Err(HalftoneError::invalid("alpha", "must be finite"));
        }

        let half = (smoothness / 2) as i64;
        let ts = (-half..half).map(|i| i as f64 / half as f64).collect();

        Ok(Self {
            y,
            side,
            alpha,
            steepness,
            ts,
            stage: Stage::Accumulating {
                top: Vec::new(),
                bottom: Vec::new(),
            },
        })
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn is_finalized(&self) -> bool {
        matches!(self.stage, Stage::Finalized(_))
    }

    /// Samples added so far; zero once finalized
    pub fn samples(&self) -> usize {
        match &self.stage {
            Stage::Accumulating { top, .. } => top.len(),
            Stage::Finalized(_) => 0,
        }
    }

    /// Add a slice of thickness `height` centred in column `x`
    pub fn height(&mut self, x: f64, height: f64) -> Result<()> {
        let Stage::Accumulating { top, bottom } = &mut self.stage else {
            return Err(HalftoneError::RibbonFinalized);
        };
        if !(0.0..=self.side).contains(&height) {
            return Err(HalftoneError::HeightOutOfRange {
                height,
                side: self.side,
            });
        }

        let center = x * self.side + self.side / 2.0;
        let y_top = (self.side - height) / 2.0 + self.y;
        top.push(Point::new(center, y_top - self.alpha));
        bottom.push(Point::new(center, y_top + height + self.alpha));
        Ok(())
    }

    /// Build the closed outline and drop the envelopes. Calling it again is a no-op.
    ///
    /// The outline runs clockwise on screen: up the left cap, along the top envelope,
    /// down the right cap and back along the bottom envelope.
    pub fn finalize(&mut self) -> Result<()> {
        let Stage::Accumulating { top, bottom } = &self.stage else {
            return Ok(());
        };
        let (Some(&first_top), Some(&first_bottom)) = (top.first(), bottom.first()) else {
            return Err(HalftoneError::EmptyRibbon);
        };
        let (Some(&last_top), Some(&last_bottom)) = (top.last(), bottom.last()) else {
            return Err(HalftoneError::EmptyRibbon);
        };

        let half = self.side / 2.0;
        let transitions = top.len().saturating_sub(1) * self.ts.len();
        let mut outline = Vec::with_capacity(2 * transitions + 6);

        outline.push(Point::new(first_top.x - half, first_bottom.y));
        outline.push(Point::new(first_top.x - half, first_top.y));
        for pair in top.windows(2) {
            outline.extend(logistic_segment(pair[0], pair[1], &self.ts, self.steepness));
        }
        outline.push(last_top);

        outline.push(Point::new(last_top.x + half, last_top.y));
        outline.push(Point::new(last_bottom.x + half, last_bottom.y));
        outline.push(last_bottom);
        for pair in bottom.windows(2).rev() {
            let segment = logistic_segment(pair[0], pair[1], &self.ts, self.steepness);
            outline.extend(segment.into_iter().rev());
        }

        trace!(y = self.y, points = outline.len(), "ribbon finalized");
        self.stage = Stage::Finalized(outline);
        Ok(())
    }

    /// Finalized outline, `None` while still accumulating
    pub fn outline(&self) -> Option<&[Point]> {
        match &self.stage {
            Stage::Finalized(points) => Some(points),
            Stage::Accumulating { .. } => None,
        }
    }

    fn outline_mut(&mut self) -> Result<&mut Vec<Point>> {
        match &mut self.stage {
            Stage::Finalized(points) => Ok(points),
            Stage::Accumulating { .. } => Err(HalftoneError::RibbonNotFinalized),
        }
    }

    /// Rotate the outline about the origin
    pub fn rotate(&mut self, rotation: &Rotation) -> Result<()> {
        for p in self.outline_mut()? {
            *p = rotation.apply(*p);
        }
        Ok(())
    }

    pub fn translate(&mut self, tx: f64, ty: f64) -> Result<()> {
        let offset = Point::new(tx, ty);
        for p in self.outline_mut()? {
            *p = *p + offset;
        }
        Ok(())
    }

    /// Bounding rectangle of the outline
    pub fn bounds(&self) -> Result<Rect> {
        self.outline()
            .map(Rect::enclosing)
            .ok_or(HalftoneError::RibbonNotFinalized)
    }

    /// Fillable polygon of the outline
    pub fn to_polygon(&self, color: Color) -> Result<Polygon> {
        self.outline()
            .map(|points| Polygon::new(points.to_vec(), color))
            .ok_or(HalftoneError::RibbonNotFinalized)
    }

    /// Fill onto `canvas`, finalizing first if needed
    pub fn draw(&mut self, canvas: &mut Canvas, color: Color) -> Result<()> {
        self.finalize()?;
        canvas.draw(&self.to_polygon(color)?);
        Ok(())
    }
}

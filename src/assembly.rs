//! Placement of rotated ribbons on the output canvas
//!
//! Ribbons are built in the lattice frame, where row `r` spans `[r*side, (r+1)*side]`
//! and the image center sits at the origin. Assembly rotates them back into image
//! orientation and picks one translation for all of them.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::canvas::{Canvas, Color, Polygon};
use crate::errors::Result;
use crate::geometry::{Point, Rotation};
use crate::ribbon::SigmoidPolygon;

/// How the rotated ribbons are positioned on the canvas
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Shift the top-left of the ribbon set (pulled in by the margin) onto the origin
    #[default]
    Tight,
    /// Map the image center onto the zoomed image center
    Centered,
}

impl std::fmt::Display for Alignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Alignment::Tight => write!(f, "tight"),
            Alignment::Centered => write!(f, "centered"),
        }
    }
}

/// Parameters shared by every ribbon of a composition
#[derive(Debug, Clone, Copy)]
pub struct Layout {
    pub rotation: Rotation,
    /// Output row thickness
    pub side: f64,
    /// Output pixels per input pixel
    pub zoom: f64,
    pub alignment: Alignment,
}

impl Layout {
    /// Trim applied on both axes in [`Alignment::Tight`] mode
    pub fn margin(&self) -> f64 {
        self.side * self.rotation.sin().abs()
    }
}

/// Output canvas size for an image, `floor(dimension * zoom)` on each axis
pub fn canvas_size(width: u32, height: u32, zoom: f64) -> (u32, u32) {
    (
        (f64::from(width) * zoom).floor() as u32,
        (f64::from(height) * zoom).floor() as u32,
    )
}

/// Polygons placed in canvas coordinates, ready to fill
#[derive(Debug, Clone)]
pub struct Composition {
    pub width: u32,
    pub height: u32,
    pub shapes: Vec<Polygon>,
    /// Translation that was applied after rotation
    pub offset: Point,
}

impl Composition {
    /// Fill every shape onto a fresh canvas
    pub fn render(&self, background: Color) -> Canvas {
        let mut canvas = Canvas::with_background(self.width, self.height, background);
        for shape in &self.shapes {
            canvas.draw(shape);
        }
        canvas
    }
}

/// Finalize, rotate and translate all ribbons into one canvas frame.
///
/// `image_size` is the scanned image's size in pixels. Shapes are coloured with
/// `foreground`.
pub fn assemble(
    mut ribbons: Vec<SigmoidPolygon>,
    image_size: (u32, u32),
    layout: &Layout,
    foreground: Color,
) -> Result<Composition> {
    ribbons.par_iter_mut().try_for_each(|ribbon| {
        ribbon.finalize()?;
        ribbon.rotate(&layout.rotation)
    })?;

    let (width, height) = canvas_size(image_size.0, image_size.1, layout.zoom);
    let offset = match layout.alignment {
        Alignment::Tight => {
            let min = ribbons
                .par_iter()
                .map(|ribbon| ribbon.bounds().map(|b| Point::new(b.left(), b.top())))
                .try_reduce(
                    || Point::new(f64::INFINITY, f64::INFINITY),
                    |a, b| Ok(a.min(b)),
                )?;
            if ribbons.is_empty() {
                Point::ORIGIN
            } else {
                let margin = layout.margin();
                Point::new(-(min.x + margin), -(min.y + margin))
            }
        }
        Alignment::Centered => {
            Point::new(f64::from(image_size.0 / 2), f64::from(image_size.1 / 2)) * layout.zoom
        }
    };
    debug!(
        alignment = %layout.alignment,
        dx = offset.x,
        dy = offset.y,
        width,
        height,
        "ribbons aligned"
    );

    let shapes = ribbons
        .iter_mut()
        .map(|ribbon| {
            ribbon.translate(offset.x, offset.y)?;
            ribbon.to_polygon(foreground)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Composition {
        width,
        height,
        shapes,
        offset,
    })
}

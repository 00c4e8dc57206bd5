//! End-to-end pipeline: grayscale image in, halftone canvas out

use std::path::{Path, PathBuf};

use image::GrayImage;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::assembly::{assemble, Composition, Layout};
use crate::blocks::compose_blocks;
use crate::canvas::Canvas;
use crate::config::{HalftoneConfig, Mode, Settings};
use crate::errors::Result;
use crate::geometry::Rotation;
use crate::imaging::{self, DEFAULT_CLIP_LIMIT, DEFAULT_TILES};
use crate::ribbon::SigmoidPolygon;
use crate::scan::{CanvasRows, Scanner};

/// One image prepared for rendering
#[derive(Debug)]
pub struct HalftoneLines {
    image: GrayImage,
    settings: Settings,
    rotation: Rotation,
}

impl HalftoneLines {
    /// Take ownership of the image, equalising it first when contrast is enabled
    pub fn new(image: GrayImage, settings: Settings) -> Self {
        let image = if settings.contrast {
            debug!("enhancing contrast");
            imaging::enhance_contrast(&image, DEFAULT_CLIP_LIMIT, DEFAULT_TILES)
        } else {
            image
        };
        Self {
            image,
            rotation: Rotation::from_degrees(settings.angle),
            settings,
        }
    }

    pub fn image(&self) -> &GrayImage {
        &self.image
    }

    /// Lattice samples grouped by output row
    pub fn scan(&self) -> Result<CanvasRows> {
        Scanner::new(&self.image, self.settings.kernel, self.rotation)?.scan()
    }

    /// One unfinalized ribbon per row, top to bottom
    pub fn build_ribbons(&self, rows: &CanvasRows) -> Result<Vec<SigmoidPolygon>> {
        let side = f64::from(self.settings.side);
        let entries: Vec<_> = rows.iter().collect();
        entries
            .par_iter()
            .map(|(row, entry)| {
                let mut ribbon = SigmoidPolygon::new(
                    *row as f64 * side,
                    side,
                    self.settings.alpha,
                    self.settings.smoothness,
                    self.settings.steepness,
                )?;
                for sample in entry.sorted() {
                    ribbon.height(sample.column as f64, sample.intensity * side)?;
                }
                Ok(ribbon)
            })
            .collect()
    }

    /// Shapes in canvas coordinates for the configured mode
    pub fn compose(&self) -> Result<Composition> {
        match self.settings.mode {
            Mode::Ribbons => {
                let rows = self.scan()?;
                if rows.is_empty() {
                    warn!("scan produced no samples");
                }
                let ribbons = self.build_ribbons(&rows)?;
                let layout = Layout {
                    rotation: self.rotation,
                    side: f64::from(self.settings.side),
                    zoom: self.settings.zoom(),
                    alignment: self.settings.align,
                };
                assemble(ribbons, self.image.dimensions(), &layout, self.settings.fg_color)
            }
            Mode::Blocks => compose_blocks(
                &self.image,
                self.settings.kernel,
                self.settings.side,
                self.settings.smoothness,
                self.settings.fg_color,
            ),
        }
    }

    pub fn render(&self) -> Result<Canvas> {
        let composition = self.compose()?;
        debug!(
            shapes = composition.shapes.len(),
            width = composition.width,
            height = composition.height,
            "drawing"
        );
        Ok(composition.render(self.settings.bg_color))
    }
}

/// Load `input`, render it with `config` and write the result.
///
/// Returns the path written: `output` when given, `out-<name>` next to the input
/// otherwise.
pub fn run(input: &Path, output: Option<&Path>, config: &HalftoneConfig) -> Result<PathBuf> {
    config.validate()?;
    let image = imaging::load_grayscale(input)?;
    let (width, height) = image.dimensions();
    let settings = config.resolve(width, height)?;
    info!(
        input = %input.display(),
        width,
        height,
        kernel = settings.kernel,
        side = settings.side,
        angle = settings.angle,
        mode = %settings.mode,
        "rendering"
    );

    let canvas = HalftoneLines::new(image, settings).render()?;
    let target = output.map_or_else(|| imaging::output_path(input), Path::to_path_buf);
    imaging::save_rgb(&target, &canvas.to_image())?;
    info!("done");
    Ok(target)
}

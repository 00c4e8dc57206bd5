//! Contrast-limited adaptive histogram equalisation
//!
//! The image is split into a grid of tiles. Each tile gets its own equalising lookup
//! table, built from a histogram whose bins are capped at a multiple of the mean bin
//! height; the capped excess is spread evenly over all bins. Pixels blend the tables of
//! the four nearest tile centers bilinearly, so tile borders do not show.

use image::GrayImage;
use rayon::prelude::*;

/// Default bin cap, as a multiple of the mean bin height
pub const DEFAULT_CLIP_LIMIT: f64 = 2.0;

/// Default number of tiles along each axis
pub const DEFAULT_TILES: u32 = 8;

const BINS: usize = 256;

type Lut = [u8; BINS];

/// Split `len` pixels into `tiles` spans; tile `i` covers `[bounds[i], bounds[i + 1])`
fn tile_bounds(len: u32, tiles: u32) -> Vec<u32> {
    (0..=tiles)
        .map(|i| (u64::from(len) * u64::from(i) / u64::from(tiles)) as u32)
        .collect()
}

/// Clipped, equalising lookup table of one tile
fn tile_lut(image: &GrayImage, xs: (u32, u32), ys: (u32, u32), clip_limit: f64) -> Lut {
    let mut histogram = [0u32; BINS];
    for y in ys.0..ys.1 {
        for x in xs.0..xs.1 {
            histogram[usize::from(image.get_pixel(x, y).0[0])] += 1;
        }
    }
    let area = (xs.1 - xs.0) * (ys.1 - ys.0);

    let limit = ((clip_limit * f64::from(area) / BINS as f64) as u32).max(1);
    let mut excess = 0;
    for bin in &mut histogram {
        if *bin > limit {
            excess += *bin - limit;
            *bin = limit;
        }
    }
    let batch = excess / BINS as u32;
    let residual = excess as usize % BINS;
    for bin in &mut histogram {
        *bin += batch;
    }
    if residual > 0 {
        let step = (BINS / residual).max(1);
        for bin in histogram.iter_mut().step_by(step).take(residual) {
            *bin += 1;
        }
    }

    let scale = 255.0 / f64::from(area.max(1));
    let mut lut = [0u8; BINS];
    let mut cumulative = 0u32;
    for (entry, count) in lut.iter_mut().zip(histogram) {
        cumulative += count;
        *entry = (f64::from(cumulative) * scale).round().min(255.0) as u8;
    }
    lut
}

/// Position of pixel `p` between tile centers: the lower tile, the upper tile and the
/// weight of the upper one
fn blend(p: u32, len: u32, tiles: u32) -> (usize, usize, f64) {
    let tile = f64::from(len) / f64::from(tiles);
    let t = (f64::from(p) + 0.5) / tile - 0.5;
    let last = (tiles - 1) as usize;
    if t <= 0.0 {
        return (0, 0, 0.0);
    }
    let lower = (t.floor() as usize).min(last);
    let upper = (lower + 1).min(last);
    (lower, upper, t - t.floor())
}

/// Equalise `image` with `tiles × tiles` tiles and the given clip limit.
///
/// The tile count is reduced on images smaller than the grid so every tile holds at
/// least one pixel.
pub fn enhance_contrast(image: &GrayImage, clip_limit: f64, tiles: u32) -> GrayImage {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return image.clone();
    }
    let tiles_x = tiles.clamp(1, width);
    let tiles_y = tiles.clamp(1, height);
    let bx = tile_bounds(width, tiles_x);
    let by = tile_bounds(height, tiles_y);

    let luts: Vec<Lut> = (0..tiles_y * tiles_x)
        .into_par_iter()
        .map(|i| {
            let (tx, ty) = ((i % tiles_x) as usize, (i / tiles_x) as usize);
            tile_lut(image, (bx[tx], bx[tx + 1]), (by[ty], by[ty + 1]), clip_limit)
        })
        .collect();
    let lut = |tx: usize, ty: usize| &luts[ty * tiles_x as usize + tx];

    let columns: Vec<(usize, usize, f64)> =
        (0..width).map(|x| blend(x, width, tiles_x)).collect();

    let mut out = GrayImage::new(width, height);
    out.par_chunks_mut(width as usize)
        .enumerate()
        .for_each(|(y, row)| {
            let (ty0, ty1, wy) = blend(y as u32, height, tiles_y);
            for (x, value) in row.iter_mut().enumerate() {
                let (tx0, tx1, wx) = columns[x];
                let v = usize::from(image.get_pixel(x as u32, y as u32).0[0]);
                let top =
                    f64::from(lut(tx0, ty0)[v]) * (1.0 - wx) + f64::from(lut(tx1, ty0)[v]) * wx;
                let bottom =
                    f64::from(lut(tx0, ty1)[v]) * (1.0 - wx) + f64::from(lut(tx1, ty1)[v]) * wx;
                *value = (top * (1.0 - wy) + bottom * wy).round().clamp(0.0, 255.0) as u8;
            }
        });
    out
}

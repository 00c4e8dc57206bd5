//! Pixel selection under a kernel

use image::GrayImage;

use super::kernel::{Kernel, PixelBox};

/// Boolean mask of the image pixels covered by one kernel.
///
/// Only the kernel's bounding box (clipped to the image) is tested and stored; pixels
/// outside the window are unselected by definition.
#[derive(Debug, Clone)]
pub struct SelectionMask {
    window: PixelBox,
    bits: Vec<bool>,
}

impl SelectionMask {
    /// Test every pixel of the kernel's clipped bounding box
    pub fn select(kernel: &Kernel, width: u32, height: u32) -> Self {
        let window = kernel.bbox().clip(width, height);
        let mut bits = Vec::with_capacity(window.width() * window.height());
        for y in window.min_y..window.max_y {
            for x in window.min_x..window.max_x {
                bits.push(kernel.contains(x as f64, y as f64));
            }
        }
        Self { window, bits }
    }

    /// Number of selected pixels
    pub fn count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    pub fn is_empty(&self) -> bool {
        !self.bits.iter().any(|&b| b)
    }

    /// Image coordinates of the selected pixels, row by row
    pub fn pixels(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        let width = self.window.width().max(1);
        self.bits
            .iter()
            .enumerate()
            .filter(|(_, &on)| on)
            .map(move |(i, _)| {
                (
                    (self.window.min_x + (i % width) as i64) as u32,
                    (self.window.min_y + (i / width) as i64) as u32,
                )
            })
    }

    /// `1 - mean / 255` over the selected pixels: 0.0 for white, 1.0 for black.
    /// `None` when nothing is selected.
    pub fn intensity(&self, image: &GrayImage) -> Option<f64> {
        let (sum, count) = self
            .pixels()
            .fold((0u64, 0u64), |(sum, count), (x, y)| {
                (sum + u64::from(image.get_pixel(x, y).0[0]), count + 1)
            });
        if count == 0 {
            return None;
        }
        Some(1.0 - (sum as f64 / count as f64) / 255.0)
    }
}

//! RGB framebuffer that shapes are filled onto

use image::RgbImage;

use super::color::Color;
use super::shapes::Shape;

/// Output framebuffer
///
/// Shapes use continuous (f64) coordinates; pixels are opaque RGB.
#[derive(Debug, Clone)]
pub struct Canvas {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Pixel data (row-major)
    pixels: Vec<Color>,
    /// Background color
    bg_color: Color,
}

impl Canvas {
    /// Create canvas with background color
    pub fn with_background(width: u32, height: u32, bg: Color) -> Self {
        let size = width as usize * height as usize;
        Self {
            width,
            height,
            pixels: vec![bg; size],
            bg_color: bg,
        }
    }

    /// Get pixel at coordinates
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x < self.width && y < self.height {
            Some(self.pixels[y as usize * self.width as usize + x as usize])
        } else {
            None
        }
    }

    /// Draw a shape onto the canvas
    pub fn draw<S: Shape>(&mut self, shape: &S) {
        shape.rasterize(self.width, self.height, &mut self.pixels);
    }

    /// Get raw pixel data
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Number of pixels that differ from the background
    pub fn painted(&self) -> usize {
        self.pixels.iter().filter(|&&c| c != self.bg_color).count()
    }

    /// Copy into an `image` buffer for encoding
    pub fn to_image(&self) -> RgbImage {
        RgbImage::from_fn(self.width, self.height, |x, y| {
            self.pixels[y as usize * self.width as usize + x as usize].to_pixel()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Polygon;
    use crate::geometry::Point;

    #[test]
    fn test_new_canvas() {
        let canvas = Canvas::with_background(100, 50, Color::WHITE);
        assert_eq!(canvas.width, 100);
        assert_eq!(canvas.height, 50);
        assert_eq!(canvas.pixels.len(), 5000);
        assert_eq!(canvas.painted(), 0);
    }

    #[test]
    fn test_draw_and_clear() {
        let mut canvas = Canvas::with_background(10, 10, Color::WHITE);
        canvas.draw(&Polygon::new(
            vec![
                Point::new(0.0, 0.0),
                Point::new(5.0, 0.0),
                Point::new(5.0, 5.0),
                Point::new(0.0, 5.0),
            ],
            Color::BLACK,
        ));
        assert_eq!(canvas.painted(), 25);
        assert_eq!(canvas.get_pixel(2, 2), Some(Color::BLACK));
        assert_eq!(canvas.get_pixel(7, 7), Some(Color::WHITE));
        assert_eq!(canvas.get_pixel(10, 0), None);
    }

    #[test]
    fn test_to_image() {
        let canvas = Canvas::with_background(3, 2, Color::rgb(10, 20, 30));
        let img = canvas.to_image();
        assert_eq!(img.dimensions(), (3, 2));
        assert_eq!(img.get_pixel(2, 1).0, [10, 20, 30]);
    }
}

//! # Canvas
//!
//! Output side of the pipeline: polygons in continuous coordinates are filled onto an
//! RGB framebuffer, which is then handed to the image encoder.
//!
//! ```text
//!    ribbons / blocks (Vec<Point> outlines)
//!                 │
//!                 ▼
//!          ┌─────────────┐
//!          │   Polygon   │  even-odd scanline fill
//!          └──────┬──────┘
//!                 ▼
//!          ┌─────────────┐
//!          │   Canvas    │  row-major RGB
//!          └──────┬──────┘
//!                 ▼
//!             RgbImage
//! ```

mod canvas;
mod color;
mod shapes;

pub use canvas::Canvas;
pub use color::Color;
pub use shapes::{Polygon, Shape};

//! # Lattice scan
//!
//! Samples a grayscale image with a lattice of tilted square kernels and groups the
//! readings into output rows.
//!
//! - [`Kernel`]: one tilted square, with edge-inclusive point membership
//! - [`SelectionMask`]: the pixels a kernel covers and their mean darkness
//! - [`Scanner`]: the quadrant walk over the lattice
//! - [`CanvasRows`]: signed row key → samples, merged across quadrants

mod kernel;
mod rows;
mod scanner;
mod selection;

pub use kernel::{Kernel, PixelBox};
pub use rows::{CanvasRows, RowEntry, Sample};
pub use scanner::{nearest_intersection, Quadrant, RowScan, Scanner};
pub use selection::SelectionMask;

//! # Halftone Lines
//!
//! Renders grayscale images as halftone compositions of continuous ribbons whose
//! local thickness follows the local darkness of the image.
//!
//! The image is sampled with a lattice of tilted square kernels that grows outwards
//! from the image center ([`scan`]). Each lattice row becomes one ribbon outline with
//! logistic transitions between samples ([`ribbon`]); the ribbons are rotated back into
//! image orientation, aligned ([`assembly`]) and filled onto an RGB canvas
//! ([`canvas`]).

pub mod assembly;
pub mod blocks;
pub mod canvas;
pub mod config;
pub mod errors;
pub mod geometry;
pub mod halftone;
pub mod imaging;
pub mod ribbon;
pub mod scan;

pub use config::{HalftoneConfig, Mode, Settings};
pub use errors::{HalftoneError, Result};
pub use halftone::{run, HalftoneLines};

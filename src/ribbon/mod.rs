//! Variable-width ribbons
//!
//! One ribbon per output row. Each lattice sample contributes a vertical slice whose
//! thickness encodes the sample's darkness; neighbouring slices are joined by logistic
//! transitions so the outline reads as a single smooth stroke.

mod sigmoid;

pub use sigmoid::{logistic_segment, SigmoidPolygon};

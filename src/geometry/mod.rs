//! Plane geometry shared by the scanner, the ribbon builder and the canvas

mod bezier;
mod line;
mod point;
mod rotation;

pub use bezier::{pascal_row, point_at, BezierPolygon};
pub use line::{between, Line, FAR_AWAY, PARALLEL_PRECISION, VERTICAL_EPSILON};
pub use point::{Point, Rect};
pub use rotation::Rotation;

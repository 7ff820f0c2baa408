//! Geometry primitives
//!
//! Points, vertices and paths in integer board coordinates.

pub mod path;
pub mod point;

pub use path::{Path, Vertex};
pub use point::{distance_to_segment, Orientation, Point};

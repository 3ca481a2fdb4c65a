//! 2D geometry for the sampling domain.
//!
//! Purpose
//! - Sample node positions on the unit square, describe the hole pattern, and
//!   triangulate the point cloud through a small backend seam.
//!
//! References
//! - Code cross-refs: `complex::SimplicialComplex::build`, `regions::RegionPartition`

pub mod rand;
mod triangulate;
mod types;

pub use self::rand::sample_unit_square;
pub use triangulate::{DelaunayTriangulator, FixedTriangles, Triangulator};
pub use types::{
    default_holes, is_outside_holes, Disk, Triangle, HOLE_BOTTOM_RIGHT, HOLE_TOP_LEFT,
};

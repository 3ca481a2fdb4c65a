//! Synthetic walk datasets on random simplicial 2-complexes.
//!
//! A run samples points in the unit square with two disk-shaped holes,
//! triangulates them, routes shortest-path walks through one of three
//! corridors around the holes and encodes each walk as a next-neighbor
//! prediction example: prefix edge flow, conditional incidence matrix of the
//! pivot's neighbors, one-hot target.
//!
//! API Policy
//! - This crate is project-internal. There is no stable public API.
//! - `api` is the curated surface used by the CLI and benches.

pub mod api;
pub mod complex;
pub mod dataset;
pub mod encode;
pub mod error;
pub mod geom2;
pub mod pipeline;
pub mod regions;
pub mod walks;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::{DatasetError, SynthError};
pub use nalgebra::Vector2 as Vec2;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::complex::{Edge, SimplicialComplex, UndirectedGraph};
    pub use crate::dataset::{load, save, Dataset};
    pub use crate::error::{DatasetError, SynthError};
    pub use crate::geom2::{default_holes, DelaunayTriangulator, Disk, Triangulator};
    pub use crate::pipeline::{generate, generate_training_data, SynthParams, SynthRun};
    pub use crate::regions::{Region, RegionPartition};
    pub use crate::walks::Walk;
    pub use nalgebra::Vector2 as Vec2;
}

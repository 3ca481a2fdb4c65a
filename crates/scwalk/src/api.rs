//! Curated internal API (UNSTABLE).
//!
//! Important
//! - This is not a public API. It is a convenience surface for the CLI, the
//!   benches and tests. Breaking changes are allowed and expected.

// Geometry and complex
pub use crate::complex::{
    edge_face_incidence, node_edge_incidence, Edge, SimplicialComplex, UndirectedGraph,
};
pub use crate::geom2::{
    default_holes, is_outside_holes, sample_unit_square, DelaunayTriangulator, Disk,
    FixedTriangles, Triangle, Triangulator,
};
// Regions and walks
pub use crate::regions::{classify, Region, RegionPartition, CORRIDORS};
pub use crate::walks::{generate_walks, multi_hop_neighborhood, PathFinder, Walk};
// Encoding
pub use crate::encode::{
    conditional_incidence, neighborhood_onehot, path_to_flow, train_test_masks, window_bounds,
    Encoded, TrainingEncoder,
};
// Runs and persistence
pub use crate::dataset::{load as load_dataset, save as save_dataset, Dataset};
pub use crate::error::{DatasetError, SynthError};
pub use crate::pipeline::{generate, generate_training_data, SynthParams, SynthRun};

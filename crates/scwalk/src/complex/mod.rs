//! Simplicial 2-complex: nodes, canonical edges, valid faces, incidence.
//!
//! Purpose
//! - Build one 2-complex from a triangulated point cloud with holes carved out,
//!   and expose its signed boundary operators B1 and B2.
//!
//! Why this design
//! - Edge direction is not stored as a directed graph. Every edge is kept in
//!   canonical orientation `(a, b)` with `a < b`, and the undirected adjacency
//!   is derived separately for pathfinding.
//! - Invalid nodes stay in the node set so row indices of B1 match node ids.
//!
//! Layout
//! - `types.rs` (data types), `build.rs` (construction), `incidence.rs` (B1/B2).

mod build;
mod incidence;
mod types;

pub use incidence::{edge_face_incidence, node_edge_incidence};
pub use types::{Edge, SimplicialComplex, UndirectedGraph};

//! Signed incidence matrices (boundary operators) of the complex.
//!
//! Conventions
//! - B1 (|V| × |E|): column of `Edge(a, b)` has −1 at row `a`, +1 at row `b`.
//! - B2 (|E| × |F|): column of face `a < b < c` follows the traversal
//!   a→b→c→a, so `(a,b)` and `(b,c)` get +1 and `(a,c)` gets −1.
//!
//! With these signs `B1 · B2 = 0`.

use std::collections::HashMap;

use ndarray::Array2;

use super::types::{Edge, SimplicialComplex};
use crate::geom2::Triangle;

/// Node-edge incidence matrix B1.
pub fn node_edge_incidence(node_count: usize, edges: &[Edge]) -> Array2<f64> {
    let mut b1 = Array2::<f64>::zeros((node_count, edges.len()));
    for (j, e) in edges.iter().enumerate() {
        b1[[e.lo(), j]] = -1.0;
        b1[[e.hi(), j]] = 1.0;
    }
    b1
}

/// Edge-face incidence matrix B2.
///
/// Panics if a face side is missing from `edge_index`; a complex built by
/// `SimplicialComplex::from_parts` always contains every side.
pub fn edge_face_incidence(
    edge_index: &HashMap<Edge, usize>,
    faces: &[Triangle],
) -> Array2<f64> {
    let mut b2 = Array2::<f64>::zeros((edge_index.len(), faces.len()));
    for (k, f) in faces.iter().enumerate() {
        let [a, b, c] = f.sorted().vertices();
        for (edge, sign) in [(Edge(a, b), 1.0), (Edge(b, c), 1.0), (Edge(a, c), -1.0)] {
            let row = edge_index[&edge];
            b2[[row, k]] = sign;
        }
    }
    b2
}

impl SimplicialComplex {
    pub fn b1(&self) -> Array2<f64> {
        node_edge_incidence(self.node_count(), &self.edges)
    }

    pub fn b2(&self) -> Array2<f64> {
        edge_face_incidence(&self.edge_index, &self.faces)
    }

    /// `(B1, B2)` in one call.
    pub fn incidence_matrices(&self) -> (Array2<f64>, Array2<f64>) {
        (self.b1(), self.b2())
    }
}

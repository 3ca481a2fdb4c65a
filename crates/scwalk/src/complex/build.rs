//! Complex construction: sample, triangulate, drop faces touching a hole.

use std::collections::{BTreeSet, HashMap};

use nalgebra::Vector2;
use rand::Rng;

use super::types::{Edge, SimplicialComplex, UndirectedGraph};
use crate::error::SynthError;
use crate::geom2::{is_outside_holes, sample_unit_square, Disk, Triangle, Triangulator};

impl SimplicialComplex {
    /// Sample `n` points on the unit square, triangulate, and keep the faces
    /// whose three nodes avoid every hole.
    pub fn build<T, R>(
        n: usize,
        holes: &[Disk],
        triangulator: &T,
        rng: &mut R,
    ) -> Result<Self, SynthError>
    where
        T: Triangulator + ?Sized,
        R: Rng + ?Sized,
    {
        if n < 3 {
            return Err(SynthError::invalid(format!("need at least 3 nodes, got {n}")));
        }
        let points = sample_unit_square(n, rng);
        let triangles = triangulator.triangulate(&points)?;
        Self::from_parts(points, triangles, holes)
    }

    /// Assemble the complex from explicit points and triangles.
    ///
    /// Every node stays in the node set; only faces are filtered. Each kept
    /// face contributes its three sides in ascending orientation.
    pub fn from_parts(
        points: Vec<Vector2<f64>>,
        triangles: Vec<Triangle>,
        holes: &[Disk],
    ) -> Result<Self, SynthError> {
        let n = points.len();
        let valid: Vec<bool> = points.iter().map(|&p| is_outside_holes(p, holes)).collect();
        let valid_idxs: Vec<usize> = (0..n).filter(|&i| valid[i]).collect();

        let mut faces = Vec::with_capacity(triangles.len());
        let mut edge_set: BTreeSet<Edge> = BTreeSet::new();
        for t in triangles {
            let [a, b, c] = t.sorted().vertices();
            if c >= n {
                return Err(SynthError::triangulation(format!(
                    "face {:?} references a node outside 0..{n}",
                    t.vertices()
                )));
            }
            if a == b || b == c {
                return Err(SynthError::triangulation(format!(
                    "face {:?} repeats a vertex",
                    t.vertices()
                )));
            }
            if !(valid[a] && valid[b] && valid[c]) {
                continue;
            }
            edge_set.insert(Edge(a, b));
            edge_set.insert(Edge(b, c));
            edge_set.insert(Edge(a, c));
            faces.push(Triangle([a, b, c]));
        }

        let edges: Vec<Edge> = edge_set.into_iter().collect();
        let edge_index: HashMap<Edge, usize> =
            edges.iter().enumerate().map(|(i, &e)| (e, i)).collect();
        let graph = UndirectedGraph::from_edges(n, &edges);

        tracing::debug!(
            nodes = n,
            valid = valid_idxs.len(),
            edges = edges.len(),
            faces = faces.len(),
            max_degree = graph.max_degree(),
            "complex built"
        );

        Ok(Self {
            points,
            valid,
            valid_idxs,
            faces,
            edges,
            edge_index,
            graph,
        })
    }
}

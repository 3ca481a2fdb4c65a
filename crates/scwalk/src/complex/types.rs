//! Data types for the 2-complex and its 1-skeleton.
//!
//! Kept small and explicit to make `build` and `incidence` easy to read.

use std::collections::HashMap;
use std::ops::Range;

use nalgebra::Vector2;

use crate::geom2::Triangle;

/// Undirected edge in canonical orientation: `Edge(a, b)` with `a < b`.
///
/// Ordering is lexicographic on `(a, b)`, which fixes the column order of B1
/// and the row order of B2.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge(pub usize, pub usize);

impl Edge {
    /// Canonical edge between `u` and `v` (endpoints swapped if needed).
    #[inline]
    pub fn new(u: usize, v: usize) -> Self {
        if u <= v {
            Self(u, v)
        } else {
            Self(v, u)
        }
    }

    #[inline]
    pub fn lo(&self) -> usize {
        self.0
    }

    #[inline]
    pub fn hi(&self) -> usize {
        self.1
    }
}

/// Simple undirected graph over nodes `0..n` with sorted neighbor lists.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UndirectedGraph {
    adj: Vec<Vec<usize>>,
}

impl UndirectedGraph {
    /// Build from canonical edges; isolated nodes keep an empty neighbor list.
    pub fn from_edges(node_count: usize, edges: &[Edge]) -> Self {
        let mut adj = vec![Vec::new(); node_count];
        for e in edges {
            adj[e.lo()].push(e.hi());
            adj[e.hi()].push(e.lo());
        }
        Self::from_adjacency(adj)
    }

    /// Build from raw neighbor lists. Lists are sorted and deduplicated.
    pub fn from_adjacency(mut adj: Vec<Vec<usize>>) -> Self {
        for nbrs in &mut adj {
            nbrs.sort_unstable();
            nbrs.dedup();
        }
        Self { adj }
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.adj.len()
    }

    /// Neighbors of `v`, ascending.
    #[inline]
    pub fn neighbors(&self, v: usize) -> &[usize] {
        &self.adj[v]
    }

    #[inline]
    pub fn degree(&self, v: usize) -> usize {
        self.adj[v].len()
    }

    /// Max node degree `D` (0 for an edgeless graph); the padding width of encoded examples.
    pub fn max_degree(&self) -> usize {
        self.adj.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn edge_count(&self) -> usize {
        self.adj
            .iter()
            .enumerate()
            .map(|(u, nbrs)| nbrs.iter().filter(|&&v| v >= u).count())
            .sum()
    }

    #[inline]
    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        u < self.adj.len() && self.adj[u].binary_search(&v).is_ok()
    }

    /// Canonical edges in sorted order.
    pub fn edges(&self) -> Vec<Edge> {
        let mut out = Vec::with_capacity(self.edge_count());
        for (u, nbrs) in self.adj.iter().enumerate() {
            out.extend(nbrs.iter().filter(|&&v| v > u).map(|&v| Edge(u, v)));
        }
        out
    }
}

/// The 2-complex: points, node validity, valid faces and their edges.
#[derive(Clone, Debug)]
pub struct SimplicialComplex {
    /// Node positions; node `i` sits at `points[i]`.
    pub points: Vec<Vector2<f64>>,
    /// `valid[i]` iff node `i` lies outside every hole.
    pub valid: Vec<bool>,
    /// Indices of valid nodes, ascending.
    pub valid_idxs: Vec<usize>,
    /// Faces with all three nodes valid, vertices sorted, in triangulation order.
    pub faces: Vec<Triangle>,
    /// Sides of the valid faces, sorted.
    pub edges: Vec<Edge>,
    /// Position of each edge in `edges`.
    pub edge_index: HashMap<Edge, usize>,
    /// Undirected 1-skeleton used for pathfinding and neighborhoods.
    pub graph: UndirectedGraph,
}

impl SimplicialComplex {
    /// Node set `V` (all sampled nodes, including invalid ones).
    #[inline]
    pub fn nodes(&self) -> Range<usize> {
        0..self.points.len()
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.points.len()
    }

    /// Position of the edge `{u, v}` in the sorted edge list.
    #[inline]
    pub fn edge_position(&self, u: usize, v: usize) -> Option<usize> {
        self.edge_index.get(&Edge::new(u, v)).copied()
    }

    #[inline]
    pub fn max_degree(&self) -> usize {
        self.graph.max_degree()
    }
}

//! Corridor-routed walks over the 1-skeleton.
//!
//! Purpose
//! - Produce walks BEGIN → A_c → B_c → END, where corridor `c` cycles
//!   0, 1, 2, 0, ... with the walk index so the three corridors are evenly
//!   covered.
//!
//! Model
//! - Waypoints are drawn uniformly from their regions in the order BEGIN,
//!   A_c, B_c, END.
//! - The walk is the concatenation of unweighted shortest paths between
//!   consecutive waypoints. Each segment except the last drops its final node,
//!   which is the first node of the next segment.
//!
//! References
//! - Code cross-refs: `regions::RegionPartition`, `complex::UndirectedGraph`

use std::collections::BTreeSet;

use petgraph::algo::astar;
use petgraph::graph::{NodeIndex, UnGraph};
use rand::Rng;

use crate::complex::UndirectedGraph;
use crate::error::SynthError;
use crate::regions::{Region, RegionPartition, CORRIDORS};

/// A walk and the corridor it was routed through.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Walk {
    pub nodes: Vec<usize>,
    pub corridor: usize,
}

impl Walk {
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Unweighted shortest paths, backed by `petgraph` A* with a zero heuristic.
pub struct PathFinder {
    graph: UnGraph<(), ()>,
}

impl PathFinder {
    pub fn new(g: &UndirectedGraph) -> Self {
        let edges = g.edges();
        let mut graph = UnGraph::with_capacity(g.node_count(), edges.len());
        for _ in 0..g.node_count() {
            graph.add_node(());
        }
        for e in edges {
            graph.add_edge(NodeIndex::new(e.lo()), NodeIndex::new(e.hi()), ());
        }
        Self { graph }
    }

    /// Node sequence from `from` to `to` inclusive; `[from]` when they coincide.
    pub fn shortest_path(&self, from: usize, to: usize) -> Result<Vec<usize>, SynthError> {
        let n = self.graph.node_count();
        if from >= n || to >= n {
            return Err(SynthError::NoPath { from, to });
        }
        let goal = NodeIndex::new(to);
        astar(
            &self.graph,
            NodeIndex::new(from),
            |v| v == goal,
            |_| 1usize,
            |_| 0usize,
        )
        .map(|(_, path)| path.into_iter().map(|v| v.index()).collect())
        .ok_or(SynthError::NoPath { from, to })
    }

    /// Shortest paths through `waypoints` in order, joined without repeating
    /// the shared node at each join.
    pub fn route(&self, waypoints: &[usize]) -> Result<Vec<usize>, SynthError> {
        let mut nodes = Vec::new();
        for (k, pair) in waypoints.windows(2).enumerate() {
            let mut seg = self.shortest_path(pair[0], pair[1])?;
            if k + 2 < waypoints.len() {
                seg.pop();
            }
            nodes.extend(seg);
        }
        Ok(nodes)
    }
}

/// Generate `m` corridor-routed walks.
///
/// Fails with `DegenerateRegion` if a region that must be sampled is empty and
/// with `NoPath` if two waypoints are disconnected.
pub fn generate_walks<R: Rng + ?Sized>(
    graph: &UndirectedGraph,
    regions: &RegionPartition,
    m: usize,
    rng: &mut R,
) -> Result<Vec<Walk>, SynthError> {
    regions.require_nonempty(m.min(CORRIDORS))?;
    let finder = PathFinder::new(graph);
    let mut walks = Vec::with_capacity(m);
    for i in 0..m {
        let corridor = i % CORRIDORS;
        let begin = regions.sample(Region::Begin, rng)?;
        let via_a = regions.sample(Region::A(corridor), rng)?;
        let via_b = regions.sample(Region::B(corridor), rng)?;
        let end = regions.sample(Region::End, rng)?;
        let nodes = finder.route(&[begin, via_a, via_b, end])?;
        walks.push(Walk { nodes, corridor });
    }
    if !walks.is_empty() {
        let total: usize = walks.iter().map(Walk::len).sum();
        let shortest = walks.iter().map(Walk::len).min().unwrap_or(0);
        tracing::debug!(
            walks = walks.len(),
            mean_len = total as f64 / walks.len() as f64,
            min_len = shortest,
            "walks generated"
        );
    }
    Ok(walks)
}

/// Nodes reachable from `v` by walks of exactly `h` steps (`{v}` for `h = 0`).
///
/// One frontier set per hop; no recursion.
pub fn multi_hop_neighborhood(graph: &UndirectedGraph, v: usize, h: usize) -> BTreeSet<usize> {
    let mut frontier = BTreeSet::from([v]);
    for _ in 0..h {
        frontier = frontier
            .iter()
            .flat_map(|&u| graph.neighbors(u).iter().copied())
            .collect();
    }
    frontier
}

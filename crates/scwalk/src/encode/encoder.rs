//! Walks to padded training tensors.

use std::collections::HashMap;

use ndarray::{s, Array1, Array2, Array4};
use rand::Rng;

use super::features::{conditional_incidence, neighborhood_onehot, path_to_flow};
use crate::complex::{Edge, SimplicialComplex, UndirectedGraph};
use crate::error::SynthError;
use crate::walks::Walk;

/// Shortest window a walk is truncated to.
pub const MIN_WINDOW: usize = 4;

/// Inclusive `(lo, hi)` range of truncation lengths for the largest hop `max_hop`.
///
/// `hi = MIN_WINDOW + max_hop − 1`; `lo` is raised to `max_hop + 1` when needed so
/// the prefix keeps at least one node.
pub fn window_bounds(max_hop: usize) -> (usize, usize) {
    let lo = MIN_WINDOW.max(max_hop + 1);
    let hi = MIN_WINDOW + max_hop - 1;
    (lo, hi)
}

/// Encoded examples, hop-major: axis 0 follows the hop list, axis 1 the walks.
#[derive(Clone, Debug, PartialEq)]
pub struct Encoded {
    /// `(|H|, m, |E|, 1)` prefix flows (the same prefix for every hop).
    pub flows_in: Array4<f64>,
    /// `(|H|, m, D, |E|)` B1 rows of the pivot's neighbors.
    pub bconds: Array4<f64>,
    /// `(|H|, m, D, 1)` one-hot position of the true next node.
    pub targets: Array4<f64>,
    /// Hop-1 pivot (last prefix node) of every walk.
    pub last_nodes: Array1<i64>,
}

/// Encoder over one complex and a fixed hop list.
pub struct TrainingEncoder<'a> {
    b1: &'a Array2<f64>,
    edge_index: &'a HashMap<Edge, usize>,
    graph: &'a UndirectedGraph,
    hops: &'a [usize],
    max_degree: usize,
}

impl<'a> TrainingEncoder<'a> {
    pub fn new(
        b1: &'a Array2<f64>,
        edge_index: &'a HashMap<Edge, usize>,
        graph: &'a UndirectedGraph,
        hops: &'a [usize],
    ) -> Result<Self, SynthError> {
        if hops.is_empty() {
            return Err(SynthError::invalid("hop list is empty"));
        }
        if hops.contains(&0) {
            return Err(SynthError::invalid("hops must be >= 1"));
        }
        if b1.ncols() != edge_index.len() || b1.nrows() != graph.node_count() {
            return Err(SynthError::invalid(format!(
                "B1 shape {:?} does not match {} nodes x {} edges",
                b1.dim(),
                graph.node_count(),
                edge_index.len()
            )));
        }
        Ok(Self {
            b1,
            edge_index,
            graph,
            hops,
            max_degree: graph.max_degree(),
        })
    }

    /// Encoder for `sc` with a precomputed `b1 = sc.b1()`.
    pub fn for_complex(
        sc: &'a SimplicialComplex,
        b1: &'a Array2<f64>,
        hops: &'a [usize],
    ) -> Result<Self, SynthError> {
        Self::new(b1, &sc.edge_index, &sc.graph, hops)
    }

    pub fn max_hop(&self) -> usize {
        self.hops.iter().copied().max().unwrap_or(1)
    }

    /// Truncate every walk to a random window and encode it for every hop.
    ///
    /// One window length is drawn per walk, in walk order. A walk shorter than
    /// the window's lower bound fails the whole batch with `ShortWalk`.
    pub fn encode<R: Rng + ?Sized>(&self, walks: &[Walk], rng: &mut R) -> Result<Encoded, SynthError> {
        let m = walks.len();
        let e = self.edge_index.len();
        let d = self.max_degree;
        let hn = self.hops.len();
        let max_hop = self.max_hop();
        let (lo, hi) = window_bounds(max_hop);

        let mut flows_in = Array4::<f64>::zeros((hn, m, e, 1));
        let mut bconds = Array4::<f64>::zeros((hn, m, d, e));
        let mut targets = Array4::<f64>::zeros((hn, m, d, 1));
        let mut last_nodes = Array1::<i64>::zeros(m);
        let mut degenerate = 0usize;

        for (i, walk) in walks.iter().enumerate() {
            if walk.len() < lo {
                return Err(SynthError::ShortWalk {
                    walk: i,
                    len: walk.len(),
                    required: lo,
                });
            }
            let window = rng.gen_range(lo..=hi).min(walk.len());
            let truncated = &walk.nodes[..window];
            let prefix = &truncated[..window - max_hop];
            let suffix = &truncated[window - max_hop - 1..];
            last_nodes[i] = suffix[0] as i64;

            let flow = path_to_flow(prefix, self.edge_index, e)?;
            for (k, &h) in self.hops.iter().enumerate() {
                flows_in.slice_mut(s![k, i, .., 0]).assign(&flow);
                let pivot = suffix[h - 1];
                let next = suffix[h];
                let nbrs = self.graph.neighbors(pivot);
                bconds
                    .slice_mut(s![k, i, .., ..])
                    .assign(&conditional_incidence(self.b1, nbrs, d));
                let onehot = neighborhood_onehot(nbrs, next, d);
                if onehot.sum() == 0.0 {
                    degenerate += 1;
                }
                targets.slice_mut(s![k, i, .., 0]).assign(&onehot);
            }
        }
        if degenerate > 0 {
            tracing::warn!(degenerate, "examples with an all-zero target");
        }
        tracing::debug!(walks = m, hops = hn, max_degree = d, edges = e, "walks encoded");
        Ok(Encoded {
            flows_in,
            bconds,
            targets,
            last_nodes,
        })
    }
}

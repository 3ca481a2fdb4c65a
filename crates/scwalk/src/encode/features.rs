//! Per-example features: flow vectors, conditional incidence, one-hot targets.

use std::collections::HashMap;

use ndarray::{Array1, Array2};

use crate::complex::Edge;
use crate::error::SynthError;

/// Signed edge traversal counts of `path`.
///
/// A step `u → v` adds +1 to edge `{u, v}` if `u < v` and −1 otherwise;
/// retraced edges accumulate.
pub fn path_to_flow(
    path: &[usize],
    edge_index: &HashMap<Edge, usize>,
    edge_count: usize,
) -> Result<Array1<f64>, SynthError> {
    let mut flow = Array1::<f64>::zeros(edge_count);
    for step in path.windows(2) {
        let (u, v) = (step[0], step[1]);
        let k = *edge_index
            .get(&Edge::new(u, v))
            .ok_or(SynthError::NotAnEdge { from: u, to: v })?;
        flow[k] += if u < v { 1.0 } else { -1.0 };
    }
    Ok(flow)
}

/// Rows of `b1` for the nodes in `nbrs`, zero-padded to `max_degree` rows.
pub fn conditional_incidence(b1: &Array2<f64>, nbrs: &[usize], max_degree: usize) -> Array2<f64> {
    assert!(
        nbrs.len() <= max_degree,
        "neighborhood of size {} exceeds padding width {max_degree}",
        nbrs.len()
    );
    let mut bcond = Array2::<f64>::zeros((max_degree, b1.ncols()));
    for (r, &v) in nbrs.iter().enumerate() {
        bcond.row_mut(r).assign(&b1.row(v));
    }
    bcond
}

/// Indicator of `next` within `nbrs`, zero-padded to `max_degree`.
///
/// All zeros when `next` is not a neighbor.
pub fn neighborhood_onehot(nbrs: &[usize], next: usize, max_degree: usize) -> Array1<f64> {
    let mut onehot = Array1::<f64>::zeros(max_degree);
    if let Some(pos) = nbrs.iter().position(|&w| w == next) {
        onehot[pos] = 1.0;
    }
    onehot
}

//! The generated bundle and its on-disk directory layout.
//!
//! Purpose
//! - Hold every array a training run needs and move it to and from a directory
//!   of `.npy` files plus one text adjacency list.
//!
//! Layout
//! - `io.rs`: `save` (staged, then published by rename) and `load` (with a
//!   cross-array shape check).
//! - `adjlist.rs`: graph text format.

mod adjlist;
mod io;

use ndarray::{Array1, Array2, Array4, Axis};

use crate::complex::UndirectedGraph;
use crate::error::DatasetError;

pub use adjlist::{format_adjlist, parse_adjlist, ADJLIST_FILE};
pub use io::{
    load, save, B1_FILE, B2_FILE, BCONDS_FILE, DATASET_FILES, FLOWS_IN_FILE, LAST_NODES_FILE,
    TARGETS_FILE, TEST_MASK_FILE, TRAIN_MASK_FILE,
};

/// Arrays of one run. Axis 0 of the per-example tensors follows the hop list,
/// axis 1 the examples.
#[derive(Clone, Debug, PartialEq)]
pub struct Dataset {
    /// `(|H|, m, |E|, 1)`
    pub flows_in: Array4<f64>,
    /// `(|V|, |E|)`
    pub b1: Array2<f64>,
    /// `(|E|, |F|)`
    pub b2: Array2<f64>,
    /// `(|H|, m, D, |E|)`
    pub bconds: Array4<f64>,
    /// `(|H|, m, D, 1)`
    pub targets: Array4<f64>,
    pub train_mask: Array1<bool>,
    pub test_mask: Array1<bool>,
    pub graph: UndirectedGraph,
    /// Hop-1 pivot per example.
    pub last_nodes: Array1<i64>,
}

impl Dataset {
    pub fn hop_count(&self) -> usize {
        self.targets.len_of(Axis(0))
    }

    pub fn example_count(&self) -> usize {
        self.targets.len_of(Axis(1))
    }

    /// Padding width `D`.
    pub fn max_degree(&self) -> usize {
        self.targets.len_of(Axis(2))
    }

    pub fn node_count(&self) -> usize {
        self.b1.nrows()
    }

    pub fn edge_count(&self) -> usize {
        self.b1.ncols()
    }

    pub fn face_count(&self) -> usize {
        self.b2.ncols()
    }

    /// Position of the 1 in the target of (hop slot `k`, example `i`);
    /// `None` for a degenerate all-zero target.
    pub fn target_position(&self, k: usize, i: usize) -> Option<usize> {
        self.targets
            .index_axis(Axis(0), k)
            .index_axis(Axis(0), i)
            .column(0)
            .iter()
            .position(|&x| x == 1.0)
    }

    /// Number of candidate next nodes for (hop slot `k`, example `i`): the
    /// count of nonzero rows in its conditional incidence matrix.
    pub fn choice_count(&self, k: usize, i: usize) -> usize {
        self.bconds
            .index_axis(Axis(0), k)
            .index_axis(Axis(0), i)
            .rows()
            .into_iter()
            .filter(|row| row.iter().any(|&x| x != 0.0))
            .count()
    }

    /// Check that every array agrees on `|V|`, `|E|`, `|H|`, `m` and `D`.
    pub fn check_shapes(&self) -> Result<(), DatasetError> {
        let (n, e) = self.b1.dim();
        let (h, m, d, _) = self.targets.dim();
        let expect = |file: &str, got: Vec<usize>, want: Vec<usize>| {
            if got == want {
                Ok(())
            } else {
                Err(DatasetError::format(
                    file,
                    format!("shape {got:?}, expected {want:?}"),
                ))
            }
        };
        expect(ADJLIST_FILE, vec![self.graph.node_count()], vec![n])?;
        expect(B2_FILE, vec![self.b2.nrows()], vec![e])?;
        expect(FLOWS_IN_FILE, self.flows_in.shape().to_vec(), vec![h, m, e, 1])?;
        expect(BCONDS_FILE, self.bconds.shape().to_vec(), vec![h, m, d, e])?;
        expect(TARGETS_FILE, vec![self.targets.dim().3], vec![1])?;
        expect(TRAIN_MASK_FILE, vec![self.train_mask.len()], vec![m])?;
        expect(TEST_MASK_FILE, vec![self.test_mask.len()], vec![m])?;
        expect(LAST_NODES_FILE, vec![self.last_nodes.len()], vec![m])?;
        if let Some(&v) = self.last_nodes.iter().find(|&&v| v < 0 || v as usize >= n) {
            return Err(DatasetError::format(
                LAST_NODES_FILE,
                format!("node {v} outside 0..{n}"),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;

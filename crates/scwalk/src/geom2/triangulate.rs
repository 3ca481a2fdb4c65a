//! Triangulation backend seam.
//!
//! Purpose
//! - Turn a point cloud into triangles over node indices. The complex builder
//!   only needs this one capability, so it is a trait and tests can hand in
//!   fixed triangles.
//!
//! Default backend
//! - `DelaunayTriangulator` runs the incremental insertion of the `delaunay`
//!   crate. Each vertex carries its node index as vertex data, which is how
//!   cells are mapped back to node indices.

use delaunay::prelude::*;
use nalgebra::Vector2;

use super::types::Triangle;
use crate::error::SynthError;

/// Capability: triangulate a 2D point set.
pub trait Triangulator {
    fn triangulate(&self, points: &[Vector2<f64>]) -> Result<Vec<Triangle>, SynthError>;
}

/// Delaunay triangulation via the `delaunay` crate (fast predicates, f64).
#[derive(Clone, Copy, Debug, Default)]
pub struct DelaunayTriangulator;

impl Triangulator for DelaunayTriangulator {
    fn triangulate(&self, points: &[Vector2<f64>]) -> Result<Vec<Triangle>, SynthError> {
        if points.len() < 3 {
            return Err(SynthError::triangulation(format!(
                "need at least 3 points, got {}",
                points.len()
            )));
        }
        let vertices: Vec<Vertex<f64, usize, 2>> = points
            .iter()
            .enumerate()
            .map(|(i, p)| vertex!([p.x, p.y], i))
            .collect();
        let dt: DelaunayTriangulation<FastKernel<f64>, usize, (), 2> =
            DelaunayTriangulation::with_kernel(FastKernel::new(), &vertices)
                .map_err(|e| SynthError::triangulation(e.to_string()))?;

        let tds = dt.tds();
        let mut triangles = Vec::with_capacity(dt.number_of_cells());
        for (_, cell) in dt.cells() {
            let keys = cell.vertices();
            if keys.len() != 3 {
                return Err(SynthError::triangulation(format!(
                    "expected 3 vertices per cell, got {}",
                    keys.len()
                )));
            }
            let mut ids = [0usize; 3];
            for (slot, &key) in keys.iter().enumerate() {
                ids[slot] = tds
                    .get_vertex_by_key(key)
                    .and_then(|v| v.data)
                    .ok_or_else(|| SynthError::triangulation("cell vertex without node index"))?;
            }
            triangles.push(Triangle(ids));
        }
        Ok(triangles)
    }
}

/// Pre-computed triangles, returned as-is regardless of the points.
#[derive(Clone, Debug, Default)]
pub struct FixedTriangles(pub Vec<Triangle>);

impl Triangulator for FixedTriangles {
    fn triangulate(&self, points: &[Vector2<f64>]) -> Result<Vec<Triangle>, SynthError> {
        if let Some(t) = self.0.iter().find(|t| t.0.iter().any(|&v| v >= points.len())) {
            return Err(SynthError::triangulation(format!(
                "triangle {:?} references a node outside 0..{}",
                t.0,
                points.len()
            )));
        }
        Ok(self.0.clone())
    }
}

//! Basic 2D types for the sampling domain.
//!
//! - `Disk`: closed disk used to carve holes out of the unit square.
//! - `Triangle`: three node indices, sorted ascending once canonicalized.
//!
//! Points are plain `nalgebra::Vector2<f64>`; the node index is the position in
//! the point slice.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Closed disk `{ p : |p - center| <= radius }`.
///
/// A point on the circle counts as inside, so nodes exactly at distance
/// `radius` are excluded from the complex.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Disk {
    pub center: [f64; 2],
    pub radius: f64,
}

impl Disk {
    #[inline]
    pub const fn new(cx: f64, cy: f64, radius: f64) -> Self {
        Self {
            center: [cx, cy],
            radius,
        }
    }

    #[inline]
    pub fn center(&self) -> Vector2<f64> {
        Vector2::new(self.center[0], self.center[1])
    }

    #[inline]
    pub fn contains(&self, p: Vector2<f64>) -> bool {
        (p - self.center()).norm() <= self.radius
    }
}

/// Top-left hole: center (1/4, 3/4), radius 1/8.
pub const HOLE_TOP_LEFT: Disk = Disk::new(0.25, 0.75, 0.125);
/// Bottom-right hole: center (3/4, 1/4), radius 1/8.
pub const HOLE_BOTTOM_RIGHT: Disk = Disk::new(0.75, 0.25, 0.125);

/// The fixed two-hole pattern.
pub fn default_holes() -> Vec<Disk> {
    vec![HOLE_TOP_LEFT, HOLE_BOTTOM_RIGHT]
}

/// A point is valid iff it lies strictly outside every hole.
#[inline]
pub fn is_outside_holes(p: Vector2<f64>, holes: &[Disk]) -> bool {
    holes.iter().all(|h| !h.contains(p))
}

/// Triangle as three node indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Triangle(pub [usize; 3]);

impl Triangle {
    #[inline]
    pub fn new(a: usize, b: usize, c: usize) -> Self {
        Self([a, b, c])
    }

    /// Same triangle with vertices sorted ascending (a < b < c for distinct nodes).
    #[inline]
    pub fn sorted(self) -> Self {
        let mut v = self.0;
        v.sort_unstable();
        Self(v)
    }

    #[inline]
    pub fn vertices(&self) -> [usize; 3] {
        self.0
    }
}

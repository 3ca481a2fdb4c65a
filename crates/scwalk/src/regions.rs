//! Geometric partition of the valid nodes into walk waypoint regions.
//!
//! Model
//! - With `s = x + y` and `d = y − x`:
//!   BEGIN = {s < 1/4}, END = {s > 7/4},
//!   band A = {1/4 < s < 1}, band B = {1 < s < 7/4}.
//! - Each band is split by `d` into corridor 0 (|d| < 1/2), corridor 1
//!   (d > 1/2, top-left) and corridor 2 (d < −1/2, bottom-right).
//! - All bounds are strict, so a point exactly on a threshold is in no region.

use std::fmt;

use nalgebra::Vector2;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::complex::SimplicialComplex;
use crate::error::SynthError;

/// Number of middle corridors.
pub const CORRIDORS: usize = 3;

const BEGIN_MAX: f64 = 0.25;
const BAND_SPLIT: f64 = 1.0;
const END_MIN: f64 = 1.75;
const CORRIDOR_HALF_WIDTH: f64 = 0.5;

/// Named region; corridor index in `0..CORRIDORS` for the two middle bands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Region {
    Begin,
    A(usize),
    B(usize),
    End,
}

impl Region {
    /// All eight regions in walk order.
    pub fn all() -> [Region; 8] {
        [
            Region::Begin,
            Region::A(0),
            Region::A(1),
            Region::A(2),
            Region::B(0),
            Region::B(1),
            Region::B(2),
            Region::End,
        ]
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Region::Begin => write!(f, "BEGIN"),
            Region::A(c) => write!(f, "A{c}"),
            Region::B(c) => write!(f, "B{c}"),
            Region::End => write!(f, "END"),
        }
    }
}

fn corridor_of(d: f64) -> Option<usize> {
    if d.abs() < CORRIDOR_HALF_WIDTH {
        Some(0)
    } else if d > CORRIDOR_HALF_WIDTH {
        Some(1)
    } else if d < -CORRIDOR_HALF_WIDTH {
        Some(2)
    } else {
        None
    }
}

/// Region of a point, or `None` if it falls on a threshold.
pub fn classify(p: Vector2<f64>) -> Option<Region> {
    let s = p.x + p.y;
    let d = p.y - p.x;
    if s < BEGIN_MAX {
        Some(Region::Begin)
    } else if s > END_MIN {
        Some(Region::End)
    } else if s > BEGIN_MAX && s < BAND_SPLIT {
        corridor_of(d).map(Region::A)
    } else if s > BAND_SPLIT && s < END_MIN {
        corridor_of(d).map(Region::B)
    } else {
        None
    }
}

/// Disjoint node sets per region, each ascending.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegionPartition {
    pub begin: Vec<usize>,
    pub a: [Vec<usize>; CORRIDORS],
    pub b: [Vec<usize>; CORRIDORS],
    pub end: Vec<usize>,
}

impl RegionPartition {
    /// Partition `valid_idxs` by the position of each node.
    pub fn new(valid_idxs: &[usize], points: &[Vector2<f64>]) -> Self {
        let mut part = Self::default();
        for &v in valid_idxs {
            match classify(points[v]) {
                Some(Region::Begin) => part.begin.push(v),
                Some(Region::A(c)) => part.a[c].push(v),
                Some(Region::B(c)) => part.b[c].push(v),
                Some(Region::End) => part.end.push(v),
                None => {}
            }
        }
        part
    }

    pub fn from_complex(sc: &SimplicialComplex) -> Self {
        Self::new(&sc.valid_idxs, &sc.points)
    }

    /// Nodes of `region`; empty for a corridor index `>= CORRIDORS`.
    pub fn members(&self, region: Region) -> &[usize] {
        match region {
            Region::Begin => &self.begin,
            Region::A(c) => self.a.get(c).map(Vec::as_slice).unwrap_or(&[]),
            Region::B(c) => self.b.get(c).map(Vec::as_slice).unwrap_or(&[]),
            Region::End => &self.end,
        }
    }

    /// Uniformly draw one node of `region`.
    pub fn sample<R: Rng + ?Sized>(&self, region: Region, rng: &mut R) -> Result<usize, SynthError> {
        self.members(region)
            .choose(rng)
            .copied()
            .ok_or(SynthError::DegenerateRegion { region })
    }

    /// Fail on the first empty region, in walk order, among BEGIN, END and the
    /// first `corridors` corridors of both bands.
    pub fn require_nonempty(&self, corridors: usize) -> Result<(), SynthError> {
        let used = |r: &Region| match *r {
            Region::A(c) | Region::B(c) => c < corridors,
            Region::Begin | Region::End => true,
        };
        let empty = Region::all()
            .into_iter()
            .filter(used)
            .find(|&r| self.members(r).is_empty());
        match empty {
            Some(region) => Err(SynthError::DegenerateRegion { region }),
            None => Ok(()),
        }
    }

    /// `(region, size)` for every region, in walk order.
    pub fn sizes(&self) -> Vec<(Region, usize)> {
        Region::all()
            .into_iter()
            .map(|r| (r, self.members(r).len()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom2::sample_unit_square;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn classify_reference_points() {
        assert_eq!(classify(Vector2::new(0.05, 0.1)), Some(Region::Begin));
        assert_eq!(classify(Vector2::new(0.95, 0.9)), Some(Region::End));
        assert_eq!(classify(Vector2::new(0.3, 0.3)), Some(Region::A(0)));
        assert_eq!(classify(Vector2::new(0.05, 0.8)), Some(Region::A(1)));
        assert_eq!(classify(Vector2::new(0.8, 0.05)), Some(Region::A(2)));
        assert_eq!(classify(Vector2::new(0.6, 0.6)), Some(Region::B(0)));
        assert_eq!(classify(Vector2::new(0.2, 0.95)), Some(Region::B(1)));
        assert_eq!(classify(Vector2::new(0.95, 0.2)), Some(Region::B(2)));
    }

    #[test]
    fn threshold_points_fall_in_no_region() {
        assert_eq!(classify(Vector2::new(0.125, 0.125)), None); // s = 1/4
        assert_eq!(classify(Vector2::new(0.5, 0.5)), None); // s = 1
        assert_eq!(classify(Vector2::new(0.875, 0.875)), None); // s = 7/4
        assert_eq!(classify(Vector2::new(0.125, 0.625)), None); // d = 1/2
        assert_eq!(classify(Vector2::new(0.625, 0.125)), None); // d = -1/2
    }

    #[test]
    fn partition_is_disjoint() {
        let points = sample_unit_square(2000, &mut StdRng::seed_from_u64(1));
        let idxs: Vec<usize> = (0..points.len()).collect();
        let part = RegionPartition::new(&idxs, &points);
        let mut seen = vec![0u8; points.len()];
        for r in Region::all() {
            for &v in part.members(r) {
                seen[v] += 1;
            }
        }
        assert!(seen.iter().all(|&k| k <= 1));
        assert!(part.require_nonempty(CORRIDORS).is_ok());
        let total: usize = part.sizes().iter().map(|(_, k)| k).sum();
        assert_eq!(total, seen.iter().filter(|&&k| k == 1).count());
    }

    #[test]
    fn empty_region_is_reported() {
        let points = vec![Vector2::new(0.05, 0.05), Vector2::new(0.95, 0.95)];
        let part = RegionPartition::new(&[0, 1], &points);
        assert_eq!(
            part.require_nonempty(CORRIDORS),
            Err(SynthError::DegenerateRegion { region: Region::A(0) })
        );
        assert_eq!(part.require_nonempty(0), Ok(()));
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(part.sample(Region::Begin, &mut rng), Ok(0));
        assert_eq!(
            part.sample(Region::B(2), &mut rng),
            Err(SynthError::DegenerateRegion { region: Region::B(2) })
        );
    }

    #[test]
    fn out_of_range_corridor_is_empty() {
        let points = sample_unit_square(500, &mut StdRng::seed_from_u64(3));
        let idxs: Vec<usize> = (0..points.len()).collect();
        let part = RegionPartition::new(&idxs, &points);
        assert!(part.members(Region::A(CORRIDORS)).is_empty());
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            part.sample(Region::B(7), &mut rng),
            Err(SynthError::DegenerateRegion { region: Region::B(7) })
        );
    }
}

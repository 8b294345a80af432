//! Configuration space and sample pools
//!
//! A [`Configuration`] is one point in the mechanism's joint space. Planners
//! search over a fixed pool of configurations held by a [`SampleSpace`],
//! generated up front by a [`SampleGenerator`].

mod generator;

pub use self::generator::{HaltonGenerator, SampleGenerator, UniformGenerator};

use crate::error::{PlanError, PlanResult};
use nalgebra::DVector;

/// A point in joint space, one coordinate per joint
pub type Configuration = DVector<f64>;

/// Sample pool consumed by the planning trees
pub trait SampleSpace {
    /// Add a configuration and return its index
    fn insert(&mut self, point: Configuration) -> PlanResult<usize>;

    /// Stop offering `index` as a neighbor. Removing twice is a no-op.
    fn remove(&mut self, index: usize);

    /// Up to `k` live indices nearest to `point`, closest first
    fn k_nearest(&self, point: &Configuration, k: usize) -> Vec<usize>;

    /// Coordinates of `index`, removed or not
    fn get(&self, index: usize) -> &Configuration;

    /// Number of indices ever allocated
    fn size(&self) -> usize;

    /// Dimension of every stored configuration
    fn dimension(&self) -> usize;
}

/// Exhaustive-scan sample pool
///
/// Indices are stable: removal tombstones a slot instead of compacting.
#[derive(Debug, Clone)]
pub struct LinearSampleSpace {
    dimension: usize,
    points: Vec<Configuration>,
    removed: Vec<bool>,
    live: usize,
}

impl LinearSampleSpace {
    /// Create an empty pool of the given dimension
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            points: Vec::new(),
            removed: Vec::new(),
            live: 0,
        }
    }

    /// Create a pool holding `points`, indexed in order
    pub fn from_points(dimension: usize, points: Vec<Configuration>) -> PlanResult<Self> {
        let mut space = Self::new(dimension);
        space.points.reserve(points.len());
        space.removed.reserve(points.len());
        for point in points {
            space.insert(point)?;
        }
        Ok(space)
    }

    /// Number of indices still offered as neighbors
    pub fn live_len(&self) -> usize {
        self.live
    }

    /// Whether `index` has been removed
    pub fn is_removed(&self, index: usize) -> bool {
        self.removed.get(index).copied().unwrap_or(true)
    }
}

impl SampleSpace for LinearSampleSpace {
    fn insert(&mut self, point: Configuration) -> PlanResult<usize> {
        if point.len() != self.dimension {
            return Err(PlanError::DimensionMismatch {
                expected: self.dimension,
                actual: point.len(),
            });
        }
        self.points.push(point);
        self.removed.push(false);
        self.live += 1;
        Ok(self.points.len() - 1)
    }

    fn remove(&mut self, index: usize) {
        if let Some(flag) = self.removed.get_mut(index) {
            if !*flag {
                *flag = true;
                self.live -= 1;
            }
        }
    }

    fn k_nearest(&self, point: &Configuration, k: usize) -> Vec<usize> {
        let mut candidates: Vec<(f64, usize)> = self
            .points
            .iter()
            .enumerate()
            .filter(|(index, _)| !self.removed[*index])
            .map(|(index, p)| ((p - point).norm_squared(), index))
            .collect();

        candidates.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        candidates.truncate(k);
        candidates.into_iter().map(|(_, index)| index).collect()
    }

    fn get(&self, index: usize) -> &Configuration {
        &self.points[index]
    }

    fn size(&self) -> usize {
        self.points.len()
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

/// Total Euclidean length of a waypoint sequence
pub fn path_length(path: &[Configuration]) -> f64 {
    path.windows(2).map(|w| (&w[1] - &w[0]).norm()).sum()
}

//! Point mechanism among analytic obstacles
//!
//! Every configuration coordinate is treated as a position, so clearance is a
//! plain Euclidean distance to the nearest obstacle surface. Per-axis scales
//! stand in for joint lever arms: a joint that sweeps the mechanism further
//! per radian gets a proportionally smaller bubble radius.

use super::CollisionOracle;
use crate::bubble::Bubble;
use crate::error::{PlanError, PlanResult};
use crate::space::Configuration;
use serde::{Deserialize, Serialize};

/// Clearance reported to bubbles when the world has no obstacles
const OPEN_SPACE_CLEARANCE: f64 = 1.0e3;

/// Analytic obstacle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Obstacle {
    /// Solid ball
    Sphere { center: Vec<f64>, radius: f64 },
    /// Infinite slab `min <= q[axis] <= max`
    Band { axis: usize, min: f64, max: f64 },
}

impl Obstacle {
    /// Solid ball obstacle
    pub fn sphere(center: Vec<f64>, radius: f64) -> Self {
        Obstacle::Sphere { center, radius }
    }

    /// Slab obstacle across `axis`
    pub fn band(axis: usize, min: f64, max: f64) -> Self {
        Obstacle::Band { axis, min, max }
    }

    /// Distance from `point` to the obstacle surface, 0 inside
    pub fn distance(&self, point: &Configuration) -> f64 {
        match self {
            Obstacle::Sphere { center, radius } => {
                let squared: f64 = point
                    .iter()
                    .zip(center)
                    .map(|(p, c)| (p - c) * (p - c))
                    .sum();
                (squared.sqrt() - radius).max(0.0)
            }
            Obstacle::Band { axis, min, max } => {
                let value = point[*axis];
                if value < *min {
                    min - value
                } else if value > *max {
                    value - max
                } else {
                    0.0
                }
            }
        }
    }

    fn check(&self, dimension: usize) -> PlanResult<()> {
        match self {
            Obstacle::Sphere { center, radius } => {
                if center.len() != dimension {
                    return Err(PlanError::DimensionMismatch {
                        expected: dimension,
                        actual: center.len(),
                    });
                }
                if !radius.is_finite() || *radius < 0.0 {
                    return Err(PlanError::invalid(format!(
                        "sphere radius must be finite and non-negative, got {}",
                        radius
                    )));
                }
            }
            Obstacle::Band { axis, min, max } => {
                if *axis >= dimension {
                    return Err(PlanError::invalid(format!(
                        "band axis {} out of range for dimension {}",
                        axis, dimension
                    )));
                }
                if min > max {
                    return Err(PlanError::invalid(format!(
                        "band bounds are reversed: [{}, {}]",
                        min, max
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Point mechanism environment
#[derive(Debug, Clone)]
pub struct PointWorld {
    dimension: usize,
    clearance_threshold: f64,
    axis_scale: Vec<f64>,
    obstacles: Vec<Obstacle>,
    bubble_counter: usize,
    collision_counter: usize,
}

impl PointWorld {
    /// Create an empty world; configurations closer than `min_clearance` to
    /// an obstacle count as colliding
    pub fn new(dimension: usize, min_clearance: f64) -> Self {
        Self {
            dimension,
            clearance_threshold: min_clearance,
            axis_scale: vec![1.0; dimension],
            obstacles: Vec::new(),
            bubble_counter: 0,
            collision_counter: 0,
        }
    }

    /// Builder form of [`add_obstacle`](Self::add_obstacle)
    pub fn with_obstacle(mut self, obstacle: Obstacle) -> PlanResult<Self> {
        self.add_obstacle(obstacle)?;
        Ok(self)
    }

    /// Add an obstacle
    pub fn add_obstacle(&mut self, obstacle: Obstacle) -> PlanResult<()> {
        obstacle.check(self.dimension)?;
        self.obstacles.push(obstacle);
        Ok(())
    }

    /// Set per-axis lever scales (each finite and at least 1)
    pub fn set_axis_scale(&mut self, axis_scale: Vec<f64>) -> PlanResult<()> {
        if axis_scale.len() != self.dimension {
            return Err(PlanError::DimensionMismatch {
                expected: self.dimension,
                actual: axis_scale.len(),
            });
        }
        if let Some(bad) = axis_scale.iter().find(|s| !s.is_finite() || **s < 1.0) {
            return Err(PlanError::invalid(format!(
                "axis scale must be finite and at least 1, got {}",
                bad
            )));
        }
        self.axis_scale = axis_scale;
        Ok(())
    }

    /// Obstacles in the world
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    /// Configuration dimension
    pub fn dimension(&self) -> usize {
        self.dimension
    }
}

impl CollisionOracle for PointWorld {
    fn try_make_bubble(&mut self, point: &Configuration) -> Option<Bubble> {
        self.bubble_counter += 1;

        let clearance = self.min_clearance(point).min(OPEN_SPACE_CLEARANCE);
        if clearance.is_nan() || clearance < self.clearance_threshold || clearance <= 0.0 {
            return None;
        }

        let mut bubble = Bubble::new(point.clone(), clearance);
        for (axis, scale) in self.axis_scale.iter().enumerate() {
            bubble.shrink_axis(axis, clearance / scale);
        }
        Some(bubble)
    }

    fn collision_ok(&mut self, point: &Configuration) -> bool {
        self.collision_counter += 1;
        self.min_clearance(point) >= self.clearance_threshold
    }

    fn min_clearance(&self, point: &Configuration) -> f64 {
        self.obstacles
            .iter()
            .map(|obstacle| obstacle.distance(point))
            .fold(f64::INFINITY, f64::min)
    }

    fn bubble_count(&self) -> usize {
        self.bubble_counter
    }

    fn collision_count(&self) -> usize {
        self.collision_counter
    }
}

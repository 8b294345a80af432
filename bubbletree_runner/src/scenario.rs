//! Scenario files
//!
//! ```toml
//! limits = [[0.0, 1.0], [0.0, 1.0]]
//! start = [0.0, 0.0]
//! goal = [1.0, 1.0]
//! samples = 200
//! seed = 0
//! generator = "halton"
//!
//! [[obstacles]]
//! type = "sphere"
//! center = [0.5, 0.5]
//! radius = 0.1
//!
//! [planner]
//! knn_num = 10
//! ```

use crate::cli::Generator;
use anyhow::{bail, Context, Result};
use bubbletree::environment::{Obstacle, PointWorld};
use bubbletree::space::{
    HaltonGenerator, LinearSampleSpace, SampleGenerator, UniformGenerator,
};
use bubbletree::{Configuration, PlannerParams};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One planning problem, replayed by every trial
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    /// Per-axis `[low, high]` sampling range
    pub limits: Vec<(f64, f64)>,
    pub start: Vec<f64>,
    pub goal: Vec<f64>,
    /// Pool size, excluding start and goal
    pub samples: usize,
    pub seed: u64,
    pub generator: Generator,
    pub obstacles: Vec<Obstacle>,
    /// Optional per-axis lever scales
    pub axis_scale: Option<Vec<f64>>,
    pub planner: PlannerParams,
}

impl Default for Scenario {
    /// Unit square with a small ball in the middle
    fn default() -> Self {
        Self {
            limits: vec![(0.0, 1.0), (0.0, 1.0)],
            start: vec![0.0, 0.0],
            goal: vec![1.0, 1.0],
            samples: 50,
            seed: 0,
            generator: Generator::Halton,
            obstacles: vec![Obstacle::sphere(vec![0.5, 0.5], 0.1)],
            axis_scale: None,
            planner: PlannerParams::default(),
        }
    }
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("invalid scenario {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let scenario: Self = toml::from_str(content)?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn dimension(&self) -> usize {
        self.limits.len()
    }

    pub fn validate(&self) -> Result<()> {
        let dimension = self.dimension();
        if dimension == 0 {
            bail!("scenario needs at least one joint limit");
        }
        if self.start.len() != dimension || self.goal.len() != dimension {
            bail!(
                "start and goal must have {} coordinates, got {} and {}",
                dimension,
                self.start.len(),
                self.goal.len()
            );
        }
        self.planner.validate()?;
        Ok(())
    }

    pub fn start(&self) -> Configuration {
        Configuration::from_vec(self.start.clone())
    }

    pub fn goal(&self) -> Configuration {
        Configuration::from_vec(self.goal.clone())
    }

    /// Fresh world with zeroed counters
    pub fn build_world(&self) -> Result<PointWorld> {
        let mut world = PointWorld::new(self.dimension(), self.planner.min_clearance);
        for obstacle in &self.obstacles {
            world.add_obstacle(obstacle.clone())?;
        }
        if let Some(axis_scale) = &self.axis_scale {
            world.set_axis_scale(axis_scale.clone())?;
        }
        Ok(world)
    }

    /// Sample pool for one trial
    pub fn build_space(&self, generator: Generator, seed: u64) -> Result<LinearSampleSpace> {
        let points = match generator {
            Generator::Uniform => {
                UniformGenerator::new(&self.limits, seed)?.sample_space(self.samples)
            }
            Generator::Halton => {
                HaltonGenerator::from_seed(&self.limits, seed)?.sample_space(self.samples)
            }
        };
        Ok(LinearSampleSpace::from_points(self.dimension(), points)?)
    }
}

//! # Bubbletree
//!
//! Sampling-based motion planning over a precomputed pool of configurations,
//! certified with free-space "bubbles".
//!
//! ## Structure
//!
//! ```text
//! bubbletree/
//! ── space/         # Configurations, sample pools, sample generators
//! ── environment/   # Collision oracle contract and a point-robot world
//! ── bubble/        # Bubble certificates and hull intersection
//! ── tree/          # Frontier, BubbleTree and StepTree planners
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use bubbletree::environment::{Obstacle, PointWorld};
//! use bubbletree::space::{HaltonGenerator, LinearSampleSpace, SampleGenerator};
//! use bubbletree::tree::{BubbleTree, PlannerTree};
//! use bubbletree::{Configuration, PlannerParams};
//!
//! let limits = vec![(0.0, 1.0), (0.0, 1.0)];
//! let mut generator = HaltonGenerator::new(&limits, 20).unwrap();
//! let space = LinearSampleSpace::from_points(2, generator.sample_space(200)).unwrap();
//!
//! let params = PlannerParams::default();
//! let world = PointWorld::new(2, params.min_clearance)
//!     .with_obstacle(Obstacle::sphere(vec![0.5, 0.5], 0.1))
//!     .unwrap();
//!
//! let start = Configuration::from_vec(vec![0.0, 0.0]);
//! let goal = Configuration::from_vec(vec![1.0, 1.0]);
//! let mut tree = BubbleTree::new(space, world, start, goal, &params).unwrap();
//!
//! if tree.build_tree().is_ok() {
//!     let path = tree.generate_path().unwrap();
//!     println!("Found path with {} waypoints", path.len());
//! }
//! ```

pub mod bubble;
pub mod environment;
pub mod error;
pub mod params;
pub mod space;
pub mod tree;

pub use bubble::{Bubble, BubbleId};
pub use error::{PlanError, PlanResult};
pub use params::PlannerParams;
pub use space::Configuration;

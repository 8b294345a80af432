//! Collision environment
//!
//! The planning trees only ever ask two questions of the environment: how much
//! clearance a configuration has, and whether a bubble can be built there.
//! How the answer is computed (meshes, kinematic chains, analytic shapes) is
//! hidden behind [`CollisionOracle`].

mod point_world;

pub use self::point_world::{Obstacle, PointWorld};

use crate::bubble::Bubble;
use crate::space::Configuration;

/// Clearance queries consumed by the planning trees
///
/// Every call is synchronous and may be expensive. A single failed attempt is
/// definitive for that configuration; trees never retry.
pub trait CollisionOracle {
    /// Build a bubble at `point`, or `None` if its clearance is below the
    /// minimum threshold. Counts toward [`bubble_count`](Self::bubble_count).
    fn try_make_bubble(&mut self, point: &Configuration) -> Option<Bubble>;

    /// Whether `point` keeps at least the minimum clearance. Counts toward
    /// [`collision_count`](Self::collision_count).
    fn collision_ok(&mut self, point: &Configuration) -> bool;

    /// Raw clearance at `point`
    fn min_clearance(&self, point: &Configuration) -> f64;

    /// Number of bubble construction attempts so far
    fn bubble_count(&self) -> usize;

    /// Number of collision checks so far
    fn collision_count(&self) -> usize;
}

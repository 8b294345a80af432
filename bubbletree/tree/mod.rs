//! Planning trees over a sample pool
//!
//! Both planners grow a tree from the start configuration best-first: every
//! point added to the tree offers edges to its nearest unvisited neighbors,
//! and the cheapest edge on the [`Frontier`] is attempted next.
//!
//! - **BubbleTree**: certifies edges with free-space bubbles and a bounded
//!   breadth-first bisection between them
//! - **StepTree**: certifies edges with discrete collision checks along the
//!   straight segment
//!
//! # Example
//!
//! ```rust
//! use bubbletree::environment::PointWorld;
//! use bubbletree::space::LinearSampleSpace;
//! use bubbletree::tree::{PlannerTree, StepTree, TreeState};
//! use bubbletree::{Configuration, PlannerParams};
//!
//! let params = PlannerParams::default().with_step_size(0.05);
//! let space = LinearSampleSpace::new(2);
//! let world = PointWorld::new(2, params.min_clearance);
//! let start = Configuration::from_vec(vec![0.0, 0.0]);
//! let goal = Configuration::from_vec(vec![1.0, 0.0]);
//!
//! let mut tree = StepTree::new(space, world, start, goal, &params).unwrap();
//! tree.build_tree().unwrap();
//! assert_eq!(tree.state(), TreeState::Succeeded);
//! assert_eq!(tree.generate_path().unwrap().len(), 2);
//! ```

mod bubble_tree;
mod frontier;
mod step_tree;


pub use self::bubble_tree::BubbleTree;
pub use self::frontier::{Edge, Frontier};
pub use self::step_tree::StepTree;

use crate::bubble::Bubble;
use crate::environment::CollisionOracle;
use crate::error::{PlanError, PlanResult};
use crate::params::PlannerParams;
use crate::space::{Configuration, SampleSpace};
use serde::Serialize;
use tracing::{debug, info, trace, warn};

/// Lifecycle of one planning query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TreeState {
    Init,
    Growing,
    Succeeded,
    Failed,
}

/// Counters collected while growing a tree
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TreeStats {
    /// Points added to the tree
    pub expansions: usize,
    /// Edges pushed onto the frontier
    pub edges_pushed: usize,
    /// Edges popped from the frontier
    pub frontier_pops: usize,
    /// Popped edges whose target was already visited
    pub stale_edges: usize,
    /// Popped edges that failed to connect
    pub rejected_edges: usize,
    /// Neighbors that could not host the tree and were dropped from the pool
    pub discarded_points: usize,
    /// Mid-bubble construction attempts during bisection
    pub mid_bubbles: usize,
    /// Oracle bubble constructions, snapshot at the end of the build
    pub bubble_count: usize,
    /// Oracle collision checks, snapshot at the end of the build
    pub collision_count: usize,
}

/// State shared by every tree variant
///
/// Owns the sample pool and the collision oracle for the lifetime of the query.
#[derive(Debug)]
pub struct TreeCore<S, O> {
    space: S,
    oracle: O,
    start_index: usize,
    goal_index: usize,
    knn_num: usize,
    min_clearance: f64,
    visited: Vec<bool>,
    frontier: Frontier,
    state: TreeState,
    stats: TreeStats,
}

impl<S: SampleSpace, O: CollisionOracle> TreeCore<S, O> {
    /// Insert `start` and `goal` into the pool and set up an empty tree
    pub fn new(
        mut space: S,
        oracle: O,
        start: Configuration,
        goal: Configuration,
        params: &PlannerParams,
    ) -> PlanResult<Self> {
        params.validate()?;
        let dimension = space.dimension();
        for point in [&start, &goal] {
            if point.len() != dimension {
                return Err(PlanError::DimensionMismatch {
                    expected: dimension,
                    actual: point.len(),
                });
            }
        }
        let start_index = space.insert(start)?;
        let goal_index = space.insert(goal)?;
        let visited = vec![false; space.size()];

        Ok(Self {
            space,
            oracle,
            start_index,
            goal_index,
            knn_num: params.knn_num,
            min_clearance: params.min_clearance,
            visited,
            frontier: Frontier::new(),
            state: TreeState::Init,
            stats: TreeStats::default(),
        })
    }

    pub fn space(&self) -> &S {
        &self.space
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    pub fn start_index(&self) -> usize {
        self.start_index
    }

    pub fn goal_index(&self) -> usize {
        self.goal_index
    }

    pub fn state(&self) -> TreeState {
        self.state
    }

    pub fn stats(&self) -> &TreeStats {
        &self.stats
    }

    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    /// Clearance a configuration needs to host the tree
    pub fn min_clearance(&self) -> f64 {
        self.min_clearance
    }

    /// Whether `index` has been added to the tree or discarded
    pub fn is_visited(&self, index: usize) -> bool {
        self.visited.get(index).copied().unwrap_or(false)
    }

    /// Coordinates of a sample index
    pub fn point(&self, index: usize) -> &Configuration {
        self.space.get(index)
    }

    /// Goal-biased priority of reaching `index`
    fn weight(&self, index: usize) -> f64 {
        let point = self.space.get(index);
        (self.space.get(self.goal_index) - point).norm()
            + (self.space.get(self.start_index) - point).norm()
    }

    /// Set the visited flag; false if it was already set
    fn mark_visited(&mut self, index: usize) -> bool {
        if self.visited[index] {
            return false;
        }
        self.visited[index] = true;
        true
    }

    /// Drop a point that can never join the tree
    fn discard_point(&mut self, index: usize) {
        self.visited[index] = true;
        self.space.remove(index);
        self.stats.discarded_points += 1;
    }

    /// Whether `bubble` is usable under this query's clearance threshold
    fn accepts_bubble(&self, bubble: &Bubble) -> bool {
        bubble.is_valid() && bubble.clearance() >= self.min_clearance
    }

    /// Collision check against both the oracle and this query's threshold
    fn point_free(&mut self, point: &Configuration) -> bool {
        self.oracle.collision_ok(point) && self.oracle.min_clearance(point) >= self.min_clearance
    }

    fn push_edge(&mut self, from: usize, to: usize) {
        let weight = self.weight(to);
        self.frontier.push(from, to, weight);
        self.stats.edges_pushed += 1;
    }

    fn snapshot_oracle(&mut self) {
        self.stats.bubble_count = self.oracle.bubble_count();
        self.stats.collision_count = self.oracle.collision_count();
    }
}

/// Tree growth shared by every planner variant
///
/// Variants supply endpoint certification, neighbor admission, and edge
/// connection; the frontier loop and expansion logic are provided.
pub trait PlannerTree {
    type Space: SampleSpace;
    type Oracle: CollisionOracle;

    fn core(&self) -> &TreeCore<Self::Space, Self::Oracle>;

    fn core_mut(&mut self) -> &mut TreeCore<Self::Space, Self::Oracle>;

    /// Certify the start and goal configurations
    fn prepare_endpoints(&mut self) -> PlanResult<()>;

    /// Whether the unvisited neighbor `index` can host the tree at all
    fn admit_neighbor(&mut self, index: usize) -> bool;

    /// Try to certify the edge `from -> to` and link `to` under `from`
    fn connect_points(&mut self, from: usize, to: usize) -> bool;

    /// Whether a parent chain reaches the goal
    fn goal_linked(&self) -> bool;

    /// Ordered waypoints from start to goal
    fn generate_path(&self) -> PlanResult<Vec<Configuration>>;

    fn state(&self) -> TreeState {
        self.core().state()
    }

    fn stats(&self) -> &TreeStats {
        self.core().stats()
    }

    /// Add `index` to the tree and offer edges to its nearest neighbors
    ///
    /// Idempotent: a visited index is ignored.
    fn add_point_to_tree(&mut self, index: usize) {
        let core = self.core_mut();
        if !core.mark_visited(index) {
            return;
        }
        core.space.remove(index);
        core.stats.expansions += 1;

        let neighbors = core.space.k_nearest(core.space.get(index), core.knn_num);
        for neighbor in neighbors {
            if self.core().is_visited(neighbor) {
                continue;
            }
            if !self.admit_neighbor(neighbor) {
                trace!(point = neighbor, "neighbor cannot host the tree, discarded");
                self.core_mut().discard_point(neighbor);
                continue;
            }
            self.core_mut().push_edge(index, neighbor);
        }
    }

    /// Grow the tree until the goal is reached or the frontier empties
    fn build_tree(&mut self) -> PlanResult<()> {
        match self.core().state {
            TreeState::Init => {}
            TreeState::Succeeded => return Ok(()),
            TreeState::Growing | TreeState::Failed => return Err(PlanError::NotBuilt),
        }

        let start = self.core().start_index;
        let goal = self.core().goal_index;
        info!(
            samples = self.core().space.size(),
            knn = self.core().knn_num,
            "building tree"
        );

        if let Err(err) = self.prepare_endpoints() {
            warn!("query rejected: {}", err);
            let core = self.core_mut();
            core.state = TreeState::Failed;
            core.snapshot_oracle();
            return Err(err);
        }

        self.core_mut().state = TreeState::Growing;
        self.add_point_to_tree(start);

        while !self.core().is_visited(goal) {
            let Some(edge) = self.core_mut().frontier.pop() else {
                break;
            };
            self.core_mut().stats.frontier_pops += 1;

            if self.core().is_visited(edge.to) {
                self.core_mut().stats.stale_edges += 1;
                continue;
            }

            if self.connect_points(edge.from, edge.to) {
                debug!(from = edge.from, to = edge.to, weight = edge.weight, "edge connected");
                self.add_point_to_tree(edge.to);
            } else {
                trace!(from = edge.from, to = edge.to, "edge rejected");
                self.core_mut().stats.rejected_edges += 1;
            }
        }

        let succeeded = self.core().is_visited(goal) && self.goal_linked();
        let core = self.core_mut();
        core.snapshot_oracle();
        if succeeded {
            core.state = TreeState::Succeeded;
            info!(
                expansions = core.stats.expansions,
                bubbles = core.stats.bubble_count,
                collision_checks = core.stats.collision_count,
                "goal reached"
            );
            Ok(())
        } else {
            core.state = TreeState::Failed;
            info!(
                expansions = core.stats.expansions,
                rejected = core.stats.rejected_edges,
                "frontier exhausted without reaching the goal"
            );
            Err(PlanError::NoPath)
        }
    }
}

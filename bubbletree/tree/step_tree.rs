//! Step-sampling tree
//!
//! Same best-first growth as [`BubbleTree`](super::BubbleTree), but an edge is
//! certified by walking the straight segment at a fixed step and checking
//! every step for collision. No geometry beyond clearance is needed; the cost
//! is one collision check per step of every attempted edge.

use super::{PlannerTree, TreeCore};
use crate::environment::CollisionOracle;
use crate::error::{PlanError, PlanResult};
use crate::params::PlannerParams;
use crate::space::{Configuration, SampleSpace};

/// Tree planner certified by interpolated collision checks
#[derive(Debug)]
pub struct StepTree<S, O> {
    core: TreeCore<S, O>,
    parents: Vec<Option<usize>>,
    known_free: Vec<bool>,
    step_size: f64,
}

impl<S: SampleSpace, O: CollisionOracle> StepTree<S, O> {
    /// Create a planning query over `space`; `start` and `goal` are added to the pool
    pub fn new(
        space: S,
        oracle: O,
        start: Configuration,
        goal: Configuration,
        params: &PlannerParams,
    ) -> PlanResult<Self> {
        let core = TreeCore::new(space, oracle, start, goal, params)?;
        let size = core.space.size();
        Ok(Self {
            core,
            parents: vec![None; size],
            known_free: vec![false; size],
            step_size: params.step_size,
        })
    }

    /// Tree parent of a sample index
    pub fn parent_of(&self, index: usize) -> Option<usize> {
        self.parents.get(index).copied().flatten()
    }

    pub fn step_size(&self) -> f64 {
        self.step_size
    }

    /// Sample indices from start to goal
    pub fn path_indices(&self) -> PlanResult<Vec<usize>> {
        let start = self.core.start_index;
        let goal = self.core.goal_index;
        if self.parents[goal].is_none() {
            return Err(PlanError::NoPath);
        }

        let mut path = vec![goal];
        let mut current = goal;
        while let Some(parent) = self.parents[current] {
            if path.len() > self.parents.len() {
                return Err(PlanError::BrokenChain { steps: path.len() });
            }
            path.push(parent);
            current = parent;
        }
        if current != start {
            return Err(PlanError::BrokenChain { steps: path.len() });
        }

        path.reverse();
        Ok(path)
    }

    /// Collision-check `index` once; later calls reuse the answer
    fn check_point(&mut self, index: usize) -> bool {
        if self.known_free[index] {
            return true;
        }
        let point = self.core.space.get(index).clone();
        let free = self.core.point_free(&point);
        self.known_free[index] = free;
        free
    }

    /// Walk `from -> to` at `step_size`, checking every step and the endpoint
    fn segment_free(&mut self, from: &Configuration, to: &Configuration) -> bool {
        let delta = to - from;
        let length = delta.norm();
        if length == 0.0 {
            return true;
        }

        let step = delta * (self.step_size / length);
        let steps = (length / self.step_size).floor() as usize;
        let mut probe = from.clone();
        for _ in 0..=steps {
            if !self.core.point_free(&probe) {
                return false;
            }
            probe += &step;
        }
        self.core.point_free(to)
    }
}

impl<S: SampleSpace, O: CollisionOracle> PlannerTree for StepTree<S, O> {
    type Space = S;
    type Oracle = O;

    fn core(&self) -> &TreeCore<S, O> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut TreeCore<S, O> {
        &mut self.core
    }

    fn prepare_endpoints(&mut self) -> PlanResult<()> {
        if !self.check_point(self.core.start_index) {
            return Err(PlanError::CollisionAtStart);
        }
        if !self.check_point(self.core.goal_index) {
            return Err(PlanError::CollisionAtGoal);
        }
        Ok(())
    }

    fn admit_neighbor(&mut self, index: usize) -> bool {
        self.check_point(index)
    }

    fn connect_points(&mut self, from: usize, to: usize) -> bool {
        let from_point = self.core.space.get(from).clone();
        let to_point = self.core.space.get(to).clone();
        if !self.segment_free(&from_point, &to_point) {
            return false;
        }
        self.parents[to] = Some(from);
        true
    }

    fn goal_linked(&self) -> bool {
        self.parent_of(self.core.goal_index).is_some()
    }

    fn generate_path(&self) -> PlanResult<Vec<Configuration>> {
        Ok(self
            .path_indices()?
            .into_iter()
            .map(|index| self.core.space.get(index).clone())
            .collect())
    }
}
